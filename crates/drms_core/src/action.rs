//! Discrete user inputs understood by [`crate::Demo`].
use std::fmt;

/// One user-triggered event.  The windowing layer maps its own key codes
/// onto these; the core never sees a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    CycleMultisample,
    ToggleDualResolution,
    CycleResolution,
    Quit,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Self::CycleMultisample,
        Self::ToggleDualResolution,
        Self::CycleResolution,
        Self::Quit,
    ];

    /// Short help text, printed next to the key binding at startup.
    pub const fn description(self) -> &'static str {
        match self {
            Self::CycleMultisample => "cycles the multisample mode (NONE, MSAA4, DRMS4)",
            Self::ToggleDualResolution => "toggles between no multisampling and DRMS4",
            Self::CycleResolution => "cycles the base resolution (FULL, HALF, QUARTER)",
            Self::Quit => "quits",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// What the caller has to do after an action was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The mode changed and the target was rebuilt; refresh the title.
    Reconfigured,
    /// Leave the event loop.
    Exit,
}
