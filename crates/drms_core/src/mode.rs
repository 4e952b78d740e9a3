//! User-selectable rendering modes.
//!
//! Two independent axes are combined into a [`ModeState`]:
//!
//! | axis                | values                        |
//! |---------------------|-------------------------------|
//! | [`MultisampleMode`] | `NONE`, `MSAA4`, `DRMS4`      |
//! | [`ResolutionDivisor`] | `FULL`, `HALF`, `QUARTER`   |
//!
//! Every combination is valid.  The mutators are total functions over the
//! enums, so there is no "out of range" state to recover from.
use std::fmt;

/// How the off-screen target is sampled and later resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MultisampleMode {
    /// Single sample per texel, nearest-neighbour upscale.
    #[default]
    None,
    /// 4 samples per texel, box-filtered on resolve.
    Msaa4,
    /// Dual-resolution multisample: 4 samples per coarse texel, each one
    /// becoming its own output pixel.
    Drms4,
}

impl MultisampleMode {
    pub const ALL: [MultisampleMode; 3] = [Self::None, Self::Msaa4, Self::Drms4];

    /// None → Msaa4 → Drms4 → None.
    pub const fn next(self) -> Self {
        match self {
            Self::None => Self::Msaa4,
            Self::Msaa4 => Self::Drms4,
            Self::Drms4 => Self::None,
        }
    }

    /// Whether the render target stores more than one sample per texel.
    #[inline]
    pub const fn is_multisampled(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Integer code handed to the resolve shader.
    #[inline]
    pub const fn shader_code(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Msaa4 => 1,
            Self::Drms4 => 2,
        }
    }
}

impl fmt::Display for MultisampleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "NONE",
            Self::Msaa4 => "MSAA4",
            Self::Drms4 => "DRMS4",
        })
    }
}

/// Base resolution of the off-screen target relative to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResolutionDivisor {
    #[default]
    Full,
    Half,
    Quarter,
}

impl ResolutionDivisor {
    pub const ALL: [ResolutionDivisor; 3] = [Self::Full, Self::Half, Self::Quarter];

    /// Full → Half → Quarter → Full.
    pub const fn next(self) -> Self {
        match self {
            Self::Full => Self::Half,
            Self::Half => Self::Quarter,
            Self::Quarter => Self::Full,
        }
    }

    /// Linear divisor: 1, 2 or 4.
    #[inline]
    pub const fn factor(self) -> u32 {
        1 << self.shift()
    }

    /// `log2(factor)`.
    #[inline]
    pub const fn shift(self) -> u32 {
        match self {
            Self::Full => 0,
            Self::Half => 1,
            Self::Quarter => 2,
        }
    }
}

impl fmt::Display for ResolutionDivisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Full => "FULL",
            Self::Half => "HALF",
            Self::Quarter => "QUARTER",
        })
    }
}

/// The complete user-facing mode selection.
///
/// Starts as `{NONE, FULL}` and lives for the whole process.  Mutating it
/// does not touch any GPU state by itself; [`crate::Demo`] applies the
/// mutation and then recomputes the target synchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModeState {
    pub multisample: MultisampleMode,
    pub divisor: ResolutionDivisor,
}

impl ModeState {
    pub const fn new(multisample: MultisampleMode, divisor: ResolutionDivisor) -> Self {
        Self { multisample, divisor }
    }

    pub fn cycle_multisample(&mut self) {
        self.multisample = self.multisample.next();
    }

    /// Shortcut between no multisampling and DRMS.  `MSAA4` is treated as
    /// `NONE` before toggling, so it switches straight to `DRMS4`.
    pub fn toggle_dual_resolution(&mut self) {
        self.multisample = match self.multisample {
            MultisampleMode::None | MultisampleMode::Msaa4 => MultisampleMode::Drms4,
            MultisampleMode::Drms4 => MultisampleMode::None,
        };
    }

    pub fn cycle_resolution(&mut self) {
        self.divisor = self.divisor.next();
    }
}

impl fmt::Display for ModeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mode={}, lowres={}", self.multisample, self.divisor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_mode() -> impl Strategy<Value = ModeState> {
        (0usize..3, 0usize..3).prop_map(|(m, d)| {
            ModeState::new(MultisampleMode::ALL[m], ResolutionDivisor::ALL[d])
        })
    }

    #[test]
    fn starts_without_multisampling_at_full_resolution() {
        let mode = ModeState::default();
        assert_eq!(mode.multisample, MultisampleMode::None);
        assert_eq!(mode.divisor, ResolutionDivisor::Full);
    }

    #[test]
    fn multisample_cycle_order() {
        let mut mode = ModeState::default();
        mode.cycle_multisample();
        assert_eq!(mode.multisample, MultisampleMode::Msaa4);
        mode.cycle_multisample();
        assert_eq!(mode.multisample, MultisampleMode::Drms4);
        mode.cycle_multisample();
        assert_eq!(mode.multisample, MultisampleMode::None);
    }

    #[test]
    fn toggle_dual_resolution_treats_msaa_as_none() {
        let mut mode = ModeState::new(MultisampleMode::Msaa4, ResolutionDivisor::Half);
        mode.toggle_dual_resolution();
        assert_eq!(mode.multisample, MultisampleMode::Drms4);
        assert_eq!(mode.divisor, ResolutionDivisor::Half);
        mode.toggle_dual_resolution();
        assert_eq!(mode.multisample, MultisampleMode::None);
        mode.toggle_dual_resolution();
        assert_eq!(mode.multisample, MultisampleMode::Drms4);
    }

    #[test]
    fn divisor_factors() {
        assert_eq!(ResolutionDivisor::Full.factor(), 1);
        assert_eq!(ResolutionDivisor::Half.factor(), 2);
        assert_eq!(ResolutionDivisor::Quarter.factor(), 4);
    }

    #[test]
    fn display_matches_title_format() {
        let mode = ModeState::new(MultisampleMode::Drms4, ResolutionDivisor::Quarter);
        assert_eq!(mode.to_string(), "mode=DRMS4, lowres=QUARTER");
    }

    proptest! {
        #[test]
        fn cycling_three_times_is_identity(start in any_mode()) {
            let mut mode = start;
            for _ in 0..3 {
                mode.cycle_multisample();
            }
            prop_assert_eq!(mode, start);
            for _ in 0..3 {
                mode.cycle_resolution();
            }
            prop_assert_eq!(mode, start);
        }

        #[test]
        fn cycling_multisample_leaves_divisor_alone(start in any_mode()) {
            let mut mode = start;
            mode.cycle_multisample();
            mode.toggle_dual_resolution();
            prop_assert_eq!(mode.divisor, start.divisor);
        }
    }
}
