//! The application context.
//!
//! `Demo` owns everything the frame loop needs between events: the window
//! extent, the mode, the derived target extent and the render target
//! itself.  Every mutation runs the same pipeline synchronously:
//!
//! ```text
//! mode / window update → compute_extent → RenderTargetManager::reconfigure
//! ```
//!
//! so no frame can observe a target built for stale inputs.
use crate::action::{Action, Outcome};
use crate::extent::{compute_extent, sample_count, RenderTargetExtent, WindowExtent};
use crate::mode::ModeState;
use crate::resolve::ResolveParams;
use crate::target::{RenderTargetManager, TargetBackend, TargetError};

pub struct Demo<B: TargetBackend> {
    window: WindowExtent,
    mode: ModeState,
    extent: RenderTargetExtent,
    targets: RenderTargetManager<B>,
}

impl<B: TargetBackend> Demo<B> {
    /// Starts in `{NONE, FULL}` and allocates the first target.
    pub fn new(window: WindowExtent, backend: B) -> Result<Self, TargetError> {
        let mode = ModeState::default();
        let mut demo = Self {
            window,
            mode,
            extent: compute_extent(window, mode),
            targets: RenderTargetManager::new(backend),
        };
        demo.reconfigure()?;
        Ok(demo)
    }

    pub fn apply(&mut self, action: Action) -> Result<Outcome, TargetError> {
        match action {
            Action::CycleMultisample => self.mode.cycle_multisample(),
            Action::ToggleDualResolution => self.mode.toggle_dual_resolution(),
            Action::CycleResolution => self.mode.cycle_resolution(),
            Action::Quit => return Ok(Outcome::Exit),
        }
        log::debug!("{action:?} -> {}", self.mode);
        self.reconfigure()?;
        Ok(Outcome::Reconfigured)
    }

    /// Pushes a new window size.  Zero dimensions (minimised window) are
    /// ignored; the previous target stays valid until a real size arrives.
    pub fn resize(&mut self, window: WindowExtent) -> Result<(), TargetError> {
        if window.width == 0 || window.height == 0 {
            log::debug!("ignoring resize to {window}");
            return Ok(());
        }
        self.window = window;
        self.reconfigure()
    }

    fn reconfigure(&mut self) -> Result<(), TargetError> {
        self.extent = compute_extent(self.window, self.mode);
        log::info!("{} (window {})", self.mode, self.window);
        self.targets.reconfigure(self.extent, sample_count(self.mode))
    }

    /// Window title for the current mode.
    pub fn title(&self, app_name: &str) -> String {
        format!("{app_name} ({})", self.mode)
    }

    pub fn resolve_params(&self) -> ResolveParams {
        ResolveParams {
            mode: self.mode,
            table: self.targets.sample_table(),
            target: self.extent,
        }
    }

    /// Releases the render target.  Safe to call more than once.
    pub fn shutdown(&mut self) {
        self.targets.destroy();
    }

    // ── Accessors ──────────────────────────────────────────────────────────

    #[inline]
    pub fn mode(&self) -> ModeState {
        self.mode
    }

    #[inline]
    pub fn window(&self) -> WindowExtent {
        self.window
    }

    #[inline]
    pub fn target_extent(&self) -> RenderTargetExtent {
        self.extent
    }

    #[inline]
    pub fn targets(&self) -> &RenderTargetManager<B> {
        &self.targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extent::Extent;
    use crate::sample_layout::SampleLayout;
    use crate::target::TargetDesc;

    /// Backend that only counts live targets.
    #[derive(Default)]
    struct Counter {
        live: u32,
    }

    impl TargetBackend for Counter {
        type Target = TargetDesc;

        fn create_target(&mut self, desc: &TargetDesc) -> Result<TargetDesc, TargetError> {
            self.live += 1;
            Ok(*desc)
        }

        fn destroy_target(&mut self, _target: TargetDesc) {
            self.live -= 1;
        }

        fn query_sample_layout(&mut self, _: u32) -> Result<SampleLayout, TargetError> {
            Ok(SampleLayout::STANDARD_4X)
        }
    }

    /// Backend whose allocations always fail.
    struct Exhausted;

    impl TargetBackend for Exhausted {
        type Target = ();

        fn create_target(&mut self, desc: &TargetDesc) -> Result<(), TargetError> {
            Err(TargetError::Allocation {
                desc: *desc,
                reason: "out of memory".into(),
            })
        }

        fn destroy_target(&mut self, _target: ()) {}

        fn query_sample_layout(&mut self, sample_count: u32) -> Result<SampleLayout, TargetError> {
            Err(TargetError::SampleLayout {
                sample_count,
                reason: "no device".into(),
            })
        }
    }

    #[test]
    fn title_reflects_mode() {
        let mut demo = Demo::new(Extent::new(64, 64), Counter::default()).unwrap();
        assert_eq!(demo.title("DRMS"), "DRMS (mode=NONE, lowres=FULL)");
        demo.apply(Action::CycleResolution).unwrap();
        demo.apply(Action::ToggleDualResolution).unwrap();
        assert_eq!(demo.title("DRMS"), "DRMS (mode=DRMS4, lowres=HALF)");
    }

    #[test]
    fn quit_does_not_touch_the_target() {
        let mut demo = Demo::new(Extent::new(64, 64), Counter::default()).unwrap();
        let generation = demo.targets().generation();
        assert_eq!(demo.apply(Action::Quit).unwrap(), Outcome::Exit);
        assert_eq!(demo.targets().generation(), generation);
    }

    #[test]
    fn zero_sized_resize_is_ignored() {
        let mut demo = Demo::new(Extent::new(64, 48), Counter::default()).unwrap();
        demo.resize(Extent::new(0, 48)).unwrap();
        assert_eq!(demo.window(), Extent::new(64, 48));
        assert_eq!(demo.targets().generation(), 1);
    }

    #[test]
    fn resize_recomputes_target_in_drms() {
        let mut demo = Demo::new(Extent::new(64, 48), Counter::default()).unwrap();
        demo.apply(Action::ToggleDualResolution).unwrap();
        demo.resize(Extent::new(333, 77)).unwrap();

        let desc = demo.targets().desc().unwrap();
        assert_eq!(desc.extent, Extent::new(166, 38));
        assert_eq!(desc.extent, compute_extent(demo.window(), demo.mode()));
        assert_eq!(desc.sample_count, 4);
        assert_eq!(demo.targets().backend().live, 1);
    }

    #[test]
    fn shutdown_releases_once() {
        let mut demo = Demo::new(Extent::new(64, 48), Counter::default()).unwrap();
        demo.shutdown();
        demo.shutdown();
        assert_eq!(demo.targets().backend().live, 0);
    }

    #[test]
    fn resolve_params_follow_the_mode() {
        let mut demo = Demo::new(Extent::new(64, 48), Counter::default()).unwrap();
        demo.apply(Action::ToggleDualResolution).unwrap();
        let params = demo.resolve_params();
        assert_eq!(params.target, Extent::new(32, 24));
        assert_eq!(params.table.as_array(), [2, 3, 0, 1]);
    }

    #[test]
    fn allocation_failure_surfaces() {
        let err = Demo::new(Extent::new(64, 48), Exhausted).err();
        assert!(matches!(err, Some(TargetError::Allocation { .. })));
    }
}
