//! Target sizing: window extent + mode → off-screen target extent.
use std::fmt;

use crate::mode::{ModeState, MultisampleMode};

/// Width/height pair in pixels (or texels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

/// Physical window size, as reported by the windowing layer.
pub type WindowExtent = Extent;

/// Size of the low-resolution off-screen target.
pub type RenderTargetExtent = Extent;

impl Extent {
    pub const ONE: Self = Self { width: 1, height: 1 };

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Clamps both dimensions to at least one.  Minimised windows report
    /// 0×0, which no GPU texture can be created with.
    #[inline]
    pub fn at_least_one(self) -> Self {
        Self {
            width: self.width.max(1),
            height: self.height.max(1),
        }
    }

    #[inline]
    pub fn as_uvec2(self) -> glam::UVec2 {
        glam::UVec2::new(self.width, self.height)
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Computes the low-resolution render target size for `mode`.
///
/// The window is divided (floor) by the resolution divisor; DRMS halves the
/// result again because every coarse texel carries a 2×2 block of output
/// pixels in its four samples.
pub fn compute_extent(window: WindowExtent, mode: ModeState) -> RenderTargetExtent {
    let shift = mode.divisor.shift();
    let mut width = window.width >> shift;
    let mut height = window.height >> shift;
    if mode.multisample == MultisampleMode::Drms4 {
        width /= 2;
        height /= 2;
    }
    Extent::new(width, height).at_least_one()
}

/// 4 when the mode stores multiple samples per texel, otherwise 1.
#[inline]
pub fn sample_count(mode: ModeState) -> u32 {
    if mode.multisample.is_multisampled() {
        4
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::ResolutionDivisor;
    use proptest::prelude::*;

    fn mode(m: MultisampleMode, d: ResolutionDivisor) -> ModeState {
        ModeState::new(m, d)
    }

    #[test]
    fn full_resolution_keeps_window_size() {
        let window = Extent::new(1024, 600);
        let ext = compute_extent(window, mode(MultisampleMode::Msaa4, ResolutionDivisor::Full));
        assert_eq!(ext, window);
    }

    #[test]
    fn drms_halves_again() {
        let window = Extent::new(1024, 600);
        let ext = compute_extent(window, mode(MultisampleMode::Drms4, ResolutionDivisor::Half));
        assert_eq!(ext, Extent::new(256, 150));
    }

    #[test]
    fn odd_sizes_floor_each_step() {
        // 1023 / 4 = 255, / 2 = 127;  601 / 4 = 150, / 2 = 75
        let window = Extent::new(1023, 601);
        let ext = compute_extent(window, mode(MultisampleMode::Drms4, ResolutionDivisor::Quarter));
        assert_eq!(ext, Extent::new(127, 75));
    }

    #[test]
    fn tiny_windows_never_produce_empty_targets() {
        let ext = compute_extent(
            Extent::new(3, 1),
            mode(MultisampleMode::Drms4, ResolutionDivisor::Quarter),
        );
        assert_eq!(ext, Extent::ONE);
    }

    #[test]
    fn sample_count_follows_multisample_mode() {
        for divisor in ResolutionDivisor::ALL {
            assert_eq!(sample_count(mode(MultisampleMode::None, divisor)), 1);
            assert_eq!(sample_count(mode(MultisampleMode::Msaa4, divisor)), 4);
            assert_eq!(sample_count(mode(MultisampleMode::Drms4, divisor)), 4);
        }
    }

    proptest! {
        #[test]
        fn matches_closed_form(
            w in 1u32..8192,
            h in 1u32..8192,
            m in 0usize..3,
            d in 0usize..3,
        ) {
            let mode = mode(MultisampleMode::ALL[m], ResolutionDivisor::ALL[d]);
            let ext = compute_extent(Extent::new(w, h), mode);

            let f = mode.divisor.factor();
            let drms = if mode.multisample == MultisampleMode::Drms4 { 2 } else { 1 };
            prop_assert_eq!(ext.width, ((w / f) / drms).max(1));
            prop_assert_eq!(ext.height, ((h / f) / drms).max(1));
            prop_assert!(ext.width >= 1 && ext.height >= 1);
            prop_assert_eq!(ext, compute_extent(Extent::new(w, h), mode));
        }
    }
}
