/// Data bundle assembled once per frame and passed immutably to every
/// `RenderPass`.
use drms_core::{Extent, ResolveParams, WindowExtent};

use crate::render_target::OffscreenTarget;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Rectangular region of an attachment, in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Covers the whole of an attachment of size `extent`.
    pub const fn full(extent: Extent) -> Self {
        Self {
            x: 0,
            y: 0,
            width: extent.width,
            height: extent.height,
        }
    }

    pub fn apply(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_viewport(
            self.x as f32,
            self.y as f32,
            self.width as f32,
            self.height as f32,
            0.0,
            1.0,
        );
    }
}

// ── Frame packet ──────────────────────────────────────────────────────────────

pub struct FramePacket<'a> {
    /// The off-screen target the scene is drawn into.
    pub target: &'a OffscreenTarget,
    /// Changes whenever the target was reallocated.
    pub target_generation: u64,
    /// Scene pass viewport (render target extent).
    pub target_viewport: Viewport,
    /// Resolve pass viewport (window extent).
    pub window_viewport: Viewport,
    pub window: WindowExtent,
    pub resolve: ResolveParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_viewport_starts_at_origin() {
        let vp = Viewport::full(Extent::new(512, 300));
        assert_eq!(vp, Viewport { x: 0, y: 0, width: 512, height: 300 });
    }
}
