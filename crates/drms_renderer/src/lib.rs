/// `drms_renderer`: the wgpu side of the DRMS demonstrator.
///
/// # Module layout
///
/// | Module          | Responsibility                                          |
/// |-----------------|---------------------------------------------------------|
/// | `context`       | `GpuContext`: instance, adapter, device, queue          |
/// | `resources`     | Buffer / texture allocation and readback helpers        |
/// | `geometry`      | `Vertex`, `Mesh`, the triangle and full-screen quad     |
/// | `pipeline`      | Bind-group layouts, scene and resolve pipelines         |
/// | `render_target` | `WgpuTargetBackend`: off-screen target allocation       |
/// | `sample_probe`  | Measures the device's 4x sample positions               |
/// | `graph`         | `RenderPass` trait + `FramePacket`                      |
/// | `passes`        | `ScenePass`, `ResolvePass`                              |
pub mod context;
pub mod geometry;
pub mod graph;
pub mod passes;
pub mod pipeline;
pub mod render_target;
pub mod resources;
pub mod sample_probe;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use context::{ContextError, GpuContext};
pub use graph::{FramePacket, RenderPass, Viewport};
pub use render_target::{OffscreenTarget, WgpuTargetBackend};

use std::sync::Arc;

use drms_core::{Demo, TargetFormat};
use thiserror::Error;

use passes::{ResolvePass, ScenePass};
use pipeline::PipelineLayouts;

/// Format of every off-screen target.
pub const TARGET_FORMAT: wgpu::TextureFormat = render_target::texture_format(TargetFormat::Rgba8);

/// The application context bound to the wgpu backend.
pub type GpuDemo = Demo<WgpuTargetBackend>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no render target is allocated")]
    NoTarget,
}

// ── Renderer ──────────────────────────────────────────────────────────────────

/// Records and submits one frame: scene into the off-screen target, then the
/// resolve into the swapchain image, in a single command encoder.
pub struct Renderer {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    scene: ScenePass,
    resolve: ResolvePass,
}

impl Renderer {
    pub fn new(context: &GpuContext, surface_format: wgpu::TextureFormat) -> Self {
        let device = &context.device;
        let layouts = PipelineLayouts::new(device);

        Self {
            device: Arc::clone(&context.device),
            queue: Arc::clone(&context.queue),
            scene: ScenePass::new(device, &layouts, TARGET_FORMAT),
            resolve: ResolvePass::new(device, &layouts, surface_format),
        }
    }

    /// Renders `demo` into `surface_view`.  Presenting the surface texture is
    /// left to the caller.
    pub fn render_frame(&mut self, demo: &GpuDemo, surface_view: &wgpu::TextureView) -> Result<(), RenderError> {
        let targets = demo.targets();
        let target = targets.target().ok_or(RenderError::NoTarget)?;

        let packet = FramePacket {
            target,
            target_generation: targets.generation(),
            target_viewport: Viewport::full(target.desc.extent),
            window_viewport: Viewport::full(demo.window()),
            window: demo.window(),
            resolve: demo.resolve_params(),
        };

        // prepare: uploads happen before the encoder records any pass
        self.scene.prepare(&self.device, &self.queue, &packet);
        self.resolve.prepare(&self.device, &self.queue, &packet);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });
        self.scene.execute(&mut encoder, &target.view, &packet);
        self.resolve.execute(&mut encoder, surface_view, &packet);

        self.queue.submit(Some(encoder.finish()));
        Ok(())
    }
}
