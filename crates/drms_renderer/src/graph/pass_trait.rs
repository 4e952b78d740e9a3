/// The `RenderPass` trait, implemented by the scene and resolve stages.
///
/// `prepare` → `execute` lets passes upload GPU data before opening a
/// `wgpu::RenderPass`; `write_buffer` calls are then ordered before the
/// commands recorded in the frame's encoder.
use wgpu::{CommandEncoder, Device, Queue, TextureView};

use crate::graph::FramePacket;

pub trait RenderPass {
    /// Short human-readable label used as the wgpu debug label.
    fn name(&self) -> &str;

    /// Upload GPU data and rebuild size-dependent bind groups.  Called
    /// before `execute` each frame.
    fn prepare(&mut self, device: &Device, queue: &Queue, packet: &FramePacket<'_>);

    /// Record draw commands into `encoder`, rendering into `color_view`.
    fn execute(
        &mut self,
        encoder: &mut CommandEncoder,
        color_view: &TextureView,
        packet: &FramePacket<'_>,
    );
}
