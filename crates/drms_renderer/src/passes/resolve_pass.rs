/// Maps the off-screen target onto the swapchain image.
///
/// The bind group references the target's view, so it is rebuilt whenever
/// the target generation changes.
use std::sync::Arc;

use bytemuck::Zeroable;
use wgpu::{
    CommandEncoder, Device, LoadOp, Operations, Queue, RenderPassColorAttachment,
    RenderPassDescriptor, StoreOp, TextureView,
};

use crate::geometry::Mesh;
use crate::graph::{FramePacket, RenderPass};
use crate::pipeline::layout::resolve_bindings;
use crate::pipeline::{PipelineLayouts, ResolvePipeline, ResolveUniform};
use crate::render_target::OffscreenTarget;
use crate::resources::buffer;

pub struct ResolvePass {
    pipeline: ResolvePipeline,
    layouts: PipelineLayouts,
    quad: Mesh,
    uniform: Arc<wgpu::Buffer>,
    /// Bind group plus the target generation it was built for.
    bind_group: Option<(u64, wgpu::BindGroup)>,
}

impl ResolvePass {
    pub fn new(device: &Device, layouts: &PipelineLayouts, surface_format: wgpu::TextureFormat) -> Self {
        let uniform = buffer::create_uniform(device, "Resolve Uniform", &ResolveUniform::zeroed());
        Self {
            pipeline: ResolvePipeline::new(device, layouts, surface_format),
            layouts: layouts.clone(),
            quad: Mesh::fullscreen_quad(device),
            uniform,
            bind_group: None,
        }
    }

    fn build_bind_group(&self, device: &Device, target: &OffscreenTarget) -> wgpu::BindGroup {
        let params = wgpu::BindGroupEntry {
            binding: resolve_bindings::PARAMS,
            resource: self.uniform.as_entire_binding(),
        };
        match &target.sampler {
            Some(sampler) => device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Resolve Bind Group (single)"),
                layout: &self.layouts.resolve_single,
                entries: &[
                    params,
                    wgpu::BindGroupEntry {
                        binding: resolve_bindings::COLOR,
                        resource: wgpu::BindingResource::TextureView(&target.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: resolve_bindings::SAMPLER,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                ],
            }),
            None => device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Resolve Bind Group (multi)"),
                layout: &self.layouts.resolve_multi,
                entries: &[
                    params,
                    wgpu::BindGroupEntry {
                        binding: resolve_bindings::COLOR_MS,
                        resource: wgpu::BindingResource::TextureView(&target.view),
                    },
                ],
            }),
        }
    }
}

impl RenderPass for ResolvePass {
    fn name(&self) -> &str {
        "Resolve Pass"
    }

    fn prepare(&mut self, device: &Device, queue: &Queue, packet: &FramePacket<'_>) {
        buffer::update_uniform(
            queue,
            &self.uniform,
            &ResolveUniform::new(packet.window, &packet.resolve),
        );

        let stale = self
            .bind_group
            .as_ref()
            .map_or(true, |(generation, _)| *generation != packet.target_generation);
        if stale {
            log::debug!("rebuilding resolve bind group for {}", packet.target.desc);
            let group = self.build_bind_group(device, packet.target);
            self.bind_group = Some((packet.target_generation, group));
        }
    }

    fn execute(&mut self, encoder: &mut CommandEncoder, color_view: &TextureView, packet: &FramePacket<'_>) {
        let Some((_, bind_group)) = &self.bind_group else {
            log::error!("{} executed before prepare", self.name());
            return;
        };
        let pipeline = if packet.target.is_multisampled() {
            &self.pipeline.multi
        } else {
            &self.pipeline.single
        };

        let mut rpass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some(self.name()),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: color_view,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Clear(wgpu::Color::BLACK),
                    store: StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        packet.window_viewport.apply(&mut rpass);
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad.vertex_buffer.slice(..));
        rpass.draw(0..self.quad.vertex_count, 0..1);
    }
}
