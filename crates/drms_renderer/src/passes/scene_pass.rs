/// Draws the triangle into the off-screen target.
///
/// Clears to opaque white, then emits one non-indexed draw with the
/// pipeline whose sample count matches the current target.
use std::sync::Arc;

use wgpu::{
    CommandEncoder, Device, LoadOp, Operations, Queue, RenderPassColorAttachment,
    RenderPassDescriptor, StoreOp, TextureView,
};

use crate::geometry::Mesh;
use crate::graph::{FramePacket, RenderPass};
use crate::pipeline::{PipelineLayouts, ScenePipeline, SceneUniform};
use crate::resources::buffer;

pub struct ScenePass {
    single: ScenePipeline,
    multi: ScenePipeline,
    mesh: Mesh,
    uniform: Arc<wgpu::Buffer>,
    bind_group: wgpu::BindGroup,
    pub clear_color: wgpu::Color,
}

impl ScenePass {
    pub fn new(device: &Device, layouts: &PipelineLayouts, target_format: wgpu::TextureFormat) -> Self {
        let uniform = buffer::create_uniform(
            device,
            "Scene Uniform",
            &SceneUniform::new(drms_core::Extent::ONE),
        );
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout: &layouts.scene,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform.as_entire_binding(),
            }],
        });
        let white = drms_core::Color::WHITE;

        Self {
            single: ScenePipeline::new(device, layouts, target_format, 1),
            multi: ScenePipeline::new(device, layouts, target_format, 4),
            mesh: Mesh::triangle(device),
            uniform,
            bind_group,
            clear_color: wgpu::Color {
                r: f64::from(white.r),
                g: f64::from(white.g),
                b: f64::from(white.b),
                a: f64::from(white.a),
            },
        }
    }
}

impl RenderPass for ScenePass {
    fn name(&self) -> &str {
        "Scene Pass"
    }

    fn prepare(&mut self, _device: &Device, queue: &Queue, packet: &FramePacket<'_>) {
        buffer::update_uniform(queue, &self.uniform, &SceneUniform::new(packet.target.desc.extent));
    }

    fn execute(&mut self, encoder: &mut CommandEncoder, color_view: &TextureView, packet: &FramePacket<'_>) {
        let pipeline = if packet.target.is_multisampled() {
            &self.multi
        } else {
            &self.single
        };

        let mut rpass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some(self.name()),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: color_view,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Clear(self.clear_color),
                    store: StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        packet.target_viewport.apply(&mut rpass);
        rpass.set_pipeline(&pipeline.inner);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.mesh.vertex_buffer.slice(..));
        rpass.draw(0..self.mesh.vertex_count, 0..1);
    }
}
