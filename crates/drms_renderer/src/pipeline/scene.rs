/// Pipeline that draws the triangle into the off-screen target.
///
/// One instance exists per sample count because the multisample state is
/// baked into a `wgpu::RenderPipeline`.
use std::sync::Arc;

use drms_core::Extent;

use crate::geometry::Vertex;
use crate::pipeline::PipelineLayouts;

/// Matches `SceneUniform` in `shaders/scene.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    pub target_size: [f32; 2],
    pub _pad: [f32; 2],
}

impl SceneUniform {
    pub fn new(target: Extent) -> Self {
        Self {
            target_size: [target.width as f32, target.height as f32],
            _pad: [0.0; 2],
        }
    }
}

#[derive(Clone)]
pub struct ScenePipeline {
    pub inner: Arc<wgpu::RenderPipeline>,
}

impl ScenePipeline {
    pub fn new(
        device: &wgpu::Device,
        layouts: &PipelineLayouts,
        target_format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::include_wgsl!("../../shaders/scene.wgsl"));

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&layouts.scene],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Scene Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: sample_count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        Self {
            inner: Arc::new(pipeline),
        }
    }
}
