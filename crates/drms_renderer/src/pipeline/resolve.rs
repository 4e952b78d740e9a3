/// The resolve pipelines: one per kind of target binding, both drawing the
/// full-screen quad into the swapchain.
use std::sync::Arc;

use drms_core::{ResolveParams, WindowExtent};

use crate::geometry::Vertex;
use crate::pipeline::PipelineLayouts;

/// Per-frame resolve parameters.  Layout matches `ResolveUniform` in
/// `shaders/resolve.wgsl` (48 bytes, 16-byte aligned members).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ResolveUniform {
    pub window_size: [u32; 2],
    pub mode: u32,
    pub lowres_shift: u32,
    pub table: [u32; 4],
    pub target_size: [u32; 2],
    pub _pad: [u32; 2],
}

impl ResolveUniform {
    pub fn new(window: WindowExtent, params: &ResolveParams) -> Self {
        Self {
            window_size: [window.width, window.height],
            mode: params.mode.multisample.shader_code(),
            lowres_shift: params.mode.divisor.shift(),
            table: params.table.as_array(),
            target_size: [params.target.width, params.target.height],
            _pad: [0; 2],
        }
    }
}

#[derive(Clone)]
pub struct ResolvePipeline {
    /// `fs_single`: NONE mode.
    pub single: Arc<wgpu::RenderPipeline>,
    /// `fs_multi`: MSAA4 and DRMS4.
    pub multi: Arc<wgpu::RenderPipeline>,
}

impl ResolvePipeline {
    pub fn new(
        device: &wgpu::Device,
        layouts: &PipelineLayouts,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::include_wgsl!("../../shaders/resolve.wgsl"));

        let build = |label: &str, entry: &str, group: &wgpu::BindGroupLayout| {
            let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(label),
                bind_group_layouts: &[group],
                push_constant_ranges: &[],
            });
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex::layout()],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some(entry),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };

        Self {
            single: Arc::new(build("Resolve Pipeline (single)", "fs_single", &layouts.resolve_single)),
            multi: Arc::new(build("Resolve Pipeline (multi)", "fs_multi", &layouts.resolve_multi)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drms_core::{compute_extent, Extent, ModeState, MultisampleMode, ResolutionDivisor, SampleLayout, SampleTable};

    #[test]
    fn uniform_matches_wgsl_size() {
        assert_eq!(std::mem::size_of::<ResolveUniform>(), 48);
    }

    #[test]
    fn packs_mode_divisor_and_table() {
        let window = Extent::new(1024, 600);
        let mode = ModeState::new(MultisampleMode::Drms4, ResolutionDivisor::Half);
        let params = ResolveParams {
            mode,
            table: SampleTable::from_layout(&SampleLayout::STANDARD_4X),
            target: compute_extent(window, mode),
        };
        let u = ResolveUniform::new(window, &params);
        assert_eq!(u.window_size, [1024, 600]);
        assert_eq!(u.mode, 2);
        assert_eq!(u.lowres_shift, 1);
        assert_eq!(u.table, [2, 3, 0, 1]);
        assert_eq!(u.target_size, [256, 150]);

        let bytes = bytemuck::bytes_of(&u);
        assert_eq!(&bytes[8..12], &2u32.to_ne_bytes());
        assert_eq!(&bytes[16..20], &2u32.to_ne_bytes());
    }
}
