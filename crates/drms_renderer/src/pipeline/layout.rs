/// Bind-group layouts shared by the scene and resolve pipelines.
use std::sync::Arc;

/// Binding slots of `shaders/resolve.wgsl`.
pub mod resolve_bindings {
    pub const PARAMS: u32 = 0;
    pub const COLOR: u32 = 1;
    pub const SAMPLER: u32 = 2;
    pub const COLOR_MS: u32 = 3;
}

#[derive(Clone)]
pub struct PipelineLayouts {
    /// group(0) of the scene pass: target size uniform
    pub scene: Arc<wgpu::BindGroupLayout>,
    /// group(0) of the resolve pass over a single-sample target:
    /// uniform + `texture_2d` + sampler
    pub resolve_single: Arc<wgpu::BindGroupLayout>,
    /// group(0) of the resolve pass over a 4x target:
    /// uniform + `texture_multisampled_2d`
    pub resolve_multi: Arc<wgpu::BindGroupLayout>,
}

impl PipelineLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let uniform_entry = |binding: u32, visibility: wgpu::ShaderStages| wgpu::BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let scene = Arc::new(device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Layout: Scene"),
                entries: &[uniform_entry(0, wgpu::ShaderStages::FRAGMENT)],
            },
        ));

        let resolve_single = Arc::new(device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Layout: Resolve (single-sample)"),
                entries: &[
                    uniform_entry(resolve_bindings::PARAMS, wgpu::ShaderStages::FRAGMENT),
                    wgpu::BindGroupLayoutEntry {
                        binding: resolve_bindings::COLOR,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: resolve_bindings::SAMPLER,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            },
        ));

        // Multisampled textures cannot be filtered; they are only read with
        // `textureLoad`.
        let resolve_multi = Arc::new(device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Layout: Resolve (multisample)"),
                entries: &[
                    uniform_entry(resolve_bindings::PARAMS, wgpu::ShaderStages::FRAGMENT),
                    wgpu::BindGroupLayoutEntry {
                        binding: resolve_bindings::COLOR_MS,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: false },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: true,
                        },
                        count: None,
                    },
                ],
            },
        ));

        Self {
            scene,
            resolve_single,
            resolve_multi,
        }
    }
}
