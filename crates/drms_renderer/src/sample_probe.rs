/// Discovers where the device places the samples of a 4x texel.
///
/// wgpu exposes no query for sample positions, so they are measured: a
/// triangle whose varying equals the framebuffer position is rendered into
/// a 1×1 4x target with per-sample interpolation, each sample is copied into
/// a 4×1 texture and read back.  The result is cached for the lifetime of
/// the device.
use drms_core::{Extent, SampleLayout, TargetError, SAMPLES_PER_TEXEL};
use glam::Vec2;

use crate::render_target::texture_format;
use crate::resources::{buffer, texture};

/// Standard sample positions lie on a 1/16 texel grid; snapping to it
/// removes the 8-bit quantisation of the readback.
const POSITION_GRID: f32 = 16.0;

const BYTES_PER_PIXEL: u32 = 4;

pub struct SampleProbe {
    /// False when the adapter cannot interpolate per sample.
    enabled: bool,
    cached: Option<SampleLayout>,
}

impl SampleProbe {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            cached: None,
        }
    }

    pub fn layout(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        sample_count: u32,
    ) -> Result<SampleLayout, TargetError> {
        if sample_count as usize != SAMPLES_PER_TEXEL {
            return Err(TargetError::SampleLayout {
                sample_count,
                reason: "only 4x targets are supported".into(),
            });
        }
        if let Some(layout) = self.cached {
            return Ok(layout);
        }

        let layout = if self.enabled {
            run(device, queue).map_err(|reason| TargetError::SampleLayout {
                sample_count,
                reason,
            })?
        } else {
            log::warn!("per-sample shading unavailable; assuming the standard 4x sample pattern");
            SampleLayout::STANDARD_4X
        };
        self.cached = Some(layout);
        Ok(layout)
    }
}

/// Decodes the 4×1 RGBA8 readback: red/green of texel `i` hold the x/y
/// offset of sample `i` with a top-left origin.
pub fn decode_probe_pixels(bytes: &[u8]) -> Result<SampleLayout, String> {
    let needed = SAMPLES_PER_TEXEL * BYTES_PER_PIXEL as usize;
    if bytes.len() < needed {
        return Err(format!("probe readback holds {} bytes, expected {needed}", bytes.len()));
    }
    let snap = |byte: u8| (f32::from(byte) / 255.0 * POSITION_GRID).round() / POSITION_GRID;
    let positions: [Vec2; SAMPLES_PER_TEXEL] = std::array::from_fn(|i| {
        let px = &bytes[i * BYTES_PER_PIXEL as usize..];
        Vec2::new(snap(px[0]), snap(px[1]))
    });
    Ok(SampleLayout::from_top_left(positions))
}

fn run(device: &wgpu::Device, queue: &wgpu::Queue) -> Result<SampleLayout, String> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let shader = device.create_shader_module(wgpu::include_wgsl!("../shaders/sample_probe.wgsl"));
    let format = texture_format(drms_core::TargetFormat::Rgba8);
    let samples = SAMPLES_PER_TEXEL as u32;

    let ms = texture::create_render_texture(
        device,
        &texture::RenderTextureDesc {
            label: "Sample Probe MS",
            extent: Extent::ONE,
            format,
            sample_count: samples,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        },
    );
    let ms_view = texture::default_view(&ms);

    let out_extent = Extent::new(samples, 1);
    let out = texture::create_render_texture(
        device,
        &texture::RenderTextureDesc {
            label: "Sample Probe Output",
            extent: out_extent,
            format,
            sample_count: 1,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        },
    );
    let out_view = texture::default_view(&out);

    let ms_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Layout: Sample Probe"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: false },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: true,
            },
            count: None,
        }],
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Sample Probe Bind Group"),
        layout: &ms_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::TextureView(&ms_view),
        }],
    });

    let pipeline = |label: &str, vs: &str, fs: &str, groups: &[&wgpu::BindGroupLayout], count: u32| {
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts: groups,
            push_constant_ranges: &[],
        });
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(vs),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(fs),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    };
    let write = pipeline("Sample Probe Write", "vs_probe", "fs_probe", &[], samples);
    let copy = pipeline("Sample Probe Copy", "vs_fullscreen", "fs_copy", &[&ms_layout], 1);

    let row_pitch = texture::padded_bytes_per_row(out_extent.width, BYTES_PER_PIXEL);
    let readback = buffer::create_readback(
        device,
        "Sample Probe Readback",
        u64::from(row_pitch) * u64::from(out_extent.height),
    );

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Sample Probe Encoder"),
    });
    {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Sample Probe Write"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &ms_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });
        rpass.set_pipeline(&write);
        rpass.draw(0..3, 0..1);
    }
    {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Sample Probe Copy"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &out_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });
        rpass.set_pipeline(&copy);
        rpass.set_bind_group(0, &bind_group, &[]);
        rpass.draw(0..3, 0..1);
    }
    encoder.copy_texture_to_buffer(
        wgpu::ImageCopyTexture {
            texture: &out,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::ImageCopyBuffer {
            buffer: &readback,
            layout: wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(row_pitch),
                rows_per_image: None,
            },
        },
        texture::extent_3d(out_extent),
    );
    queue.submit(Some(encoder.finish()));

    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        ms.destroy();
        out.destroy();
        return Err(err.to_string());
    }

    let bytes = texture::read_buffer(device, &readback);
    ms.destroy();
    out.destroy();
    decode_probe_pixels(&bytes?)
}
