/// wgpu implementation of [`TargetBackend`].
///
/// Single-sample targets are plain 2-D textures sampled through a
/// nearest / clamp-to-edge sampler.  4x targets are 2-D multisample
/// textures read with `textureLoad`, so they carry no sampler.
use std::sync::Arc;

use drms_core::{SampleLayout, TargetBackend, TargetDesc, TargetError, TargetFormat};

use crate::context::GpuContext;
use crate::resources::texture::{self, RenderTextureDesc};
use crate::sample_probe::SampleProbe;

/// wgpu format for a [`TargetFormat`].
pub const fn texture_format(format: TargetFormat) -> wgpu::TextureFormat {
    match format {
        TargetFormat::Rgba8 => wgpu::TextureFormat::Rgba8Unorm,
    }
}

/// One allocated off-screen colour target.
pub struct OffscreenTarget {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    /// Present for single-sample targets only.
    pub sampler: Option<wgpu::Sampler>,
    pub desc: TargetDesc,
}

impl OffscreenTarget {
    #[inline]
    pub fn is_multisampled(&self) -> bool {
        self.desc.is_multisampled()
    }
}

pub struct WgpuTargetBackend {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    probe: SampleProbe,
}

impl WgpuTargetBackend {
    pub fn new(context: &GpuContext) -> Self {
        Self {
            device: Arc::clone(&context.device),
            queue: Arc::clone(&context.queue),
            probe: SampleProbe::new(context.sample_shading),
        }
    }

    fn check_limits(&self, desc: &TargetDesc) -> Result<(), TargetError> {
        let max = self.device.limits().max_texture_dimension_2d;
        if desc.extent.width > max || desc.extent.height > max {
            return Err(TargetError::TooLarge {
                extent: desc.extent,
                max,
            });
        }
        Ok(())
    }
}

impl TargetBackend for WgpuTargetBackend {
    type Target = OffscreenTarget;

    fn create_target(&mut self, desc: &TargetDesc) -> Result<OffscreenTarget, TargetError> {
        self.check_limits(desc)?;

        // Capture allocation failures instead of letting the uncaptured
        // error handler panic.  Scopes pop in reverse order.
        self.device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let tex = texture::create_render_texture(
            &self.device,
            &RenderTextureDesc {
                label: "Offscreen Color",
                extent: desc.extent,
                format: texture_format(desc.format),
                sample_count: desc.sample_count,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            },
        );

        let validation = pollster::block_on(self.device.pop_error_scope());
        let out_of_memory = pollster::block_on(self.device.pop_error_scope());
        if let Some(err) = validation.or(out_of_memory) {
            tex.destroy();
            return Err(TargetError::Allocation {
                desc: *desc,
                reason: err.to_string(),
            });
        }

        let view = texture::default_view(&tex);
        let sampler = (!desc.is_multisampled())
            .then(|| texture::nearest_clamp_sampler(&self.device, "Offscreen Nearest Sampler"));

        log::debug!("allocated render target {desc}");
        Ok(OffscreenTarget {
            texture: tex,
            view,
            sampler,
            desc: *desc,
        })
    }

    fn destroy_target(&mut self, target: OffscreenTarget) {
        target.texture.destroy();
    }

    fn query_sample_layout(&mut self, sample_count: u32) -> Result<SampleLayout, TargetError> {
        self.probe.layout(&self.device, &self.queue, sample_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba8_is_unorm() {
        assert_eq!(texture_format(TargetFormat::Rgba8), wgpu::TextureFormat::Rgba8Unorm);
        assert!(!texture_format(TargetFormat::Rgba8).is_srgb());
    }
}
