use std::sync::Arc;

use anyhow::Context as _;
use drms_core::WindowExtent;
use drms_renderer::{ContextError, GpuContext, GpuDemo, Renderer};
use winit::window::Window;

pub struct GraphicsState {
    pub surface: wgpu::Surface<'static>,
    pub config: wgpu::SurfaceConfiguration,
    pub context: GpuContext,
    pub renderer: Renderer,
}

/// Prefers a linear (non-sRGB) format: the resolve writes the target's
/// stored values unchanged, like a default GL framebuffer.
pub fn choose_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| !f.is_srgb())
        .or_else(|| formats.first().copied())
}

impl GraphicsState {
    pub async fn new(window: Arc<Window>, extent: WindowExtent, vsync: bool) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .map_err(|e| ContextError::Surface(e.to_string()))?;
        let context = GpuContext::new_with_instance(instance, Some(&surface)).await?;

        let caps = surface.get_capabilities(&context.adapter);
        let format = choose_surface_format(&caps.formats)
            .context(ContextError::Surface("surface reports no formats".into()))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let present_mode = if vsync {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        };
        log::info!("Surface format: {format:?}, present mode: {present_mode:?}");

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: extent.width.max(1),
            height: extent.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 1,
        };
        surface.configure(&context.device, &config);

        let renderer = Renderer::new(&context, config.format);

        Ok(Self {
            surface,
            config,
            context,
            renderer,
        })
    }

    pub fn resize(&mut self, extent: WindowExtent) {
        if extent.width > 0 && extent.height > 0 {
            self.config.width = extent.width;
            self.config.height = extent.height;
            self.surface.configure(&self.context.device, &self.config);
        }
    }

    /// Renders and presents one frame.  A lost or outdated surface is
    /// reconfigured and the frame skipped.
    pub fn render(&mut self, demo: &GpuDemo) -> anyhow::Result<()> {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost or outdated; reconfiguring");
                self.surface.configure(&self.context.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("timed out acquiring the next surface texture");
                return Ok(());
            }
            Err(err) => {
                return Err(anyhow::Error::new(err).context("failed to acquire surface texture"));
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer.render_frame(demo, &view)?;
        frame.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat;

    #[test]
    fn prefers_linear_format() {
        let formats = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm];
        assert_eq!(choose_surface_format(&formats), Some(TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn falls_back_to_first_format() {
        let formats = [TextureFormat::Rgba8UnormSrgb];
        assert_eq!(choose_surface_format(&formats), Some(TextureFormat::Rgba8UnormSrgb));
        assert_eq!(choose_surface_format(&[]), None);
    }
}
