use std::sync::Arc;

use anyhow::Context as _;
use thiserror::Error;

/// Container for the core wgpu objects shared across the renderer.
///
/// `Device` and `Queue` are `Arc`-wrapped so the target backend and the
/// passes can each hold a handle.
pub struct GpuContext {
    pub instance: wgpu::Instance,
    pub adapter: wgpu::Adapter,
    pub device: Arc<wgpu::Device>,
    pub queue: Arc<wgpu::Queue>,
    /// Whether fragment inputs can be interpolated per sample.  Needed by
    /// the sample layout probe.
    pub sample_shading: bool,
}

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("no suitable graphics adapter found")]
    AdapterUnavailable,
    #[error("device request failed: {0}")]
    DeviceRequest(String),
    #[error("adapter cannot render to 4x multisampled {0:?} targets")]
    MultisampleUnsupported(wgpu::TextureFormat),
    #[error("surface creation failed: {0}")]
    Surface(String),
}

impl GpuContext {
    /// Creates a context whose adapter is guaranteed to be able to present
    /// to `compatible_surface` when one is given.
    pub async fn new_with_instance(
        instance: wgpu::Instance,
        compatible_surface: Option<&wgpu::Surface<'_>>,
    ) -> anyhow::Result<Self> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface,
                force_fallback_adapter: false,
            })
            .await
            .context(ContextError::AdapterUnavailable)?;

        let info = adapter.get_info();
        log::info!("Selected adapter: {} ({:?})", info.name, info.backend);

        let format_features = adapter.get_texture_format_features(crate::TARGET_FORMAT);
        if !format_features.flags.sample_count_supported(4) {
            return Err(ContextError::MultisampleUnsupported(crate::TARGET_FORMAT).into());
        }

        let sample_shading = adapter
            .get_downlevel_capabilities()
            .flags
            .contains(wgpu::DownlevelFlags::MULTISAMPLED_SHADING);
        if !sample_shading {
            log::warn!("adapter lacks per-sample shading; sample positions will not be probed");
        }

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("DRMS Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults()
                        .using_resolution(adapter.limits()),
                    ..Default::default()
                },
                None,
            )
            .await
            .map_err(|e| ContextError::DeviceRequest(e.to_string()))?;

        Ok(Self {
            instance,
            adapter,
            device: Arc::new(device),
            queue: Arc::new(queue),
            sample_shading,
        })
    }
}
