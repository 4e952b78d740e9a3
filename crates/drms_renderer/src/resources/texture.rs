/// Helpers for creating `wgpu::Texture` objects and reading them back,
/// shared by the render target backend and the sample probe.
use drms_core::Extent;

/// Descriptor for a 2-D render-attachment texture.
pub struct RenderTextureDesc<'a> {
    pub label: &'a str,
    pub extent: Extent,
    pub format: wgpu::TextureFormat,
    /// MSAA sample count (1 = no MSAA).
    pub sample_count: u32,
    pub usage: wgpu::TextureUsages,
}

#[inline]
pub fn extent_3d(extent: Extent) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width: extent.width,
        height: extent.height,
        depth_or_array_layers: 1,
    }
}

/// Creates a 2-D texture from a [`RenderTextureDesc`].
pub fn create_render_texture(device: &wgpu::Device, desc: &RenderTextureDesc<'_>) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some(desc.label),
        size: extent_3d(desc.extent),
        mip_level_count: 1,
        sample_count: desc.sample_count,
        dimension: wgpu::TextureDimension::D2,
        format: desc.format,
        usage: desc.usage,
        view_formats: &[],
    })
}

/// Creates a default `TextureView` for a texture (all mips, all layers).
#[inline]
pub fn default_view(texture: &wgpu::Texture) -> wgpu::TextureView {
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Nearest-neighbour, edge-clamped sampler.  Low-resolution targets are
/// upscaled through it so every screen pixel shows exactly one texel.
pub fn nearest_clamp_sampler(device: &wgpu::Device, label: &str) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(label),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Nearest,
        min_filter: wgpu::FilterMode::Nearest,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    })
}

/// Row pitch for `copy_texture_to_buffer`, rounded up to
/// `COPY_BYTES_PER_ROW_ALIGNMENT`.
#[inline]
pub fn padded_bytes_per_row(width: u32, bytes_per_pixel: u32) -> u32 {
    let unpadded = width * bytes_per_pixel;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Blocks until `buffer` is mapped for reading and returns its contents.
pub fn read_buffer(device: &wgpu::Device, buffer: &wgpu::Buffer) -> Result<Vec<u8>, String> {
    let slice = buffer.slice(..);
    let (sender, receiver) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |res| {
        let _ = sender.send(res);
    });
    device.poll(wgpu::Maintain::Wait);
    receiver
        .recv()
        .map_err(|_| "map_async sender dropped".to_string())?
        .map_err(|err| format!("map_async failed: {err:?}"))?;

    let mapped = slice.get_mapped_range();
    let out = mapped.to_vec();
    drop(mapped);
    buffer.unmap();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_padded_to_256_bytes() {
        assert_eq!(padded_bytes_per_row(4, 4), 256);
        assert_eq!(padded_bytes_per_row(64, 4), 256);
        assert_eq!(padded_bytes_per_row(65, 4), 512);
        assert_eq!(padded_bytes_per_row(1024, 4), 4096);
    }

    #[test]
    fn extent_maps_to_single_layer() {
        let e = extent_3d(Extent::new(7, 3));
        assert_eq!((e.width, e.height, e.depth_or_array_layers), (7, 3, 1));
    }
}
