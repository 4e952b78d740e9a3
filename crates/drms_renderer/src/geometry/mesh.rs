/// Non-indexed vertex meshes: the demo triangle and the full-screen quad.
use std::sync::Arc;

use super::Vertex;
use crate::resources::buffer;

/// The scene: one triangle, red / blue / green corners, counter-clockwise.
pub const TRIANGLE: [Vertex; 3] = [
    Vertex::new([-0.5, -0.7], [1.0, 0.0, 0.0]),
    Vertex::new([0.4, -0.3], [0.0, 0.0, 1.0]),
    Vertex::new([0.0, 0.5], [0.0, 1.0, 0.0]),
];

/// Two triangles covering clip space.  Colour is unused by the resolve.
pub const FULLSCREEN_QUAD: [Vertex; 6] = [
    Vertex::new([-1.0, -1.0], [1.0, 1.0, 1.0]),
    Vertex::new([1.0, -1.0], [1.0, 1.0, 1.0]),
    Vertex::new([1.0, 1.0], [1.0, 1.0, 1.0]),
    Vertex::new([-1.0, -1.0], [1.0, 1.0, 1.0]),
    Vertex::new([1.0, 1.0], [1.0, 1.0, 1.0]),
    Vertex::new([-1.0, 1.0], [1.0, 1.0, 1.0]),
];

/// A drawable GPU mesh.  Cheaply cloneable: the buffer is `Arc`-wrapped.
#[derive(Clone)]
pub struct Mesh {
    pub vertex_buffer: Arc<wgpu::Buffer>,
    pub vertex_count: u32,
}

impl Mesh {
    pub fn from_vertices(device: &wgpu::Device, label: &str, vertices: &[Vertex]) -> Self {
        Self {
            vertex_buffer: buffer::create_vertex(device, label, vertices),
            vertex_count: vertices.len() as u32,
        }
    }

    pub fn triangle(device: &wgpu::Device) -> Self {
        Self::from_vertices(device, "Scene Triangle", &TRIANGLE)
    }

    pub fn fullscreen_quad(device: &wgpu::Device) -> Self {
        Self::from_vertices(device, "Fullscreen Quad", &FULLSCREEN_QUAD)
    }
}
