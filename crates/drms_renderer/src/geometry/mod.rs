pub mod mesh;
pub mod vertex;

pub use mesh::Mesh;
pub use vertex::Vertex;
