pub mod layout;
pub mod resolve;
pub mod scene;

pub use layout::PipelineLayouts;
pub use resolve::{ResolvePipeline, ResolveUniform};
pub use scene::{ScenePipeline, SceneUniform};
