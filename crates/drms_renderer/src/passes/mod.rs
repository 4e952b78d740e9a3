pub mod resolve_pass;
pub mod scene_pass;

pub use resolve_pass::ResolvePass;
pub use scene_pass::ScenePass;
