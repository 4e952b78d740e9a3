pub mod frame_packet;
pub mod pass_trait;

pub use frame_packet::{FramePacket, Viewport};
pub use pass_trait::RenderPass;
