// drms_core: mode state, target sizing and the resolve mapping, no GPU types

pub mod action;
pub mod color;
pub mod demo;
pub mod extent;
pub mod mode;
pub mod noise;
pub mod resolve;
pub mod sample_layout;

// render target lifecycle behind a backend trait
pub mod target;

pub use action::{Action, Outcome};
pub use color::Color;
pub use demo::Demo;
pub use extent::{compute_extent, sample_count, Extent, RenderTargetExtent, WindowExtent};
pub use mode::{ModeState, MultisampleMode, ResolutionDivisor};
pub use noise::fragment_noise;
pub use resolve::{apply_overlay, lookup, resolve_pixel, ResolveParams, SampleSelection, TexelLookup, OVERLAY_MARGIN};
pub use sample_layout::{SampleLayout, SampleTable, SAMPLES_PER_TEXEL};
pub use target::{RenderTargetManager, TargetBackend, TargetDesc, TargetError, TargetFormat};

// re-export glam so downstream crates agree on the vector types
pub use glam;
