//! Reference implementation of the resolve pass.
//!
//! `resolve.wgsl` runs the same algorithm on the GPU; this module is the
//! place where the pixel → texel → sample mapping is written down and
//! tested.  Coordinates use a bottom-left origin for both screen pixels and
//! render-target texels.
//!
//! | mode    | texel              | samples read                     |
//! |---------|--------------------|----------------------------------|
//! | `NONE`  | `pixel / f`        | the only one                     |
//! | `MSAA4` | `pixel / f`        | all four, averaged               |
//! | `DRMS4` | `pixel / f / 2`    | one, picked by `(pixel / f) % 2` |
//!
//! `f` is the resolution divisor factor (1, 2, 4).
use glam::UVec2;

use crate::color::Color;
use crate::extent::RenderTargetExtent;
use crate::mode::{ModeState, MultisampleMode};
use crate::sample_layout::{SampleTable, SAMPLES_PER_TEXEL};

/// Width in screen pixels of the gridline overlay along the left and bottom
/// window edges.
pub const OVERLAY_MARGIN: u32 = 20;

/// Everything the resolve needs besides the target contents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolveParams {
    pub mode: ModeState,
    pub table: SampleTable,
    /// Extent of the render target being read.
    pub target: RenderTargetExtent,
}

/// Which of the stored samples contribute to a screen pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleSelection {
    /// Single-sample target: the one stored value.
    Single,
    /// Box filter over every sample.
    Average,
    /// Exactly one sample of a multisampled texel.
    One(u32),
}

/// Result of mapping one screen pixel into render-target space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TexelLookup {
    /// Render-target coordinate before clamping.  The overlay gridlines
    /// are laid out on it.
    pub grid: UVec2,
    /// Texel actually fetched: `grid` clamped to the target extent.
    pub texel: UVec2,
    pub selection: SampleSelection,
}

/// Maps a screen pixel to the texel and samples it is resolved from.
///
/// Windows whose size is not a multiple of the divisor have pixels past the
/// last texel; those fetch the last row/column but keep their own `grid`
/// coordinate.
pub fn lookup(pixel: UVec2, params: &ResolveParams) -> TexelLookup {
    let coord = pixel / params.mode.divisor.factor();
    let (grid, selection) = match params.mode.multisample {
        MultisampleMode::None => (coord, SampleSelection::Single),
        MultisampleMode::Msaa4 => (coord, SampleSelection::Average),
        MultisampleMode::Drms4 => {
            let sub = coord % 2;
            let sample = params.table.sample_for(sub);
            (coord / 2, SampleSelection::One(sample))
        }
    };
    let max = params.target.as_uvec2() - UVec2::ONE;
    TexelLookup {
        grid,
        texel: grid.min(max),
        selection,
    }
}

/// Applies the edge gridlines.
///
/// `grid` is the unclamped render-target coordinate of `pixel`.  Inside the
/// left margin every even row turns blue; inside the bottom margin every
/// even column turns red.  Red is applied last
/// and wins in the corner.  Alpha is always forced to 1.
pub fn apply_overlay(pixel: UVec2, grid: UVec2, color: Color) -> Color {
    let mut out = color;
    if pixel.x < OVERLAY_MARGIN && grid.y % 2 == 0 {
        out = Color::BLUE;
    }
    if pixel.y < OVERLAY_MARGIN && grid.x % 2 == 0 {
        out = Color::RED;
    }
    out.with_alpha(1.0)
}

/// Resolves one screen pixel.
///
/// `fetch(texel, sample)` reads a stored sample from the render target;
/// single-sample targets are read with sample index 0.
pub fn resolve_pixel<F>(pixel: UVec2, params: &ResolveParams, fetch: F) -> Color
where
    F: Fn(UVec2, u32) -> Color,
{
    let TexelLookup {
        grid,
        texel,
        selection,
    } = lookup(pixel, params);
    let color = match selection {
        SampleSelection::Single => fetch(texel, 0),
        SampleSelection::One(sample) => fetch(texel, sample),
        SampleSelection::Average => {
            let samples: [Color; SAMPLES_PER_TEXEL] = std::array::from_fn(|s| fetch(texel, s as u32));
            Color::average_rgb(&samples)
        }
    };
    apply_overlay(pixel, grid, color)
}
