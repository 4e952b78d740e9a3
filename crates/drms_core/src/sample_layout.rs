//! Sub-texel sample positions and the DRMS quadrant → sample table.
//!
//! A 4x multisampled texel stores its samples at backend-defined offsets.
//! DRMS hands each sample to a different output pixel of a 2×2 block, so
//! the resolve has to know which sample sits in which quadrant.  The layout
//! is discovered from the backend when a multisample target is created and
//! turned into a [`SampleTable`] here.
//!
//! All offsets use a bottom-left origin with y pointing up, in `[0, 1)²`.
use std::fmt;

use glam::{UVec2, Vec2};

/// Number of samples per texel in the multisampled modes.
pub const SAMPLES_PER_TEXEL: usize = 4;

/// Sub-texel offset of every sample of a 4x multisampled texel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleLayout {
    positions: [Vec2; SAMPLES_PER_TEXEL],
}

impl SampleLayout {
    /// The standard 4x rotated-grid pattern shared by D3D, Vulkan and Metal,
    /// expressed with a bottom-left origin.  Used when the adapter cannot
    /// run the discovery probe.
    pub const STANDARD_4X: Self = Self {
        positions: [
            Vec2::new(0.375, 0.875),
            Vec2::new(0.875, 0.625),
            Vec2::new(0.125, 0.375),
            Vec2::new(0.625, 0.125),
        ],
    };

    pub const fn new(positions: [Vec2; SAMPLES_PER_TEXEL]) -> Self {
        Self { positions }
    }

    /// Builds a layout from offsets measured with a top-left origin (y down),
    /// which is how wgpu textures and framebuffers are addressed.
    pub fn from_top_left(positions: [Vec2; SAMPLES_PER_TEXEL]) -> Self {
        Self {
            positions: positions.map(|p| Vec2::new(p.x, 1.0 - p.y)),
        }
    }

    #[inline]
    pub fn positions(&self) -> &[Vec2; SAMPLES_PER_TEXEL] {
        &self.positions
    }

    /// True when every quadrant of the texel holds exactly one sample.
    pub fn is_clean_quadrant_split(&self) -> bool {
        let mut seen = [false; SAMPLES_PER_TEXEL];
        for p in &self.positions {
            let q = quadrant_of(*p);
            if seen[q] {
                return false;
            }
            seen[q] = true;
        }
        true
    }
}

impl fmt::Display for SampleLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.positions.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{i}: ({:.4}, {:.4})", p.x, p.y)?;
        }
        Ok(())
    }
}

/// Index `sx + 2*sy` of the 2×2 sub-position containing `p`.
#[inline]
pub fn quadrant_of(p: Vec2) -> usize {
    let sx = usize::from(p.x >= 0.5);
    let sy = usize::from(p.y >= 0.5);
    sx + 2 * sy
}

/// Centre of the quadrant with sub-position index `q`.
#[inline]
fn quadrant_centre(q: usize) -> Vec2 {
    let sx = (q % 2) as f32;
    let sy = (q / 2) as f32;
    Vec2::new((sx + 0.5) * 0.5, (sy + 0.5) * 0.5)
}

/// Maps a 2×2 sub-position (`sx + 2*sy`, bottom-left origin) to the index of
/// the sample that supplies that output pixel in DRMS mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleTable([u32; SAMPLES_PER_TEXEL]);

impl SampleTable {
    /// Table observed on the hardware the technique was first written for:
    ///
    /// | sub-position  | sample |
    /// |---------------|--------|
    /// | bottom-left   | 0      |
    /// | bottom-right  | 1      |
    /// | top-left      | 2      |
    /// | top-right     | 3      |
    ///
    /// Kept as the reference a discovered layout is checked against.
    pub const EXPECTED: Self = Self([0, 1, 2, 3]);

    /// Builds the table for `layout`.
    ///
    /// Each quadrant receives the sample that lies in it.  When the layout is
    /// not a clean quadrant split, the assignment with the smallest total
    /// squared distance between samples and quadrant centres wins; ties keep
    /// the lexicographically first permutation.
    pub fn from_layout(layout: &SampleLayout) -> Self {
        let positions = layout.positions();
        let mut best = [0usize, 1, 2, 3];
        let mut best_cost = f32::INFINITY;
        for perm in permutations() {
            let cost: f32 = perm
                .iter()
                .enumerate()
                .map(|(q, &s)| positions[s].distance_squared(quadrant_centre(q)))
                .sum();
            if cost < best_cost {
                best_cost = cost;
                best = perm;
            }
        }
        Self(best.map(|s| s as u32))
    }

    /// Sample index for the sub-position `sub` (each component 0 or 1).
    #[inline]
    pub fn sample_for(&self, sub: UVec2) -> u32 {
        self.0[(sub.x + 2 * sub.y) as usize]
    }

    #[inline]
    pub fn as_array(&self) -> [u32; SAMPLES_PER_TEXEL] {
        self.0
    }
}

impl Default for SampleTable {
    fn default() -> Self {
        Self::EXPECTED
    }
}

impl fmt::Display for SampleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [bl, br, tl, tr] = self.0;
        write!(f, "BL={bl} BR={br} TL={tl} TR={tr}")
    }
}

/// All 24 orderings of four sample indices, lexicographic.
fn permutations() -> impl Iterator<Item = [usize; SAMPLES_PER_TEXEL]> {
    (0..4).flat_map(|a| {
        (0..4).flat_map(move |b| {
            (0..4).flat_map(move |c| {
                (0..4).filter_map(move |d| {
                    let p = [a, b, c, d];
                    let distinct = (0..4).all(|i| (i + 1..4).all(|j| p[i] != p[j]));
                    distinct.then_some(p)
                })
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn there_are_24_permutations() {
        assert_eq!(permutations().count(), 24);
        assert_eq!(permutations().next(), Some([0, 1, 2, 3]));
    }

    #[test]
    fn gl_style_layout_gives_expected_table() {
        // Bottom-left origin positions as glGetMultisamplefv reports them on
        // GL drivers: 0 bottom-left, 1 bottom-right, 2 top-left, 3 top-right.
        let layout = SampleLayout::new([
            Vec2::new(0.375, 0.125),
            Vec2::new(0.875, 0.375),
            Vec2::new(0.125, 0.625),
            Vec2::new(0.625, 0.875),
        ]);
        assert!(layout.is_clean_quadrant_split());
        assert_eq!(SampleTable::from_layout(&layout), SampleTable::EXPECTED);
    }

    #[test]
    fn standard_pattern_flips_rows() {
        // The D3D/Vulkan pattern is defined top-down, so bottom-left is sample 2.
        let table = SampleTable::from_layout(&SampleLayout::STANDARD_4X);
        assert_eq!(table.as_array(), [2, 3, 0, 1]);
        assert_ne!(table, SampleTable::EXPECTED);
    }

    #[test]
    fn from_top_left_flips_y() {
        let layout = SampleLayout::from_top_left([
            Vec2::new(0.375, 0.125),
            Vec2::new(0.875, 0.375),
            Vec2::new(0.125, 0.625),
            Vec2::new(0.625, 0.875),
        ]);
        assert_eq!(layout, SampleLayout::STANDARD_4X);
    }

    #[test]
    fn crowded_layout_still_yields_a_permutation() {
        // Two samples share the bottom-left quadrant.
        let layout = SampleLayout::new([
            Vec2::new(0.1, 0.1),
            Vec2::new(0.4, 0.2),
            Vec2::new(0.3, 0.9),
            Vec2::new(0.9, 0.8),
        ]);
        assert!(!layout.is_clean_quadrant_split());

        let table = SampleTable::from_layout(&layout);
        let mut seen = table.as_array();
        seen.sort_unstable();
        assert_eq!(seen, [0, 1, 2, 3]);
        // Sample 3 is the only one in the top-right quadrant.
        assert_eq!(table.sample_for(UVec2::new(1, 1)), 3);
        // Sample 2 is the only one in the top half on the left.
        assert_eq!(table.sample_for(UVec2::new(0, 1)), 2);
    }

    #[test]
    fn table_lookup_uses_x_plus_two_y() {
        let table = SampleTable([3, 2, 1, 0]);
        assert_eq!(table.sample_for(UVec2::new(0, 0)), 3);
        assert_eq!(table.sample_for(UVec2::new(1, 0)), 2);
        assert_eq!(table.sample_for(UVec2::new(0, 1)), 1);
        assert_eq!(table.sample_for(UVec2::new(1, 1)), 0);
    }
}
