//! Per-fragment noise term applied by the scene shader.
//!
//! Mirrors `rand()` in `scene.wgsl`.  The scalar only exists to make the
//! difference between sample placements visible; the GPU's `sin` precision
//! differs from the CPU's, so the two are equal in shape, not bit-for-bit.
use glam::Vec2;

const DOT: Vec2 = Vec2::new(12.9898, 78.233);
const SCALE: f32 = 43758.5453;

/// Deterministic pseudo-random scalar in `[0, 1)` for a fragment coordinate.
#[inline]
pub fn fragment_noise(frag_coord: Vec2) -> f32 {
    let v = frag_coord.dot(DOT).sin() * SCALE;
    // `fract` the GLSL way: always non-negative
    v - v.floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_in_unit_interval() {
        for y in 0..32 {
            for x in 0..32 {
                let n = fragment_noise(Vec2::new(x as f32 + 0.5, y as f32 + 0.5));
                assert!((0.0..1.0).contains(&n), "noise {n} out of range at {x},{y}");
            }
        }
    }

    #[test]
    fn same_coordinate_same_value() {
        let p = Vec2::new(123.5, 45.5);
        assert_eq!(fragment_noise(p), fragment_noise(p));
    }
}
