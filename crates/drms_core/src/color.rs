//! RGBA colour used by the resolve reference and the clear colour.
//!
//! Stored as four `f32` values in linear light (0.0 – 1.0), the same layout
//! the shaders write into the `Rgba8Unorm` target.

/// Linear-space RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    // ── Constants ───────────────────────────────────────────────────────────

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);

    // ── Constructors ────────────────────────────────────────────────────────

    /// Opaque colour from red, green, blue components.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    // ── Operations ──────────────────────────────────────────────────────────

    /// Same colour with alpha replaced.
    #[inline]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Arithmetic mean of the RGB channels of `samples`; alpha is left at 1.
    ///
    /// This is the box filter an MSAA resolve applies.  Returns black for an
    /// empty slice.
    pub fn average_rgb(samples: &[Color]) -> Self {
        if samples.is_empty() {
            return Self::BLACK;
        }
        let n = samples.len() as f32;
        let (r, g, b) = samples
            .iter()
            .fold((0.0, 0.0, 0.0), |(r, g, b), c| (r + c.r, g + c.g, b + c.b));
        Self::rgb(r / n, g / n, b / n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_of_four_samples() {
        let avg = Color::average_rgb(&[Color::RED, Color::GREEN, Color::BLUE, Color::WHITE]);
        assert!((avg.r - 0.5).abs() < 1e-6);
        assert!((avg.g - 0.5).abs() < 1e-6);
        assert!((avg.b - 0.5).abs() < 1e-6);
        assert_eq!(avg.a, 1.0);
    }

    #[test]
    fn average_of_nothing_is_black() {
        assert_eq!(Color::average_rgb(&[]), Color::BLACK);
    }
}
