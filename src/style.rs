//! Stroke and fill properties for figures.

use serde::{Deserialize, Serialize};

/// RGBA8 color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

/// Outline properties of a figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    /// Stroke width, never negative.
    pub width: f64,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: Color::black(),
            width: 1.0,
        }
    }
}

/// Interior properties of a figure; meaningful only for polygons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub color: Color,
    /// 0 = fully transparent, 255 = opaque.
    pub alpha: u8,
}

impl Default for Fill {
    fn default() -> Self {
        Self {
            color: Color::white(),
            alpha: 255,
        }
    }
}

impl Fill {
    /// Fill color with the alpha channel applied.
    pub fn effective_color(&self) -> Color {
        Color::new(self.color.r, self.color.g, self.color.b, self.alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(Stroke::default().color, Color::black());
        assert!((Stroke::default().width - 1.0).abs() < f64::EPSILON);
        assert_eq!(Fill::default().color, Color::white());
        assert_eq!(Fill::default().alpha, 255);
    }

    #[test]
    fn test_effective_fill_color() {
        let fill = Fill {
            color: Color::new(10, 20, 30, 255),
            alpha: 128,
        };
        assert_eq!(fill.effective_color(), Color::new(10, 20, 30, 128));
    }
}
