use egui::Color32;
use serde::{Deserialize, Serialize};

/// An 8-bit RGBA color, stored unpremultiplied.
///
/// Equality is exact per channel. There is deliberately no tolerance,
/// so anti-aliased edges are never merged with the color they fade into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Same color with the alpha channel forced to fully opaque.
    pub const fn opaque(self) -> Self {
        Self::rgb(self.r, self.g, self.b)
    }

    /// The paint-style representation, e.g. `rgb(255,0,0)`. Alpha is not included.
    pub fn to_paint_string(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }

    /// `#rrggbb`, lowercase and zero padded. Alpha is not included.
    pub fn to_hex_string(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parses `#rrggbb` (the `#` is optional). Returns an opaque color.
    pub fn from_hex_str(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_array([r, g, b, a]: [u8; 4]) -> Self {
        Self::rgba(r, g, b, a)
    }

    /// Source-over: `self` painted on top of `dst` with `coverage` in `0.0..=1.0`.
    pub fn over(self, dst: Color, coverage: f32) -> Color {
        let sa = (self.a as f32 / 255.0) * coverage.clamp(0.0, 1.0);
        if sa >= 1.0 {
            return self;
        }
        let da = dst.a as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return Color::TRANSPARENT;
        }
        let mix = |s: u8, d: u8| {
            let c = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
            c.round().clamp(0.0, 255.0) as u8
        };
        Color::rgba(
            mix(self.r, dst.r),
            mix(self.g, dst.g),
            mix(self.b, dst.b),
            (out_a * 255.0).round() as u8,
        )
    }

    /// Destination-out: removes `self`'s alpha (scaled by `coverage`) from `dst`.
    pub fn erase_from(self, dst: Color, coverage: f32) -> Color {
        let sa = (self.a as f32 / 255.0) * coverage.clamp(0.0, 1.0);
        let out_a = (dst.a as f32 * (1.0 - sa)).round() as u8;
        if out_a == 0 {
            Color::TRANSPARENT
        } else {
            Color::rgba(dst.r, dst.g, dst.b, out_a)
        }
    }
}

impl From<Color32> for Color {
    fn from(c: Color32) -> Self {
        Self::from_array(c.to_srgba_unmultiplied())
    }
}

impl From<Color> for Color32 {
    fn from(c: Color) -> Self {
        Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
    }
}

/// How a paint operation combines with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompositeMode {
    /// Paint adds color (source-over).
    #[default]
    Normal,
    /// Paint removes color (destination-out).
    Erase,
}

impl CompositeMode {
    pub fn apply(self, src: Color, dst: Color, coverage: f32) -> Color {
        match self {
            CompositeMode::Normal => src.over(dst, coverage),
            CompositeMode::Erase => src.erase_from(dst, coverage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_exact() {
        assert_eq!(Color::rgba(1, 2, 3, 4), Color::rgba(1, 2, 3, 4));
        assert_ne!(Color::rgba(1, 2, 3, 4), Color::rgba(1, 2, 3, 5));
        assert_ne!(Color::rgb(254, 0, 0), Color::RED);
    }

    #[test]
    fn test_string_representations() {
        let c = Color::rgba(255, 8, 0, 17);
        assert_eq!(c.to_paint_string(), "rgb(255,8,0)");
        assert_eq!(c.to_hex_string(), "#ff0800");
        assert_eq!(Color::BLACK.to_hex_string(), "#000000");
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Color::from_hex_str("#ff0800"), Some(Color::rgb(255, 8, 0)));
        assert_eq!(Color::from_hex_str("0000FF"), Some(Color::BLUE));
        assert_eq!(Color::from_hex_str("#fff"), None);
        assert_eq!(Color::from_hex_str("#gg0000"), None);
    }

    #[test]
    fn test_opaque_source_over_replaces() {
        assert_eq!(Color::RED.over(Color::WHITE, 1.0), Color::RED);
        assert_eq!(Color::RED.over(Color::TRANSPARENT, 1.0), Color::RED);
    }

    #[test]
    fn test_half_coverage_blends() {
        let out = Color::BLACK.over(Color::WHITE, 0.5);
        assert_eq!(out.a, 255);
        assert!(out.r > 120 && out.r < 135);
    }

    #[test]
    fn test_erase_clears_alpha() {
        assert_eq!(
            CompositeMode::Erase.apply(Color::BLACK, Color::RED, 1.0),
            Color::TRANSPARENT
        );
        let half = CompositeMode::Erase.apply(Color::BLACK, Color::RED, 0.5);
        assert_eq!((half.r, half.a), (255, 128));
    }

    #[test]
    fn test_color32_conversion() {
        let c = Color::rgb(10, 20, 30);
        let c32: Color32 = c.into();
        assert_eq!(Color::from(c32), c);
    }
}
