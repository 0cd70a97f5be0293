use serde::{Deserialize, Serialize};
use tracing::warn;

use super::color::ColorResolver;

/// ISO 128 pen widths in millimetres, thinnest first.
pub const ISO_PEN_WIDTHS: [f64; 9] = [0.13, 0.18, 0.25, 0.35, 0.50, 0.70, 1.00, 1.50, 2.00];

/// Width used by [`Pen::default`].
pub const DEFAULT_PEN_WIDTH: f64 = 0.35;

/// An RGBA color with every component in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    /// Creates a color, clamping each component into `[0, 1]`.
    ///
    /// Non-finite components become 0.
    #[must_use]
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        let clamp = |v: f64| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        Self {
            r: clamp(r),
            g: clamp(g),
            b: clamp(b),
            a: clamp(a),
        }
    }

    /// Opaque color from 8-bit channels.
    #[must_use]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            1.0,
        )
    }
}

/// Dash style of a pen stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineStyle {
    #[default]
    Solid,
    LongDash,
    MediumDash,
    ShortDash,
    SparseDots,
    NormalDots,
    DashDot,
    DashDotDot,
}

impl LineStyle {
    /// Maps a style index to a style. Unknown indices fall back to `Solid`.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        match index {
            1 => Self::LongDash,
            2 => Self::MediumDash,
            3 => Self::ShortDash,
            4 => Self::SparseDots,
            5 => Self::NormalDots,
            6 => Self::DashDot,
            7 => Self::DashDotDot,
            _ => Self::Solid,
        }
    }

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Solid => 0,
            Self::LongDash => 1,
            Self::MediumDash => 2,
            Self::ShortDash => 3,
            Self::SparseDots => 4,
            Self::NormalDots => 5,
            Self::DashDot => 6,
            Self::DashDotDot => 7,
        }
    }

    /// On/off dash lengths in millimetres. Empty for solid lines.
    #[must_use]
    pub fn dash_pattern(self) -> &'static [f64] {
        match self {
            Self::Solid => &[],
            Self::LongDash => &[9.0, 3.0],
            Self::MediumDash => &[6.0, 3.0],
            Self::ShortDash => &[3.0, 9.0],
            Self::SparseDots => &[1.0, 5.0, 1.0, 5.0],
            Self::NormalDots => &[1.0, 3.0, 1.0, 3.0, 1.0, 3.0],
            Self::DashDot => &[7.0, 2.0, 1.0, 2.0],
            Self::DashDotDot => &[7.0, 1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// Stroke attributes owned by each entity.
///
/// Entities hold their own copy, so changing a default pen never affects
/// shapes that were already built with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pen {
    pub color: Rgba,
    pub color_name: Option<String>,
    pub width: f64,
    pub style: LineStyle,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            color: Rgba::BLACK,
            color_name: None,
            width: DEFAULT_PEN_WIDTH,
            style: LineStyle::Solid,
        }
    }
}

impl Pen {
    #[must_use]
    pub fn new(color: Rgba, width: f64, style: LineStyle) -> Self {
        Self {
            color,
            color_name: None,
            width,
            style,
        }
    }

    /// Pen whose width is the ISO width at `index`, if there is one.
    #[must_use]
    pub fn iso(index: usize, color: Rgba, style: LineStyle) -> Option<Self> {
        ISO_PEN_WIDTHS
            .get(index)
            .map(|&width| Self::new(color, width, style))
    }

    /// Sets the color by name.
    ///
    /// The name is kept on the pen. If `resolver` does not know it, the
    /// color falls back to black.
    #[must_use]
    pub fn with_named_color(mut self, name: &str, resolver: &dyn ColorResolver) -> Self {
        self.color = resolver.resolve(name).unwrap_or_else(|| {
            warn!(name, "unknown color name, using black");
            Rgba::BLACK
        });
        self.color_name = Some(name.to_owned());
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::color::NamedColors;

    #[test]
    fn rgba_clamps_components() {
        let c = Rgba::new(1.5, -0.2, 0.5, f64::NAN);
        assert_eq!(c, Rgba::new(1.0, 0.0, 0.5, 0.0));
    }

    #[test]
    fn style_index_maps_both_ways() {
        for i in 0..8 {
            assert_eq!(LineStyle::from_index(i).index(), i);
        }
        assert_eq!(LineStyle::from_index(42), LineStyle::Solid);
        assert!(LineStyle::Solid.dash_pattern().is_empty());
        assert_eq!(LineStyle::DashDot.dash_pattern(), &[7.0, 2.0, 1.0, 2.0]);
    }

    #[test]
    fn iso_pens() {
        let pen = Pen::iso(4, Rgba::BLACK, LineStyle::Solid).unwrap();
        assert!((pen.width - 0.5).abs() < 1e-12);
        assert!(Pen::iso(ISO_PEN_WIDTHS.len(), Rgba::BLACK, LineStyle::Solid).is_none());
    }

    #[test]
    fn named_color_resolves_or_falls_back() {
        let colors = NamedColors::css_basic();
        let red = Pen::default().with_named_color("Red", &colors);
        assert_eq!(red.color, Rgba::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(red.color_name.as_deref(), Some("Red"));

        let odd = Pen::default().with_named_color("no-such-color", &colors);
        assert_eq!(odd.color, Rgba::BLACK);
        assert_eq!(odd.color_name.as_deref(), Some("no-such-color"));
    }

    #[test]
    fn cloned_pen_is_independent() {
        let base = Pen::default();
        let mut copy = base.clone();
        copy.width = 2.0;
        assert!((copy.width - 2.0).abs() < 1e-12);
        assert!((base.width - DEFAULT_PEN_WIDTH).abs() < 1e-12);
    }
}
