use std::collections::HashMap;

use super::pen::Rgba;

/// Resolves color names to concrete colors.
///
/// Implemented by whatever owns the application's color table. Lookup
/// misses are reported as `None`; callers choose the fallback.
pub trait ColorResolver {
    fn resolve(&self, name: &str) -> Option<Rgba>;
}

/// A case-insensitive name to color table.
#[derive(Debug, Clone, Default)]
pub struct NamedColors {
    table: HashMap<String, Rgba>,
}

impl NamedColors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The sixteen basic CSS colors.
    #[must_use]
    pub fn css_basic() -> Self {
        const BASIC: [(&str, u8, u8, u8); 16] = [
            ("black", 0, 0, 0),
            ("silver", 192, 192, 192),
            ("gray", 128, 128, 128),
            ("white", 255, 255, 255),
            ("maroon", 128, 0, 0),
            ("red", 255, 0, 0),
            ("purple", 128, 0, 128),
            ("fuchsia", 255, 0, 255),
            ("green", 0, 128, 0),
            ("lime", 0, 255, 0),
            ("olive", 128, 128, 0),
            ("yellow", 255, 255, 0),
            ("navy", 0, 0, 128),
            ("blue", 0, 0, 255),
            ("teal", 0, 128, 128),
            ("aqua", 0, 255, 255),
        ];
        let mut colors = Self::new();
        for (name, r, g, b) in BASIC {
            colors.insert(name, Rgba::from_rgb8(r, g, b));
        }
        colors
    }

    /// Adds or replaces a named color.
    pub fn insert(&mut self, name: &str, color: Rgba) {
        self.table.insert(name.to_lowercase(), color);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl ColorResolver for NamedColors {
    fn resolve(&self, name: &str) -> Option<Rgba> {
        self.table.get(&name.to_lowercase()).copied()
    }
}
