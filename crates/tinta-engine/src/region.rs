//! Regions and palettes.

use serde::{Deserialize, Serialize};

/// Built-in palette, used only when neither the caller nor the image supplies
/// one.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#196F3D", "#7FBA00", "#3498DB", "#C0392B", "#FF5733",
    "#F1C40F", "#1F3A93", "#9B59B6", "#5D6D7E", "#935116",
];

/// One fillable area of a prepared vector image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Unique within one image.
    pub id: String,
    /// Canonical color the region must be painted with, if one was found.
    pub original_color: Option<String>,
    /// The shape's former `class` attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_class: Option<String>,
}

impl Region {
    /// Position of this region's color in `palette`.
    pub fn palette_index(&self, palette: &Palette) -> Option<usize> {
        palette.index_of(self.original_color.as_deref()?)
    }
}

/// Ordered list of distinct colors. A color's position is the number shown
/// for it (1-based in user-facing text).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in ten-color palette.
    pub fn builtin() -> Self {
        DEFAULT_PALETTE.into_iter().collect()
    }

    /// Append `color` unless it is already present. Returns whether it was
    /// added.
    pub fn push(&mut self, color: impl Into<String>) -> bool {
        let color = color.into();
        if self.contains(&color) {
            return false;
        }
        self.colors.push(color);
        true
    }

    pub fn contains(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    pub fn index_of(&self, color: &str) -> Option<usize> {
        self.colors.iter().position(|c| c == color)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.colors.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.colors.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.colors
    }
}

impl<S: Into<String>> FromIterator<S> for Palette {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut palette = Palette::new();
        for c in iter {
            palette.push(c);
        }
        palette
    }
}

impl From<Vec<String>> for Palette {
    fn from(colors: Vec<String>) -> Self {
        colors.into_iter().collect()
    }
}

impl From<Palette> for Vec<String> {
    fn from(p: Palette) -> Self {
        p.colors
    }
}
