//! Hand-off of a user-prepared image between the preparation page and the
//! coloring page.

use std::collections::HashMap;

use tinta_engine::Palette;

pub const KEY_CONTENT: &str = "customSvgContent";
pub const KEY_COLORS: &str = "customSvgColors";
pub const KEY_TITLE: &str = "customSvgTitle";

/// Title used when a custom image arrives without one.
pub const DEFAULT_CUSTOM_TITLE: &str = "Özel Şablon";

/// String key/value persistence, e.g. browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.map.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.map.remove(key);
    }
}

/// A prepared image waiting to be colored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomImage {
    pub markup: String,
    pub palette: Palette,
    pub title: String,
}

/// Reads and writes a [`CustomImage`] under the three well-known keys.
pub struct CustomImageHandoff;

impl CustomImageHandoff {
    /// Store prepared markup and its palette. `file_name` loses its last
    /// extension to become the title.
    pub fn save(store: &mut dyn KeyValueStore, markup: &str, palette: &Palette, file_name: &str) {
        let colors = match serde_json::to_string(palette) {
            Ok(json) => json,
            Err(e) => {
                log::error!("could not encode palette: {e}");
                "[]".to_string()
            }
        };
        store.set(KEY_CONTENT, markup.to_string());
        store.set(KEY_COLORS, colors);
        store.set(KEY_TITLE, strip_extension(file_name).to_string());
    }

    /// The stored image, or `None` when content or colors are missing.
    ///
    /// A palette that does not decode is logged and replaced by an empty one.
    pub fn load(store: &dyn KeyValueStore) -> Option<CustomImage> {
        let markup = store.get(KEY_CONTENT).filter(|s| !s.is_empty())?;
        let colors = store.get(KEY_COLORS).filter(|s| !s.is_empty())?;
        let palette = serde_json::from_str::<Palette>(&colors).unwrap_or_else(|e| {
            log::error!("stored palette is not a JSON string array: {e}");
            Palette::new()
        });
        let title = store
            .get(KEY_TITLE)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_CUSTOM_TITLE.to_string());
        Some(CustomImage { markup, palette, title })
    }

    pub fn clear(store: &mut dyn KeyValueStore) {
        for key in [KEY_CONTENT, KEY_COLORS, KEY_TITLE] {
            store.remove(key);
        }
    }
}

/// `bird.final.svg` → `bird.final`; dot-files and paths keep their name.
fn strip_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() && !ext.contains('/') => stem,
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette(colors: &[&str]) -> Palette {
        colors.iter().copied().collect()
    }

    #[test]
    fn round_trip_through_store() {
        let mut store = MemoryStore::new();
        CustomImageHandoff::save(&mut store, "<svg/>", &palette(&["#111111", "#222222"]), "my bird.svg");
        assert_eq!(store.get(KEY_COLORS).as_deref(), Some(r##"["#111111","#222222"]"##));
        let img = CustomImageHandoff::load(&store).unwrap();
        assert_eq!(img.markup, "<svg/>");
        assert_eq!(img.title, "my bird");
        assert_eq!(img.palette.len(), 2);
    }

    #[test]
    fn missing_content_or_colors_is_none() {
        let mut store = MemoryStore::new();
        store.set(KEY_CONTENT, "<svg/>".into());
        assert!(CustomImageHandoff::load(&store).is_none());
        store.remove(KEY_CONTENT);
        store.set(KEY_COLORS, "[]".into());
        assert!(CustomImageHandoff::load(&store).is_none());
    }

    #[test]
    fn malformed_palette_becomes_empty() {
        let mut store = MemoryStore::new();
        store.set(KEY_CONTENT, "<svg/>".into());
        store.set(KEY_COLORS, "{oops".into());
        let img = CustomImageHandoff::load(&store).unwrap();
        assert!(img.palette.is_empty());
        assert_eq!(img.title, DEFAULT_CUSTOM_TITLE);
    }

    #[test]
    fn clear_removes_everything() {
        let mut store = MemoryStore::new();
        CustomImageHandoff::save(&mut store, "<svg/>", &Palette::new(), "x.svg");
        CustomImageHandoff::clear(&mut store);
        assert!(store.get(KEY_TITLE).is_none());
    }

    #[test]
    fn extension_stripping() {
        assert_eq!(strip_extension("a.b.svg"), "a.b");
        assert_eq!(strip_extension("noext"), "noext");
        assert_eq!(strip_extension("dir.d/file"), "dir.d/file");
    }
}
