//! Where images come from: sources, fetchers and the template catalog.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tinta_engine::PixelBuffer;

use crate::error::SourceLoadError;

/// An image to color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum ImageSource {
    /// PNG/JPEG/… line art for the flood-fill surface.
    RasterUrl(String),
    /// SVG markup to fetch.
    VectorUrl(String),
    /// SVG markup already in memory.
    VectorInline(String),
}

impl ImageSource {
    pub fn is_vector(&self) -> bool {
        !matches!(self, Self::RasterUrl(_))
    }

    /// Short description for logs; never the inline markup itself.
    pub fn describe(&self) -> &str {
        match self {
            Self::RasterUrl(u) | Self::VectorUrl(u) => u,
            Self::VectorInline(_) => "<inline markup>",
        }
    }

    /// Fetch and decode a raster source.
    pub fn load_raster(&self, fetcher: &dyn SourceFetcher) -> Result<PixelBuffer, SourceLoadError> {
        match self {
            Self::RasterUrl(url) => decode_raster(&fetcher.fetch(url)?),
            other => Err(SourceLoadError::NotRaster(other.describe().to_string())),
        }
    }

    /// Fetch vector markup. Inline markup is returned as-is.
    ///
    /// A raster source is treated as a markup location too, so a surface
    /// configured for vectors reports a parse error rather than silently
    /// switching engines.
    pub fn load_markup(&self, fetcher: &dyn SourceFetcher) -> Result<String, SourceLoadError> {
        match self {
            Self::VectorInline(markup) => Ok(markup.clone()),
            Self::VectorUrl(url) | Self::RasterUrl(url) => {
                String::from_utf8(fetcher.fetch(url)?).map_err(|_| SourceLoadError::NotUtf8(url.clone()))
            }
        }
    }
}

/// Decode any supported raster format into straight RGBA8.
pub fn decode_raster(bytes: &[u8]) -> Result<PixelBuffer, SourceLoadError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(PixelBuffer::from_rgba(width, height, rgba.into_raw())?)
}

// ── Fetchers ──────────────────────────────────────────────────────────────

/// Resolves a source location to bytes.
pub trait SourceFetcher {
    fn fetch(&self, location: &str) -> Result<Vec<u8>, SourceLoadError>;
}

/// Reads locations as file paths, relative to an optional root directory.
///
/// A leading `/` is stripped when a root is set, so site-style paths such
/// as `/images/bird.svg` resolve inside the root.
#[derive(Debug, Clone, Default)]
pub struct FileFetcher {
    root: Option<PathBuf>,
}

impl FileFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: Some(root.into()) }
    }

    pub fn resolve(&self, location: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(location.trim_start_matches('/')),
            None => PathBuf::from(location),
        }
    }
}

impl SourceFetcher for FileFetcher {
    fn fetch(&self, location: &str) -> Result<Vec<u8>, SourceLoadError> {
        let path = self.resolve(location);
        log::debug!("reading {}", path.display());
        std::fs::read(&path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => SourceLoadError::NotFound(path.display().to_string()),
            _ => SourceLoadError::Io { path, source },
        })
    }
}

/// In-memory fetcher keyed by location.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, location: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.entries.insert(location.into(), bytes.into());
    }
}

impl SourceFetcher for MemoryFetcher {
    fn fetch(&self, location: &str) -> Result<Vec<u8>, SourceLoadError> {
        self.entries
            .get(location)
            .cloned()
            .ok_or_else(|| SourceLoadError::NotFound(location.to_string()))
    }
}

// ── Templates ─────────────────────────────────────────────────────────────

/// A built-in picture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub title: String,
    pub source: ImageSource,
}

impl Template {
    /// A vector template served from `/images/<id>.svg`.
    pub fn vector(id: impl Into<String>, title: impl Into<String>) -> Self {
        let id = id.into();
        let source = ImageSource::VectorUrl(format!("/images/{id}.svg"));
        Self { id, title: title.into(), source }
    }
}

/// The list of templates offered to the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    pub fn find(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_find() {
        let catalog = TemplateCatalog::new(vec![Template::vector("bird", "Kuş"), Template::vector("fish", "Balık")]);
        let t = catalog.find("fish").unwrap();
        assert_eq!(t.title, "Balık");
        assert_eq!(t.source, ImageSource::VectorUrl("/images/fish.svg".into()));
        assert!(catalog.find("cat").is_none());
    }

    #[test]
    fn file_fetcher_resolves_under_root() {
        let f = FileFetcher::with_root("/srv/site");
        assert_eq!(f.resolve("/images/bird.svg"), PathBuf::from("/srv/site/images/bird.svg"));
        assert_eq!(FileFetcher::new().resolve("a/b.svg"), PathBuf::from("a/b.svg"));
    }

    #[test]
    fn file_fetcher_reads_files() {
        let dir = std::env::temp_dir().join(format!("tinta-fetch-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("x.svg"), "<svg/>").unwrap();
        let f = FileFetcher::with_root(&dir);
        assert_eq!(f.fetch("x.svg").unwrap(), b"<svg/>");
        assert!(matches!(f.fetch("missing.svg"), Err(SourceLoadError::NotFound(_))));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn inline_markup_needs_no_fetch() {
        let src = ImageSource::VectorInline("<svg/>".into());
        assert_eq!(src.load_markup(&MemoryFetcher::new()).unwrap(), "<svg/>");
        assert!(matches!(src.load_raster(&MemoryFetcher::new()), Err(SourceLoadError::NotRaster(_))));
    }

    #[test]
    fn undecodable_raster() {
        let mut f = MemoryFetcher::new();
        f.insert("a.png", b"not a png".to_vec());
        let err = ImageSource::RasterUrl("a.png".into()).load_raster(&f).unwrap_err();
        assert!(matches!(err, SourceLoadError::Decode(_)));
    }
}
