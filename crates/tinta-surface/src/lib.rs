//! tinta coloring surfaces.
//!
//! Drives the engine for one image at a time: loading from a source, routing
//! palette and click events, tracking progress, and exporting the result.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::time::Instant;
//! use tinta_surface::prelude::*;
//!
//! let mut surface = VectorSurface::new(SurfaceConfig::default(), None);
//! surface
//!     .load(&ImageSource::VectorUrl("/images/bird.svg".into()), &FileFetcher::new())
//!     .unwrap();
//!
//! surface.on_event(&SurfaceEvent::SelectColor { index: 0 }, Instant::now());
//! surface.click_region("area1", Instant::now());
//! println!("{:.0}% done", surface.progress() * 100.0);
//! ```

pub mod completion;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod lifecycle;
pub mod palette;
pub mod render;
pub mod share;
pub mod source;
pub mod store;
pub mod surface;

pub use config::SurfaceConfig;
pub use error::{ExportError, SourceLoadError, SurfaceError};
pub use surface::{ColoringSurface, RasterSurface, SurfaceCore, VectorSurface};

pub mod prelude {
    pub use crate::config::SurfaceConfig;
    pub use crate::error::{ExportError, SourceLoadError, SurfaceError};
    pub use crate::event::{EventResult, SurfaceEvent};
    pub use crate::export::ExportedImage;
    pub use crate::lifecycle::{LoadTicket, Phase};
    pub use crate::share::ShareRequest;
    pub use crate::source::{FileFetcher, ImageSource, MemoryFetcher, SourceFetcher, Template, TemplateCatalog};
    pub use crate::store::{CustomImage, CustomImageHandoff, KeyValueStore, MemoryStore};
    pub use crate::surface::{ColoringSurface, RasterSurface, VectorSurface};
    pub use tinta_engine::coords::{PixelPos, Rect, Vec2};
    pub use tinta_engine::{Palette, PrepareOptions};
}
