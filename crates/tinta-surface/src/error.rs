use std::path::PathBuf;

use thiserror::Error;
use tinta_engine::PrepareError;

/// Fetching or decoding an image source failed.
#[derive(Debug, Error)]
pub enum SourceLoadError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no image at {0}")]
    NotFound(String),
    #[error("vector source {0} is not valid UTF-8")]
    NotUtf8(String),
    #[error("could not decode raster image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("{0} is not a raster source")]
    NotRaster(String),
    #[error("decoded pixels do not match the image size: {0}")]
    Layout(#[from] tinta_engine::FillError),
}

/// Producing the export image failed. The surface is unaffected.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export: no changes since load or reset")]
    NoChanges,
    #[error("could not render markup for export: {0}")]
    Render(#[from] resvg::usvg::Error),
    #[error("cannot allocate a {width}x{height} export canvas")]
    Canvas { width: u32, height: u32 },
    #[error("png encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// A load that ended the surface in its error phase.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error(transparent)]
    Source(#[from] SourceLoadError),
    #[error(transparent)]
    Prepare(#[from] PrepareError),
    #[error("load superseded by a newer one")]
    Superseded,
}
