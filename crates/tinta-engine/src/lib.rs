//! tinta engine crate.
//!
//! Pure region-coloring logic: color recovery and preparation of vector
//! images, the raster flood fill, and the vector paint rules. Nothing here
//! touches a display, a file or a clock; the surface crate drives it.

pub mod color;
pub mod coords;
pub mod css;
pub mod extract;
pub mod flood;
pub mod logging;
pub mod paint;
pub mod prepare;
pub mod region;
pub mod time;

pub use extract::{extract_color, Extraction};
pub use flood::{count_fillable, flood_fill, FillError, FillParams, PixelBuffer};
pub use paint::{compute_highlights, paint, render_states, Highlight, PaintedMap, RenderState, Selection};
pub use prepare::{prepare, prepare_document, PrepareError, PrepareOptions, PrepareReport, PreparedImage};
pub use region::{Palette, Region, DEFAULT_PALETTE};
