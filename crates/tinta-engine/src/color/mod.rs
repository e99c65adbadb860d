//! Color model shared by the extractor, the palette and the flood fill.
//!
//! Scope:
//! - `Rgb`: straight 8-bit sRGB, canonical form `#rrggbb`
//! - CSS color parsing (hex, `rgb()`/`rgba()`, `hsl()`/`hsla()`, named colors)
//! - normalization of arbitrary fill values to canonical hex

mod named;
mod parse;
mod rgb;

pub use parse::{normalize_color, parse_css_color, ColorParseError, CssColor};
pub use rgb::Rgb;
