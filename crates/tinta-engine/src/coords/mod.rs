//! Coordinate types for pointer routing.
//!
//! Client space is the host's logical pixel space (origin top-left, +Y down).
//! Buffer space is integer pixel indices into a [`PixelBuffer`](crate::flood::PixelBuffer).

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::{PixelPos, Vec2};
