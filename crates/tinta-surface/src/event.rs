use tinta_engine::coords::{Rect, Vec2};
use tinta_markup::NodeId;

/// Input routed to a coloring surface.
#[derive(Debug, Clone)]
pub enum SurfaceEvent {
    /// Palette swatch tapped.
    SelectColor { index: usize },
    /// Pointer click on a raster surface shown in `display`.
    Click { pos: Vec2, display: Rect },
    /// Pointer click on a vector surface; `target` is the node under the
    /// pointer.
    ClickNode { target: NodeId },
    /// Reset button.
    Reset,
}

/// Result returned by [`ColoringSurface::on_event`](crate::surface::ColoringSurface::on_event).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// The event changed surface state.
    Consumed,
    /// The event was not applicable or was a no-op.
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }

    #[inline]
    pub fn from_bool(changed: bool) -> Self {
        if changed { Self::Consumed } else { Self::Ignored }
    }
}
