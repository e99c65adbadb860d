use super::{PixelPos, Vec2};

/// Axis-aligned rectangle in client space (top-left origin).
///
/// Used as the on-screen display rect of a drawing surface, which may be
/// scaled relative to the pixel buffer it shows.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        p.x >= self.origin.x
            && p.y >= self.origin.y
            && p.x < self.origin.x + self.size.x
            && p.y < self.origin.y + self.size.y
    }

    /// Map a client-space point inside this display rect to a pixel position
    /// in a `width × height` buffer.
    ///
    /// The offset from the rect origin is scaled by `buffer / display` per
    /// axis and floored. Returns `None` for points outside the rect, an empty
    /// rect, or non-finite input.
    pub fn client_to_buffer(self, client: Vec2, width: u32, height: u32) -> Option<PixelPos> {
        if self.is_empty() || !client.is_finite() || !self.contains(client) {
            return None;
        }
        let local = client - self.origin;
        let scale_x = width as f32 / self.size.x;
        let scale_y = height as f32 / self.size.y;
        let x = (local.x * scale_x).floor() as u32;
        let y = (local.y * scale_y).floor() as u32;
        (x < width && y < height).then_some(PixelPos::new(x, y))
    }
}
