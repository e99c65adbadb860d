//! Boundary-aware flood fill over RGBA pixel buffers.
//!
//! A pixel is *fillable* when each of its RGB channels is below the darkness
//! threshold and it is not fully transparent. A fill replaces a 4-connected
//! run of fillable pixels with the target color at a fixed alpha.

use thiserror::Error;

use crate::color::Rgb;
use crate::coords::PixelPos;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FillError {
    #[error("seed ({x}, {y}) is outside the {width}x{height} buffer")]
    SeedOutOfBounds { x: u32, y: u32, width: u32, height: u32 },
    #[error("unsupported fill color {0:?}; expected #rrggbb")]
    UnsupportedColorFormat(String),
    #[error("pixel data is {actual} bytes, expected {expected} for the given size")]
    BufferSize { expected: usize, actual: usize },
}

// ── FillParams ────────────────────────────────────────────────────────────

/// Fill tuning.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FillParams {
    /// Channels strictly below this value count as dark.
    pub darkness_threshold: u8,
    /// Alpha written to filled pixels.
    pub fill_alpha: u8,
}

impl Default for FillParams {
    fn default() -> Self {
        Self { darkness_threshold: 50, fill_alpha: 200 }
    }
}

impl FillParams {
    pub fn with_darkness_threshold(mut self, threshold: u8) -> Self {
        self.darkness_threshold = threshold;
        self
    }

    pub fn with_fill_alpha(mut self, alpha: u8) -> Self {
        self.fill_alpha = alpha;
        self
    }

    #[inline]
    pub fn is_fillable(&self, px: [u8; 4]) -> bool {
        let t = self.darkness_threshold;
        px[0] < t && px[1] < t && px[2] < t && px[3] > 0
    }
}

// ── PixelBuffer ───────────────────────────────────────────────────────────

/// Row-major RGBA8 pixels, no padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, data: vec![0; width as usize * height as usize * 4] }
    }

    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, FillError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(FillError::BufferSize { expected, actual: data.len() });
        }
        Ok(Self { width, height, data })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let o = self.offset(x, y);
        Some([self.data[o], self.data[o + 1], self.data[o + 2], self.data[o + 3]])
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, px: [u8; 4]) {
        if x < self.width && y < self.height {
            let o = self.offset(x, y);
            self.data[o..o + 4].copy_from_slice(&px);
        }
    }

    /// Paint every pixel in the `w × h` block at (`x`, `y`), clipped.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, px: [u8; 4]) {
        for yy in y..y.saturating_add(h).min(self.height) {
            for xx in x..x.saturating_add(w).min(self.width) {
                self.set_pixel(xx, yy, px);
            }
        }
    }
}

// ── Fill ──────────────────────────────────────────────────────────────────

/// Number of fillable pixels in `buffer`.
pub fn count_fillable(buffer: &PixelBuffer, params: &FillParams) -> usize {
    buffer
        .data
        .chunks_exact(4)
        .filter(|px| params.is_fillable([px[0], px[1], px[2], px[3]]))
        .count()
}

/// Flood-fill the fillable area containing `seed` with `color` (`#rrggbb`).
///
/// Returns the number of pixels written. A seed that is not fillable is a
/// no-op returning `Ok(0)`. On error the buffer is untouched.
pub fn flood_fill(
    buffer: &mut PixelBuffer,
    seed: PixelPos,
    color: &str,
    params: &FillParams,
) -> Result<usize, FillError> {
    let (w, h) = (buffer.width, buffer.height);
    if seed.x >= w || seed.y >= h {
        return Err(FillError::SeedOutOfBounds { x: seed.x, y: seed.y, width: w, height: h });
    }
    let Some(rgb) = Rgb::from_hex(color) else {
        log::debug!("flood fill skipped: unsupported color {color:?}");
        return Err(FillError::UnsupportedColorFormat(color.to_string()));
    };
    let fill_px = [rgb.r, rgb.g, rgb.b, params.fill_alpha];

    let wu = w as usize;
    // Written pixels stay fillable when the target color is itself dark.
    let mut done = vec![false; wu * h as usize];
    let matches = |buf: &PixelBuffer, done: &[bool], x: u32, y: u32| {
        !done[y as usize * wu + x as usize]
            && buf.pixel(x, y).is_some_and(|px| params.is_fillable(px))
    };

    if !matches(buffer, &done, seed.x, seed.y) {
        return Ok(0);
    }

    let mut filled = 0usize;
    let mut stack = vec![(seed.x, seed.y)];

    while let Some((x, y)) = stack.pop() {
        // Walk up to the top of this column's run.
        let mut cy = y;
        while cy > 0 && matches(buffer, &done, x, cy - 1) {
            cy -= 1;
        }
        if !matches(buffer, &done, x, cy) {
            continue;
        }

        let mut reach_left = false;
        let mut reach_right = false;

        while cy < h && matches(buffer, &done, x, cy) {
            buffer.set_pixel(x, cy, fill_px);
            done[cy as usize * wu + x as usize] = true;
            filled += 1;

            if x > 0 {
                if matches(buffer, &done, x - 1, cy) {
                    if !reach_left {
                        stack.push((x - 1, cy));
                        reach_left = true;
                    }
                } else {
                    reach_left = false;
                }
            }
            if x + 1 < w {
                if matches(buffer, &done, x + 1, cy) {
                    if !reach_right {
                        stack.push((x + 1, cy));
                        reach_right = true;
                    }
                } else {
                    reach_right = false;
                }
            }
            cy += 1;
        }
    }

    log::debug!("flood fill at ({}, {}) wrote {filled} pixels", seed.x, seed.y);
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DARK: [u8; 4] = [0, 0, 0, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];

    /// 10×10, 1px white border around an 8×8 dark interior.
    fn framed() -> PixelBuffer {
        let mut b = PixelBuffer::new(10, 10);
        b.fill_rect(0, 0, 10, 10, WHITE);
        b.fill_rect(1, 1, 8, 8, DARK);
        b
    }

    fn fill(b: &mut PixelBuffer, x: u32, y: u32, color: &str) -> Result<usize, FillError> {
        flood_fill(b, PixelPos::new(x, y), color, &FillParams::default())
    }

    // ── scenarios ─────────────────────────────────────────────────────────

    #[test]
    fn fills_enclosed_interior() {
        let mut b = framed();
        assert_eq!(count_fillable(&b, &FillParams::default()), 64);
        assert_eq!(fill(&mut b, 5, 5, "#3498DB").unwrap(), 64);
        assert_eq!(b.pixel(1, 1), Some([0x34, 0x98, 0xdb, 200]));
        assert_eq!(b.pixel(8, 8), Some([0x34, 0x98, 0xdb, 200]));
        assert_eq!(b.pixel(0, 0), Some(WHITE));
        assert_eq!(count_fillable(&b, &FillParams::default()), 0);
    }

    #[test]
    fn second_fill_of_same_area_is_noop() {
        let mut b = framed();
        fill(&mut b, 5, 5, "#3498DB").unwrap();
        let snapshot = b.clone();
        assert_eq!(fill(&mut b, 5, 5, "#C0392B").unwrap(), 0);
        assert_eq!(b, snapshot);
    }

    #[test]
    fn light_seed_is_noop() {
        let mut b = framed();
        let snapshot = b.clone();
        assert_eq!(fill(&mut b, 0, 0, "#3498DB").unwrap(), 0);
        assert_eq!(b, snapshot);
    }

    #[test]
    fn transparent_dark_pixels_are_not_fillable() {
        let mut b = PixelBuffer::new(3, 3);
        assert_eq!(fill(&mut b, 1, 1, "#3498DB").unwrap(), 0);
    }

    #[test]
    fn walls_split_regions() {
        // Vertical white wall at x = 5 splits the interior.
        let mut b = framed();
        b.fill_rect(5, 0, 1, 10, WHITE);
        assert_eq!(fill(&mut b, 2, 2, "#FF5733").unwrap(), 4 * 8);
        assert_eq!(b.pixel(7, 7), Some(DARK));
    }

    #[test]
    fn concave_region_is_filled_completely() {
        // U shape: two arms joined at the bottom.
        let mut b = PixelBuffer::new(7, 7);
        b.fill_rect(0, 0, 7, 7, WHITE);
        b.fill_rect(1, 1, 2, 5, DARK);
        b.fill_rect(4, 1, 2, 5, DARK);
        b.fill_rect(1, 5, 5, 1, DARK);
        let expected = count_fillable(&b, &FillParams::default());
        assert_eq!(fill(&mut b, 4, 1, "#9B59B6").unwrap(), expected);
    }

    #[test]
    fn dark_target_color_terminates() {
        let mut b = framed();
        assert_eq!(fill(&mut b, 5, 5, "#000000").unwrap(), 64);
    }

    // ── errors ────────────────────────────────────────────────────────────

    #[test]
    fn out_of_bounds_seed() {
        let mut b = framed();
        assert!(matches!(fill(&mut b, 10, 0, "#000000"), Err(FillError::SeedOutOfBounds { .. })));
    }

    #[test]
    fn malformed_color_leaves_buffer_untouched() {
        let mut b = framed();
        let snapshot = b.clone();
        for bad in ["red", "#fff", "#12345g", ""] {
            assert!(matches!(fill(&mut b, 5, 5, bad), Err(FillError::UnsupportedColorFormat(_))));
        }
        assert_eq!(b, snapshot);
    }

    #[test]
    fn custom_params() {
        let mut b = PixelBuffer::new(2, 1);
        b.set_pixel(0, 0, [80, 80, 80, 255]);
        b.set_pixel(1, 0, [80, 80, 80, 255]);
        let params = FillParams::default().with_darkness_threshold(100).with_fill_alpha(255);
        assert_eq!(flood_fill(&mut b, PixelPos::new(0, 0), "#102030", &params).unwrap(), 2);
        assert_eq!(b.pixel(1, 0), Some([0x10, 0x20, 0x30, 255]));
    }

    #[test]
    fn buffer_size_is_checked() {
        assert!(PixelBuffer::from_rgba(2, 2, vec![0; 15]).is_err());
        assert!(PixelBuffer::from_rgba(2, 2, vec![0; 16]).is_ok());
    }

    proptest! {
        #[test]
        fn fill_writes_target_rgb_with_forced_alpha(r: u8, g: u8, b: u8, alpha: u8) {
            let hex = format!("#{r:02x}{g:02x}{b:02x}");
            let mut buf = PixelBuffer::new(1, 1);
            buf.set_pixel(0, 0, DARK);
            let params = FillParams::default().with_fill_alpha(alpha.max(1));
            prop_assert_eq!(flood_fill(&mut buf, PixelPos::new(0, 0), &hex, &params), Ok(1));
            prop_assert_eq!(buf.pixel(0, 0), Some([r, g, b, alpha.max(1)]));
        }
    }
}
