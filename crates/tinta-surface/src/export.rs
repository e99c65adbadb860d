//! Export of the colored picture as a PNG.

use base64::Engine;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use resvg::{tiny_skia, usvg};
use tinta_engine::PixelBuffer;

use crate::error::ExportError;
use crate::share::ShareRequest;

/// A PNG-encoded export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl ExportedImage {
    /// `data:image/png;base64,…`
    pub fn data_url(&self) -> String {
        let b64 = base64::engine::general_purpose::STANDARD.encode(&self.png);
        format!("data:image/png;base64,{b64}")
    }

    /// Share payload referencing this image by data URL.
    pub fn share_request(&self, title: &str) -> ShareRequest {
        ShareRequest::new(self.data_url(), title)
    }
}

/// Encode a pixel buffer as-is.
pub fn encode_png(buffer: &PixelBuffer) -> Result<ExportedImage, ExportError> {
    encode_rgba(buffer.as_bytes(), buffer.width(), buffer.height())
}

/// Render SVG markup at its natural size and encode it.
pub fn rasterize_markup(markup: &str) -> Result<ExportedImage, ExportError> {
    let tree = usvg::Tree::from_str(markup, &usvg::Options::default())?;

    let size = tree.size();
    let width = size.width().ceil().max(1.0) as u32;
    let height = size.height().ceil().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or(ExportError::Canvas { width, height })?;
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    encode_rgba(&unpremultiply(pixmap.data()), width, height)
}

fn encode_rgba(data: &[u8], width: u32, height: u32) -> Result<ExportedImage, ExportError> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(data, width, height, ExtendedColorType::Rgba8)?;
    log::debug!("encoded {width}x{height} png, {} bytes", png.len());
    Ok(ExportedImage { png, width, height })
}

/// tiny-skia stores premultiplied alpha; PNG wants straight alpha.
fn unpremultiply(data: &[u8]) -> Vec<u8> {
    let mut out = data.to_vec();
    for px in out.chunks_exact_mut(4) {
        let a = px[3];
        if a != 0 && a != 255 {
            for c in &mut px[..3] {
                *c = ((*c as u32 * 255 + a as u32 / 2) / a as u32).min(255) as u8;
            }
        }
    }
    out
}

/// Download name: the title lower-cased with whitespace runs collapsed to
/// `-`, then `-<label>.png`.
pub fn export_file_name(title: &str, label: &str) -> String {
    let lower = title.to_lowercase();
    let mut slug = String::with_capacity(lower.len());
    let mut in_space = false;
    for c in lower.chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
        } else {
            slug.push(c);
            in_space = false;
        }
    }
    format!("{slug}-{label}.png")
}
