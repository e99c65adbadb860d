use thiserror::Error;

use super::named;
use super::Rgb;

/// A parsed CSS color: straight sRGB plus alpha in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CssColor {
    pub rgb: Rgb,
    pub alpha: f32,
}

impl CssColor {
    #[inline]
    pub const fn opaque(rgb: Rgb) -> Self {
        Self { rgb, alpha: 1.0 }
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.alpha >= 1.0
    }
}

/// Parse error for color strings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorParseError {
    #[error("invalid color format: {0}")]
    InvalidFormat(String),
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
    #[error("invalid color component: {0}")]
    InvalidComponent(String),
}

/// Parse a CSS color value.
///
/// Supported: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`/`rgba()` and
/// `hsl()`/`hsla()` in comma or space syntax, the 148 named colors and
/// `transparent`. `currentColor`, `url(#…)` paint servers and anything else
/// are rejected.
pub fn parse_css_color(s: &str) -> Result<CssColor, ColorParseError> {
    let s = s.trim();

    if s.eq_ignore_ascii_case("transparent") {
        return Ok(CssColor { rgb: Rgb::BLACK, alpha: 0.0 });
    }
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| ColorParseError::InvalidHex(s.to_string()));
    }

    let lower = s.to_ascii_lowercase();
    if let Some(args) = function_args(&lower, &["rgba", "rgb"]) {
        return parse_rgb(args).ok_or_else(|| ColorParseError::InvalidComponent(s.to_string()));
    }
    if let Some(args) = function_args(&lower, &["hsla", "hsl"]) {
        return parse_hsl(args).ok_or_else(|| ColorParseError::InvalidComponent(s.to_string()));
    }
    if let Some(rgb) = named::lookup(&lower) {
        return Ok(CssColor::opaque(rgb));
    }

    Err(ColorParseError::InvalidFormat(s.to_string()))
}

/// Normalize a resolved fill value to canonical `#rrggbb`.
///
/// Values that already start with `#` are returned unchanged. Opaque CSS
/// colors are converted to lowercase hex. Anything that cannot be expressed
/// as an opaque hex color comes back as the raw (trimmed) input.
pub fn normalize_color(raw: &str) -> String {
    let raw = raw.trim();
    if raw.starts_with('#') {
        return raw.to_string();
    }
    match parse_css_color(raw) {
        Ok(c) if c.is_opaque() => c.rgb.to_hex(),
        Ok(_) => raw.to_string(),
        Err(e) => {
            log::debug!("fill value {raw:?} left as-is: {e}");
            raw.to_string()
        }
    }
}

// ── internals ─────────────────────────────────────────────────────────────

fn parse_hex(hex: &str) -> Option<CssColor> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    let (r, g, b, a) = match hex.len() {
        3 => (nibble(0)?, nibble(1)?, nibble(2)?, 255),
        4 => (nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?),
        6 => (byte(0)?, byte(2)?, byte(4)?, 255),
        8 => (byte(0)?, byte(2)?, byte(4)?, byte(6)?),
        _ => return None,
    };
    Some(CssColor { rgb: Rgb::new(r, g, b), alpha: a as f32 / 255.0 })
}

/// `name(args)` → `args` for the first matching function name.
fn function_args<'a>(s: &'a str, names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|name| {
        s.strip_prefix(name)?
            .trim_start()
            .strip_prefix('(')?
            .strip_suffix(')')
    })
}

/// Split function arguments in either `a, b, c[, d]` or `a b c [/ d]` form.
fn split_args(args: &str) -> Option<(Vec<&str>, Option<&str>)> {
    if args.contains(',') {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        return match parts.len() {
            3 => Some((parts, None)),
            4 => Some((parts[..3].to_vec(), Some(parts[3]))),
            _ => None,
        };
    }
    let (channels, alpha) = match args.split_once('/') {
        Some((c, a)) => (c, Some(a.trim())),
        None => (args, None),
    };
    let parts: Vec<&str> = channels.split_whitespace().collect();
    (parts.len() == 3).then_some((parts, alpha))
}

fn parse_alpha(s: &str) -> Option<f32> {
    let v = match s.strip_suffix('%') {
        Some(p) => p.trim().parse::<f32>().ok()? / 100.0,
        None => s.parse::<f32>().ok()?,
    };
    v.is_finite().then_some(v.clamp(0.0, 1.0))
}

fn parse_channel(s: &str) -> Option<u8> {
    let v = match s.strip_suffix('%') {
        Some(p) => p.trim().parse::<f32>().ok()? / 100.0 * 255.0,
        None => s.parse::<f32>().ok()?,
    };
    v.is_finite().then(|| v.round().clamp(0.0, 255.0) as u8)
}

fn parse_rgb(args: &str) -> Option<CssColor> {
    let (parts, alpha) = split_args(args)?;
    let rgb = Rgb::new(parse_channel(parts[0])?, parse_channel(parts[1])?, parse_channel(parts[2])?);
    let alpha = match alpha {
        Some(a) => parse_alpha(a)?,
        None => 1.0,
    };
    Some(CssColor { rgb, alpha })
}

fn parse_hsl(args: &str) -> Option<CssColor> {
    let (parts, alpha) = split_args(args)?;
    let hue = parts[0].strip_suffix("deg").unwrap_or(parts[0]).trim().parse::<f32>().ok()?;
    let sat = parts[1].strip_suffix('%')?.trim().parse::<f32>().ok()? / 100.0;
    let light = parts[2].strip_suffix('%')?.trim().parse::<f32>().ok()? / 100.0;
    if !(hue.is_finite() && sat.is_finite() && light.is_finite()) {
        return None;
    }
    let alpha = match alpha {
        Some(a) => parse_alpha(a)?,
        None => 1.0,
    };
    Some(CssColor { rgb: hsl_to_rgb(hue, sat.clamp(0.0, 1.0), light.clamp(0.0, 1.0)), alpha })
}

fn hsl_to_rgb(hue: f32, sat: f32, light: f32) -> Rgb {
    let h = hue.rem_euclid(360.0) / 360.0;
    if sat == 0.0 {
        let v = (light * 255.0).round() as u8;
        return Rgb::new(v, v, v);
    }
    let q = if light < 0.5 { light * (1.0 + sat) } else { light + sat - light * sat };
    let p = 2.0 * light - q;
    let channel = |t: f32| {
        let t = t.rem_euclid(1.0);
        let v = if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        };
        (v * 255.0).round().clamp(0.0, 255.0) as u8
    };
    Rgb::new(channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
}
