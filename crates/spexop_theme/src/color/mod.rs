//! Color space conversion
//!
//! Hex, RGB and HSL representations plus the lightness helpers used by the
//! dark mode generator. These are math utilities: out-of-range HSL input is
//! clamped rather than rejected. Use [`validate_color`] when input needs to be
//! checked and explained.

mod named;
pub mod validate;

pub use validate::{
    normalize_color_to_hex, validate_color, validate_theme_colors, ColorFamily, ColorFieldIssue,
    ColorFormat, ColorValidationOptions, ColorValidationResult,
};

use crate::contrast::relative_luminance;
use crate::error::ColorError;
use std::fmt::{Display, Formatter};

/// Relative luminance above which a color reads as "light".
///
/// At this luminance the contrast ratio against black equals the ratio
/// against white: `(L + 0.05)^2 = 1.05 * 0.05`.
pub const LIGHT_LUMINANCE_THRESHOLD: f64 = 0.179_128_784_747_792;

/// An opaque sRGB color with 8-bit channels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RGB` or `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::invalid(hex, "hex colors may only contain 0-9 and A-F"));
        }

        let channel =
            |s: &str| u8::from_str_radix(s, 16).map_err(|e| ColorError::invalid(hex, e.to_string()));
        match digits.len() {
            3 => Ok(Self::new(
                channel(&digits[0..1].repeat(2))?,
                channel(&digits[1..2].repeat(2))?,
                channel(&digits[2..3].repeat(2))?,
            )),
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            n => Err(ColorError::invalid(
                hex,
                format!("expected 3 or 6 hex digits, found {n}"),
            )),
        }
    }

    /// Uppercase `#RRGGBB`
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn to_hsl(self) -> Hsl {
        let r = self.r as f64 / 255.0;
        let g = self.g as f64 / 255.0;
        let b = self.b as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Hsl::new(0.0, 0.0, l * 100.0);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl::new(h * 60.0, s * 100.0, l * 100.0)
    }

    /// WCAG relative luminance, see [`relative_luminance`].
    pub fn luminance(self) -> f64 {
        relative_luminance(self)
    }

    /// Whether the color reads as light, i.e. dark text is the better pairing.
    pub fn is_light(self) -> bool {
        self.luminance() > LIGHT_LUMINANCE_THRESHOLD
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// HSL color with hue in degrees and saturation/lightness in percent
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    /// Hue, `[0, 360)`
    pub h: f64,
    /// Saturation, `[0, 100]`
    pub s: f64,
    /// Lightness, `[0, 100]`
    pub l: f64,
}

impl Hsl {
    /// Create an HSL color, wrapping hue and clamping saturation/lightness.
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: if h.is_finite() { h.rem_euclid(360.0) } else { 0.0 },
            s: clamp_percent(s),
            l: clamp_percent(l),
        }
    }

    pub fn with_lightness(self, l: f64) -> Self {
        Self::new(self.h, self.s, l)
    }

    pub fn with_saturation(self, s: f64) -> Self {
        Self::new(self.h, s, self.l)
    }

    pub fn to_rgb(self) -> Rgb {
        let h = self.h / 360.0;
        let s = self.s / 100.0;
        let l = self.l / 100.0;

        if s == 0.0 {
            let v = to_channel(l);
            return Rgb::new(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Rgb::new(
            to_channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
            to_channel(hue_to_rgb(p, q, h)),
            to_channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
        )
    }

    pub fn to_hex(self) -> String {
        self.to_rgb().to_hex()
    }
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

pub(crate) fn clamp_percent(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 100.0)
    }
}

// ============================================================================
// String-level helpers
// ============================================================================

pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorError> {
    Rgb::from_hex(hex)
}

pub fn rgb_to_hex(rgb: Rgb) -> String {
    rgb.to_hex()
}

pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    rgb.to_hsl()
}

pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    hsl.to_rgb()
}

pub fn hex_to_hsl(hex: &str) -> Result<Hsl, ColorError> {
    Ok(Rgb::from_hex(hex)?.to_hsl())
}

/// Convert HSL components to `#RRGGBB`, clamping out-of-range input.
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    Hsl::new(h, s, l).to_hex()
}

/// Parse any concrete color literal (hex, rgb/rgba, hsl/hsla, named) to RGB.
///
/// Alpha is discarded: contrast math treats every color as opaque.
pub fn parse_color(input: &str) -> Result<Rgb, ColorError> {
    validate::parse_literal(input)
}

/// Classify a color as light using WCAG relative luminance.
///
/// Shares its luminance function with the contrast checker, so a color is
/// light exactly when black text on it out-contrasts white text.
pub fn is_light(color: &str) -> Result<bool, ColorError> {
    Ok(parse_color(color)?.is_light())
}

/// Shift HSL lightness by `delta` percentage points, clamped to `[0, 100]`.
pub fn adjust_lightness(color: &str, delta: f64) -> Result<String, ColorError> {
    let hsl = parse_color(color)?.to_hsl();
    Ok(hsl.with_lightness(hsl.l + delta).to_hex())
}
