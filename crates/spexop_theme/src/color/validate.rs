//! Color literal validation
//!
//! Recognizes hex, `rgb()`/`rgba()`, `hsl()`/`hsla()`, CSS named colors and
//! CSS keywords. Validation never fails with an error; every outcome is a
//! [`ColorValidationResult`] carrying the detected format and, when invalid,
//! a human readable reason.

use super::named::{is_css_keyword, named_color};
use super::{Hsl, Rgb};
use crate::error::ColorError;
use crate::tokens::{ThemeColors, TokenValue};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

fn hex_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("hex color pattern is valid")
    })
}

fn function_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?i)(rgba?|hsla?)\(\s*(.*?)\s*\)$").expect("color function pattern is valid")
    })
}

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-zA-Z]+$").expect("color name pattern is valid"))
}

/// Concrete syntax a color literal was written in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorFormat {
    /// `#RRGGBB`
    Hex,
    /// `#RGB`
    HexShort,
    Rgb,
    Rgba,
    Hsl,
    Hsla,
    Named,
    Keyword,
}

impl ColorFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::HexShort => "hex-short",
            Self::Rgb => "rgb",
            Self::Rgba => "rgba",
            Self::Hsl => "hsl",
            Self::Hsla => "hsla",
            Self::Named => "named",
            Self::Keyword => "keyword",
        }
    }

    pub fn family(self) -> ColorFamily {
        match self {
            Self::Hex | Self::HexShort => ColorFamily::Hex,
            Self::Rgb | Self::Rgba => ColorFamily::Rgb,
            Self::Hsl | Self::Hsla => ColorFamily::Hsl,
            Self::Named => ColorFamily::Named,
            Self::Keyword => ColorFamily::Keyword,
        }
    }
}

impl Display for ColorFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format family used by allow-lists and `require_format`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFamily {
    Hex,
    Rgb,
    Hsl,
    Named,
    Keyword,
}

impl Display for ColorFamily {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Hex => "hex",
            Self::Rgb => "RGB",
            Self::Hsl => "HSL",
            Self::Named => "named",
            Self::Keyword => "CSS keyword",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorValidationOptions {
    pub allow_hex: bool,
    pub allow_rgb: bool,
    pub allow_hsl: bool,
    pub allow_named_colors: bool,
    pub allow_css_keywords: bool,
    /// Only accept colors of this family
    pub require_format: Option<ColorFamily>,
}

impl ColorValidationOptions {
    fn allows(&self, family: ColorFamily) -> bool {
        match family {
            ColorFamily::Hex => self.allow_hex,
            ColorFamily::Rgb => self.allow_rgb,
            ColorFamily::Hsl => self.allow_hsl,
            ColorFamily::Named => self.allow_named_colors,
            ColorFamily::Keyword => self.allow_css_keywords,
        }
    }
}

impl Default for ColorValidationOptions {
    fn default() -> Self {
        Self {
            allow_hex: true,
            allow_rgb: true,
            allow_hsl: true,
            allow_named_colors: true,
            allow_css_keywords: true,
            require_format: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ColorFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ColorValidationResult {
    fn ok(format: ColorFormat) -> Self {
        Self {
            valid: true,
            format: Some(format),
            reason: None,
        }
    }

    fn fail(format: Option<ColorFormat>, reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            format,
            reason: Some(reason.into()),
        }
    }
}

/// Validate a color literal against `options`.
///
/// The first recognized format wins. A recognized but disallowed format, a
/// `require_format` mismatch, or an out-of-range component each produce an
/// invalid result with a specific reason.
pub fn validate_color(input: &str, options: &ColorValidationOptions) -> ColorValidationResult {
    let input = input.trim();
    if input.is_empty() {
        return ColorValidationResult::fail(None, "color value is empty");
    }

    let Some(detection) = detect(input) else {
        return ColorValidationResult::fail(
            None,
            format!("`{input}` is not a recognized color; expected hex, RGB, HSL or named color"),
        );
    };

    let format = detection.format;
    let family = format.family();
    if !options.allows(family) {
        return ColorValidationResult::fail(
            Some(format),
            format!("{family} colors are not allowed"),
        );
    }
    if let Some(required) = options.require_format {
        if required != family {
            return ColorValidationResult::fail(
                Some(format),
                format!("expected a {required} color, found {format}"),
            );
        }
    }

    match detection.value {
        Ok(_) => ColorValidationResult::ok(format),
        Err(reason) => ColorValidationResult::fail(Some(format), reason),
    }
}

/// Normalize hex and RGB colors to uppercase `#RRGGBB`.
///
/// HSL, named colors and keywords are returned unchanged; converting them is
/// deliberately left to callers that need it (see [`super::parse_color`]).
pub fn normalize_color_to_hex(input: &str) -> String {
    match detect(input.trim()) {
        Some(Detection {
            format:
                ColorFormat::Hex | ColorFormat::HexShort | ColorFormat::Rgb | ColorFormat::Rgba,
            value: Ok(Some(rgb)),
        }) => rgb.to_hex(),
        _ => input.to_string(),
    }
}

/// A problem with a single color role of a theme
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ColorFieldIssue {
    /// Dotted path, e.g. `colors.primary`
    pub field: String,
    pub reason: String,
}

/// Check that every required role exists and every literal is a valid color.
///
/// References are skipped; they are validated once resolved.
pub fn validate_theme_colors(colors: &ThemeColors) -> Vec<ColorFieldIssue> {
    let options = ColorValidationOptions::default();
    let mut issues: Vec<ColorFieldIssue> = colors
        .missing_required_roles()
        .map(|role| ColorFieldIssue {
            field: format!("colors.{role}"),
            reason: "required color role is missing".to_string(),
        })
        .collect();

    for (role, value) in colors.iter() {
        let TokenValue::Literal(literal) = value else {
            continue;
        };
        let result = validate_color(literal, &options);
        if !result.valid {
            issues.push(ColorFieldIssue {
                field: format!("colors.{role}"),
                reason: result.reason.unwrap_or_default(),
            });
        }
    }

    issues
}

// ============================================================================
// Detection
// ============================================================================

struct Detection {
    format: ColorFormat,
    /// `Ok(Some)` for concrete colors, `Ok(None)` for keywords, `Err` with a
    /// reason when the syntax matched but a component is out of range.
    value: Result<Option<Rgb>, String>,
}

fn detect(input: &str) -> Option<Detection> {
    // Try hex
    if hex_pattern().is_match(input) {
        let format = if input.len() == 4 {
            ColorFormat::HexShort
        } else {
            ColorFormat::Hex
        };
        return Some(Detection {
            format,
            value: Rgb::from_hex(input).map(Some).map_err(|e| e.to_string()),
        });
    }

    // Try rgb()/rgba() and hsl()/hsla()
    if let Some(caps) = function_pattern().captures(input) {
        let name = caps[1].to_ascii_lowercase();
        let inner = &caps[2];
        let (components, alpha) = match split_components(inner) {
            Ok(parts) => parts,
            Err(reason) => {
                let format = if name.starts_with("rgb") {
                    ColorFormat::Rgb
                } else {
                    ColorFormat::Hsl
                };
                return Some(Detection {
                    format,
                    value: Err(reason),
                });
            }
        };

        return Some(if name.starts_with("rgb") {
            Detection {
                format: if alpha.is_some() {
                    ColorFormat::Rgba
                } else {
                    ColorFormat::Rgb
                },
                value: parse_rgb_components(&components, alpha).map(Some),
            }
        } else {
            Detection {
                format: if alpha.is_some() {
                    ColorFormat::Hsla
                } else {
                    ColorFormat::Hsl
                },
                value: parse_hsl_components(&components, alpha).map(Some),
            }
        });
    }

    if !word_pattern().is_match(input) {
        return None;
    }

    // Try named color
    if let Some(rgb) = named_color(input) {
        return Some(Detection {
            format: ColorFormat::Named,
            value: Ok(Some(rgb)),
        });
    }

    // Try keyword
    if is_css_keyword(input) {
        return Some(Detection {
            format: ColorFormat::Keyword,
            value: Ok(None),
        });
    }

    None
}

/// Split functional notation arguments.
///
/// Accepts the legacy comma syntax `r, g, b[, a]` and the modern space
/// syntax `r g b[ / a]`.
fn split_components(inner: &str) -> Result<(Vec<&str>, Option<&str>), String> {
    if inner.contains(',') {
        if inner.contains('/') {
            return Err("cannot mix comma and slash separators".to_string());
        }
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        return match parts.len() {
            3 => Ok((parts, None)),
            4 => Ok((parts[..3].to_vec(), Some(parts[3]))),
            n => Err(format!("expected 3 or 4 components, found {n}")),
        };
    }

    let (main, alpha) = match inner.split_once('/') {
        Some((main, alpha)) => (main, Some(alpha.trim())),
        None => (inner, None),
    };
    let parts: Vec<&str> = main.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(format!("expected 3 components, found {}", parts.len()));
    }
    if alpha.is_some_and(|a| a.is_empty() || a.contains(char::is_whitespace)) {
        return Err("expected a single alpha value after `/`".to_string());
    }
    Ok((parts, alpha))
}

fn parse_rgb_components(components: &[&str], alpha: Option<&str>) -> Result<Rgb, String> {
    let mut channels = [0u8; 3];
    for ((slot, raw), name) in channels.iter_mut().zip(components).zip(["red", "green", "blue"]) {
        if raw.is_empty() || !raw.trim_start_matches('-').chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("{name} channel `{raw}` must be an integer"));
        }
        let value: i64 = raw
            .parse()
            .map_err(|_| format!("{name} channel `{raw}` must be an integer"))?;
        if !(0..=255).contains(&value) {
            return Err(format!("{name} channel {value} is outside 0-255"));
        }
        *slot = value as u8;
    }
    if let Some(alpha) = alpha {
        parse_alpha(alpha)?;
    }
    Ok(Rgb::new(channels[0], channels[1], channels[2]))
}

fn parse_hsl_components(components: &[&str], alpha: Option<&str>) -> Result<Rgb, String> {
    let hue_raw = components[0];
    let hue_raw = hue_raw
        .strip_suffix("deg")
        .unwrap_or(hue_raw)
        .trim();
    let hue = parse_number(hue_raw).ok_or_else(|| format!("hue `{hue_raw}` must be a number"))?;
    if !(0.0..=360.0).contains(&hue) {
        return Err(format!("hue {hue} is outside 0-360"));
    }

    let mut percents = [0.0f64; 2];
    for ((slot, raw), name) in percents
        .iter_mut()
        .zip(&components[1..])
        .zip(["saturation", "lightness"])
    {
        let value_raw = raw.strip_suffix('%').unwrap_or(raw).trim();
        let value =
            parse_number(value_raw).ok_or_else(|| format!("{name} `{raw}` must be a percentage"))?;
        if !(0.0..=100.0).contains(&value) {
            return Err(format!("{name} {value}% is outside 0-100%"));
        }
        *slot = value;
    }
    if let Some(alpha) = alpha {
        parse_alpha(alpha)?;
    }

    Ok(Hsl::new(hue, percents[0], percents[1]).to_rgb())
}

fn parse_alpha(raw: &str) -> Result<f64, String> {
    let alpha = parse_number(raw).ok_or_else(|| format!("alpha `{raw}` must be a number"))?;
    if !(0.0..=1.0).contains(&alpha) {
        return Err(format!("alpha {alpha} is outside 0-1"));
    }
    Ok(alpha)
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a concrete literal to RGB, see [`super::parse_color`].
pub(crate) fn parse_literal(input: &str) -> Result<Rgb, ColorError> {
    let trimmed = input.trim();
    let Some(detection) = detect(trimmed) else {
        return Err(ColorError::invalid(
            input,
            "expected hex, RGB, HSL or named color",
        ));
    };
    match detection.value {
        Ok(Some(rgb)) => Ok(rgb),
        Ok(None) => Err(ColorError::NotConcrete(trimmed.to_string())),
        Err(reason) => Err(ColorError::invalid(input, reason)),
    }
}
