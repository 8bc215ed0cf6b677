//! WCAG contrast math
//!
//! Relative luminance and contrast ratio as defined by WCAG 2.x, threshold
//! classification for AA/AAA, and a bounded lightness search used to push a
//! foreground color toward a target ratio.

use crate::color::{parse_color, Hsl, Rgb};
use crate::error::ColorError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Minimum ratio for user interface components and graphical objects (1.4.11)
pub const UI_COMPONENT_MIN_RATIO: f64 = 3.0;

/// Upper bound on lightness steps taken by [`adjust_for_contrast`]
pub const MAX_ADJUSTMENT_STEPS: u32 = 100;

/// WCAG conformance level
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    #[default]
    AA,
    AAA,
}

impl WcagLevel {
    /// Minimum contrast ratio for text of the given size at this level
    pub fn min_ratio(self, size: TextSize) -> f64 {
        match (self, size) {
            (Self::AA, TextSize::Normal) => 4.5,
            (Self::AA, TextSize::Large) => 3.0,
            (Self::AAA, TextSize::Normal) => 7.0,
            (Self::AAA, TextSize::Large) => 4.5,
        }
    }

    /// Success criterion that governs text contrast at this level
    pub fn text_criterion(self) -> &'static str {
        match self {
            Self::AA => "1.4.3 Contrast (Minimum)",
            Self::AAA => "1.4.6 Contrast (Enhanced)",
        }
    }
}

impl Display for WcagLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::AA => "AA",
            Self::AAA => "AAA",
        })
    }
}

/// WCAG text size class. Large is at least 18pt, or 14pt bold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    #[default]
    Normal,
    Large,
}

/// Outcome of a single contrast check
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastResult {
    /// Ratio in `[1, 21]`
    pub ratio: f64,
    pub level: WcagLevel,
    pub size: TextSize,
    /// Meets the text threshold for `level` and `size`
    pub passes: bool,
    /// Meets the 3:1 non-text threshold
    pub passes_ui: bool,
}

/// Linearize one 8-bit sRGB channel.
fn linearize(channel: u8) -> f64 {
    let c = channel as f64 / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG relative luminance in `[0, 1]`.
///
/// This is the single luminance function of the crate; light/dark
/// classification in [`crate::color`] is defined in terms of it.
pub fn relative_luminance(rgb: Rgb) -> f64 {
    0.2126 * linearize(rgb.r) + 0.7152 * linearize(rgb.g) + 0.0722 * linearize(rgb.b)
}

/// Contrast ratio between two colors, `(L_lighter + 0.05) / (L_darker + 0.05)`.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Contrast ratio between two color literals.
pub fn calculate_contrast_ratio(a: &str, b: &str) -> Result<f64, ColorError> {
    Ok(contrast_ratio(parse_color(a)?, parse_color(b)?))
}

/// Classify the contrast of `foreground` on `background`.
pub fn check_contrast(
    foreground: &str,
    background: &str,
    level: WcagLevel,
    size: TextSize,
) -> Result<ContrastResult, ColorError> {
    let ratio = calculate_contrast_ratio(foreground, background)?;
    Ok(ContrastResult {
        ratio,
        level,
        size,
        passes: ratio >= level.min_ratio(size),
        passes_ui: ratio >= UI_COMPONENT_MIN_RATIO,
    })
}

/// Result of [`adjust_for_contrast`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContrastAdjustment {
    /// Best color reached; the input color when no step improved the ratio
    pub color: Rgb,
    pub ratio: f64,
    /// Signed lightness change applied to reach `color`
    pub lightness_delta: f64,
    pub met_target: bool,
}

/// Step the foreground's HSL lightness by one point at a time until it
/// reaches `target` against `background`.
///
/// The direction is away from the background: a foreground at least as
/// luminous as the background is lightened, otherwise darkened. The search
/// stops after [`MAX_ADJUSTMENT_STEPS`] steps or at the lightness bound and
/// returns the best color found, which may fall short of `target`.
pub fn adjust_for_contrast(foreground: Rgb, background: Rgb, target: f64) -> ContrastAdjustment {
    search_lightness(foreground, background, target, away_from(foreground, background))
}

/// Like [`adjust_for_contrast`], but when the preferred direction cannot
/// reach `target` the opposite direction is searched too. The result that
/// meets the target wins, otherwise the one with the higher ratio.
///
/// Useful for recommendations, where crossing over the background's
/// luminance is acceptable.
pub fn adjust_for_contrast_either_way(foreground: Rgb, background: Rgb, target: f64) -> ContrastAdjustment {
    let step = away_from(foreground, background);
    let preferred = search_lightness(foreground, background, target, step);
    if preferred.met_target {
        return preferred;
    }

    let opposite = search_lightness(foreground, background, target, -step);
    if opposite.met_target || opposite.ratio > preferred.ratio {
        opposite
    } else {
        preferred
    }
}

/// Lightness step moving `foreground` away from `background`'s luminance.
fn away_from(foreground: Rgb, background: Rgb) -> f64 {
    if relative_luminance(foreground) >= relative_luminance(background) {
        1.0
    } else {
        -1.0
    }
}

fn search_lightness(foreground: Rgb, background: Rgb, target: f64, step: f64) -> ContrastAdjustment {
    let start = foreground.to_hsl();
    let mut best = ContrastAdjustment {
        color: foreground,
        ratio: contrast_ratio(foreground, background),
        lightness_delta: 0.0,
        met_target: false,
    };
    if best.ratio >= target {
        best.met_target = true;
        return best;
    }

    let mut lightness = start.l;
    for _ in 0..MAX_ADJUSTMENT_STEPS {
        let next = lightness + step;
        if !(0.0..=100.0).contains(&next) {
            // Land exactly on the bound before giving up.
            if lightness == 0.0 || lightness == 100.0 {
                break;
            }
            lightness = next.clamp(0.0, 100.0);
        } else {
            lightness = next;
        }

        let candidate = Hsl::new(start.h, start.s, lightness).to_rgb();
        let ratio = contrast_ratio(candidate, background);
        if ratio > best.ratio {
            best = ContrastAdjustment {
                color: candidate,
                ratio,
                lightness_delta: lightness - start.l,
                met_target: false,
            };
        }
        if ratio >= target {
            best.met_target = true;
            break;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(a: &str, b: &str) -> f64 {
        calculate_contrast_ratio(a, b).unwrap()
    }

    #[test]
    fn black_on_white_is_21() {
        assert!((ratio("#000000", "#ffffff") - 21.0).abs() < 1e-9);
    }

    #[test]
    fn identical_colors_are_1() {
        assert_eq!(ratio("#3b82f6", "#3b82f6"), 1.0);
    }

    #[test]
    fn known_reference_ratios() {
        assert!((ratio("#767676", "#ffffff") - 4.54).abs() < 0.01);
        assert!((ratio("#999999", "#ffffff") - 2.85).abs() < 0.01);
        assert!((ratio("#ff0000", "#ffffff") - 4.0).abs() < 0.01);
        assert!((ratio("#111827", "#ffffff") - 17.74).abs() < 0.05);
    }

    #[test]
    fn order_independent() {
        assert_eq!(ratio("#ef4444", "#ffffff"), ratio("#ffffff", "#ef4444"));
    }

    #[test]
    fn accepts_non_hex_literals() {
        assert_eq!(ratio("black", "rgb(255, 255, 255)"), ratio("#000", "#fff"));
        assert!(calculate_contrast_ratio("transparent", "#fff").is_err());
        assert!(calculate_contrast_ratio("colors.text", "#fff").is_err());
    }

    #[test]
    fn thresholds_per_level_and_size() {
        let result = check_contrast("#767676", "#ffffff", WcagLevel::AA, TextSize::Normal).unwrap();
        assert!(result.passes);
        assert!(result.passes_ui);

        let result = check_contrast("#767676", "#ffffff", WcagLevel::AAA, TextSize::Normal).unwrap();
        assert!(!result.passes);

        let result = check_contrast("#767676", "#ffffff", WcagLevel::AAA, TextSize::Large).unwrap();
        assert!(result.passes);

        let result = check_contrast("#999999", "#ffffff", WcagLevel::AA, TextSize::Large).unwrap();
        assert!(!result.passes);
        assert!(!result.passes_ui);
    }

    #[test]
    fn adjustment_darkens_text_on_light_background() {
        let adjusted = adjust_for_contrast(Rgb::from_hex("#999999").unwrap(), Rgb::WHITE, 4.5);
        assert!(adjusted.met_target);
        assert!(adjusted.ratio >= 4.5);
        assert!(adjusted.lightness_delta < 0.0);
    }

    #[test]
    fn adjustment_lightens_text_on_dark_background() {
        let background = Rgb::from_hex("#1f1f1f").unwrap();
        let adjusted = adjust_for_contrast(Rgb::from_hex("#555555").unwrap(), background, 7.0);
        assert!(adjusted.met_target);
        assert!(adjusted.lightness_delta > 0.0);
        assert!(contrast_ratio(adjusted.color, background) >= 7.0);
    }

    #[test]
    fn adjustment_is_best_effort() {
        // Only black on white reaches 21:1.
        let gray = Rgb::from_hex("#808080").unwrap();
        let adjusted = adjust_for_contrast(gray, gray, 21.0);
        assert!(!adjusted.met_target);
        assert!(adjusted.ratio > 1.0);
    }

    #[test]
    fn either_way_crosses_a_light_background() {
        // White is brighter than the surface, so lightening cannot help.
        let surface = Rgb::from_hex("#f3f4f6").unwrap();
        assert!(!adjust_for_contrast(Rgb::WHITE, surface, 3.0).met_target);

        let adjusted = adjust_for_contrast_either_way(Rgb::WHITE, surface, 3.0);
        assert!(adjusted.met_target);
        assert!(adjusted.lightness_delta < 0.0);
        assert!(contrast_ratio(adjusted.color, surface) >= 3.0);
    }

    #[test]
    fn either_way_prefers_the_natural_direction() {
        let fg = Rgb::from_hex("#999999").unwrap();
        assert_eq!(
            adjust_for_contrast_either_way(fg, Rgb::WHITE, 4.5),
            adjust_for_contrast(fg, Rgb::WHITE, 4.5)
        );
    }

    #[test]
    fn adjustment_keeps_passing_colors() {
        let fg = Rgb::from_hex("#111827").unwrap();
        let adjusted = adjust_for_contrast(fg, Rgb::WHITE, 4.5);
        assert!(adjusted.met_target);
        assert_eq!(adjusted.color, fg);
        assert_eq!(adjusted.lightness_delta, 0.0);
    }
}
