//! Dark mode palette derivation
//!
//! Every color role is assigned a purpose (background, surface, text,
//! border, accent or semantic status) from its name. Each purpose maps the
//! light color onto a lightness band suited to dark interfaces, after which
//! the foreground roles are nudged until they meet the requested contrast
//! against `surface`.

use crate::color::{parse_color, Hsl, Rgb};
use crate::contrast::{adjust_for_contrast, contrast_ratio};
use crate::error::{ColorError, ResolveError};
use crate::resolve::resolve_theme_tokens;
use crate::tokens::{DarkModeConfig, ThemeColors, ThemeConfig, TokenValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const DARK_SUFFIX: &str = " (Dark)";

/// How far the dark palette moves toward black
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DarkModeIntensity {
    Subtle,
    #[default]
    Moderate,
    Intense,
}

impl DarkModeIntensity {
    /// Pick the value for this intensity from a `[subtle, moderate, intense]` band.
    fn pick(self, band: [f64; 3]) -> f64 {
        match self {
            Self::Subtle => band[0],
            Self::Moderate => band[1],
            Self::Intense => band[2],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DarkModeOptions {
    pub intensity: DarkModeIntensity,
    /// Keep brand hues vivid instead of flattening them to a fixed lightness
    pub preserve_brand_colors: bool,
    /// Added to every non-semantic color's saturation, clamped to `[-20, 20]`
    pub saturation_adjustment: f64,
    pub ensure_contrast: bool,
    pub min_text_contrast: f64,
    #[serde(rename = "minUIContrast")]
    pub min_ui_contrast: f64,
}

impl Default for DarkModeOptions {
    fn default() -> Self {
        Self {
            intensity: DarkModeIntensity::Moderate,
            preserve_brand_colors: true,
            saturation_adjustment: 0.0,
            ensure_contrast: true,
            min_text_contrast: 4.5,
            min_ui_contrast: 3.0,
        }
    }
}

impl DarkModeOptions {
    fn saturation_shift(&self) -> f64 {
        if self.saturation_adjustment.is_finite() {
            self.saturation_adjustment.clamp(-20.0, 20.0)
        } else {
            0.0
        }
    }
}

/// Purpose of a color role, derived from its name
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorPurpose {
    Background,
    Surface,
    Text,
    Border,
    Accent,
    /// `success`, `warning`, `error` and `info`
    Semantic,
}

impl ColorPurpose {
    pub fn of(role: &str) -> Self {
        let name = role.to_ascii_lowercase();
        if matches!(name.as_str(), "success" | "warning" | "error" | "info") {
            Self::Semantic
        } else if name.contains("text") {
            Self::Text
        } else if name.contains("background") || name.starts_with("bg") {
            Self::Background
        } else if name.starts_with("surface") || name.contains("card") || name.contains("overlay") {
            Self::Surface
        } else if name.contains("border") || name.contains("divider") {
            Self::Border
        } else {
            Self::Accent
        }
    }
}

/// Lightness bump for semantic status colors, which keep hue and saturation.
fn semantic_lightness_bump(role: &str) -> f64 {
    match role.to_ascii_lowercase().as_str() {
        "warning" => 5.0,
        _ => 10.0,
    }
}

fn transform(role: &str, purpose: ColorPurpose, rgb: Rgb, options: &DarkModeOptions) -> Hsl {
    let src = rgb.to_hsl();
    let intensity = options.intensity;

    let shifted = match purpose {
        ColorPurpose::Semantic => return src.with_lightness(src.l + semantic_lightness_bump(role)),
        ColorPurpose::Background => Hsl::new(src.h, src.s - 10.0, intensity.pick([10.0, 7.0, 5.0])),
        ColorPurpose::Surface => {
            // Darker light surfaces (hover, secondary) become lighter dark ones.
            let offset = ((100.0 - src.l) * 0.5).min(8.0);
            Hsl::new(src.h, src.s - 8.0, intensity.pick([15.0, 12.0, 8.0]) + offset)
        }
        ColorPurpose::Border => {
            let offset = ((90.0 - src.l) * 0.5).clamp(-8.0, 8.0);
            Hsl::new(src.h, src.s - 10.0, intensity.pick([30.0, 25.0, 20.0]) + offset)
        }
        ColorPurpose::Text => {
            if rgb.is_light() {
                src.with_lightness(src.l - 10.0)
            } else {
                src.with_lightness(95.0 - src.l * 0.25)
            }
        }
        ColorPurpose::Accent if options.preserve_brand_colors => {
            let l = if src.l < 40.0 {
                60.0
            } else if src.l > 70.0 {
                65.0
            } else {
                src.l
            };
            // Grays have no hue to keep vivid.
            let s = if src.s > 0.0 { src.s.max(50.0) } else { src.s };
            Hsl::new(src.h, s, l)
        }
        ColorPurpose::Accent => src.with_lightness(60.0),
    };

    shifted.with_saturation(shifted.s + options.saturation_shift())
}

/// Derive a dark palette from a light one.
///
/// Roles that are references, CSS keywords or otherwise not concrete colors
/// are copied unchanged. Resolve the theme first to transform everything.
pub fn generate_dark_mode_colors(light: &ThemeColors, options: &DarkModeOptions) -> ThemeColors {
    let mut dark = ThemeColors::new();
    for (role, value) in light.iter() {
        let rgb = match value.as_literal().map(parse_color) {
            Some(Ok(rgb)) => rgb,
            _ => {
                dark.insert(role, value.clone());
                continue;
            }
        };

        let purpose = ColorPurpose::of(role);
        let hex = transform(role, purpose, rgb, options).to_hex();
        debug!(role, ?purpose, from = %rgb, to = %hex, "derived dark color");
        dark.insert(role, TokenValue::Literal(hex));
    }

    if options.ensure_contrast {
        enforce_contrast(&mut dark, options);
    }
    dark
}

fn enforce_contrast(colors: &mut ThemeColors, options: &DarkModeOptions) {
    let Some(surface) = concrete(colors, "surface") else {
        return;
    };

    let pairs = [
        ("text", options.min_text_contrast),
        ("textSecondary", options.min_text_contrast),
        ("border", options.min_ui_contrast),
        ("primary", options.min_ui_contrast),
    ];
    for (role, target) in pairs {
        let Some(foreground) = concrete(colors, role) else {
            continue;
        };

        let adjusted = adjust_for_contrast(foreground, surface, target);
        if !adjusted.met_target {
            warn!(
                role,
                target,
                ratio = adjusted.ratio,
                "dark mode contrast target not reachable, using closest color"
            );
        }
        if adjusted.color != foreground {
            debug!(
                role,
                from = %foreground,
                to = %adjusted.color,
                ratio = adjusted.ratio,
                "adjusted dark color for contrast"
            );
            colors.insert(role, TokenValue::Literal(adjusted.color.to_hex()));
        }
    }
}

fn concrete(colors: &ThemeColors, role: &str) -> Option<Rgb> {
    colors.literal(role).and_then(|literal| parse_color(literal).ok())
}

/// The dark color scheme of `theme`, fully resolved.
///
/// `light` is `theme` already resolved. The derived palette, with explicit
/// `darkMode.colors` merged over it, becomes `colors`; `buttons` and `cards`
/// (or their `darkMode` replacements) are then resolved against that palette
/// so their `colors.*` references pick up dark values.
pub(crate) fn dark_scheme(
    theme: &ThemeConfig,
    light: &ThemeConfig,
    options: &DarkModeOptions,
) -> Result<ThemeConfig, ResolveError> {
    let mut colors = generate_dark_mode_colors(&light.colors, options);
    let explicit = light.dark_mode.as_ref();
    if let Some(overrides) = explicit.and_then(|dark| dark.colors.as_ref()) {
        colors.merge(overrides);
    }

    let unresolved = theme.dark_mode.as_ref();
    let mut scheme = theme.clone();
    scheme.colors = colors;
    if let Some(buttons) = unresolved.and_then(|dark| dark.buttons.clone()) {
        scheme.buttons = Some(buttons);
    }
    if let Some(cards) = unresolved.and_then(|dark| dark.cards.clone()) {
        scheme.cards = Some(cards);
    }
    scheme.dark_mode = None;
    resolve_theme_tokens(&scheme)
}

/// Derive the dark variant of a whole theme.
///
/// Tokens are resolved first, so reference problems surface as errors.
/// Explicit `darkMode.colors` entries win over derived colors, as do
/// `darkMode.buttons` and `darkMode.cards` over the light variants. Variant
/// references resolve against the dark palette.
pub fn generate_dark_mode(theme: &ThemeConfig, options: &DarkModeOptions) -> Result<ThemeConfig, ResolveError> {
    let light = resolve_theme_tokens(theme)?;
    let mut dark = dark_scheme(theme, &light, options)?;
    if !dark.meta.name.ends_with(DARK_SUFFIX) {
        dark.meta.name.push_str(DARK_SUFFIX);
    }
    dark.dark_mode = Some(DarkModeConfig {
        enabled: true,
        colors: Some(dark.colors.clone()),
        buttons: dark.buttons.clone(),
        cards: dark.cards.clone(),
    });

    debug!(name = %dark.meta.name, "generated dark theme");
    Ok(dark)
}

/// One named contrast pair compared between light and dark palettes
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastComparison {
    pub name: &'static str,
    pub light_ratio: f64,
    pub dark_ratio: f64,
    /// The dark pair reaches 4.5:1 or beats the light pair
    pub improved: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DarkModePreview {
    pub light: ThemeColors,
    pub dark: ThemeColors,
    pub comparisons: Vec<ContrastComparison>,
}

/// Both palettes side by side with contrast comparisons for the key pairs.
///
/// Pairs missing from either palette are left out of `comparisons`.
pub fn preview_dark_mode(theme: &ThemeConfig, options: &DarkModeOptions) -> Result<DarkModePreview, ResolveError> {
    let resolved = resolve_theme_tokens(theme)?;
    let dark = dark_scheme(theme, &resolved, options)?.colors;
    let light = resolved.colors;

    let pairs = [
        ("text-on-surface", "text"),
        ("primary-on-surface", "primary"),
        ("border-on-surface", "border"),
    ];
    let comparisons = pairs
        .into_iter()
        .filter_map(|(name, role)| {
            let light_ratio = pair_ratio(&light, role, "surface")?;
            let dark_ratio = pair_ratio(&dark, role, "surface")?;
            Some(ContrastComparison {
                name,
                light_ratio,
                dark_ratio,
                improved: dark_ratio >= 4.5 || dark_ratio > light_ratio,
            })
        })
        .collect();

    Ok(DarkModePreview {
        light,
        dark,
        comparisons,
    })
}

fn pair_ratio(colors: &ThemeColors, foreground: &str, background: &str) -> Option<f64> {
    Some(contrast_ratio(concrete(colors, foreground)?, concrete(colors, background)?))
}

/// Reasonable options for a brand color: very dark brands get the subtle
/// intensity, highly saturated ones are toned down.
pub fn suggested_options(primary: &str) -> Result<DarkModeOptions, ColorError> {
    let hsl = parse_color(primary)?.to_hsl();
    let intensity = if hsl.l < 30.0 {
        DarkModeIntensity::Subtle
    } else {
        DarkModeIntensity::Moderate
    };
    let saturation_adjustment = if hsl.s > 80.0 {
        -10.0
    } else if hsl.s > 60.0 {
        -5.0
    } else {
        0.0
    };

    Ok(DarkModeOptions {
        intensity,
        saturation_adjustment,
        ..DarkModeOptions::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::hex_to_hsl;

    fn light_palette() -> ThemeColors {
        [
            ("primary", "#3b82f6"),
            ("success", "#22c55e"),
            ("warning", "#f59e0b"),
            ("background", "#ffffff"),
            ("surface", "#ffffff"),
            ("surfaceSecondary", "#f9fafb"),
            ("surfaceHover", "#f3f4f6"),
            ("text", "#111827"),
            ("textSecondary", "#4b5563"),
            ("textMuted", "#6b7280"),
            ("border", "#e5e7eb"),
            ("borderStrong", "#d1d5db"),
            ("borderSubtle", "#f3f4f6"),
        ]
        .into_iter()
        .collect()
    }

    fn dark_hsl(colors: &ThemeColors, role: &str) -> Hsl {
        hex_to_hsl(colors.literal(role).unwrap()).unwrap()
    }

    fn ratio(colors: &ThemeColors, fg: &str, bg: &str) -> f64 {
        pair_ratio(colors, fg, bg).unwrap()
    }

    #[test]
    fn classifies_roles_by_name() {
        assert_eq!(ColorPurpose::of("success"), ColorPurpose::Semantic);
        assert_eq!(ColorPurpose::of("textMuted"), ColorPurpose::Text);
        assert_eq!(ColorPurpose::of("background"), ColorPurpose::Background);
        assert_eq!(ColorPurpose::of("surfaceHover"), ColorPurpose::Surface);
        assert_eq!(ColorPurpose::of("cardBackground"), ColorPurpose::Background);
        assert_eq!(ColorPurpose::of("overlay"), ColorPurpose::Surface);
        assert_eq!(ColorPurpose::of("borderStrong"), ColorPurpose::Border);
        assert_eq!(ColorPurpose::of("divider"), ColorPurpose::Border);
        assert_eq!(ColorPurpose::of("primary"), ColorPurpose::Accent);
        assert_eq!(ColorPurpose::of("link"), ColorPurpose::Accent);
    }

    #[test]
    fn backgrounds_follow_intensity() {
        let light = ThemeColors::new().with("background", "#ffffff");
        let levels: Vec<f64> = [
            DarkModeIntensity::Subtle,
            DarkModeIntensity::Moderate,
            DarkModeIntensity::Intense,
        ]
        .into_iter()
        .map(|intensity| {
            let options = DarkModeOptions {
                intensity,
                ..Default::default()
            };
            dark_hsl(&generate_dark_mode_colors(&light, &options), "background").l
        })
        .collect();
        assert!((levels[0] - 10.0).abs() < 0.5);
        assert!((levels[1] - 7.0).abs() < 0.5);
        assert!((levels[2] - 5.0).abs() < 0.5);
    }

    #[test]
    fn dark_text_becomes_light() {
        let dark = generate_dark_mode_colors(&light_palette(), &DarkModeOptions::default());
        let text = parse_color(dark.literal("text").unwrap()).unwrap();
        assert!(text.is_light());
        assert!(ratio(&dark, "text", "surface") >= 4.5);
        assert!(ratio(&dark, "textSecondary", "surface") >= 4.5);
    }

    #[test]
    fn surface_variants_keep_their_order() {
        let dark = generate_dark_mode_colors(&light_palette(), &DarkModeOptions::default());
        let surface = dark_hsl(&dark, "surface").l;
        let secondary = dark_hsl(&dark, "surfaceSecondary").l;
        let hover = dark_hsl(&dark, "surfaceHover").l;
        assert!(surface < secondary);
        assert!(secondary < hover);
    }

    #[test]
    fn semantic_colors_get_a_flat_bump() {
        let light = light_palette();
        let dark = generate_dark_mode_colors(&light, &DarkModeOptions::default());

        let before = hex_to_hsl("#22c55e").unwrap();
        let after = dark_hsl(&dark, "success");
        assert!((after.l - before.l - 10.0).abs() < 0.5);
        assert!((after.h - before.h).abs() < 2.0);

        let before = hex_to_hsl("#f59e0b").unwrap();
        let after = dark_hsl(&dark, "warning");
        assert!((after.l - before.l - 5.0).abs() < 0.5);
    }

    #[test]
    fn brand_colors_keep_their_hue() {
        let light = ThemeColors::new().with("primary", "#1e3a8a");
        let options = DarkModeOptions {
            ensure_contrast: false,
            ..Default::default()
        };
        let dark = generate_dark_mode_colors(&light, &options);
        let before = hex_to_hsl("#1e3a8a").unwrap();
        let after = dark_hsl(&dark, "primary");
        assert!((after.l - 60.0).abs() < 0.5);
        assert!((after.h - before.h).abs() < 2.0);
        assert!(after.s >= 49.5);
    }

    #[test]
    fn brand_colors_flatten_without_preservation() {
        let light = ThemeColors::new().with("primary", "#93c5fd");
        let options = DarkModeOptions {
            preserve_brand_colors: false,
            ensure_contrast: false,
            ..Default::default()
        };
        let dark = generate_dark_mode_colors(&light, &options);
        assert!((dark_hsl(&dark, "primary").l - 60.0).abs() < 0.5);
    }

    #[test]
    fn enforces_requested_text_contrast() {
        let options = DarkModeOptions {
            min_text_contrast: 15.0,
            ..Default::default()
        };
        let dark = generate_dark_mode_colors(&light_palette(), &options);
        assert!(ratio(&dark, "text", "surface") >= 15.0);
    }

    #[test]
    fn references_and_keywords_pass_through() {
        let light = ThemeColors::new()
            .with("link", "colors.primary")
            .with("overlay", "transparent");
        let dark = generate_dark_mode_colors(&light, &DarkModeOptions::default());
        assert_eq!(dark, light);
    }

    #[test]
    fn whole_theme_gets_suffix_and_overrides() {
        let mut theme = ThemeConfig::new("Ocean", light_palette().with("link", "colors.primary"));
        theme.dark_mode = Some(DarkModeConfig {
            enabled: false,
            colors: Some(ThemeColors::new().with("primary", "#60a5fa")),
            ..Default::default()
        });

        let dark = generate_dark_mode(&theme, &DarkModeOptions::default()).unwrap();
        assert_eq!(dark.meta.name, "Ocean (Dark)");
        assert!(dark.dark_mode_enabled());
        assert_eq!(dark.colors.literal("primary"), Some("#60a5fa"));
        assert!(!dark.colors.get("link").unwrap().is_reference());

        let again = generate_dark_mode(&dark, &DarkModeOptions::default()).unwrap();
        assert_eq!(again.meta.name, "Ocean (Dark)");
    }

    #[test]
    fn ui_roles_meet_contrast_at_every_intensity() {
        for intensity in [
            DarkModeIntensity::Subtle,
            DarkModeIntensity::Moderate,
            DarkModeIntensity::Intense,
        ] {
            let options = DarkModeOptions {
                intensity,
                ..Default::default()
            };
            let dark = generate_dark_mode_colors(&light_palette(), &options);
            assert!(ratio(&dark, "border", "surface") >= 3.0, "{intensity:?}");
            assert!(ratio(&dark, "primary", "surface") >= 3.0, "{intensity:?}");

            let options = DarkModeOptions {
                min_ui_contrast: 4.0,
                ..options
            };
            let dark = generate_dark_mode_colors(&light_palette(), &options);
            assert!(ratio(&dark, "border", "surface") >= 4.0, "{intensity:?}");
            assert!(ratio(&dark, "primary", "surface") >= 4.0, "{intensity:?}");
        }
    }

    #[test]
    fn variants_follow_the_dark_palette() {
        let mut theme = ThemeConfig::new("Ocean", light_palette());
        let variant = |roles: &[(&str, &str)]| -> crate::tokens::VariantColors {
            roles
                .iter()
                .map(|(role, value)| (role.to_string(), TokenValue::from(*value)))
                .collect()
        };
        theme.buttons = Some(
            [(
                "primary".to_string(),
                variant(&[("background", "colors.primary"), ("text", "colors.surface")]),
            )]
            .into_iter()
            .collect(),
        );
        theme.dark_mode = Some(DarkModeConfig {
            enabled: true,
            colors: None,
            buttons: None,
            cards: Some(
                [("default".to_string(), variant(&[("border", "colors.border")]))]
                    .into_iter()
                    .collect(),
            ),
        });

        let dark = generate_dark_mode(&theme, &DarkModeOptions::default()).unwrap();
        let button = &dark.buttons.as_ref().unwrap()["primary"];
        assert_eq!(button["background"].as_literal(), dark.colors.literal("primary"));
        assert_eq!(button["text"].as_literal(), dark.colors.literal("surface"));
        assert_ne!(button["text"].as_literal(), Some("#ffffff"));

        let card = &dark.cards.as_ref().unwrap()["default"];
        assert_eq!(card["border"].as_literal(), dark.colors.literal("border"));
        assert_eq!(dark.dark_mode.as_ref().unwrap().buttons, dark.buttons);
    }

    #[test]
    fn preview_reports_key_pairs() {
        let theme = ThemeConfig::new("Ocean", light_palette());
        let preview = preview_dark_mode(&theme, &DarkModeOptions::default()).unwrap();
        let names: Vec<_> = preview.comparisons.iter().map(|c| c.name).collect();
        assert_eq!(names, ["text-on-surface", "primary-on-surface", "border-on-surface"]);

        let text = &preview.comparisons[0];
        assert!(text.improved);
        assert!(text.dark_ratio >= 4.5);

        let border = &preview.comparisons[2];
        assert!(border.improved);
    }

    #[test]
    fn suggests_options_from_brand_color() {
        let options = suggested_options("#ff0000").unwrap();
        assert_eq!(options.intensity, DarkModeIntensity::Moderate);
        assert_eq!(options.saturation_adjustment, -10.0);

        let options = suggested_options("#0a0a0a").unwrap();
        assert_eq!(options.intensity, DarkModeIntensity::Subtle);
        assert_eq!(options.saturation_adjustment, 0.0);

        assert_eq!(suggested_options("#d92626").unwrap().saturation_adjustment, -5.0);
        assert!(suggested_options("nope").is_err());
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: DarkModeOptions =
            serde_json::from_str(r#"{ "intensity": "intense", "minUIContrast": 4 }"#).unwrap();
        assert_eq!(options.intensity, DarkModeIntensity::Intense);
        assert_eq!(options.min_ui_contrast, 4.0);
        assert!(options.preserve_brand_colors);
    }
}
