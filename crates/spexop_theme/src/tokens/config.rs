//! Theme configuration schema
//!
//! The serialized form uses camelCase keys, matching the theme files
//! consumed by the rest of the design system:
//!
//! ```toml
//! [meta]
//! name = "Ocean"
//! version = "1.0.0"
//!
//! [colors]
//! primary = "#3b82f6"
//! link = "colors.primary"
//!
//! [buttons.primary]
//! background = "colors.primary"
//! ```

use super::{ThemeColors, TokenValue};
use crate::error::ThemeError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Role name to value map for one component variant
pub type VariantColors = IndexMap<String, TokenValue>;

/// Variant name (`primary`, `outline`, ...) to its role map
pub type VariantTokens = IndexMap<String, VariantColors>;

/// A complete theme configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    pub meta: ThemeMeta,
    pub colors: ThemeColors,
    #[serde(default)]
    pub typography: TypographyTokens,
    #[serde(default)]
    pub spacing: SpacingTokens,
    #[serde(default)]
    pub borders: BorderTokens,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buttons: Option<VariantTokens>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cards: Option<VariantTokens>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakpoints: Option<IndexMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<DarkModeConfig>,
}

impl ThemeConfig {
    /// A theme with the given colors and default typography, spacing and borders
    pub fn new(name: impl Into<String>, colors: ThemeColors) -> Self {
        Self {
            meta: ThemeMeta::new(name),
            colors,
            typography: TypographyTokens::default(),
            spacing: SpacingTokens::default(),
            borders: BorderTokens::default(),
            buttons: None,
            cards: None,
            breakpoints: None,
            dark_mode: None,
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ThemeError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ThemeError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ThemeError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_json_string(&self) -> Result<String, ThemeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn dark_mode_enabled(&self) -> bool {
        self.dark_mode.as_ref().is_some_and(|dark| dark.enabled)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeMeta {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

impl ThemeMeta {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: default_version(),
            description: None,
            author: None,
        }
    }
}

/// Font family, modular type scale and weights
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyTokens {
    pub font_family: String,
    /// Base font size in px
    pub base_size: f64,
    /// Ratio between consecutive steps of the type scale
    pub scale: f64,
    pub weights: IndexMap<String, u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_heights: Option<IndexMap<String, f64>>,
}

impl TypographyTokens {
    /// Font size `steps` away from the base size on the modular scale
    pub fn size(&self, steps: i32) -> f64 {
        self.base_size * self.scale.powi(steps)
    }
}

impl Default for TypographyTokens {
    fn default() -> Self {
        Self {
            font_family: "Inter, system-ui, -apple-system, sans-serif".to_string(),
            base_size: 16.0,
            scale: 1.25,
            weights: [("normal", 400), ("medium", 500), ("semibold", 600), ("bold", 700)]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            line_heights: None,
        }
    }
}

/// Spacing scale: a base unit plus named values in px
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacingTokens {
    pub base_unit: f64,
    #[serde(flatten)]
    pub values: IndexMap<String, f64>,
}

impl SpacingTokens {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }
}

impl Default for SpacingTokens {
    fn default() -> Self {
        Self {
            base_unit: 4.0,
            values: [("xs", 4.0), ("sm", 8.0), ("md", 16.0), ("lg", 24.0), ("xl", 32.0), ("xxl", 48.0)]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Double,
    None,
}

impl BorderStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::Double => "double",
            Self::None => "none",
        }
    }
}

/// Border width tiers, radius tiers and default style
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BorderTokens {
    pub thin: f64,
    pub default: f64,
    pub thick: f64,
    #[serde(default)]
    pub style: BorderStyle,
    pub radius: IndexMap<String, f64>,
}

impl Default for BorderTokens {
    fn default() -> Self {
        Self {
            thin: 1.0,
            default: 2.0,
            thick: 4.0,
            style: BorderStyle::Solid,
            radius: [("none", 0.0), ("sm", 4.0), ("md", 8.0), ("lg", 12.0), ("full", 9999.0)]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }
}

/// Dark mode switch and explicit overrides
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DarkModeConfig {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<ThemeColors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buttons: Option<VariantTokens>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cards: Option<VariantTokens>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const OCEAN: &str = r##"
[meta]
name = "Ocean"
version = "2.1.0"

[colors]
primary = "#3b82f6"
link = "colors.primary"
surface = "#ffffff"

[typography]
fontFamily = "Inter"
baseSize = 16
scale = 1.2
weights = { normal = 400, bold = 700 }

[spacing]
baseUnit = 4
sm = 8
md = 16

[borders]
thin = 1
default = 2
thick = 4
radius = { md = 8 }

[buttons.primary]
background = "colors.primary"
text = "#ffffff"

[darkMode]
enabled = true

[darkMode.colors]
surface = "#0f172a"
"##;

    #[test]
    fn parses_toml_theme() {
        let theme = ThemeConfig::from_toml_str(OCEAN).unwrap();
        assert_eq!(theme.meta.name, "Ocean");
        assert_eq!(theme.meta.version, "2.1.0");
        assert!(theme.colors.get("link").unwrap().is_reference());
        assert_eq!(theme.spacing.get("md"), Some(16.0));
        assert_eq!(theme.spacing.base_unit, 4.0);
        assert_eq!(theme.borders.style, BorderStyle::Solid);
        assert!(theme.dark_mode_enabled());

        let button = &theme.buttons.as_ref().unwrap()["primary"];
        assert_eq!(button["background"], TokenValue::reference("colors", "primary"));
    }

    #[test]
    fn json_round_trip_preserves_references() {
        let theme = ThemeConfig::from_toml_str(OCEAN).unwrap();
        let json = theme.to_json_string().unwrap();
        assert!(json.contains(r#""link": "colors.primary""#));
        assert!(json.contains(r#""darkMode""#));
        assert_eq!(ThemeConfig::from_json_str(&json).unwrap(), theme);
    }

    #[test]
    fn toml_round_trip() {
        let theme = ThemeConfig::from_toml_str(OCEAN).unwrap();
        let toml = theme.to_toml_string().unwrap();
        assert_eq!(ThemeConfig::from_toml_str(&toml).unwrap(), theme);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let theme = ThemeConfig::from_json_str(
            r##"{ "meta": { "name": "Bare" }, "colors": { "primary": "#000" } }"##,
        )
        .unwrap();
        assert_eq!(theme.typography, TypographyTokens::default());
        assert_eq!(theme.meta.version, "1.0.0");
        assert!(!theme.dark_mode_enabled());
    }

    #[test]
    fn malformed_config_is_rejected() {
        assert!(matches!(
            ThemeConfig::from_json_str(r#"{ "colors": {} }"#),
            Err(ThemeError::Json(_))
        ));
        assert!(matches!(
            ThemeConfig::from_toml_str("meta = 3"),
            Err(ThemeError::TomlParse(_))
        ));
    }

    #[test]
    fn modular_scale() {
        let typography = TypographyTokens::default();
        assert_eq!(typography.size(0), 16.0);
        assert_eq!(typography.size(1), 20.0);
        assert_eq!(typography.size(-1), 12.8);
    }
}
