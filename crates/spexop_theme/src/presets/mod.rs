//! Built-in theme presets inspired by shadcn base color presets.

use crate::color::adjust_lightness;
use crate::tokens::*;
use indexmap::IndexMap;
use std::fmt::{Display, Formatter};

/// Built-in theme preset catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemePreset {
    /// Spexop brand theme.
    Spexop,
    /// shadcn-inspired neutral preset.
    Neutral,
    /// shadcn-inspired slate preset.
    Slate,
    /// shadcn-inspired zinc preset.
    Zinc,
}

impl ThemePreset {
    /// Stable preset id for config/serialization.
    pub fn id(self) -> &'static str {
        match self {
            Self::Spexop => "spexop",
            Self::Neutral => "neutral",
            Self::Slate => "slate",
            Self::Zinc => "zinc",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Spexop => "Spexop",
            Self::Neutral => "Neutral",
            Self::Slate => "Slate",
            Self::Zinc => "Zinc",
        }
    }

    /// Full preset list.
    pub fn all() -> &'static [ThemePreset] {
        const PRESETS: [ThemePreset; 4] = [
            ThemePreset::Spexop,
            ThemePreset::Neutral,
            ThemePreset::Slate,
            ThemePreset::Zinc,
        ];
        &PRESETS
    }

    /// Look a preset up by [`id`](Self::id).
    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.id() == id)
    }

    /// Build the theme configuration for this preset, dark palette included.
    pub fn config(self) -> ThemeConfig {
        match self {
            Self::Spexop => build_config(self, spexop_light(), spexop_dark()),
            Self::Neutral => build_config(self, neutral_light(), neutral_dark()),
            Self::Slate => build_config(self, slate_light(), slate_dark()),
            Self::Zinc => build_config(self, zinc_light(), zinc_dark()),
        }
    }
}

impl Display for ThemePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Convenience free function for ergonomic imports.
pub fn preset_config(preset: ThemePreset) -> ThemeConfig {
    preset.config()
}

fn build_config(preset: ThemePreset, light: BasePalette, dark: BasePalette) -> ThemeConfig {
    let mut config = ThemeConfig::new(preset.display_name(), build_colors(light, false));
    config.meta.description = Some(format!("{} preset", preset.display_name()));
    config.borders = preset_borders();
    config.buttons = Some(button_variants());
    config.cards = Some(card_variants());
    config.breakpoints = Some(
        [("sm", 640.0), ("md", 768.0), ("lg", 1024.0), ("xl", 1280.0)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    );
    config.dark_mode = Some(DarkModeConfig {
        enabled: true,
        colors: Some(build_colors(dark, true)),
        buttons: None,
        cards: None,
    });
    config
}

#[derive(Clone, Copy)]
struct BasePalette {
    background: &'static str,
    foreground: &'static str,
    card: &'static str,
    primary: &'static str,
    primary_foreground: &'static str,
    secondary: &'static str,
    muted: &'static str,
    muted_foreground: &'static str,
    accent: &'static str,
    destructive: &'static str,
    border: &'static str,
    ring: &'static str,
}

/// Shift lightness, keeping the input if it cannot be parsed.
fn shade(color: &str, delta: f64) -> String {
    adjust_lightness(color, delta).unwrap_or_else(|_| color.to_string())
}

fn build_colors(base: BasePalette, dark: bool) -> ThemeColors {
    // Moves away from the background: darker in light mode, lighter in dark.
    let away = if dark { 1.0 } else { -1.0 };
    let (success, warning, info) = if dark {
        ("#22C55E", "#F59E0B", "#38BDF8")
    } else {
        ("#16A34A", "#D97706", "#0EA5E9")
    };
    ThemeColors::new()
        .with("primary", base.primary)
        .with("primaryForeground", base.primary_foreground)
        .with("secondary", base.secondary)
        .with("accent", base.accent)
        .with("success", success)
        .with("warning", warning)
        .with("error", base.destructive)
        .with("info", info)
        .with("background", base.background)
        .with("surface", base.card)
        .with("surfaceSecondary", base.muted)
        .with("surfaceHover", shade(base.muted, 2.0 * away))
        .with("text", base.foreground)
        .with("textSecondary", base.muted_foreground)
        .with("textMuted", shade(base.muted_foreground, -10.0 * away))
        .with("border", base.border)
        .with("borderStrong", shade(base.border, 12.0 * away))
        .with("borderSubtle", base.muted)
        .with("focus", base.ring)
        .with("link", "colors.primary")
}

fn preset_borders() -> BorderTokens {
    BorderTokens {
        radius: [
            ("none", 0.0),
            ("sm", 6.0),
            ("md", 10.0),
            ("lg", 14.0),
            ("xl", 18.0),
            ("full", 9999.0),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect(),
        ..BorderTokens::default()
    }
}

fn variant(roles: &[(&str, &str)]) -> VariantColors {
    roles
        .iter()
        .map(|(role, value)| (role.to_string(), TokenValue::from(*value)))
        .collect()
}

fn button_variants() -> VariantTokens {
    let mut buttons = IndexMap::new();
    buttons.insert(
        "primary".to_string(),
        variant(&[
            ("background", "colors.primary"),
            ("text", "colors.primaryForeground"),
            ("border", "colors.primary"),
        ]),
    );
    buttons.insert(
        "secondary".to_string(),
        variant(&[
            ("background", "colors.secondary"),
            ("text", "colors.text"),
            ("border", "colors.border"),
        ]),
    );
    buttons.insert(
        "outline".to_string(),
        variant(&[
            ("background", "transparent"),
            ("text", "colors.text"),
            ("border", "colors.borderStrong"),
        ]),
    );
    buttons.insert(
        "danger".to_string(),
        variant(&[
            ("background", "colors.error"),
            ("text", "colors.primaryForeground"),
            ("border", "colors.error"),
        ]),
    );
    buttons
}

fn card_variants() -> VariantTokens {
    let mut cards = IndexMap::new();
    cards.insert(
        "default".to_string(),
        variant(&[
            ("background", "colors.surface"),
            ("text", "colors.text"),
            ("border", "colors.border"),
        ]),
    );
    cards.insert(
        "muted".to_string(),
        variant(&[
            ("background", "colors.surfaceSecondary"),
            ("text", "colors.textSecondary"),
            ("border", "colors.borderSubtle"),
        ]),
    );
    cards
}

fn spexop_light() -> BasePalette {
    BasePalette {
        background: "#FAFAFA",
        foreground: "#171717",
        card: "#FFFFFF",
        primary: "#EF4444",
        primary_foreground: "#FFFFFF",
        secondary: "#F5F5F5",
        muted: "#F5F5F5",
        muted_foreground: "#525252",
        accent: "#FEE2E2",
        destructive: "#DC2626",
        border: "#E5E5E5",
        ring: "#EF4444",
    }
}

fn spexop_dark() -> BasePalette {
    BasePalette {
        background: "#0A0A0A",
        foreground: "#FAFAFA",
        card: "#171717",
        primary: "#F87171",
        primary_foreground: "#0A0A0A",
        secondary: "#262626",
        muted: "#262626",
        muted_foreground: "#A3A3A3",
        accent: "#450A0A",
        destructive: "#EF4444",
        border: "#404040",
        ring: "#F87171",
    }
}

fn neutral_light() -> BasePalette {
    BasePalette {
        background: "#FFFFFF",
        foreground: "#0A0A0A",
        card: "#FFFFFF",
        primary: "#171717",
        primary_foreground: "#FAFAFA",
        secondary: "#F5F5F5",
        muted: "#F5F5F5",
        muted_foreground: "#737373",
        accent: "#F5F5F5",
        destructive: "#EF4444",
        border: "#E5E5E5",
        ring: "#0A0A0A",
    }
}

fn neutral_dark() -> BasePalette {
    BasePalette {
        background: "#0A0A0A",
        foreground: "#FAFAFA",
        card: "#0A0A0A",
        primary: "#FAFAFA",
        primary_foreground: "#171717",
        secondary: "#262626",
        muted: "#262626",
        muted_foreground: "#A3A3A3",
        accent: "#262626",
        destructive: "#7F1D1D",
        border: "#262626",
        ring: "#D4D4D4",
    }
}

fn slate_light() -> BasePalette {
    BasePalette {
        background: "#FFFFFF",
        foreground: "#020817",
        card: "#FFFFFF",
        primary: "#0F172A",
        primary_foreground: "#F8FAFC",
        secondary: "#F1F5F9",
        muted: "#F1F5F9",
        muted_foreground: "#64748B",
        accent: "#F1F5F9",
        destructive: "#EF4444",
        border: "#E2E8F0",
        ring: "#020817",
    }
}

fn slate_dark() -> BasePalette {
    BasePalette {
        background: "#020817",
        foreground: "#F8FAFC",
        card: "#020817",
        primary: "#F8FAFC",
        primary_foreground: "#0F172A",
        secondary: "#1E293B",
        muted: "#1E293B",
        muted_foreground: "#94A3B8",
        accent: "#1E293B",
        destructive: "#7F1D1D",
        border: "#1E293B",
        ring: "#CBD5E1",
    }
}

fn zinc_light() -> BasePalette {
    BasePalette {
        background: "#FFFFFF",
        foreground: "#09090B",
        card: "#FFFFFF",
        primary: "#18181B",
        primary_foreground: "#FAFAFA",
        secondary: "#F4F4F5",
        muted: "#F4F4F5",
        muted_foreground: "#71717A",
        accent: "#F4F4F5",
        destructive: "#EF4444",
        border: "#E4E4E7",
        ring: "#09090B",
    }
}

fn zinc_dark() -> BasePalette {
    BasePalette {
        background: "#09090B",
        foreground: "#FAFAFA",
        card: "#09090B",
        primary: "#FAFAFA",
        primary_foreground: "#18181B",
        secondary: "#27272A",
        muted: "#27272A",
        muted_foreground: "#A1A1AA",
        accent: "#27272A",
        destructive: "#7F1D1D",
        border: "#27272A",
        ring: "#D4D4D8",
    }
}
