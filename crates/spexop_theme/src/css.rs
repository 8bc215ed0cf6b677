//! CSS custom property and JSON output
//!
//! ```text
//! :root {
//!   --theme-primary: #3b82f6;
//!   --theme-text-secondary: #4b5563;
//!   --theme-spacing-md: 16px;
//! }
//!
//! [data-theme="dark"] {
//!   --theme-primary: #60a5fa;
//! }
//! ```

use crate::dark_mode::{dark_scheme, DarkModeOptions};
use crate::error::{ResolveError, ThemeError};
use crate::resolve::resolve_theme_tokens;
use crate::tokens::{ThemeColors, ThemeConfig, VariantTokens};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CssOptions {
    /// Selector for the light variables
    pub selector: String,
    /// Variable prefix, `theme` gives `--theme-primary`
    pub prefix: String,
    /// Also emit the dark variables under `prefers-color-scheme: dark`
    pub include_media_query: bool,
}

impl Default for CssOptions {
    fn default() -> Self {
        Self {
            selector: ":root".to_string(),
            prefix: "theme".to_string(),
            include_media_query: true,
        }
    }
}

/// `surfaceHover` -> `surface-hover`
pub fn to_kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else if c == '_' || c == ' ' {
            out.push('-');
        } else {
            out.push(c);
        }
    }
    out
}

/// Accumulates `--prefix-name: value;` declarations for one block
struct Block<'a> {
    prefix: &'a str,
    indent: &'a str,
    out: String,
}

impl<'a> Block<'a> {
    fn new(prefix: &'a str, indent: &'a str) -> Self {
        Self {
            prefix,
            indent,
            out: String::new(),
        }
    }

    fn var(&mut self, name: &str, value: impl std::fmt::Display) {
        self.out.push_str(&format!(
            "{}--{}-{}: {};\n",
            self.indent,
            self.prefix,
            to_kebab_case(name),
            value
        ));
    }

    fn px(&mut self, name: &str, value: f64) {
        self.var(name, format!("{value}px"));
    }

    fn colors(&mut self, colors: &ThemeColors) {
        for (role, value) in colors.iter() {
            self.var(role, value);
        }
    }

    fn variants(&mut self, component: &str, variants: &VariantTokens) {
        for (variant, roles) in variants {
            for (role, value) in roles {
                self.var(&format!("{component}-{}-{}", to_kebab_case(variant), to_kebab_case(role)), value);
            }
        }
    }

    fn wrap(self, selector: &str, outer_indent: &str) -> String {
        format!("{outer_indent}{selector} {{\n{}{outer_indent}}}\n", self.out)
    }
}

fn light_block(theme: &ThemeConfig, block: &mut Block<'_>) {
    block.colors(&theme.colors);

    let typography = &theme.typography;
    block.var("fontFamily", &typography.font_family);
    block.px("fontSizeBase", typography.base_size);
    block.var("fontScale", typography.scale);
    for (name, weight) in &typography.weights {
        block.var(&format!("fontWeight-{name}"), weight);
    }
    for (name, height) in typography.line_heights.iter().flatten() {
        block.var(&format!("lineHeight-{name}"), height);
    }

    block.px("spacingBase", theme.spacing.base_unit);
    for (name, value) in &theme.spacing.values {
        block.px(&format!("spacing-{name}"), *value);
    }

    let borders = &theme.borders;
    block.px("borderThin", borders.thin);
    block.px("borderDefault", borders.default);
    block.px("borderThick", borders.thick);
    block.var("borderStyle", borders.style.as_str());
    for (name, radius) in &borders.radius {
        block.px(&format!("radius-{name}"), *radius);
    }

    for (name, width) in theme.breakpoints.iter().flatten() {
        block.px(&format!("breakpoint-{name}"), *width);
    }

    if let Some(buttons) = &theme.buttons {
        block.variants("button", buttons);
    }
    if let Some(cards) = &theme.cards {
        block.variants("card", cards);
    }
}

/// Dark declarations: the dark palette and every variant resolved against it.
fn dark_block(scheme: &ThemeConfig, block: &mut Block<'_>) {
    block.colors(&scheme.colors);
    if let Some(buttons) = &scheme.buttons {
        block.variants("button", buttons);
    }
    if let Some(cards) = &scheme.cards {
        block.variants("card", cards);
    }
}

/// Emit the resolved theme as CSS custom properties.
///
/// Dark mode blocks are only emitted when `darkMode.enabled` is set.
pub fn generate_css(theme: &ThemeConfig, options: &CssOptions) -> Result<String, ResolveError> {
    let resolved = resolve_theme_tokens(theme)?;
    let prefix = options.prefix.as_str();

    let mut light = Block::new(prefix, "  ");
    light_block(&resolved, &mut light);
    let mut css = light.wrap(&options.selector, "");

    if resolved.dark_mode_enabled() {
        let dark_selector = if options.selector == ":root" {
            r#"[data-theme="dark"]"#.to_string()
        } else {
            format!(r#"{}[data-theme="dark"]"#, options.selector)
        };
        let scheme = dark_scheme(theme, &resolved, &DarkModeOptions::default())?;
        let mut dark = Block::new(prefix, "  ");
        dark_block(&scheme, &mut dark);
        css.push('\n');
        css.push_str(&dark.wrap(&dark_selector, ""));

        if options.include_media_query {
            let mut media = Block::new(prefix, "    ");
            dark_block(&scheme, &mut media);
            let selector = format!(r#"{}:not([data-theme="light"])"#, options.selector);
            css.push_str("\n@media (prefers-color-scheme: dark) {\n");
            css.push_str(&media.wrap(&selector, "  "));
            css.push_str("}\n");
        }
    }

    debug!(theme = %resolved.meta.name, bytes = css.len(), "generated theme CSS");
    Ok(css)
}

/// Emit the resolved theme as pretty-printed JSON.
pub fn generate_json(theme: &ThemeConfig) -> Result<String, ThemeError> {
    resolve_theme_tokens(theme)?.to_json_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{DarkModeConfig, TokenValue};
    use indexmap::IndexMap;

    fn theme() -> ThemeConfig {
        let colors: ThemeColors = [
            ("primary", "#3b82f6"),
            ("surface", "#ffffff"),
            ("textSecondary", "#4b5563"),
            ("link", "colors.primary"),
        ]
        .into_iter()
        .collect();
        ThemeConfig::new("Ocean", colors)
    }

    #[test]
    fn kebab_case() {
        assert_eq!(to_kebab_case("surfaceHover"), "surface-hover");
        assert_eq!(to_kebab_case("primary"), "primary");
        assert_eq!(to_kebab_case("fontWeight-bold"), "font-weight-bold");
    }

    #[test]
    fn emits_resolved_variables_under_root() {
        let css = generate_css(&theme(), &CssOptions::default()).unwrap();
        assert!(css.starts_with(":root {\n"));
        assert!(css.contains("  --theme-primary: #3b82f6;\n"));
        assert!(css.contains("  --theme-link: #3b82f6;\n"));
        assert!(css.contains("  --theme-text-secondary: #4b5563;\n"));
        assert!(css.contains("  --theme-spacing-md: 16px;\n"));
        assert!(css.contains("  --theme-radius-md: 8px;\n"));
        assert!(css.contains("  --theme-font-weight-bold: 700;\n"));
        assert!(css.contains("  --theme-border-style: solid;\n"));
        assert!(!css.contains("colors.primary"));
        assert!(!css.contains("data-theme"));
    }

    #[test]
    fn custom_selector_and_prefix() {
        let options = CssOptions {
            selector: ".brand".into(),
            prefix: "sx".into(),
            include_media_query: false,
        };
        let css = generate_css(&theme(), &options).unwrap();
        assert!(css.starts_with(".brand {\n"));
        assert!(css.contains("--sx-primary: #3b82f6;"));
    }

    #[test]
    fn emits_variant_variables() {
        let mut config = theme();
        let mut primary = IndexMap::new();
        primary.insert("background".to_string(), TokenValue::from("colors.primary"));
        primary.insert("hoverText".to_string(), TokenValue::from("#ffffff"));
        config.buttons = Some([("primary".to_string(), primary)].into_iter().collect());

        let css = generate_css(&config, &CssOptions::default()).unwrap();
        assert!(css.contains("--theme-button-primary-background: #3b82f6;"));
        assert!(css.contains("--theme-button-primary-hover-text: #ffffff;"));
    }

    #[test]
    fn dark_blocks_when_enabled() {
        let mut config = theme();
        config.dark_mode = Some(DarkModeConfig {
            enabled: true,
            colors: Some(ThemeColors::new().with("primary", "#60a5fa")),
            ..Default::default()
        });

        let css = generate_css(&config, &CssOptions::default()).unwrap();
        assert!(css.contains("\n[data-theme=\"dark\"] {\n  --theme-primary: #60a5fa;\n"));
        assert!(css.contains("@media (prefers-color-scheme: dark) {\n  :root:not([data-theme=\"light\"]) {\n"));
        assert!(css.contains("    --theme-primary: #60a5fa;\n"));
        assert!(css.trim_end().ends_with('}'));

        let options = CssOptions {
            include_media_query: false,
            ..Default::default()
        };
        let css = generate_css(&config, &options).unwrap();
        assert!(css.contains("[data-theme=\"dark\"]"));
        assert!(!css.contains("@media"));
    }

    #[test]
    fn dark_block_overrides_variants() {
        let mut config = theme();
        let mut primary = IndexMap::new();
        primary.insert("background".to_string(), TokenValue::from("colors.primary"));
        config.buttons = Some([("primary".to_string(), primary)].into_iter().collect());
        config.dark_mode = Some(DarkModeConfig {
            enabled: true,
            colors: Some(ThemeColors::new().with("primary", "#60a5fa")),
            ..Default::default()
        });

        let css = generate_css(&config, &CssOptions::default()).unwrap();
        let (light, dark) = css.split_once("[data-theme=\"dark\"]").unwrap();
        assert!(light.contains("--theme-button-primary-background: #3b82f6;"));
        assert!(dark.contains("--theme-button-primary-background: #60a5fa;"));
    }

    #[test]
    fn disabled_dark_mode_is_not_emitted() {
        let mut config = theme();
        config.dark_mode = Some(DarkModeConfig {
            enabled: false,
            colors: Some(ThemeColors::new().with("primary", "#60a5fa")),
            ..Default::default()
        });
        let css = generate_css(&config, &CssOptions::default()).unwrap();
        assert!(!css.contains("#60a5fa"));
    }

    #[test]
    fn unresolvable_reference_fails() {
        let mut config = theme();
        config.colors.insert("focus", "colors.ring");
        assert!(matches!(
            generate_css(&config, &CssOptions::default()),
            Err(ResolveError::MissingReference { .. })
        ));
        assert!(matches!(generate_json(&config), Err(ThemeError::Resolve(_))));
    }

    #[test]
    fn json_is_resolved() {
        let json = generate_json(&theme()).unwrap();
        assert!(json.contains(r##""link": "#3b82f6""##));
        assert!(json.contains(r#""meta""#));
    }
}
