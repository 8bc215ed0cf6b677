//! Token reference resolution
//!
//! A theme may point one token at another (`link = "colors.primary"`).
//! Resolution replaces every such reference in the color, button, card and
//! dark mode sections with the literal reached by following the chain.

use crate::error::ResolveError;
use crate::tokens::{ThemeColors, ThemeConfig, TokenValue, VariantTokens};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{trace, warn};

/// Outcome of [`resolve_theme_tokens_lenient`]
#[derive(Clone, Debug)]
pub struct TokenResolution {
    /// The theme with every resolvable reference replaced
    pub theme: ThemeConfig,
    /// One entry per reference that could not be resolved
    pub errors: Vec<ResolveError>,
}

impl TokenResolution {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Resolve every token reference, failing on the first missing path or cycle.
pub fn resolve_theme_tokens(theme: &ThemeConfig) -> Result<ThemeConfig, ResolveError> {
    let mut resolved = theme.clone();
    TokenTable::new(theme).resolve_into(&mut resolved, Err)?;
    Ok(resolved)
}

/// Resolve what can be resolved.
///
/// Unresolvable references are left in place as references and reported in
/// [`TokenResolution::errors`].
pub fn resolve_theme_tokens_lenient(theme: &ThemeConfig) -> TokenResolution {
    let mut resolved = theme.clone();
    let mut errors = Vec::new();
    let table = TokenTable::new(theme);
    let outcome = table.resolve_into(&mut resolved, |error| {
        warn!(field = error.field(), "{error}");
        errors.push(error);
        Ok(())
    });
    if let Err(error) = outcome {
        errors.push(error);
    }
    TokenResolution {
        theme: resolved,
        errors,
    }
}

/// Resolve a single value against `theme`.
pub fn resolve_token(theme: &ThemeConfig, value: &TokenValue) -> Result<String, ResolveError> {
    TokenTable::new(theme).follow(&value.to_string(), value, false)
}

/// Every scalar field of a theme, keyed by `section.field`
struct TokenTable {
    entries: FxHashMap<String, TokenValue>,
}

impl TokenTable {
    fn new(theme: &ThemeConfig) -> Self {
        let mut entries = FxHashMap::default();
        let mut literal = |key: String, value: String| {
            entries.insert(key, TokenValue::Literal(value));
        };

        literal("meta.name".into(), theme.meta.name.clone());
        literal("meta.version".into(), theme.meta.version.clone());
        if let Some(description) = &theme.meta.description {
            literal("meta.description".into(), description.clone());
        }
        if let Some(author) = &theme.meta.author {
            literal("meta.author".into(), author.clone());
        }

        let typography = &theme.typography;
        literal("typography.fontFamily".into(), typography.font_family.clone());
        literal("typography.baseSize".into(), typography.base_size.to_string());
        literal("typography.scale".into(), typography.scale.to_string());

        literal("spacing.baseUnit".into(), theme.spacing.base_unit.to_string());
        for (name, value) in &theme.spacing.values {
            literal(format!("spacing.{name}"), value.to_string());
        }

        let borders = &theme.borders;
        literal("borders.thin".into(), borders.thin.to_string());
        literal("borders.default".into(), borders.default.to_string());
        literal("borders.thick".into(), borders.thick.to_string());
        literal("borders.style".into(), borders.style.as_str().to_string());

        for (name, value) in theme.breakpoints.iter().flatten() {
            literal(format!("breakpoints.{name}"), value.to_string());
        }

        for (role, value) in theme.colors.iter() {
            entries.insert(format!("colors.{role}"), value.clone());
        }

        Self { entries }
    }

    /// This table with `colors` entries replaced by `overrides`, so that
    /// `colors.*` references reach the overriding values.
    fn with_colors(&self, overrides: &ThemeColors) -> Self {
        let mut entries = self.entries.clone();
        for (role, value) in overrides.iter() {
            entries.insert(format!("colors.{role}"), value.clone());
        }
        Self { entries }
    }

    /// Follow `value` until a literal is reached. `in_table` marks `field`
    /// as one of the table's own entries, so a chain returning to it is a
    /// cycle.
    fn follow(&self, field: &str, value: &TokenValue, in_table: bool) -> Result<String, ResolveError> {
        let mut visited = FxHashSet::default();
        if in_table {
            visited.insert(field.to_string());
        }
        let mut chain = vec![field.to_string()];
        let mut current = value;

        loop {
            let path = match current {
                TokenValue::Literal(literal) => return Ok(literal.clone()),
                TokenValue::Reference(path) => path.to_string(),
            };
            trace!(field, %path, "following token reference");

            chain.push(path.clone());
            if !visited.insert(path.clone()) {
                return Err(ResolveError::Cycle {
                    field: field.to_string(),
                    chain,
                });
            }

            current = self
                .entries
                .get(&path)
                .ok_or_else(|| ResolveError::MissingReference {
                    field: field.to_string(),
                    path,
                })?;
        }
    }

    /// Replace references in `theme` in place. `on_error` decides whether a
    /// failure aborts the pass.
    fn resolve_into<F>(&self, theme: &mut ThemeConfig, mut on_error: F) -> Result<(), ResolveError>
    where
        F: FnMut(ResolveError) -> Result<(), ResolveError>,
    {
        self.resolve_colors("colors", &mut theme.colors, &mut on_error)?;
        if let Some(buttons) = &mut theme.buttons {
            self.resolve_variants("buttons", buttons, &mut on_error)?;
        }
        if let Some(cards) = &mut theme.cards {
            self.resolve_variants("cards", cards, &mut on_error)?;
        }

        // Inside darkMode, `colors.*` means the dark value where one is given.
        if let Some(dark) = &mut theme.dark_mode {
            let table = match &dark.colors {
                Some(colors) => self.with_colors(colors),
                None => self.with_colors(&ThemeColors::new()),
            };
            if let Some(colors) = &mut dark.colors {
                table.resolve_colors("darkMode.colors", colors, &mut on_error)?;
            }
            if let Some(buttons) = &mut dark.buttons {
                table.resolve_variants("darkMode.buttons", buttons, &mut on_error)?;
            }
            if let Some(cards) = &mut dark.cards {
                table.resolve_variants("darkMode.cards", cards, &mut on_error)?;
            }
        }
        Ok(())
    }

    fn resolve_colors<F>(
        &self,
        section: &str,
        colors: &mut ThemeColors,
        on_error: &mut F,
    ) -> Result<(), ResolveError>
    where
        F: FnMut(ResolveError) -> Result<(), ResolveError>,
    {
        for (role, value) in colors.iter_mut() {
            self.resolve_value(&format!("{section}.{role}"), value, on_error)?;
        }
        Ok(())
    }

    fn resolve_variants<F>(
        &self,
        section: &str,
        variants: &mut VariantTokens,
        on_error: &mut F,
    ) -> Result<(), ResolveError>
    where
        F: FnMut(ResolveError) -> Result<(), ResolveError>,
    {
        for (variant, roles) in variants.iter_mut() {
            for (role, value) in roles.iter_mut() {
                self.resolve_value(&format!("{section}.{variant}.{role}"), value, on_error)?;
            }
        }
        Ok(())
    }

    fn resolve_value<F>(
        &self,
        field: &str,
        value: &mut TokenValue,
        on_error: &mut F,
    ) -> Result<(), ResolveError>
    where
        F: FnMut(ResolveError) -> Result<(), ResolveError>,
    {
        if !value.is_reference() {
            return Ok(());
        }
        match self.follow(field, value, field.starts_with("colors.")) {
            Ok(literal) => {
                *value = TokenValue::Literal(literal);
                Ok(())
            }
            Err(error) => on_error(error),
        }
    }
}
