//! Color tokens for theming

use super::TokenValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Well-known semantic color roles
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ColorRole {
    // Brand colors
    Primary,
    Secondary,
    Accent,

    // Semantic colors
    Success,
    Warning,
    Error,
    Info,

    // Surface colors
    Background,
    Surface,
    SurfaceSecondary,
    SurfaceHover,

    // Text colors
    Text,
    TextSecondary,
    TextMuted,

    // Border colors
    Border,
    BorderStrong,
    BorderSubtle,
}

impl ColorRole {
    /// Key used in theme configurations
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Accent => "accent",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
            Self::Background => "background",
            Self::Surface => "surface",
            Self::SurfaceSecondary => "surfaceSecondary",
            Self::SurfaceHover => "surfaceHover",
            Self::Text => "text",
            Self::TextSecondary => "textSecondary",
            Self::TextMuted => "textMuted",
            Self::Border => "border",
            Self::BorderStrong => "borderStrong",
            Self::BorderSubtle => "borderSubtle",
        }
    }

    pub fn is_required(self) -> bool {
        REQUIRED_COLOR_ROLES.contains(&self.as_str())
    }
}

/// Roles every theme must define
pub const REQUIRED_COLOR_ROLES: [&str; 10] = [
    "primary",
    "surface",
    "surfaceSecondary",
    "surfaceHover",
    "text",
    "textSecondary",
    "textMuted",
    "border",
    "borderStrong",
    "borderSubtle",
];

/// Status roles that keep their hue in every derived palette
pub const SEMANTIC_COLOR_ROLES: [ColorRole; 4] = [
    ColorRole::Success,
    ColorRole::Warning,
    ColorRole::Error,
    ColorRole::Info,
];

/// Role name to color value, in declaration order.
///
/// Besides the well-known [`ColorRole`]s a theme may define any custom role.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeColors(IndexMap<String, TokenValue>);

impl ThemeColors {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Get a color by role name
    pub fn get(&self, role: &str) -> Option<&TokenValue> {
        self.0.get(role)
    }

    /// Get a well-known role
    pub fn role(&self, role: ColorRole) -> Option<&TokenValue> {
        self.get(role.as_str())
    }

    /// Literal value of a role, `None` when missing or still a reference
    pub fn literal(&self, role: &str) -> Option<&str> {
        self.get(role).and_then(TokenValue::as_literal)
    }

    pub fn insert(&mut self, role: impl Into<String>, value: impl Into<TokenValue>) -> Option<TokenValue> {
        self.0.insert(role.into(), value.into())
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, role: impl Into<String>, value: impl Into<TokenValue>) -> Self {
        self.insert(role, value);
        self
    }

    pub fn contains(&self, role: &str) -> bool {
        self.0.contains_key(role)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TokenValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut TokenValue)> {
        self.0.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Required roles absent from this set
    pub fn missing_required_roles(&self) -> impl Iterator<Item = &'static str> + '_ {
        REQUIRED_COLOR_ROLES
            .iter()
            .copied()
            .filter(|role| !self.contains(role))
    }

    /// Overlay `overrides` on top of this set. Existing roles keep their
    /// position, new roles are appended.
    pub fn merge(&mut self, overrides: &ThemeColors) {
        for (role, value) in overrides.iter() {
            self.0.insert(role.to_string(), value.clone());
        }
    }
}

impl<K: Into<String>, V: Into<TokenValue>> FromIterator<(K, V)> for ThemeColors {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl IntoIterator for ThemeColors {
    type Item = (String, TokenValue);
    type IntoIter = indexmap::map::IntoIter<String, TokenValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
