use thiserror::Error;

/// A color string that cannot be turned into concrete sRGB channels.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid color `{input}`: {reason}")]
    Invalid { input: String, reason: String },

    /// Keywords such as `transparent` or `currentColor` are valid CSS but
    /// have no fixed channel values.
    #[error("`{0}` is a CSS keyword, not a concrete color")]
    NotConcrete(String),
}

impl ColorError {
    pub(crate) fn invalid(input: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Failure to turn a token reference into a literal value.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("`{field}` references `{path}`, which does not exist")]
    MissingReference { field: String, path: String },

    #[error("`{field}` is part of a reference cycle: {}", chain.join(" -> "))]
    Cycle { field: String, chain: Vec<String> },
}

impl ResolveError {
    /// Dotted path of the field whose value could not be resolved.
    pub fn field(&self) -> &str {
        match self {
            Self::MissingReference { field, .. } | Self::Cycle { field, .. } => field,
        }
    }
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("failed to parse theme TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("failed to serialize theme TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("theme JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Color(#[from] ColorError),
}
