//! Token values and reference paths

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

fn reference_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([a-zA-Z]+)\.([a-zA-Z]+)$").expect("token reference pattern is valid")
    })
}

/// Address of a token: `<section>.<field>`, e.g. `colors.primary`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenPath {
    section: String,
    field: String,
}

impl TokenPath {
    pub fn new(section: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            field: field.into(),
        }
    }

    /// Parse a dotted reference. Returns `None` unless the whole string
    /// matches `^[a-zA-Z]+\.[a-zA-Z]+$`.
    pub fn parse(s: &str) -> Option<Self> {
        let caps = reference_pattern().captures(s)?;
        Some(Self::new(&caps[1], &caps[2]))
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

impl Display for TokenPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.section, self.field)
    }
}

/// A token value as written in a theme configuration.
///
/// Strings are classified once, when the configuration is parsed: anything
/// shaped like `section.field` is a reference, everything else a literal.
/// Serializes back to the original string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TokenValue {
    Literal(String),
    Reference(TokenPath),
}

impl TokenValue {
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        match TokenPath::parse(trimmed) {
            Some(path) => Self::Reference(path),
            None => Self::Literal(s.to_string()),
        }
    }

    /// A literal, even if the text looks like a reference.
    pub fn literal(s: impl Into<String>) -> Self {
        Self::Literal(s.into())
    }

    pub fn reference(section: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Reference(TokenPath::new(section, field))
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(s) => Some(s),
            Self::Reference(_) => None,
        }
    }

    pub fn as_reference(&self) -> Option<&TokenPath> {
        match self {
            Self::Literal(_) => None,
            Self::Reference(path) => Some(path),
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }
}

impl From<String> for TokenValue {
    fn from(s: String) -> Self {
        match TokenPath::parse(s.trim()) {
            Some(path) => Self::Reference(path),
            None => Self::Literal(s),
        }
    }
}

impl From<&str> for TokenValue {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<TokenValue> for String {
    fn from(value: TokenValue) -> Self {
        match value {
            TokenValue::Literal(s) => s,
            TokenValue::Reference(path) => path.to_string(),
        }
    }
}

impl Display for TokenValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(s) => f.write_str(s),
            Self::Reference(path) => path.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_references() {
        assert_eq!(
            TokenValue::parse("colors.primary"),
            TokenValue::reference("colors", "primary")
        );
        assert_eq!(
            TokenValue::parse("borders.thick"),
            TokenValue::reference("borders", "thick")
        );
    }

    #[test]
    fn literals_stay_literal() {
        for s in ["#3b82f6", "rgb(0, 0, 0)", "colors.primary.dark", "colors.", "font1.size", "1.5"] {
            assert!(!TokenValue::parse(s).is_reference(), "{s}");
        }
    }

    #[test]
    fn serde_round_trips_through_plain_strings() {
        let value: TokenValue = serde_json::from_str(r#""colors.accent""#).unwrap();
        assert_eq!(value.as_reference().unwrap().field(), "accent");
        assert_eq!(serde_json::to_string(&value).unwrap(), r#""colors.accent""#);

        let value: TokenValue = serde_json::from_str(r##""#fff""##).unwrap();
        assert_eq!(value.as_literal(), Some("#fff"));
    }
}
