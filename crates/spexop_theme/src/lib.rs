//! Spexop Theme Engine
//!
//! Design token resolution, dark palette derivation and WCAG accessibility
//! auditing for Spexop theme configurations.
//!
//! # Overview
//!
//! The engine provides:
//! - **Design tokens**: Colors, typography, spacing, borders and component
//!   variants, where any color may reference another token
//! - **Token resolution**: `colors.link = "colors.primary"` chains are
//!   followed to a literal, with missing paths and cycles reported
//! - **Dark mode**: A role-aware dark palette derived from the light one,
//!   with contrast enforcement
//! - **Accessibility**: WCAG 2.x contrast audits, scores and comparisons
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use spexop_theme::{audit_theme_accessibility, generate_dark_mode, DarkModeOptions, ThemeConfig, WcagLevel};
//!
//! let theme = ThemeConfig::from_toml_str(&std::fs::read_to_string("theme.toml")?)?;
//!
//! let report = audit_theme_accessibility(&theme, WcagLevel::AA);
//! for issue in &report.issues {
//!     println!("{}: {}", issue.field, issue.message);
//! }
//!
//! let dark = generate_dark_mode(&theme, &DarkModeOptions::default())?;
//! ```
//!
//! # Architecture
//!
//! A configuration is resolved first, then handed to the generators:
//!
//! - [`resolve`]: References become literals
//! - [`dark_mode`]: Light palette to dark palette
//! - [`audit`]: Contrast battery over the resolved colors
//! - [`css`]: CSS custom properties and JSON output
//!
//! [`color`] and [`contrast`] are the leaf utilities shared by all of them.
//!
//! # Logging
//!
//! Events are emitted through `tracing`; the crate never installs a
//! subscriber.

pub mod audit;
pub mod color;
pub mod contrast;
pub mod css;
pub mod dark_mode;
pub mod error;
pub mod presets;
pub mod resolve;
pub mod tokens;

// Re-export commonly used types
pub use audit::{
    accessibility_score, audit_theme_accessibility, batch_audit, compare_accessibility,
    is_accessible, AccessibilityAuditResult, AccessibilityComparison, AuditIssue, AuditSummary,
    IssueCategory, IssueSeverity, ThemeAudit, ThemeScore,
};
pub use color::{
    adjust_lightness, hex_to_hsl, hex_to_rgb, hsl_to_hex, hsl_to_rgb, is_light,
    normalize_color_to_hex, parse_color, rgb_to_hex, rgb_to_hsl, validate_color,
    validate_theme_colors, ColorFamily, ColorFieldIssue, ColorFormat, ColorValidationOptions,
    ColorValidationResult, Hsl, Rgb,
};
pub use contrast::{
    adjust_for_contrast, adjust_for_contrast_either_way, calculate_contrast_ratio, check_contrast,
    contrast_ratio, relative_luminance, ContrastAdjustment, ContrastResult, TextSize, WcagLevel,
};
pub use css::{generate_css, generate_json, CssOptions};
pub use dark_mode::{
    generate_dark_mode, generate_dark_mode_colors, preview_dark_mode, suggested_options,
    DarkModeIntensity, DarkModeOptions, DarkModePreview,
};
pub use error::{ColorError, ResolveError, ThemeError};
pub use presets::{preset_config, ThemePreset};
pub use resolve::{resolve_theme_tokens, resolve_theme_tokens_lenient, resolve_token, TokenResolution};
pub use tokens::*;
