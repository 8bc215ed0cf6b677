//! Design tokens for theming
//!
//! Tokens are the atomic values that make up a theme configuration:
//! - Colors (literal values or references to other tokens)
//! - Typography (font family, modular scale, weights)
//! - Spacing
//! - Borders (widths, radii, style)
//! - Component variants (buttons, cards)
//! - Dark mode overrides

mod color;
mod config;
mod value;

pub use color::*;
pub use config::*;
pub use value::*;
