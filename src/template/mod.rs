//! Placeholder templates for generated source files.
//!
//! Templates are plain text with field references drawn from the
//! [`Configuration`](crate::config::Configuration):
//!
//! - `{{.Name}}` - Substitutes the value of field `Name`
//! - `{{ .Name }}` - Whitespace inside the delimiters is ignored
//! - `{{.Dims.Width}}` - Descends into an object-valued extra field
//! - `{{- .Name}}` / `{{.Name -}}` - Trims whitespace before / after the action
//! - `{{/* note */}}` / `{{- /* note */ -}}` - Comment, renders nothing; the
//!   `/*` must directly follow the delimiter or trim marker
//!
//! Everything else is copied through untouched, including lone braces.
//!
//! # Error Handling
//!
//! Parsing and rendering are separate passes. Syntax problems are reported by
//! [`Template::parse`] before any configuration is consulted; a reference to a
//! field the configuration lacks is reported by [`Template::render`] rather
//! than being rendered as empty text.

mod parse;
mod render;


pub use parse::Template;

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static IDENTIFIER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid identifier regex")
});

/// Check whether `name` is a plain identifier (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER_REGEX.is_match(name)
}

/// Error type for template parsing and rendering failures.
///
/// Every variant carries the byte offset of the `{{` that opened the
/// offending action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// An action was opened but never closed.
    #[error("unclosed action at position {position}")]
    Unclosed { position: usize },

    /// An action with nothing inside it.
    #[error("empty action at position {position}")]
    EmptyAction { position: usize },

    /// An action that is not a field reference or comment.
    #[error(
        "unsupported action '{action}' at position {position} (only field references such as '.Name' are allowed)"
    )]
    UnsupportedAction { action: String, position: usize },

    /// A field reference with a segment that is not an identifier.
    #[error("invalid field name '{name}' at position {position}")]
    InvalidFieldName { name: String, position: usize },

    /// A `/*` comment without its closing `*/`.
    #[error("unclosed comment at position {position}")]
    UnclosedComment { position: usize },

    /// A field reference the configuration cannot resolve.
    #[error("undefined field '.{name}' at position {position}")]
    UndefinedField { name: String, position: usize },
}
