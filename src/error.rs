//! Error types for the factory generator and rule wrapper.
//!
//! Uses thiserror for derive macros. Every variant renders as a single
//! diagnostic line naming the operation that failed.

use crate::exit_codes;
use crate::template::TemplateError;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Main error type for factory operations.
///
/// Each variant maps to an exit code in [`exit_codes`].
#[derive(Error, Debug)]
pub enum FactoryError {
    /// A filesystem operation failed.
    #[error("failed to {op} '{}': {source}", .path.display())]
    Io {
        /// Short verb phrase, e.g. "open config" or "write output".
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON or does not match the configuration shape.
    #[error("failed to parse config '{}': {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The template file has malformed placeholder syntax.
    #[error("failed to parse template '{}': {source}", .path.display())]
    TemplateParse {
        path: PathBuf,
        #[source]
        source: TemplateError,
    },

    /// The template references something the configuration cannot supply.
    #[error("failed to render template '{}': {source}", .path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: TemplateError,
    },

    /// Invalid arguments (package name, rule name, generator command line).
    #[error("{0}")]
    Usage(String),

    /// A rule's generator subprocess exited unsuccessfully.
    #[error("generator for rule '{rule}' failed ({status}): {stderr}")]
    GeneratorFailed {
        rule: String,
        status: ExitStatus,
        stderr: String,
    },

    /// A rule's generator reported success but its declared output is absent.
    #[error("generator for rule '{rule}' did not produce '{}'", .path.display())]
    MissingOutput { rule: String, path: PathBuf },

    /// A rule manifest could not be serialized.
    #[error("failed to serialize rule manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl FactoryError {
    /// Build an [`FactoryError::Io`] from an operation name, path and source error.
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FactoryError::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            FactoryError::Io { .. } => exit_codes::IO_FAILURE,
            FactoryError::ConfigParse { .. } => exit_codes::PARSE_FAILURE,
            FactoryError::TemplateParse { .. } => exit_codes::PARSE_FAILURE,
            FactoryError::Render { .. } => exit_codes::RENDER_FAILURE,
            FactoryError::Usage(_) => exit_codes::USAGE_ERROR,
            FactoryError::GeneratorFailed { .. } => exit_codes::GENERATOR_FAILURE,
            FactoryError::MissingOutput { .. } => exit_codes::GENERATOR_FAILURE,
            FactoryError::Manifest(_) => exit_codes::IO_FAILURE,
        }
    }
}

/// Result type alias for factory operations.
pub type Result<T> = std::result::Result<T, FactoryError>;
