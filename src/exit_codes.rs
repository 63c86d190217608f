//! Exit code constants for the factory CLI.
//!
//! - 0: Success
//! - 1: I/O failure (config/template unreadable, output unwritable)
//! - 2: Usage error (bad flags, invalid package name)
//! - 3: Parse failure (malformed JSON config or template syntax)
//! - 4: Render failure (template references an unknown field)
//! - 5: Generator subprocess failure (rule wrapper only)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// A file could not be opened, read, created or renamed.
pub const IO_FAILURE: i32 = 1;

/// Bad arguments. Matches the code clap uses for its own usage errors.
pub const USAGE_ERROR: i32 = 2;

/// Malformed config JSON or template syntax.
pub const PARSE_FAILURE: i32 = 3;

/// Template rendering failed against the loaded configuration.
pub const RENDER_FAILURE: i32 = 4;

/// The generator subprocess launched by a rule failed or misbehaved.
pub const GENERATOR_FAILURE: i32 = 5;
