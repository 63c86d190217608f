//! How a rule launches the generator.

use crate::error::{FactoryError, Result};
use std::ffi::OsString;

/// The generator executable plus any arguments that precede the rule's own.
///
/// Usually just a path to the `factory` binary, but a whole command line such
/// as `cargo run -q --bin factory --` works too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorCommand {
    program: String,
    leading_args: Vec<String>,
}

impl GeneratorCommand {
    /// A generator invoked as a bare executable.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    /// Split a command line into program and leading arguments.
    ///
    /// Quoting follows POSIX shell rules via shell-words.
    pub fn parse(command_line: &str) -> Result<Self> {
        let mut words = shell_words::split(command_line).map_err(|e| {
            FactoryError::Usage(format!(
                "failed to parse generator command '{}': {}",
                command_line, e
            ))
        })?;

        if words.is_empty() {
            return Err(FactoryError::Usage("generator command is empty".to_string()));
        }

        let program = words.remove(0);
        Ok(Self {
            program,
            leading_args: words,
        })
    }

    /// Read the command line from an environment variable, or use `fallback`
    /// when it is unset or blank.
    pub fn from_env(var: &str, fallback: Self) -> Result<Self> {
        match std::env::var(var) {
            Ok(value) if !value.trim().is_empty() => Self::parse(&value),
            _ => Ok(fallback),
        }
    }

    /// The executable of the running process.
    pub fn current_exe() -> Result<Self> {
        let exe = std::env::current_exe()
            .map_err(|e| FactoryError::io("locate generator executable", "<current exe>", e))?;
        Ok(Self::new(exe.to_string_lossy()))
    }

    /// The executable to launch.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments placed before the rule's own arguments.
    pub fn leading_args(&self) -> &[String] {
        &self.leading_args
    }

    pub(super) fn leading_os_args(&self) -> impl Iterator<Item = OsString> + '_ {
        self.leading_args.iter().map(OsString::from)
    }
}
