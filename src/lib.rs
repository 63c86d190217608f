//! Factory: a template-driven source generator and the build rule that runs it.
//!
//! The generator reads a JSON [`config::Configuration`], renders a
//! [`template::Template`] with it and writes one source file, prefixed with a
//! package declaration. The [`rule`] module describes that step to a build
//! orchestrator: which executable to run, which files it reads, and which
//! file it produces.

pub mod cli;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod generator;
pub mod rule;
pub mod template;

#[cfg(test)]
pub(crate) mod test_support;
