//! Build-rule wrapper around the generator.
//!
//! A [`GenerateRule`] is the declarative side of code generation: it names
//! the generator executable, the two files the generator reads and the one
//! file it writes. An orchestrator uses that to decide when the step must
//! rerun and to hand the output to later compilation steps. The rule has no
//! logic of its own beyond building the generator's argument list.
//!
//! Three ways to hand a rule to an orchestrator:
//!
//! - [`GenerateRule::run`] executes the generator as a subprocess
//! - [`GenerateRule::manifest`] describes the rule as JSON for external tools
//! - [`GenerateRule::cargo_directives`] speaks Cargo's build-script protocol
//!
//! # Example
//!
//! A `build.rs` regenerating a file whenever its template or config changes:
//!
//! ```no_run
//! use factory::rule::{GenerateRule, GeneratorCommand};
//! use std::path::PathBuf;
//!
//! let out = PathBuf::from(std::env::var("OUT_DIR").unwrap()).join("things.go");
//! let generator = GeneratorCommand::from_env("FACTORY_GENERATOR", GeneratorCommand::new("factory"))?;
//! let rule = GenerateRule::new("things", generator, "templates/things.tmpl", "config/base.json", out)?
//!     .package("main");
//!
//! rule.run()?;
//! rule.emit_cargo_directives("THINGS_SOURCE");
//! # Ok::<(), factory::error::FactoryError>(())
//! ```

mod command;


pub use command::GeneratorCommand;

use crate::error::{FactoryError, Result};
use crate::generator::DEFAULT_PACKAGE;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;
use tracing::{debug, info};

static RULE_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("Invalid rule name regex"));

/// One code-generation step: inputs, output and the generator that links them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRule {
    name: String,
    generator: GeneratorCommand,
    package: String,
    template: PathBuf,
    config: PathBuf,
    out: PathBuf,
}

/// Orchestrator-facing description of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleManifest {
    /// Rule label.
    pub name: String,
    /// Program to execute.
    pub executable: String,
    /// Full argument list after the executable.
    pub args: Vec<String>,
    /// Files whose changes invalidate the output.
    pub inputs: Vec<PathBuf>,
    /// Files the rule produces.
    pub outputs: Vec<PathBuf>,
}

impl RuleManifest {
    /// Pretty-printed JSON form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl GenerateRule {
    /// Declare a rule.
    ///
    /// `name` is a label for diagnostics and manifests; it may contain
    /// letters, digits, `_`, `.` and `-`. The package defaults to `codegen`.
    pub fn new(
        name: impl Into<String>,
        generator: GeneratorCommand,
        template: impl Into<PathBuf>,
        config: impl Into<PathBuf>,
        out: impl Into<PathBuf>,
    ) -> Result<Self> {
        let name = name.into();
        if !RULE_NAME_REGEX.is_match(&name) {
            return Err(FactoryError::Usage(format!(
                "invalid rule name '{}': use letters, digits, '_', '.' or '-'",
                name
            )));
        }

        Ok(Self {
            name,
            generator,
            package: DEFAULT_PACKAGE.to_string(),
            template: template.into(),
            config: config.into(),
            out: out.into(),
        })
    }

    /// Set the package name passed to the generator.
    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The files the generator reads: template, then config.
    pub fn inputs(&self) -> [&Path; 2] {
        [&self.template, &self.config]
    }

    /// The single file the generator writes.
    pub fn output(&self) -> &Path {
        &self.out
    }

    /// Arguments for one generator invocation, excluding the generator's
    /// own leading arguments.
    pub fn args(&self) -> Vec<OsString> {
        vec![
            "--package".into(),
            self.package.clone().into(),
            "--tmpl".into(),
            self.template.clone().into(),
            "--config".into(),
            self.config.clone().into(),
            "--out".into(),
            self.out.clone().into(),
        ]
    }

    /// The process an orchestrator should spawn.
    pub fn command(&self) -> Command {
        let mut command = Command::new(self.generator.program());
        command.args(self.generator.leading_os_args());
        command.args(self.args());
        command
    }

    /// Shell-quoted form of [`GenerateRule::command`], for logs and manifests.
    pub fn command_line(&self) -> String {
        let mut words = vec![self.generator.program().to_string()];
        words.extend(self.full_args());
        shell_words::join(words)
    }

    fn full_args(&self) -> Vec<String> {
        self.generator
            .leading_args()
            .iter()
            .cloned()
            .chain(self.args().iter().map(|a| a.to_string_lossy().into_owned()))
            .collect()
    }

    /// Run the generator and return the path it wrote.
    ///
    /// # Returns
    ///
    /// * `Ok(PathBuf)` - The output path, now present on disk
    /// * `Err(FactoryError::Io)` - The generator could not be launched
    /// * `Err(FactoryError::GeneratorFailed)` - It exited unsuccessfully
    /// * `Err(FactoryError::MissingOutput)` - It succeeded but wrote nothing
    pub fn run(&self) -> Result<PathBuf> {
        debug!(rule = %self.name, command = %self.command_line(), "running generator");

        let output = self
            .command()
            .output()
            .map_err(|e| FactoryError::io("run generator", self.generator.program(), e))?;

        if !output.status.success() {
            return Err(FactoryError::GeneratorFailed {
                rule: self.name.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        if !self.out.is_file() {
            return Err(FactoryError::MissingOutput {
                rule: self.name.clone(),
                path: self.out.clone(),
            });
        }

        info!(rule = %self.name, output = %self.out.display(), "generated");
        Ok(self.out.clone())
    }

    /// Describe the rule for an external orchestrator.
    pub fn manifest(&self) -> RuleManifest {
        RuleManifest {
            name: self.name.clone(),
            executable: self.generator.program().to_string(),
            args: self.full_args(),
            inputs: self.inputs().iter().map(|p| p.to_path_buf()).collect(),
            outputs: vec![self.out.clone()],
        }
    }

    /// Cargo build-script directives for this rule.
    ///
    /// Each input gets a `rerun-if-changed` line; the output path is exported
    /// to the crate being built as the environment variable `env_var`, for
    /// use with `include_str!(env!("..."))`.
    pub fn cargo_directives(&self, env_var: &str) -> Vec<String> {
        let mut directives: Vec<String> = self
            .inputs()
            .iter()
            .map(|input| format!("cargo:rerun-if-changed={}", input.display()))
            .collect();
        directives.push(format!("cargo:rustc-env={}={}", env_var, self.out.display()));
        directives
    }

    /// Print [`GenerateRule::cargo_directives`] to stdout, where Cargo reads them.
    pub fn emit_cargo_directives(&self, env_var: &str) {
        for directive in self.cargo_directives(env_var) {
            println!("{}", directive);
        }
    }
}
