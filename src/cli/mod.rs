//! CLI argument parsing for factory.
//!
//! Uses clap derive macros for declarative argument definitions. Build rules
//! written for the classic single-dash flag style (`-package main`,
//! `-out=things.go`) are accepted by rewriting those flags to their
//! double-dash form before clap sees them.

use crate::generator::{
    DEFAULT_CONFIG, DEFAULT_OUT, DEFAULT_PACKAGE, DEFAULT_TEMPLATE, GenerateRequest,
};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Factory: render a template with JSON configuration into a source file.
///
/// Reads the config, renders the template with it, and writes the result
/// prefixed with a package declaration. Any failure exits non-zero with a
/// single diagnostic line.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "factory")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The package name in the generated code file.
    #[arg(long, value_name = "NAME", default_value = DEFAULT_PACKAGE)]
    pub package: String,

    /// The template file.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_TEMPLATE)]
    pub tmpl: PathBuf,

    /// The configuration file.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// The output file.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_OUT)]
    pub out: PathBuf,

    /// Print the build-rule manifest for these arguments as JSON and exit
    /// without generating.
    #[arg(long)]
    pub describe: bool,
}

/// Long flags that may also be spelled with a single dash.
const LONG_FLAGS: &[&str] = &["package", "tmpl", "config", "out", "describe"];

impl Cli {
    /// Parse the process arguments.
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// Parse an explicit argument list (first item is the program name).
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }

    /// The generator request these arguments describe.
    pub fn request(&self) -> GenerateRequest {
        GenerateRequest {
            package: self.package.clone(),
            template: self.tmpl.clone(),
            config: self.config.clone(),
            out: self.out.clone(),
        }
    }
}

/// Rewrite `-flag` / `-flag=value` to `--flag` / `--flag=value` for known
/// long flags. Everything after a bare `--` is left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;

    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(index, arg)| {
            if index == 0 || passthrough {
                return arg;
            }
            if arg == "--" {
                passthrough = true;
                return arg;
            }

            let Some(text) = arg.to_str() else {
                return arg;
            };
            let Some(flag) = text.strip_prefix('-').filter(|rest| !rest.starts_with('-')) else {
                return arg;
            };
            let name = flag.split_once('=').map_or(flag, |(name, _)| name);

            if LONG_FLAGS.contains(&name) {
                OsString::from(format!("-{}", text))
            } else {
                arg
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_args(std::iter::once("factory").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.package, "codegen");
        assert_eq!(cli.tmpl, PathBuf::from("templates/things.tmpl"));
        assert_eq!(cli.config, PathBuf::from("config/base.json"));
        assert_eq!(cli.out, PathBuf::from("out.go"));
        assert!(!cli.describe);
        assert_eq!(cli.request(), GenerateRequest::default());
    }

    #[test]
    fn test_double_dash_flags() {
        let cli = parse(&[
            "--package",
            "main",
            "--tmpl=t.tmpl",
            "--config",
            "c.json",
            "--out",
            "gen/o.go",
        ]);
        assert_eq!(cli.package, "main");
        assert_eq!(cli.tmpl, PathBuf::from("t.tmpl"));
        assert_eq!(cli.config, PathBuf::from("c.json"));
        assert_eq!(cli.out, PathBuf::from("gen/o.go"));
    }

    #[test]
    fn test_single_dash_flags() {
        let cli = parse(&["-package", "main", "-tmpl=t.tmpl", "-out", "o.go", "-describe"]);
        assert_eq!(cli.package, "main");
        assert_eq!(cli.tmpl, PathBuf::from("t.tmpl"));
        assert_eq!(cli.out, PathBuf::from("o.go"));
        assert!(cli.describe);
    }

    #[test]
    fn test_values_that_look_like_flags_after_separator() {
        let args = normalize_args(["factory", "--", "-package"]);
        assert_eq!(args, ["factory", "--", "-package"]);
    }

    #[test]
    fn test_normalize_leaves_other_args() {
        let args = normalize_args(["factory", "-h", "-V", "--out", "-x", "value"]);
        assert_eq!(args, ["factory", "-h", "-V", "--out", "-x", "value"]);

        let args = normalize_args(["factory", "-config=a=b.json"]);
        assert_eq!(args, ["factory", "--config=a=b.json"]);
    }

    #[test]
    fn test_unknown_flag_is_usage_error() {
        let err = Cli::try_parse_args(["factory", "--colour", "red"]).unwrap_err();
        assert_eq!(err.exit_code(), crate::exit_codes::USAGE_ERROR);
    }

    #[test]
    fn test_missing_value_is_usage_error() {
        let err = Cli::try_parse_args(["factory", "-out"]).unwrap_err();
        assert_eq!(err.exit_code(), crate::exit_codes::USAGE_ERROR);
    }
}
