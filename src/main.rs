//! Entry point for the `factory` CLI.
//!
//! Parses arguments, runs the generator once, and maps any failure to a
//! single diagnostic line on stderr and a non-zero exit code.

use factory::cli::Cli;
use factory::error::Result;
use factory::exit_codes;
use factory::generator::generate;
use factory::rule::{GenerateRule, GeneratorCommand};
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse_args();

    match run(&cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            error!("{}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    if cli.describe {
        let rule = GenerateRule::new(
            "generate",
            GeneratorCommand::current_exe()?,
            &cli.tmpl,
            &cli.config,
            &cli.out,
        )?
        .package(&cli.package);
        println!("{}", rule.manifest().to_json()?);
        return Ok(());
    }

    generate(&cli.request())?;
    Ok(())
}

/// Log to stderr, filtered by `FACTORY_LOG` (default: warnings and errors).
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("FACTORY_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}
