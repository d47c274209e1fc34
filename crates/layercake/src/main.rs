//! layercake CLI - course navigation footer generator.
//!
//! Provides commands for:
//! - `generate`: Render course page templates into the output tree
//! - `check`: Report dangling labels and unmapped pages

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, GenerateArgs};
use output::Output;

/// layercake - course navigation footer generator.
#[derive(Parser)]
#[command(name = "layercake", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render page templates with navigation footers.
    Generate(GenerateArgs),
    /// Check the dependency graph against the templates.
    Check(CheckArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Generate(args) => args.course.verbose,
        Commands::Check(args) => args.course.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Generate(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_args() {
        let cli = Cli::try_parse_from([
            "layercake",
            "generate",
            "--templates-dir",
            "tmpl",
            "--output-dir",
            "out",
            "--dry-run",
            "-v",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Generate(ref args) if args.course.verbose));
    }

    #[test]
    fn test_check_rejects_output_dir() {
        assert!(Cli::try_parse_from(["layercake", "check", "--output-dir", "out"]).is_err());
    }
}
