//! WWAQ CLI entry point

use clap::Parser;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wwaq::cli::manifest::ManifestOptions;
use wwaq::cli::{Command, args::Cli};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Command::Text {
            paths,
            text,
            format,
        } => wwaq::cli::text::run_text(&paths, text.as_deref(), format, cli.color),
        Command::Fix { path, output } => wwaq::cli::fix::run_fix(&path, output.as_deref()),
        Command::Manifest {
            path,
            strict,
            lenient,
            output,
            format,
        } => {
            let strict = match (strict, lenient) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let options = ManifestOptions {
                strict,
                output: output.as_deref(),
                format,
                color: cli.color,
            };
            wwaq::cli::manifest::run_manifest(&path, options)
        }
        Command::Glossary { output } => wwaq::cli::glossary::run_glossary(output.as_deref()),
        Command::Seal {
            path,
            module,
            hns,
            registry,
            output,
        } => wwaq::cli::seal::run_seal(
            &path,
            &module,
            &hns,
            registry.as_deref(),
            output.as_deref(),
        ),
        Command::Init { force } => match wwaq::cli::init::run_init(force) {
            Ok(result) => {
                if result.skipped.is_empty() {
                    println!("Created wwaq.toml.");
                } else {
                    println!("wwaq.toml already exists. Use --force to overwrite it.");
                }
                0
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                2
            }
        },
    };

    process::exit(exit_code);
}
