//! CLI argument parsing using clap

use crate::config::{ColorOption, OutputFormat as ConfigFormat};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for wwaq commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON Lines format (one JSON object per line)
    Jsonl,
}

impl From<OutputFormat> for ConfigFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Human => ConfigFormat::Human,
            OutputFormat::Jsonl => ConfigFormat::Jsonl,
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Automatically detect if terminal supports color
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

impl From<ColorChoice> for ColorOption {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => ColorOption::Auto,
            ColorChoice::Always => ColorOption::Always,
            ColorChoice::Never => ColorOption::Never,
        }
    }
}

/// WWAQ CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "wwaq")]
#[command(about = "Terminology and style linter for WWAQ texts and HNS10 manifests")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output coloring (defaults to the [output] setting in wwaq.toml)
    #[arg(long, global = true)]
    pub color: Option<ColorChoice>,
}

/// Available wwaq subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate texts against the terminology rules
    Text {
        /// Files or directories to check (defaults to current directory)
        paths: Vec<String>,

        /// Validate this literal text instead of files
        #[arg(long, conflicts_with = "paths")]
        text: Option<String>,

        /// Output format
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Print or write the corrected form of a text file
    Fix {
        path: PathBuf,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate an HNS10 manifest
    Manifest {
        path: PathBuf,

        /// Treat a schema other than HNS10 as critical
        #[arg(long)]
        strict: bool,

        /// Report a schema mismatch as a warning only
        #[arg(long, conflicts_with = "strict")]
        lenient: bool,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Export the public glossary as YAML
    Glossary {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Stamp a confirmed text with an EOM Matrix sigillum
    Seal {
        path: PathBuf,

        /// Module name the seal is registered under
        #[arg(long)]
        module: String,

        /// Hierarchical position of the module
        #[arg(long)]
        hns: String,

        /// Registry file (defaults to [sigillum] registry in wwaq.toml)
        #[arg(long)]
        registry: Option<PathBuf>,

        /// Write the sealed text here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a default wwaq.toml
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}
