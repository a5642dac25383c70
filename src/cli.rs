//! CLI argument parsing and command dispatch

pub mod args;
pub mod common;
pub mod fix;
pub mod glossary;
pub mod init;
pub mod manifest;
pub mod seal;
pub mod text;

// Re-export types for convenient access
pub use args::{Cli, ColorChoice, Command, OutputFormat};
