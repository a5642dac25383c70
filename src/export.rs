//! Exports: the public glossary and the EOM Matrix sigillum registry

pub mod glossary;
pub mod sigillum;

pub use glossary::{export_glossary, public_glossary, render_glossary};
pub use sigillum::{SigillumEntry, SigillumRegistry};
