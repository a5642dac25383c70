//! Text conformance engine, manifest validation and file discovery

pub mod file_walker;
pub mod result;
pub mod rewrite;
pub mod text;
pub mod validator;

pub use result::ValidationResult;
pub use text::TextConformanceEngine;
pub use validator::ManifestStructureValidator;
