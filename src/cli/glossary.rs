//! Glossary command: export canonical spellings with their origin script

use crate::cli::common::{EXIT_SUCCESS, report_error, write_output};
use crate::error::WwaqError;
use crate::export::{export_glossary, render_glossary};
use std::path::Path;

pub fn run_glossary(output: Option<&Path>) -> i32 {
    match run_glossary_inner(output) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => report_error(&e),
    }
}

fn run_glossary_inner(output: Option<&Path>) -> Result<(), WwaqError> {
    match output {
        Some(path) => export_glossary(path),
        None => {
            write_output(None, &render_glossary()?)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_glossary_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("wwaq_glossar.yaml");
        assert_eq!(run_glossary(Some(&path)), EXIT_SUCCESS);
        assert!(fs::read_to_string(&path).unwrap().contains("Sohar"));
    }
}
