//! Test utilities for wwaq integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Result type alias for tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Extract Ok value or panic with context
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("assertion failed: expected Ok, got Err({:?})", e),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Extract Some value or panic with context
#[macro_export]
macro_rules! assert_some {
    ($expr:expr) => {
        match $expr {
            Some(v) => v,
            None => panic!("assertion failed: expected Some, got None"),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Some(v) => v,
            None => panic!("{}: got None", $msg),
        }
    };
}

/// Write `content` to `dir/name`, creating parent directories
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// A manifest that passes every check
pub const VALID_MANIFEST: &str = r#"
meta:
  version: "1.0"
  schema: HNS10
  stand: "29. Siwan 5785"
  ort: Jerusalem
  sigillum: "𝌇_001 (Keter)"
  bestaetigung: "Q!"
struktur:
  - hns: "10.1.0.0.0.0.0.0.0.0"
    id: wwaq-kern
    name: Kern
    file: wwaq/kern.py
    sefira: Keter
  - hns: "10.2.0.0.0.0.0.0.0.0"
    id: wwaq-sprachbasis
    name: Sprachbasis
    file: wwaq/sprachbasis.py
    sefira: Malchut
pipeline:
  sequenz:
    - hns: "10.1.0.0.0.0.0.0.0.0"
      aktion: laden
      kritisch: true
    - hns: "10.2.0.0.0.0.0.0.0.0"
      aktion: normalisieren
"#;

/// A manifest with one problem of every structural kind
pub const BROKEN_MANIFEST: &str = r#"
meta:
  version: "1.0"
  schema: HNS10
  stand: "29. Siwan 5785"
struktur:
  - hns: "10.1.0.0.0.0.0.0.0.0"
    id: a
    name: Erstes
  - hns: "10.1.0.0.0.0.0.0.0.0"
    id: b
    name: Zweites
  - hns: "10.3"
    id: c
    name: Drittes
    sefira: Daat
pipeline:
  sequenz:
    - hns: "10.1.0.0.0.0.0.0.0.0"
      aktion: laden
    - hns: "10.9.0.0.0.0.0.0.0.0"
      aktion: senden
"#;
