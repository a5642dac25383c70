//! Configuration file parsing and validation

pub mod wwaq_toml;

pub use wwaq_toml::{
    CONFIG_FILE, ColorOption, Config, DEFAULT_CONFIG, OutputConfig, OutputFormat, SigillumConfig,
    WwaqMeta,
};
