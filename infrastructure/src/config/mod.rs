//! Configuration loading (figment: defaults, TOML files, environment)

mod file_config;
mod loader;

pub use file_config::{FileConfig, FileDataConfig, FileGeminiConfig};
pub use loader::ConfigLoader;
