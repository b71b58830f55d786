//! Configuration infrastructure — TOML file schema and multi-source
//! loading.

mod file_config;
mod loader;

pub use file_config::{ConfigValidationError, FileConfig, FileLoggingConfig, FilePlannerConfig};
pub use loader::ConfigLoader;
