//! Configuration for the analysis service
//!
//! Settings are an explicit value handed to the service at construction.
//! They can be built in code or read from a YAML file.

mod error;
mod file;
mod settings;

pub use error::{ConfigError, ConfigResult};
pub use file::FileConfigProvider;
pub use settings::Settings;
