//! Configuration file loading for audience-pulse
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `PULSE_<SECTION>__<KEY>` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./pulse.toml` or `./.pulse.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/audience-pulse/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileLoggingConfig, FileOutputConfig, FileProviderConfig,
    FileReportConfig, FileSelectorConfig, FileServerConfig,
};
pub use loader::ConfigLoader;
