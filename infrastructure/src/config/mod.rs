//! Configuration file loading for pitchpoll
//!
//! This module handles file I/O and merging of configuration from multiple
//! sources. The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./pitchpoll.toml` or `./.pitchpoll.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/pitchpoll/config.toml`
//! 4. Fallback: `~/.config/pitchpoll/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileConsoleConfig, FileSharesConfig, FileStoreConfig,
    FileWindowConfig,
};
pub use loader::ConfigLoader;
