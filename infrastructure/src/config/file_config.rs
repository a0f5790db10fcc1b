//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain types after
//! validation.

use chrono::TimeDelta;
use pitchpoll_domain::SessionLimits;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("window.countdown_seconds cannot be 0")]
    ZeroCountdown,

    #[error("window.min_duration_seconds cannot be 0")]
    ZeroMinDuration,

    #[error("window duration bounds are inverted (min {min} > max {max})")]
    InvertedDurationBounds { min: u64, max: u64 },

    #[error("shares.min cannot be 0")]
    ZeroMinShares,

    #[error("share bounds are inverted (min {min} > max {max})")]
    InvertedShareBounds { min: u32, max: u32 },
}

/// Raw voting-window configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWindowConfig {
    /// Pre-roll countdown before voting opens
    pub countdown_seconds: u64,
    /// Shortest allowed voting window
    pub min_duration_seconds: u64,
    /// Longest allowed voting window
    pub max_duration_seconds: u64,
}

impl Default for FileWindowConfig {
    fn default() -> Self {
        Self {
            countdown_seconds: 3,
            min_duration_seconds: 10,
            max_duration_seconds: 300,
        }
    }
}

/// Raw share-quantity bounds from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSharesConfig {
    pub min: u32,
    pub max: u32,
}

impl Default for FileSharesConfig {
    fn default() -> Self {
        Self {
            min: 1,
            max: 1_000_000,
        }
    }
}

/// Raw vote-store configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    /// Path to the JSONL ballot log; absent means votes are kept in memory
    pub path: Option<String>,
}

/// Raw operator-console configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConsoleConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Path to the console history file
    pub history_file: Option<String>,
}

impl Default for FileConsoleConfig {
    fn default() -> Self {
        Self {
            color: true,
            history_file: None,
        }
    }
}

/// Complete raw configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub window: FileWindowConfig,
    pub shares: FileSharesConfig,
    pub store: FileStoreConfig,
    pub console: FileConsoleConfig,
}

impl FileConfig {
    /// Validate and convert into domain session limits
    pub fn session_limits(&self) -> Result<SessionLimits, ConfigValidationError> {
        if self.window.countdown_seconds == 0 {
            return Err(ConfigValidationError::ZeroCountdown);
        }
        if self.window.min_duration_seconds == 0 {
            return Err(ConfigValidationError::ZeroMinDuration);
        }
        if self.window.min_duration_seconds > self.window.max_duration_seconds {
            return Err(ConfigValidationError::InvertedDurationBounds {
                min: self.window.min_duration_seconds,
                max: self.window.max_duration_seconds,
            });
        }
        if self.shares.min == 0 {
            return Err(ConfigValidationError::ZeroMinShares);
        }
        if self.shares.min > self.shares.max {
            return Err(ConfigValidationError::InvertedShareBounds {
                min: self.shares.min,
                max: self.shares.max,
            });
        }

        Ok(SessionLimits {
            countdown_length: TimeDelta::seconds(self.window.countdown_seconds as i64),
            min_duration: TimeDelta::seconds(self.window.min_duration_seconds as i64),
            max_duration: TimeDelta::seconds(self.window.max_duration_seconds as i64),
            min_quantity: self.shares.min,
            max_quantity: self.shares.max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_domain_defaults() {
        let limits = FileConfig::default().session_limits().unwrap();
        assert_eq!(limits, SessionLimits::default());
    }

    #[test]
    fn test_zero_countdown_rejected() {
        let mut config = FileConfig::default();
        config.window.countdown_seconds = 0;
        assert!(matches!(
            config.session_limits(),
            Err(ConfigValidationError::ZeroCountdown)
        ));
    }

    #[test]
    fn test_inverted_duration_bounds_rejected() {
        let mut config = FileConfig::default();
        config.window.min_duration_seconds = 120;
        config.window.max_duration_seconds = 30;
        assert!(matches!(
            config.session_limits(),
            Err(ConfigValidationError::InvertedDurationBounds { min: 120, max: 30 })
        ));
    }

    #[test]
    fn test_inverted_share_bounds_rejected() {
        let mut config = FileConfig::default();
        config.shares.min = 500;
        config.shares.max = 100;
        assert!(matches!(
            config.session_limits(),
            Err(ConfigValidationError::InvertedShareBounds { .. })
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = FileConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let parsed: FileConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(
            parsed.window.countdown_seconds,
            config.window.countdown_seconds
        );
        assert_eq!(parsed.shares.max, config.shares.max);
    }
}
