//! Configuration for the chain service

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ChainError, Result};

/// Environment variable that toggles strict timestamp ordering
pub const STRICT_TIMESTAMPS_ENV: &str = "CHAIN_STRICT_TIMESTAMPS";

/// Chain service configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Require each block to be stamped no earlier than its predecessor.
    ///
    /// Off by default: linkage only rejects timestamps in the future, so a
    /// chain whose timestamps step backwards still validates.
    #[serde(default)]
    pub strict_timestamps: bool,
}

impl ChainConfig {
    /// Create the default (lenient) configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable strict timestamp ordering
    pub fn strict_timestamps(mut self, strict: bool) -> Self {
        self.strict_timestamps = strict;
        self
    }

    /// Parse a configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ChainError::IoError {
            message: format!("{}: {}", path.display(), e),
        })?;
        Self::from_json_str(&contents)
    }

    /// Build a configuration from environment variables
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(value) = std::env::var(STRICT_TIMESTAMPS_ENV) {
            config.strict_timestamps = parse_flag(STRICT_TIMESTAMPS_ENV, &value)?;
        }
        Ok(config)
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ChainError::InvalidConfig {
            reason: format!("{} must be a boolean, got '{}'", name, other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_lenient() {
        assert!(!ChainConfig::default().strict_timestamps);
        assert!(ChainConfig::new().strict_timestamps(true).strict_timestamps);
    }

    #[test]
    fn test_from_json() {
        let config = ChainConfig::from_json_str(r#"{"strict_timestamps": true}"#).unwrap();
        assert!(config.strict_timestamps);

        let config = ChainConfig::from_json_str("{}").unwrap();
        assert!(!config.strict_timestamps);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = ChainConfig::from_json_str("not json").unwrap_err();
        assert_eq!(err.error_code(), "JSON_ERROR");
    }

    #[test]
    fn test_from_missing_file() {
        let err = ChainConfig::from_file("/nonexistent/chain-config.json").unwrap_err();
        assert_eq!(err.error_code(), "IO_ERROR");
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("chain-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"strict_timestamps": true}"#).unwrap();

        let config = ChainConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(config.strict_timestamps);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("X", "true").unwrap());
        assert!(parse_flag("X", " ON ").unwrap());
        assert!(!parse_flag("X", "0").unwrap());
        assert!(!parse_flag("X", "").unwrap());

        let err = parse_flag("X", "maybe").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }
}
