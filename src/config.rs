//! Codec configuration.
//!
//! Values come from [`CodecConfig::default`], a preset, environment variables
//! with the `HUFFMAN_` prefix, or a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HuffmanError, Result};

/// What to do with bits left over after the last complete code word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingBitsPolicy {
    /// Fail with [`HuffmanError::TrailingBits`]
    Reject,
    /// Drop the partial code word and log a warning
    Truncate,
}

impl std::str::FromStr for TrailingBitsPolicy {
    type Err = HuffmanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "truncate" => Ok(Self::Truncate),
            other => Err(HuffmanError::configuration(format!(
                "unknown trailing bits policy '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Handling of a dangling partial code word at the end of a payload
    pub trailing_bits: TrailingBitsPolicy,
    /// Compare decoded archive length against the recorded original length
    pub verify_length: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            trailing_bits: TrailingBitsPolicy::Reject,
            verify_length: true,
        }
    }
}

impl CodecConfig {
    /// Every integrity check enabled
    pub fn strict() -> Self {
        Self::default()
    }

    /// Decode as much as possible, mirroring a plain tree walk
    pub fn lenient() -> Self {
        Self {
            trailing_bits: TrailingBitsPolicy::Truncate,
            verify_length: false,
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_env_with_prefix("HUFFMAN_")
    }

    /// Read `{prefix}TRAILING_BITS` and `{prefix}VERIFY_LENGTH`, keeping
    /// defaults for unset variables
    pub fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var(format!("{}TRAILING_BITS", prefix)) {
            config.trailing_bits = value.parse()?;
        }
        if let Ok(value) = std::env::var(format!("{}VERIFY_LENGTH", prefix)) {
            config.verify_length = parse_bool(&value).ok_or_else(|| {
                HuffmanError::configuration(format!("invalid boolean '{}' for VERIFY_LENGTH", value))
            })?;
        }

        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self).map_err(|e| {
            HuffmanError::configuration(format!("failed to serialize codec config: {}", e))
        })?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            HuffmanError::configuration(format!("failed to parse codec config: {}", e))
        })?;
        Ok(config)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_strict() {
        let config = CodecConfig::default();
        assert_eq!(config, CodecConfig::strict());
        assert_eq!(config.trailing_bits, TrailingBitsPolicy::Reject);
        assert!(config.verify_length);
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("Truncate".parse::<TrailingBitsPolicy>().unwrap(), TrailingBitsPolicy::Truncate);
        assert_eq!(" reject ".parse::<TrailingBitsPolicy>().unwrap(), TrailingBitsPolicy::Reject);
        assert!("ignore".parse::<TrailingBitsPolicy>().is_err());
    }

    #[test]
    fn test_from_env_with_prefix() {
        // unique prefix so parallel tests do not interfere
        std::env::set_var("HUFFTEST_CFG_TRAILING_BITS", "truncate");
        std::env::set_var("HUFFTEST_CFG_VERIFY_LENGTH", "off");

        let config = CodecConfig::from_env_with_prefix("HUFFTEST_CFG_").unwrap();
        assert_eq!(config, CodecConfig::lenient());

        std::env::set_var("HUFFTEST_BAD_VERIFY_LENGTH", "maybe");
        assert!(CodecConfig::from_env_with_prefix("HUFFTEST_BAD_").is_err());
    }

    #[test]
    fn test_unset_env_keeps_defaults() {
        let config = CodecConfig::from_env_with_prefix("HUFFTEST_UNSET_").unwrap();
        assert_eq!(config, CodecConfig::default());
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codec.json");

        CodecConfig::lenient().save_to_file(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"truncate\""));

        let loaded = CodecConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, CodecConfig::lenient());
    }

    #[test]
    fn test_load_rejects_unknown_policy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codec.json");
        std::fs::write(&path, r#"{"trailing_bits":"ignore","verify_length":true}"#).unwrap();

        let err = CodecConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, HuffmanError::Configuration { .. }));
    }
}
