//! Configuration loading from TOML and JSON files

mod catalog;

pub use catalog::{default_catalog, load_catalog, parse_catalog};

use crate::character::RawCharacter;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Parse a saved character snapshot
///
/// Missing fields take their defaults, so an empty object is a fresh level 1
/// character with every SPECIAL at 5.
pub fn parse_character_json(content: &str) -> Result<RawCharacter, ConfigError> {
    let raw: RawCharacter = serde_json::from_str(content)?;
    if raw.level < 1 {
        return Err(ConfigError::ValidationError(format!(
            "level must be at least 1, got {}",
            raw.level
        )));
    }
    Ok(raw)
}

/// Load a saved character snapshot from a JSON file
pub fn load_character(path: &Path) -> Result<RawCharacter, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_character_json(&content)
}

/// Serialize a character snapshot for saving
pub fn character_to_json(raw: &RawCharacter) -> Result<String, ConfigError> {
    Ok(serde_json::to_string_pretty(raw)?)
}
