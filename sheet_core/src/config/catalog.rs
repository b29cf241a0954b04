//! Item catalog loading

use super::ConfigError;
use crate::database::ItemCatalog;
use crate::item::Item;
use crate::types::ItemType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Container for item records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(rename = "items")]
    pub items: Vec<Item>,
}

/// Load an item catalog from a TOML file
pub fn load_catalog(path: &Path) -> Result<ItemCatalog, ConfigError> {
    let config: CatalogConfig = super::load_toml(path)?;
    build_catalog(config)
}

/// Load an item catalog from a TOML string
pub fn parse_catalog(content: &str) -> Result<ItemCatalog, ConfigError> {
    let config: CatalogConfig = super::parse_toml(content)?;
    build_catalog(config)
}

fn build_catalog(config: CatalogConfig) -> Result<ItemCatalog, ConfigError> {
    let mut seen = HashSet::new();
    for item in &config.items {
        if !seen.insert(item.id.as_str()) {
            return Err(ConfigError::ValidationError(format!("duplicate item id {}", item.id)));
        }
        validate_payload(item)?;
    }
    Ok(ItemCatalog::from_items(config.items))
}

/// The kind-specific table must match the category
fn validate_payload(item: &Item) -> Result<(), ConfigError> {
    let expected = item.item_type();
    let payload_ok = match expected {
        ItemType::Weapon => item.weapon.is_some(),
        ItemType::Apparel => item.apparel.is_some(),
        ItemType::Mod => item.modification.is_some(),
        ItemType::Aid | ItemType::Other => true,
    };
    let stray = (expected != ItemType::Weapon && item.weapon.is_some())
        || (expected != ItemType::Apparel && item.apparel.is_some())
        || (expected != ItemType::Mod && item.modification.is_some());

    if !payload_ok || stray {
        return Err(ConfigError::ValidationError(format!(
            "item {} has category {:?} but the wrong stat table",
            item.id, item.category
        )));
    }
    Ok(())
}

/// Get the bundled item catalog
pub fn default_catalog() -> ItemCatalog {
    let toml = include_str!("../../config/items.toml");
    parse_catalog(toml).unwrap_or_else(|err| {
        tracing::warn!(%err, "bundled item catalog failed to load");
        ItemCatalog::new()
    })
}
