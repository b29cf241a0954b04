//! Prelude module for convenient imports
//!
//! ```rust
//! use sheet_core::prelude::*;
//! ```

// Core types
pub use crate::types::{DamageChannel, ItemCategory, Side, Skill, Special, SpecialValues};
pub use crate::stat_block::{DerivedStats, Resistance};

// Character
pub use crate::character::{
    inventory, CharacterItem, CharacterPatch, CharacterStore, InventoryError, MemoryStore, OriginId, RawCharacter,
};

// Items
pub use crate::database::{ItemCatalog, ItemDatabase};
pub use crate::item::{Item, ModEffectResolver, ModifiedItem};
pub use crate::body::BodyPart;

// Dice
pub use crate::dice::{DamageRoll, DamageSummary, DiceRoller, RollError, SkillCheck, SkillCheckState};

// Config
pub use crate::config::default_catalog;
