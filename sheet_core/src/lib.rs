//! sheet_core - Character sheet rules for a post-apocalyptic tabletop RPG
//!
//! This library provides:
//! - ModEffectResolver: Merge base items with their applied mods
//! - DerivedStats: HP, carry weight, defense and per-location damage resistance
//! - BodyLocationMapper: Coverage tags to concrete body locations
//! - SkillCheck / DamageRoll: Headless d20 and d6 roll sessions
//! - Inventory: Pure item, mod and origin updates on the raw snapshot

pub mod body;
pub mod character;
pub mod config;
pub mod database;
pub mod dice;
pub mod item;
pub mod prelude;
pub mod source;
pub mod stat_block;
pub mod types;

// Re-export core types for convenience
pub use body::{map_locations, ApparelLayer, BodyPart, BodyPlan, CoverageTag};
pub use character::{
    CharacterItem, CharacterPatch, CharacterStore, InventoryError, MemoryStore, Origin, OriginId,
    RawCharacter,
};
pub use config::{default_catalog, ConfigError};
pub use database::{ItemCatalog, ItemDatabase};
pub use dice::{DamageRoll, DiceRoller, RollError, SkillCheck};
pub use item::{Item, ModEffectResolver, ModifiedItem};
pub use source::{BaseStatsSource, GearSource, OriginTraitSource, StatSource};
pub use stat_block::{DerivedStats, Resistance, ResistanceMap, StatAccumulator};
pub use types::{DamageChannel, ItemCategory, ItemType, ModSlot, Range, Side, Skill, Special, SpecialValues};
