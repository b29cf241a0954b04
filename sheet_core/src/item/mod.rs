//! Item records - base definitions owned by the item database

mod effect;
mod format;
mod resolver;

pub use effect::{EffectKind, EffectToken};
pub use format::{describe_effect, modification_labels, ModLabel};
pub use resolver::{apply_mods, AppliedMod, ModEffectResolver, ModifiedItem};

use crate::body::CoverageTag;
use crate::types::{DamageChannel, ItemCategory, ItemType, ModSlot, Range, Skill};
use serde::{Deserialize, Serialize};

/// Ammo type marker meaning the weapon is its own ammunition (thrown weapons)
pub const AMMO_SELF: &str = "self";
/// Ammo type marker meaning the weapon never consumes ammunition
pub const AMMO_NONE: &str = "na";

/// A base item definition
///
/// Common fields live on the record; kind-specific data sits in the optional
/// payload matching the category's type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub category: ItemCategory,
    /// Weight in kg
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub cost: i32,
    #[serde(default)]
    pub rarity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon: Option<WeaponStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apparel: Option<ApparelStats>,
    #[serde(default, rename = "mod", skip_serializing_if = "Option::is_none")]
    pub modification: Option<ModStats>,
}

impl Item {
    pub fn item_type(&self) -> ItemType {
        self.category.item_type()
    }

    /// Weapons and apparel accept mods
    pub fn is_moddable(&self) -> bool {
        self.weapon.is_some() || self.apparel.is_some()
    }

    /// Whether the record carries the effect key, with or without a trailing value
    pub fn has_effect(&self, key: &str) -> bool {
        let effects = match (&self.weapon, &self.apparel) {
            (Some(weapon), _) => &weapon.effects,
            (_, Some(apparel)) => &apparel.effects,
            _ => return false,
        };
        effects.iter().any(|e| matches_key(e, key))
    }

    /// Whether the weapon carries the quality key, with or without a trailing value
    pub fn has_quality(&self, key: &str) -> bool {
        self.weapon
            .as_ref()
            .is_some_and(|w| w.qualities.iter().any(|q| matches_key(q, key)))
    }

    /// Coverage is exactly the torso slot
    pub fn covers_torso_only(&self) -> bool {
        self.apparel
            .as_ref()
            .is_some_and(|a| a.locations_covered.as_slice() == [CoverageTag::Torso])
    }
}

/// `entry` equals `key` or is `key:<anything>`
pub(crate) fn matches_key(entry: &str, key: &str) -> bool {
    entry == key
        || entry
            .strip_prefix(key)
            .is_some_and(|rest| rest.starts_with(':'))
}

/// Weapon-specific fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub damage_rating: i32,
    pub damage_type: DamageChannel,
    /// Absent for melee weapons
    #[serde(default)]
    pub fire_rate: Option<i32>,
    pub range: Range,
    #[serde(default)]
    pub qualities: Vec<String>,
    #[serde(default)]
    pub effects: Vec<String>,
    #[serde(default = "default_ammo_type")]
    pub ammo_type: String,
    #[serde(default)]
    pub available_mods: Vec<String>,

    // Only ever set by mods
    #[serde(default)]
    pub ammo_consumption: Option<i32>,
    #[serde(default)]
    pub allow_muzzle_mod: bool,
    #[serde(default)]
    pub reroll_hit_location: bool,
}

fn default_ammo_type() -> String {
    AMMO_NONE.to_string()
}

impl WeaponStats {
    /// Inventory id of the ammunition this weapon consumes, if any
    pub fn ammo_id<'a>(&'a self, weapon_id: &'a str) -> Option<&'a str> {
        match self.ammo_type.as_str() {
            AMMO_NONE | "" => None,
            AMMO_SELF => Some(weapon_id),
            other => Some(other),
        }
    }
}

/// Apparel-specific fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApparelStats {
    #[serde(default)]
    pub physical_res: i32,
    #[serde(default)]
    pub energy_res: i32,
    #[serde(default)]
    pub radiation_res: i32,
    pub locations_covered: Vec<CoverageTag>,
    #[serde(default)]
    pub effects: Vec<String>,
    #[serde(default)]
    pub available_mods: Vec<String>,

    // Only ever set by mods
    #[serde(default)]
    pub carry_weight_bonus: f64,
    #[serde(default)]
    pub melee_res: i32,
    #[serde(default)]
    pub explosive_res: i32,
    #[serde(default)]
    pub fall_damage_res: i32,
    #[serde(default)]
    pub unarmed_damage: i32,
}

impl ApparelStats {
    pub fn resistance(&self, channel: DamageChannel) -> i32 {
        match channel {
            DamageChannel::Physical => self.physical_res,
            DamageChannel::Energy => self.energy_res,
            DamageChannel::Radiation => self.radiation_res,
        }
    }
}

/// Mod-specific fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModStats {
    pub slot: ModSlot,
    #[serde(default)]
    pub skill: Option<Skill>,
    #[serde(default)]
    pub perks: Vec<String>,
    /// Effect tokens, `"<effectType>:<value>"`
    #[serde(default)]
    pub effects: Vec<String>,
    #[serde(default)]
    pub weapon_types: Vec<String>,
    #[serde(default)]
    pub armor_types: Vec<String>,
}
