//! ModEffectResolver - Merge a base item with an ordered list of mods
//!
//! The transform is pure: the base record is cloned, every mod's weight and
//! cost is folded in, then effect tokens are applied in two passes. The first
//! pass runs every non-removal effect in mod order, the second runs removals,
//! so a removal always wins over an add regardless of where each mod sits.

use super::effect::{EffectKind, EffectToken};
use super::{matches_key, ApparelStats, Item, WeaponStats};
use crate::character::CharacterItem;
use crate::database::ItemDatabase;
use crate::types::{DamageChannel, ModSlot};
use serde::{Deserialize, Serialize};

/// Record of one mod applied to an item (display only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedMod {
    pub mod_id: String,
    pub slot: ModSlot,
    /// Raw effect tokens this mod contributed
    pub effects: Vec<String>,
}

/// An item after mod resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifiedItem {
    pub item: Item,
    pub applied_mods: Vec<AppliedMod>,
}

impl ModifiedItem {
    /// Wrap an item that had nothing applied
    pub fn unmodified(item: Item) -> Self {
        ModifiedItem {
            item,
            applied_mods: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.item.id
    }

    pub fn weapon(&self) -> Option<&WeaponStats> {
        self.item.weapon.as_ref()
    }

    pub fn apparel(&self) -> Option<&ApparelStats> {
        self.item.apparel.as_ref()
    }
}

/// Resolves character items against an item database
pub struct ModEffectResolver<'a, D: ItemDatabase + ?Sized> {
    db: &'a D,
}

impl<'a, D: ItemDatabase + ?Sized> ModEffectResolver<'a, D> {
    pub fn new(db: &'a D) -> Self {
        ModEffectResolver { db }
    }

    /// Resolve a base item id with an ordered list of mod ids
    ///
    /// Returns `None` when the base item is not in the database.
    pub fn resolve<I, S>(&self, base_id: &str, mod_ids: I) -> Option<ModifiedItem>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let base = self.db.get_item(base_id)?;

        let mut mods = Vec::new();
        for mod_id in mod_ids {
            let mod_id = mod_id.as_ref();
            match self.db.get_item(mod_id) {
                Some(record) if record.modification.is_some() => mods.push(record),
                Some(_) => tracing::warn!(mod_id, item = base_id, "record is not a mod, skipped"),
                None => tracing::warn!(mod_id, item = base_id, "mod not found, skipped"),
            }
        }

        Some(apply_mods(base, &mods))
    }

    /// Resolve an inventory entry
    pub fn resolve_item(&self, item: &CharacterItem) -> Option<ModifiedItem> {
        self.resolve(&item.id, &item.mods)
    }
}

/// Apply mod records to a base item, producing a new record
///
/// Records without a mod payload are ignored. Items that are neither weapon
/// nor apparel come back unchanged.
pub fn apply_mods(base: &Item, mods: &[&Item]) -> ModifiedItem {
    if !base.is_moddable() {
        if !mods.is_empty() {
            tracing::debug!(item = %base.id, "item cannot take mods, ignoring {} mods", mods.len());
        }
        return ModifiedItem::unmodified(base.clone());
    }

    let mut item = base.clone();
    let torso_only = base.covers_torso_only();

    // Weight and cost
    for record in mods {
        let Some(stats) = &record.modification else {
            continue;
        };
        let multiplier = if stats.slot == ModSlot::Material && torso_only {
            2
        } else {
            1
        };
        item.weight += record.weight * multiplier as f64;
        item.cost = item.cost.saturating_add(record.cost.saturating_mul(multiplier));
    }

    // Effects: everything but removals, then removals
    let mut applied_mods = Vec::with_capacity(mods.len());
    for record in mods {
        let Some(stats) = &record.modification else {
            continue;
        };
        for raw in &stats.effects {
            let token = EffectToken::parse(raw);
            if !token.kind.is_removal() {
                apply_effect(&mut item, &token, raw);
            }
        }
        applied_mods.push(AppliedMod {
            mod_id: record.id.clone(),
            slot: stats.slot,
            effects: stats.effects.clone(),
        });
    }
    for record in mods {
        let Some(stats) = &record.modification else {
            continue;
        };
        for raw in &stats.effects {
            let token = EffectToken::parse(raw);
            if token.kind.is_removal() {
                apply_effect(&mut item, &token, raw);
            }
        }
    }

    ModifiedItem { item, applied_mods }
}

fn apply_effect(item: &mut Item, token: &EffectToken, raw: &str) {
    match &token.kind {
        EffectKind::Unknown(_) => {
            tracing::warn!(effect = raw, item = %item.id, "unknown mod effect ignored");
            return;
        }
        EffectKind::MeleeDamage => {
            tracing::debug!(effect = raw, item = %item.id, "meleeDamage is resolved outside the mod resolver");
            return;
        }
        _ => {}
    }

    if let Some(weapon) = item.weapon.as_mut() {
        apply_weapon_effect(weapon, token, raw);
    } else if let Some(apparel) = item.apparel.as_mut() {
        apply_apparel_effect(apparel, token, raw);
    }
}

fn apply_weapon_effect(weapon: &mut WeaponStats, token: &EffectToken, raw: &str) {
    match token.kind {
        EffectKind::DamageAdd => {
            if let Some(v) = numeric(token, raw) {
                weapon.damage_rating = weapon.damage_rating.saturating_add(v);
            }
        }
        EffectKind::FireRateAdd => {
            if let Some(v) = numeric(token, raw) {
                weapon.fire_rate = Some(weapon.fire_rate.unwrap_or(0).saturating_add(v));
            }
        }
        EffectKind::DamageSet => {
            if let Some(v) = numeric(token, raw) {
                weapon.damage_rating = v;
            }
        }
        EffectKind::DamageTypeChange => match parse_channel(token.value_str()) {
            Some(channel) => weapon.damage_type = channel,
            None => tracing::warn!(effect = raw, "unknown damage type, ignored"),
        },
        EffectKind::AmmoChange => weapon.ammo_type = token.value_str().to_string(),
        EffectKind::AmmoConsumption => {
            if let Some(v) = numeric(token, raw) {
                weapon.ammo_consumption = Some(v);
            }
        }
        EffectKind::AllowMuzzleMod => weapon.allow_muzzle_mod = token.value_bool(),
        EffectKind::RerollHitLocation => weapon.reroll_hit_location = token.value_bool(),
        EffectKind::RangeIncrease => {
            if let Some(v) = numeric(token, raw) {
                weapon.range = weapon.range.shifted(v);
            }
        }
        EffectKind::RangeDecrease => {
            if let Some(v) = numeric(token, raw) {
                weapon.range = weapon.range.shifted(v.saturating_neg());
            }
        }
        EffectKind::QualityAdd => add_unique(&mut weapon.qualities, token.value_str()),
        EffectKind::QualityRemove => remove_key(&mut weapon.qualities, token.value_str()),
        EffectKind::EffectAdd => add_unique(&mut weapon.effects, token.value_str()),
        EffectKind::EffectRemove => remove_key(&mut weapon.effects, token.value_str()),
        // Apparel-only effects
        _ => {}
    }
}

fn apply_apparel_effect(apparel: &mut ApparelStats, token: &EffectToken, raw: &str) {
    match token.kind {
        EffectKind::PhysicalResAdd => {
            if let Some(v) = numeric(token, raw) {
                apparel.physical_res = apparel.physical_res.saturating_add(v);
            }
        }
        EffectKind::EnergyResAdd => {
            if let Some(v) = numeric(token, raw) {
                apparel.energy_res = apparel.energy_res.saturating_add(v);
            }
        }
        EffectKind::RadiationResAdd => {
            if let Some(v) = numeric(token, raw) {
                apparel.radiation_res = apparel.radiation_res.saturating_add(v);
            }
        }
        EffectKind::MeleeResAdd => {
            if let Some(v) = numeric(token, raw) {
                apparel.melee_res = apparel.melee_res.saturating_add(v);
            }
        }
        EffectKind::ExplosiveResAdd => {
            if let Some(v) = numeric(token, raw) {
                apparel.explosive_res = apparel.explosive_res.saturating_add(v);
            }
        }
        EffectKind::FallDamageResAdd => {
            if let Some(v) = numeric(token, raw) {
                apparel.fall_damage_res = apparel.fall_damage_res.saturating_add(v);
            }
        }
        EffectKind::UnarmedDamageAdd => {
            if let Some(v) = numeric(token, raw) {
                apparel.unarmed_damage = apparel.unarmed_damage.saturating_add(v);
            }
        }
        EffectKind::CarryWeightAdd => match token.value_f64() {
            Some(v) => apparel.carry_weight_bonus += v,
            None => tracing::warn!(effect = raw, "non-numeric value, ignored"),
        },
        EffectKind::EffectAdd => add_unique(&mut apparel.effects, token.value_str()),
        EffectKind::EffectRemove => remove_key(&mut apparel.effects, token.value_str()),
        // Weapon-only effects
        _ => {}
    }
}

fn numeric(token: &EffectToken, raw: &str) -> Option<i32> {
    let value = token.value_i32();
    if value.is_none() {
        tracing::warn!(effect = raw, "non-numeric value, ignored");
    }
    value
}

fn parse_channel(value: &str) -> Option<DamageChannel> {
    match value {
        "physical" => Some(DamageChannel::Physical),
        "energy" => Some(DamageChannel::Energy),
        "radiation" => Some(DamageChannel::Radiation),
        _ => None,
    }
}

fn add_unique(list: &mut Vec<String>, value: &str) {
    if value.is_empty() {
        return;
    }
    if !list.iter().any(|entry| entry == value) {
        list.push(value.to_string());
    }
}

fn remove_key(list: &mut Vec<String>, key: &str) {
    list.retain(|entry| !matches_key(entry, key));
}
