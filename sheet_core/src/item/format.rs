//! Presentation of applied mods
//!
//! Kept apart from the resolver: nothing here feeds back into item data.

use super::effect::{EffectKind, EffectToken};
use super::resolver::ModifiedItem;
use serde::{Deserialize, Serialize};

/// Human-readable summary of one applied mod
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModLabel {
    pub mod_id: String,
    pub lines: Vec<String>,
}

/// Describe a single effect token, or `None` for tokens with nothing to show
pub fn describe_effect(token: &EffectToken) -> Option<String> {
    let value = token.value_str();
    let signed = |v: &str| {
        if v.starts_with('-') {
            v.to_string()
        } else {
            format!("+{}", v)
        }
    };

    let line = match &token.kind {
        EffectKind::DamageAdd => format!("{} damage", signed(value)),
        EffectKind::FireRateAdd => format!("{} fire rate", signed(value)),
        EffectKind::PhysicalResAdd => format!("{} physical DR", signed(value)),
        EffectKind::EnergyResAdd => format!("{} energy DR", signed(value)),
        EffectKind::RadiationResAdd => format!("{} radiation DR", signed(value)),
        EffectKind::MeleeResAdd => format!("{} melee DR", signed(value)),
        EffectKind::ExplosiveResAdd => format!("{} explosive DR", signed(value)),
        EffectKind::FallDamageResAdd => format!("{} fall DR", signed(value)),
        EffectKind::CarryWeightAdd => format!("{} carry weight", signed(value)),
        EffectKind::UnarmedDamageAdd => format!("{} unarmed damage", signed(value)),
        EffectKind::DamageSet => format!("damage set to {}", value),
        EffectKind::DamageTypeChange => format!("damage type: {}", value),
        EffectKind::AmmoChange => format!("ammo: {}", value),
        EffectKind::AmmoConsumption => format!("ammo per shot: {}", value),
        EffectKind::RangeIncrease => format!("range +{}", value),
        EffectKind::RangeDecrease => format!("range -{}", value),
        EffectKind::QualityAdd | EffectKind::EffectAdd => format!("adds {}", value),
        EffectKind::QualityRemove | EffectKind::EffectRemove => format!("removes {}", value),
        EffectKind::AllowMuzzleMod if token.value_bool() => "allows muzzle mods".to_string(),
        EffectKind::RerollHitLocation if token.value_bool() => "may reroll hit location".to_string(),
        EffectKind::AllowMuzzleMod | EffectKind::RerollHitLocation => return None,
        EffectKind::MeleeDamage | EffectKind::Unknown(_) => return None,
    };
    Some(line)
}

/// Labels for every mod applied to a resolved item, in application order
pub fn modification_labels(item: &ModifiedItem) -> Vec<ModLabel> {
    item.applied_mods
        .iter()
        .map(|applied| ModLabel {
            mod_id: applied.mod_id.clone(),
            lines: applied
                .effects
                .iter()
                .filter_map(|raw| describe_effect(&EffectToken::parse(raw)))
                .collect(),
        })
        .collect()
}
