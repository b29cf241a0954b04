//! StatAccumulator - Collects contributions before they become DerivedStats

use super::resistance::{Resistance, ResistanceMap};
use super::{defense, initiative, max_hp, melee_damage_bonus, DerivedStats};
use crate::body::BodyPart;
use crate::types::{DamageChannel, Skill, SpecialValues};
use std::collections::BTreeMap;

/// Accumulates stat contributions from every source
///
/// Locations only exist once a source opens them; contributions to a location
/// that was never opened are dropped.
#[derive(Debug, Clone, Default)]
pub struct StatAccumulator {
    // === Attributes ===
    pub special: SpecialValues,
    pub level: i32,

    // === Skills ===
    /// Effective skill values
    pub skills: BTreeMap<Skill, i32>,

    // === Carry weight ===
    pub carry_weight_base: f64,
    pub carry_weight_bonus: f64,
    pub current_weight: f64,

    // === Damage reduction ===
    pub locations: BTreeMap<BodyPart, ResistanceMap>,
}

impl StatAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open locations with zero reduction
    pub fn open_locations(&mut self, parts: &[BodyPart]) {
        for part in parts {
            self.locations.entry(*part).or_default();
        }
    }

    /// Offer a value at a location; the best value per channel is kept
    ///
    /// Returns false when the location is not open.
    pub fn offer_resistance(&mut self, part: BodyPart, channel: DamageChannel, value: i32) -> bool {
        match self.locations.get_mut(&part) {
            Some(map) => {
                map.raise(channel, Resistance::Value(value));
                true
            }
            None => false,
        }
    }

    /// Force a channel to immune at every open location
    pub fn grant_immunity(&mut self, channel: DamageChannel) {
        for map in self.locations.values_mut() {
            map.force(channel, Resistance::Immune);
        }
    }

    /// Finish accumulation; current HP and luck start full
    pub fn finish(self) -> DerivedStats {
        let max_hp = max_hp(&self.special, self.level);
        DerivedStats {
            max_hp,
            current_hp: max_hp,
            max_luck: self.special.luck,
            current_luck: self.special.luck,
            max_weight: self.carry_weight_base + self.carry_weight_bonus,
            current_weight: self.current_weight,
            defense: defense(self.special.agility),
            initiative: initiative(&self.special),
            melee_damage: melee_damage_bonus(self.special.strength),
            locations_dr: self.locations,
            skills: self.skills,
        }
    }
}
