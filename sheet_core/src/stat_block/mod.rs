//! DerivedStats - Values computed from raw character state
//!
//! Nothing here is cached across a mutation: callers recompute from the
//! current snapshot whenever they need fresh values.

mod accumulator;
mod resistance;

pub use accumulator::StatAccumulator;
pub use resistance::{Resistance, ResistanceMap};

use crate::body::BodyPart;
use crate::character::RawCharacter;
use crate::database::ItemDatabase;
use crate::source::{character_sources, StatSource};
use crate::types::{DamageChannel, Skill, SpecialValues};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rule constants
pub mod constants {
    /// Bonus a specialty adds to a skill
    pub const SPECIALTY_BONUS: i32 = 2;
    /// Agility at which defense rises to 2
    pub const HIGH_DEFENSE_AGILITY: i32 = 9;
    /// Strength thresholds for +1, +2, +3 melee damage
    pub const MELEE_BONUS_THRESHOLDS: [i32; 3] = [7, 9, 11];
}

use constants::*;

/// Max HP = endurance + luck + level - 1
pub fn max_hp(special: &SpecialValues, level: i32) -> i32 {
    special.endurance + special.luck + level - 1
}

pub fn effective_skill(base: i32, is_specialty: bool) -> i32 {
    if is_specialty {
        base + SPECIALTY_BONUS
    } else {
        base
    }
}

pub fn defense(agility: i32) -> i32 {
    if agility < HIGH_DEFENSE_AGILITY {
        1
    } else {
        2
    }
}

pub fn initiative(special: &SpecialValues) -> i32 {
    special.agility + special.perception
}

/// Extra damage dice for melee weapons
pub fn melee_damage_bonus(strength: i32) -> i32 {
    MELEE_BONUS_THRESHOLDS
        .iter()
        .filter(|threshold| strength >= **threshold)
        .count() as i32
}

/// Stats derived from a raw snapshot and the item database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub max_hp: i32,
    pub current_hp: i32,
    pub max_luck: i32,
    pub current_luck: i32,
    pub max_weight: f64,
    pub current_weight: f64,
    pub defense: i32,
    pub initiative: i32,
    pub melee_damage: i32,
    /// Damage reduction for every location of the origin's body plan
    pub locations_dr: BTreeMap<BodyPart, ResistanceMap>,
    /// Effective skill values
    pub skills: BTreeMap<Skill, i32>,
}

impl DerivedStats {
    /// Compute every derived value for a character
    pub fn compute<D: ItemDatabase + ?Sized>(raw: &RawCharacter, db: &D) -> DerivedStats {
        let sources = character_sources(raw, db);
        let mut stats = DerivedStats::from_sources(&sources);
        stats.current_hp = raw.current_hp.unwrap_or(stats.max_hp).min(stats.max_hp);
        stats.current_luck = raw.current_luck();
        stats
    }

    /// Accumulate sources in priority order (lower first)
    pub fn from_sources(sources: &[Box<dyn StatSource>]) -> DerivedStats {
        let mut accumulator = StatAccumulator::new();

        let mut sorted_sources: Vec<_> = sources.iter().collect();
        sorted_sources.sort_by_key(|s| s.priority());

        for source in sorted_sources {
            source.apply(&mut accumulator);
        }

        accumulator.finish()
    }

    pub fn skill(&self, skill: Skill) -> i32 {
        self.skills.get(&skill).copied().unwrap_or(0)
    }

    /// Reduction at a location, `None` when the body plan lacks it
    pub fn dr(&self, part: BodyPart, channel: DamageChannel) -> Option<Resistance> {
        self.locations_dr.get(&part).map(|map| map.get(channel))
    }

    pub fn is_overencumbered(&self) -> bool {
        self.current_weight > self.max_weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_hp() {
        assert_eq!(max_hp(&SpecialValues::uniform(5), 1), 10);
        assert_eq!(max_hp(&SpecialValues::uniform(5), 4), 13);
    }

    #[test]
    fn test_defense_boundary() {
        assert_eq!(defense(8), 1);
        assert_eq!(defense(9), 2);
    }

    #[test]
    fn test_melee_boundaries() {
        assert_eq!(melee_damage_bonus(6), 0);
        assert_eq!(melee_damage_bonus(7), 1);
        assert_eq!(melee_damage_bonus(8), 1);
        assert_eq!(melee_damage_bonus(9), 2);
        assert_eq!(melee_damage_bonus(10), 2);
        assert_eq!(melee_damage_bonus(11), 3);
        assert_eq!(melee_damage_bonus(14), 3);
    }

    #[test]
    fn test_effective_skill() {
        assert_eq!(effective_skill(3, true), 5);
        assert_eq!(effective_skill(3, false), 3);
    }

    #[test]
    fn test_initiative() {
        let special = SpecialValues {
            agility: 7,
            perception: 6,
            ..SpecialValues::default()
        };
        assert_eq!(initiative(&special), 13);
    }
}
