//! BaseStatsSource - Attributes, level, skills and origin carry weight

use crate::body::BodyPart;
use crate::character::{CarryWeightRule, RawCharacter};
use crate::source::StatSource;
use crate::stat_block::{effective_skill, StatAccumulator};
use crate::types::{Skill, SpecialValues};
use std::collections::BTreeMap;

/// Stats straight from the character sheet
pub struct BaseStatsSource {
    pub special: SpecialValues,
    pub level: i32,
    /// Effective skill values
    pub skills: BTreeMap<Skill, i32>,
    pub carry_weight: CarryWeightRule,
    /// Locations of the origin's body plan
    pub body_parts: &'static [BodyPart],
}

impl BaseStatsSource {
    pub fn from_character(raw: &RawCharacter) -> Self {
        let origin = raw.origin();
        let skills = Skill::all()
            .iter()
            .map(|skill| (*skill, effective_skill(raw.skill(*skill), raw.has_specialty(*skill))))
            .collect();

        BaseStatsSource {
            special: raw.special,
            level: raw.level,
            skills,
            carry_weight: origin.carry_weight,
            body_parts: origin.body_parts(),
        }
    }
}

impl StatSource for BaseStatsSource {
    fn id(&self) -> &str {
        "base_stats"
    }

    fn priority(&self) -> i32 {
        -100 // Base stats apply first
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        stats.special = self.special;
        stats.level = self.level;
        stats.skills = self.skills.clone();
        stats.carry_weight_base = self.carry_weight.max_carry_weight(self.special.strength);
        stats.open_locations(self.body_parts);
    }
}
