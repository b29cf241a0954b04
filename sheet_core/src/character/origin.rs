//! Origins - per-origin rules for carry weight, body plan and traits

use crate::body::{BodyPart, BodyPlan};
use crate::types::SpecialValues;
use serde::{Deserialize, Serialize};

/// Rule constants
pub mod constants {
    /// Carry weight before strength is counted
    pub const BASE_CARRY_WEIGHT: f64 = 75.0;
    /// Carry weight per point of strength
    pub const CARRY_WEIGHT_PER_STRENGTH: f64 = 5.0;
    /// Highest base value a skill can be raised to
    pub const DEFAULT_SKILL_MAX: i32 = 6;
    /// Highest value a SPECIAL attribute can be raised to
    pub const DEFAULT_SPECIAL_MAX: i32 = 10;
    /// Plating mod fitted to freshly granted robot parts
    pub const DEFAULT_PLATING_MOD: &str = "modRobotPlatingStandard";
}

use constants::*;

/// Origin identifier as stored on the character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OriginId {
    VaultDweller,
    Ghoul,
    Survivor,
    MrHandy,
    BrotherhoodInitiate,
    SuperMutant,
}

/// How an origin computes its base carry weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarryWeightRule {
    /// `base + strength * per_point`
    PerStrength { base: f64, per_point: f64 },
    /// Independent of strength
    Fixed(f64),
}

impl CarryWeightRule {
    pub fn max_carry_weight(self, strength: i32) -> f64 {
        match self {
            CarryWeightRule::PerStrength { base, per_point } => base + strength as f64 * per_point,
            CarryWeightRule::Fixed(value) => value,
        }
    }
}

/// Rules attached to an origin
#[derive(Debug, Clone, PartialEq)]
pub struct Origin {
    /// `None` for a character without an origin
    pub id: Option<OriginId>,
    pub carry_weight: CarryWeightRule,
    pub radiation_immune: bool,
    pub poison_immune: bool,
    pub body_plan: BodyPlan,
    pub special_max: SpecialValues,
    pub skill_max: i32,
    /// Origin can only wear gear made for its body plan
    pub needs_specialized_armor: bool,
    pub can_use_aid: bool,
}

impl Origin {
    fn standard(id: Option<OriginId>) -> Origin {
        Origin {
            id,
            carry_weight: CarryWeightRule::PerStrength {
                base: BASE_CARRY_WEIGHT,
                per_point: CARRY_WEIGHT_PER_STRENGTH,
            },
            radiation_immune: false,
            poison_immune: false,
            body_plan: BodyPlan::Humanoid,
            special_max: SpecialValues::uniform(DEFAULT_SPECIAL_MAX),
            skill_max: DEFAULT_SKILL_MAX,
            needs_specialized_armor: false,
            can_use_aid: true,
        }
    }

    /// Rules for an origin id
    pub fn of(id: Option<OriginId>) -> Origin {
        let mut origin = Origin::standard(id);
        match id {
            None
            | Some(OriginId::VaultDweller)
            | Some(OriginId::Survivor)
            | Some(OriginId::BrotherhoodInitiate) => {}
            Some(OriginId::Ghoul) => {
                origin.radiation_immune = true;
            }
            Some(OriginId::MrHandy) => {
                origin.carry_weight = CarryWeightRule::Fixed(BASE_CARRY_WEIGHT);
                origin.radiation_immune = true;
                origin.poison_immune = true;
                origin.body_plan = BodyPlan::Robot;
                origin.needs_specialized_armor = true;
                origin.can_use_aid = false;
            }
            Some(OriginId::SuperMutant) => {
                origin.radiation_immune = true;
                origin.poison_immune = true;
                origin.special_max.strength = 12;
                origin.special_max.endurance = 12;
                origin.special_max.intelligence = 6;
                origin.special_max.charisma = 6;
            }
        }
        origin
    }

    pub fn is_robot(&self) -> bool {
        self.body_plan == BodyPlan::Robot
    }

    pub fn body_parts(&self) -> &'static [BodyPart] {
        self.body_plan.parts()
    }

    pub fn max_carry_weight(&self, strength: i32) -> f64 {
        self.carry_weight.max_carry_weight(strength)
    }
}

impl Default for Origin {
    fn default() -> Self {
        Origin::of(None)
    }
}

/// Inventory id of the item standing in for a robot body part
pub fn robot_part_item_id(part: BodyPart) -> Option<&'static str> {
    match part {
        BodyPart::RobotPartSensors => Some("robotPartSensors"),
        BodyPart::RobotPartBody => Some("robotPartBody"),
        BodyPart::RobotPartArms => Some("robotPartArms"),
        BodyPart::RobotPartThrusters => Some("robotPartThrusters"),
        _ => None,
    }
}
