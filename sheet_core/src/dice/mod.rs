//! Dice sessions - skill checks (d20) and damage rolls (d6)
//!
//! Sessions are headless state machines. Every operation that touches the
//! character takes the store explicitly; randomness comes in through
//! [`DiceRoller`] so tests can script faces or seed an rng.

mod damage_roll;
mod error;
mod hit_location;
mod skill_check;

pub use damage_roll::{D6Face, DamageRoll, DamageRollState, DamageSummary, DamageTally};
pub use error::RollError;
pub use hit_location::{roll_hit_location, HIT_LOCATION_WEIGHTS};
pub use skill_check::{ap_cost_for, CheckResult, PoolSize, SkillCheck, SkillCheckState};

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Rule constants
pub mod constants {
    /// Weapon quality for automatic fire
    pub const QUALITY_GATLING: &str = "qualityGatling";
    /// Weapon quality granting bonus dice on aimed shots
    pub const QUALITY_ACCURATE: &str = "qualityAccurate";
    /// Weapon effect converting effect pips into extra hits
    pub const EFFECT_BURST: &str = "effectBurst";

    pub const D20: u32 = 20;
    pub const D6: u32 = 6;

    /// Dice that are always in a skill check pool
    pub const MIN_SELECTED_D20: usize = 2;
    /// Bonus dice for melee weapons and for aimed accurate shots
    pub const FLAT_BONUS_DICE: usize = 3;
    /// Ammo per bonus toggle for automatic-fire weapons
    pub const GATLING_AMMO_STEP: u32 = 10;
    /// Rerolls bought by one point of luck on a damage roll
    pub const REROLLS_PER_LUCK: u32 = 3;
}

/// Source of die faces
pub trait DiceRoller {
    /// Uniform face in `1..=sides`
    fn roll_die(&mut self, sides: u32) -> u32;
}

impl<R: Rng> DiceRoller for R {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.gen_range(1..=sides)
    }
}

/// One die in a pool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieSlot {
    /// `None` until first rolled
    pub face: Option<u32>,
    /// Will be rolled on the next roll
    pub selected: bool,
    /// Has been rerolled at least once
    pub rerolled: bool,
}

impl DieSlot {
    pub fn selected() -> Self {
        DieSlot {
            selected: true,
            ..Default::default()
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.face.is_some()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted faces for deterministic session tests

    use super::DiceRoller;
    use std::collections::VecDeque;

    pub struct ScriptedRoller {
        faces: VecDeque<u32>,
    }

    impl ScriptedRoller {
        pub fn new(faces: &[u32]) -> Self {
            ScriptedRoller {
                faces: faces.iter().copied().collect(),
            }
        }

        pub fn remaining(&self) -> usize {
            self.faces.len()
        }
    }

    impl DiceRoller for ScriptedRoller {
        fn roll_die(&mut self, sides: u32) -> u32 {
            let face = self.faces.pop_front().expect("scripted roller ran out of faces");
            assert!((1..=sides).contains(&face), "scripted face {} outside 1..={}", face, sides);
            face
        }
    }
}
