//! SkillCheck - d20 skill check session
//!
//! `Unrolled -> Rolled { ap_cost } -> Closed`. The AP cost is fixed by the
//! selection at the first roll; later rerolls never change it.

use super::constants::{D20, MIN_SELECTED_D20};
use super::{DiceRoller, DieSlot, RollError};
use crate::character::{CharacterPatch, CharacterStore, RawCharacter};
use crate::stat_block::effective_skill;
use crate::types::{Skill, Special};
use serde::{Deserialize, Serialize};

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillCheckState {
    Unrolled,
    Rolled { ap_cost: u32 },
    Closed,
}

/// Number of d20 slots in the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PoolSize {
    #[default]
    Standard,
    /// Special-case pool with three slots
    Reduced,
}

impl PoolSize {
    pub fn slots(self) -> usize {
        match self {
            PoolSize::Standard => 5,
            PoolSize::Reduced => 3,
        }
    }
}

/// AP cost for the number of dice selected at the first roll
pub fn ap_cost_for(selected: usize) -> u32 {
    match selected {
        3 => 1,
        4 => 3,
        5 => 6,
        _ => 0,
    }
}

/// Outcome of the dice rolled so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub target: i32,
    pub critical_threshold: i32,
    pub successes: u32,
    /// Natural 20s
    pub complications: u32,
}

/// A skill check session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCheck {
    skill: Skill,
    attribute: Special,
    use_luck: bool,
    aiming: bool,
    dice: Vec<DieSlot>,
    state: SkillCheckState,
}

impl SkillCheck {
    /// Standard five-slot session using the skill's default attribute
    pub fn open(skill: Skill) -> Self {
        Self::open_with_pool(skill, PoolSize::Standard)
    }

    pub fn open_with_pool(skill: Skill, pool: PoolSize) -> Self {
        let dice = (0..pool.slots())
            .map(|i| {
                if i < MIN_SELECTED_D20 {
                    DieSlot::selected()
                } else {
                    DieSlot::default()
                }
            })
            .collect();

        SkillCheck {
            skill,
            attribute: skill.default_attribute(),
            use_luck: false,
            aiming: false,
            dice,
            state: SkillCheckState::Unrolled,
        }
    }

    pub fn skill(&self) -> Skill {
        self.skill
    }

    pub fn state(&self) -> SkillCheckState {
        self.state
    }

    pub fn dice(&self) -> &[DieSlot] {
        &self.dice
    }

    /// Attribute added to the target, Luck when substituted
    pub fn active_attribute(&self) -> Special {
        if self.use_luck {
            Special::Luck
        } else {
            self.attribute
        }
    }

    pub fn is_aiming(&self) -> bool {
        self.aiming
    }

    pub fn selected_count(&self) -> usize {
        self.dice.iter().filter(|d| d.selected).count()
    }

    fn rerolled_count(&self) -> usize {
        self.dice.iter().filter(|d| d.rerolled).count()
    }

    fn ensure_unrolled(&self) -> Result<(), RollError> {
        match self.state {
            SkillCheckState::Unrolled => Ok(()),
            SkillCheckState::Rolled { .. } => Err(RollError::AlreadyRolled),
            SkillCheckState::Closed => Err(RollError::SessionClosed),
        }
    }

    /// Pick the attribute for the target number (before the first roll)
    pub fn set_attribute(&mut self, attribute: Special) -> Result<(), RollError> {
        self.ensure_unrolled()?;
        self.attribute = attribute;
        Ok(())
    }

    /// Substitute Luck for the chosen attribute (before the first roll)
    pub fn set_use_luck(&mut self, use_luck: bool) -> Result<(), RollError> {
        self.ensure_unrolled()?;
        self.use_luck = use_luck;
        Ok(())
    }

    /// Toggle aiming; allowed until the session closes
    pub fn set_aiming(&mut self, aiming: bool) -> Result<(), RollError> {
        if self.state == SkillCheckState::Closed {
            return Err(RollError::SessionClosed);
        }
        self.aiming = aiming;
        Ok(())
    }

    /// Click on a die
    ///
    /// Before the first roll selection cascades: every slot before `index` is
    /// selected, every slot after it cleared, and the first two slots stay
    /// selected. After rolling, a resolved die toggles for reroll; unresolved
    /// dice ignore the click.
    pub fn toggle_die(&mut self, index: usize) -> Result<(), RollError> {
        if index >= self.dice.len() {
            return Err(RollError::InvalidDie(index));
        }
        match self.state {
            SkillCheckState::Closed => Err(RollError::SessionClosed),
            SkillCheckState::Unrolled => {
                let will_select = !self.dice[index].selected;
                for (i, die) in self.dice.iter_mut().enumerate() {
                    let always = i < MIN_SELECTED_D20;
                    die.selected = if i < index {
                        true
                    } else if i == index {
                        always || will_select
                    } else {
                        always
                    };
                }
                Ok(())
            }
            SkillCheckState::Rolled { .. } => {
                let die = &mut self.dice[index];
                if die.is_resolved() {
                    die.selected = !die.selected;
                }
                Ok(())
            }
        }
    }

    /// AP cost: live from the selection before rolling, frozen afterwards
    pub fn ap_cost(&self) -> u32 {
        match self.state {
            SkillCheckState::Unrolled => ap_cost_for(self.selected_count()),
            SkillCheckState::Rolled { ap_cost } => ap_cost,
            SkillCheckState::Closed => 0,
        }
    }

    /// Luck the next roll would cost
    pub fn luck_cost(&self) -> i32 {
        match self.state {
            SkillCheckState::Unrolled => i32::from(self.use_luck),
            SkillCheckState::Rolled { .. } => {
                let mut cost = self.selected_count() as i32;
                if self.aiming && self.rerolled_count() == 0 {
                    cost -= 1;
                }
                cost.max(0)
            }
            SkillCheckState::Closed => 0,
        }
    }

    /// Effective skill plus the active attribute
    pub fn target(&self, raw: &RawCharacter) -> i32 {
        self.effective_skill(raw) + raw.special.get(self.active_attribute())
    }

    /// Faces at or below this count as an extra success
    pub fn critical_threshold(&self, raw: &RawCharacter) -> i32 {
        if raw.has_specialty(self.skill) {
            self.effective_skill(raw)
        } else {
            1
        }
    }

    fn effective_skill(&self, raw: &RawCharacter) -> i32 {
        effective_skill(raw.skill(self.skill), raw.has_specialty(self.skill))
    }

    /// Roll every selected die, debiting luck
    ///
    /// Rejected with nothing changed when no die is selected or luck is short.
    pub fn roll<S, R>(&mut self, store: &mut S, rng: &mut R) -> Result<(), RollError>
    where
        S: CharacterStore + ?Sized,
        R: DiceRoller + ?Sized,
    {
        if self.state == SkillCheckState::Closed {
            return Err(RollError::SessionClosed);
        }
        let selected = self.selected_count();
        if selected == 0 {
            return Err(RollError::NoDiceSelected);
        }
        let luck_cost = self.luck_cost();
        let available = store.character().current_luck();
        if luck_cost > available {
            return Err(RollError::InsufficientLuck {
                required: luck_cost,
                available,
            });
        }

        let is_reroll = match self.state {
            SkillCheckState::Unrolled => {
                self.state = SkillCheckState::Rolled {
                    ap_cost: ap_cost_for(selected),
                };
                false
            }
            _ => true,
        };

        for die in self.dice.iter_mut().filter(|d| d.selected) {
            die.face = Some(rng.roll_die(D20));
            if is_reroll {
                die.rerolled = true;
            }
            die.selected = false;
        }

        if luck_cost > 0 {
            store.update(CharacterPatch::current_luck(available - luck_cost));
        }
        tracing::debug!(skill = ?self.skill, dice = selected, luck_cost, is_reroll, "skill check rolled");
        Ok(())
    }

    /// Result of the faces rolled so far, `None` before the first roll
    pub fn result(&self, raw: &RawCharacter) -> Option<CheckResult> {
        if self.state == SkillCheckState::Unrolled {
            return None;
        }
        let target = self.target(raw);
        let critical_threshold = self.critical_threshold(raw);
        let faces = self.dice.iter().filter_map(|d| d.face).map(|f| f as i32);

        let mut successes = 0;
        let mut complications = 0;
        for face in faces {
            if face <= target {
                successes += 1;
            }
            if face <= critical_threshold {
                successes += 1;
            }
            if face == D20 as i32 {
                complications += 1;
            }
        }

        Some(CheckResult {
            target,
            critical_threshold,
            successes,
            complications,
        })
    }

    /// Discard the session; committed luck debits stay
    pub fn close(&mut self) -> Result<(), RollError> {
        if self.state == SkillCheckState::Closed {
            return Err(RollError::SessionClosed);
        }
        self.state = SkillCheckState::Closed;
        self.dice.clear();
        Ok(())
    }
}
