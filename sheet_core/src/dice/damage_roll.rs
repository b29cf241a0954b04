//! DamageRoll - d6 damage session opened after a successful check
//!
//! Base dice come from the weapon's damage rating and are always rolled.
//! Bonus dice are switched on before the first roll, each reserving ammo for
//! ranged weapons. Base ammo and luck are debited as rolls commit; ammo spent
//! on burst hits is only taken when the session closes.

use super::constants::{
    D6, EFFECT_BURST, FLAT_BONUS_DICE, GATLING_AMMO_STEP, QUALITY_ACCURATE, QUALITY_GATLING,
    REROLLS_PER_LUCK,
};
use super::{roll_hit_location, DiceRoller, DieSlot, RollError};
use crate::body::BodyPart;
use crate::character::inventory::consume_by_id;
use crate::character::{CharacterPatch, CharacterStore, RawCharacter};
use crate::item::ModifiedItem;
use crate::stat_block::melee_damage_bonus;
use serde::{Deserialize, Serialize};

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageRollState {
    Unrolled,
    Rolled,
    Closed,
}

/// What a rolled d6 shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum D6Face {
    /// 5-6
    Blank,
    /// 3-4: one damage plus one effect pip
    Effect,
    /// 2
    OneDamage,
    /// 1
    TwoDamage,
}

impl D6Face {
    pub fn from_roll(face: u32) -> D6Face {
        match face {
            1 => D6Face::TwoDamage,
            2 => D6Face::OneDamage,
            3 | 4 => D6Face::Effect,
            _ => D6Face::Blank,
        }
    }

    pub fn damage(self) -> u32 {
        match self {
            D6Face::Blank => 0,
            D6Face::Effect | D6Face::OneDamage => 1,
            D6Face::TwoDamage => 2,
        }
    }
}

/// Totals over every resolved die
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageTally {
    pub damage: u32,
    pub effects: u32,
}

/// Final outcome handed back when the session closes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageSummary {
    pub damage: u32,
    pub effects: u32,
    pub burst_hits: u32,
    pub hit_location: BodyPart,
    /// Base ammo plus burst ammo
    pub ammo_spent: u32,
    pub luck_spent: i32,
}

/// A damage roll session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageRoll {
    weapon_id: String,
    melee: bool,
    gatling: bool,
    burst: bool,
    can_reroll_location: bool,
    ammo_id: Option<String>,
    ammo_step: u32,
    /// Ammo reserved for the first roll
    ammo_cost: u32,
    ammo_paid: u32,
    luck_paid: i32,
    base: Vec<DieSlot>,
    bonus: Vec<DieSlot>,
    burst_hits: u32,
    hit_location: BodyPart,
    state: DamageRollState,
}

impl DamageRoll {
    /// Open a session for a resolved weapon, drawing the hit location
    pub fn open<R: DiceRoller + ?Sized>(
        weapon: &ModifiedItem,
        raw: &RawCharacter,
        aimed: bool,
        rng: &mut R,
    ) -> Result<Self, RollError> {
        let item = &weapon.item;
        let stats = weapon
            .weapon()
            .ok_or_else(|| RollError::NotAWeapon(item.id.clone()))?;

        let melee = item.category.is_melee();
        let gatling = item.has_quality(QUALITY_GATLING);
        let fire_rate = stats.fire_rate.unwrap_or(0).max(0) as usize;

        let mut rating = stats.damage_rating;
        if melee {
            rating += melee_damage_bonus(raw.special.strength);
        }

        let bonus_count = if melee {
            FLAT_BONUS_DICE
        } else if fire_rate > 0 {
            fire_rate * if gatling { 2 } else { 1 }
        } else if aimed && item.has_quality(QUALITY_ACCURATE) {
            FLAT_BONUS_DICE
        } else {
            0
        };

        let ammo_id = if melee {
            None
        } else {
            stats.ammo_id(&item.id).map(str::to_string)
        };
        let ammo_step = if gatling { GATLING_AMMO_STEP } else { 1 };
        let ammo_cost = if ammo_id.is_some() { ammo_step } else { 0 };

        let hit_location = roll_hit_location(rng);
        tracing::debug!(weapon = %item.id, rating, bonus_count, ?hit_location, "damage roll opened");

        Ok(DamageRoll {
            weapon_id: item.id.clone(),
            melee,
            gatling,
            burst: item.has_effect(EFFECT_BURST),
            can_reroll_location: stats.reroll_hit_location,
            ammo_id,
            ammo_step,
            ammo_cost,
            ammo_paid: 0,
            luck_paid: 0,
            base: vec![DieSlot::selected(); rating.max(0) as usize],
            bonus: vec![DieSlot::default(); bonus_count],
            burst_hits: 0,
            hit_location,
            state: DamageRollState::Unrolled,
        })
    }

    pub fn weapon_id(&self) -> &str {
        &self.weapon_id
    }

    pub fn state(&self) -> DamageRollState {
        self.state
    }

    pub fn base_dice(&self) -> &[DieSlot] {
        &self.base
    }

    pub fn bonus_dice(&self) -> &[DieSlot] {
        &self.bonus
    }

    pub fn is_melee(&self) -> bool {
        self.melee
    }

    pub fn has_burst(&self) -> bool {
        self.burst
    }

    pub fn ammo_id(&self) -> Option<&str> {
        self.ammo_id.as_deref()
    }

    /// Ammo the first roll will take
    pub fn ammo_cost(&self) -> u32 {
        self.ammo_cost
    }

    pub fn ammo_paid(&self) -> u32 {
        self.ammo_paid
    }

    pub fn luck_paid(&self) -> i32 {
        self.luck_paid
    }

    pub fn burst_hits(&self) -> u32 {
        self.burst_hits
    }

    pub fn hit_location(&self) -> BodyPart {
        self.hit_location
    }

    fn dice(&self) -> impl Iterator<Item = &DieSlot> {
        self.base.iter().chain(self.bonus.iter())
    }

    pub fn selected_count(&self) -> usize {
        self.dice().filter(|d| d.selected).count()
    }

    fn rerolled_count(&self) -> usize {
        self.dice().filter(|d| d.rerolled).count()
    }

    fn available_ammo(&self, raw: &RawCharacter) -> u32 {
        self.ammo_id.as_deref().map_or(0, |id| raw.ammo_count(id))
    }

    /// Click on a bonus die
    ///
    /// Before rolling this switches the die on or off, reserving or releasing
    /// one ammo step. Automatic-fire weapons switch dice in linked pairs.
    /// After rolling it marks a resolved, not yet rerolled die for reroll.
    /// Ammo is counted from the store's current snapshot.
    pub fn toggle_bonus_die<S: CharacterStore + ?Sized>(
        &mut self,
        index: usize,
        store: &S,
    ) -> Result<(), RollError> {
        if index >= self.bonus.len() {
            return Err(RollError::InvalidDie(index));
        }
        match self.state {
            DamageRollState::Closed => Err(RollError::SessionClosed),
            DamageRollState::Unrolled => {
                let activating = !self.bonus[index].selected;
                if self.ammo_id.is_some() {
                    if activating {
                        let available = self.available_ammo(store.character());
                        let required = self.ammo_cost + self.ammo_step;
                        if available < required {
                            return Err(RollError::InsufficientAmmo { required, available });
                        }
                        self.ammo_cost = required;
                    } else {
                        self.ammo_cost = self.ammo_cost.saturating_sub(self.ammo_step);
                    }
                }

                self.bonus[index].selected = activating;
                if self.gatling {
                    if let Some(partner) = self.bonus.get_mut(index ^ 1) {
                        partner.selected = activating;
                    }
                }
                Ok(())
            }
            DamageRollState::Rolled => {
                toggle_for_reroll(&mut self.bonus[index]);
                Ok(())
            }
        }
    }

    /// Mark a resolved base die for reroll; base dice are fixed before rolling
    pub fn toggle_die(&mut self, index: usize) -> Result<(), RollError> {
        if index >= self.base.len() {
            return Err(RollError::InvalidDie(index));
        }
        match self.state {
            DamageRollState::Closed => Err(RollError::SessionClosed),
            DamageRollState::Unrolled => Err(RollError::NotRolled),
            DamageRollState::Rolled => {
                toggle_for_reroll(&mut self.base[index]);
                Ok(())
            }
        }
    }

    /// Luck the next roll would cost
    ///
    /// One luck buys three rerolls. Rerolls left over from a partly used
    /// group are free.
    pub fn luck_cost(&self) -> i32 {
        if self.state != DamageRollState::Rolled {
            return 0;
        }
        let per_luck = REROLLS_PER_LUCK as i32;
        let leftover = self.rerolled_count() as i32 % per_luck;
        let free = if leftover > 0 { per_luck - leftover } else { 0 };
        let paid = self.selected_count() as i32 - free;
        if paid <= 0 {
            0
        } else {
            (paid + per_luck - 1) / per_luck
        }
    }

    /// Roll every selected die
    ///
    /// The first roll takes the reserved ammo; every roll takes its luck cost.
    /// Both go out in one update, and nothing changes when the roll is rejected.
    pub fn roll<S, R>(&mut self, store: &mut S, rng: &mut R) -> Result<(), RollError>
    where
        S: CharacterStore + ?Sized,
        R: DiceRoller + ?Sized,
    {
        if self.state == DamageRollState::Closed {
            return Err(RollError::SessionClosed);
        }
        let selected = self.selected_count();
        if selected == 0 {
            return Err(RollError::NoDiceSelected);
        }

        let raw = store.character();
        let luck_cost = self.luck_cost();
        let luck = raw.current_luck();
        if luck_cost > luck {
            return Err(RollError::InsufficientLuck {
                required: luck_cost,
                available: luck,
            });
        }

        let first_roll = self.state == DamageRollState::Unrolled;
        let mut patch = CharacterPatch::default();
        if first_roll {
            if let Some(ammo_id) = self.ammo_id.as_deref() {
                let available = raw.ammo_count(ammo_id);
                if available < self.ammo_cost {
                    return Err(RollError::InsufficientAmmo {
                        required: self.ammo_cost,
                        available,
                    });
                }
                if self.ammo_cost > 0 {
                    patch.items = Some(consume_by_id(&raw.items, ammo_id, self.ammo_cost));
                }
            }
        }
        if luck_cost > 0 {
            patch.current_luck = Some(luck - luck_cost);
        }

        for die in self.base.iter_mut().chain(self.bonus.iter_mut()) {
            if !die.selected {
                continue;
            }
            die.face = Some(rng.roll_die(D6));
            if !first_roll {
                die.rerolled = true;
            }
            die.selected = false;
        }

        store.update(patch);
        if first_roll {
            self.ammo_paid = self.ammo_cost;
            self.ammo_cost = 0;
            self.state = DamageRollState::Rolled;
        }
        self.luck_paid += luck_cost;
        self.burst_hits = self.burst_hits.min(self.max_burst_hits(store.character()));

        tracing::debug!(weapon = %self.weapon_id, dice = selected, luck_cost, first_roll, "damage rolled");
        Ok(())
    }

    /// Damage and effect totals over the resolved dice
    pub fn tally(&self) -> DamageTally {
        self.dice()
            .filter_map(|d| d.face)
            .map(D6Face::from_roll)
            .fold(DamageTally::default(), |mut tally, face| {
                tally.damage += face.damage();
                if face == D6Face::Effect {
                    tally.effects += 1;
                }
                tally
            })
    }

    /// Extra hits the burst effect allows right now
    pub fn max_burst_hits(&self, raw: &RawCharacter) -> u32 {
        if !self.burst || self.state != DamageRollState::Rolled {
            return 0;
        }
        self.tally().effects.min(self.available_ammo(raw))
    }

    /// Choose how many effect pips become extra hits; paid on close
    pub fn set_burst_hits(&mut self, hits: u32, raw: &RawCharacter) -> Result<(), RollError> {
        match self.state {
            DamageRollState::Closed => return Err(RollError::SessionClosed),
            DamageRollState::Unrolled => return Err(RollError::NotRolled),
            DamageRollState::Rolled => {}
        }
        if !self.burst {
            return Err(RollError::BurstUnavailable);
        }
        let max = self.max_burst_hits(raw);
        if hits > max {
            return Err(RollError::BurstExceedsLimit {
                requested: hits,
                max,
            });
        }
        self.burst_hits = hits;
        Ok(())
    }

    /// Override the hit location by hand
    pub fn set_hit_location(&mut self, part: BodyPart) -> Result<(), RollError> {
        if self.state == DamageRollState::Closed {
            return Err(RollError::SessionClosed);
        }
        self.hit_location = part;
        Ok(())
    }

    /// Draw a new hit location; only weapons modded for it allow this
    pub fn reroll_hit_location<R: DiceRoller + ?Sized>(&mut self, rng: &mut R) -> Result<BodyPart, RollError> {
        if self.state == DamageRollState::Closed {
            return Err(RollError::SessionClosed);
        }
        if !self.can_reroll_location {
            return Err(RollError::HitLocationLocked);
        }
        self.hit_location = roll_hit_location(rng);
        Ok(self.hit_location)
    }

    /// End the session, paying for any burst hits
    pub fn close<S: CharacterStore + ?Sized>(&mut self, store: &mut S) -> Result<DamageSummary, RollError> {
        if self.state == DamageRollState::Closed {
            return Err(RollError::SessionClosed);
        }

        let mut burst_spent = 0;
        if self.burst_hits > 0 {
            if let Some(ammo_id) = self.ammo_id.as_deref() {
                let raw = store.character();
                burst_spent = self.burst_hits.min(raw.ammo_count(ammo_id));
                let items = consume_by_id(&raw.items, ammo_id, burst_spent);
                store.update(CharacterPatch::items(items));
            }
        }

        let tally = self.tally();
        let summary = DamageSummary {
            damage: tally.damage,
            effects: tally.effects,
            burst_hits: burst_spent,
            hit_location: self.hit_location,
            ammo_spent: self.ammo_paid + burst_spent,
            luck_spent: self.luck_paid,
        };

        self.state = DamageRollState::Closed;
        self.base.clear();
        self.bonus.clear();
        tracing::debug!(weapon = %self.weapon_id, ?summary, "damage roll closed");
        Ok(summary)
    }
}

fn toggle_for_reroll(die: &mut DieSlot) {
    if die.is_resolved() && !die.rerolled {
        die.selected = !die.selected;
    }
}
