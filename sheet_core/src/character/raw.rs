//! Raw character state - the only persisted mutable state

use super::origin::{Origin, OriginId};
use crate::stat_block;
use crate::types::{Side, Skill, SpecialValues};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One inventory line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterItem {
    pub id: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub equipped: bool,
    /// Applied mod ids, in application order
    #[serde(default)]
    pub mods: Vec<String>,
    #[serde(default, rename = "variation", skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
}

fn default_quantity() -> u32 {
    1
}

impl CharacterItem {
    /// A single unequipped, unmodded item
    pub fn new(id: impl Into<String>) -> Self {
        CharacterItem {
            id: id.into(),
            quantity: 1,
            equipped: false,
            mods: Vec::new(),
            side: None,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_mods<S: Into<String>>(mut self, mods: impl IntoIterator<Item = S>) -> Self {
        self.mods = mods.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    pub fn equipped(mut self) -> Self {
        self.equipped = true;
        self
    }
}

/// Raw character snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCharacter {
    pub name: Option<String>,
    pub background: Option<String>,
    pub origin: Option<OriginId>,
    pub level: i32,
    pub caps: i32,
    pub special: SpecialValues,
    /// Base skill values, missing skills are 0
    pub skills: BTreeMap<Skill, i32>,
    pub specialties: Vec<Skill>,
    /// `None` means full (equal to the luck attribute)
    pub current_luck: Option<i32>,
    /// `None` means full (equal to max HP)
    pub current_hp: Option<i32>,
    pub items: Vec<CharacterItem>,
}

impl Default for RawCharacter {
    fn default() -> Self {
        RawCharacter {
            name: None,
            background: None,
            origin: None,
            level: 1,
            caps: 0,
            special: SpecialValues::default(),
            skills: BTreeMap::new(),
            specialties: Vec::new(),
            current_luck: None,
            current_hp: None,
            items: Vec::new(),
        }
    }
}

impl RawCharacter {
    pub fn origin(&self) -> Origin {
        Origin::of(self.origin)
    }

    /// Base value of a skill
    pub fn skill(&self, skill: Skill) -> i32 {
        self.skills.get(&skill).copied().unwrap_or(0)
    }

    pub fn has_specialty(&self, skill: Skill) -> bool {
        self.specialties.contains(&skill)
    }

    pub fn max_hp(&self) -> i32 {
        stat_block::max_hp(&self.special, self.level)
    }

    pub fn current_luck(&self) -> i32 {
        self.current_luck.unwrap_or(self.special.luck)
    }

    /// Units held across every stack of an id
    pub fn ammo_count(&self, ammo_id: &str) -> u32 {
        self.items
            .iter()
            .filter(|item| item.id == ammo_id)
            .map(|item| item.quantity)
            .sum()
    }

    /// Apply a partial update, producing the next snapshot
    ///
    /// When the patch moves max HP, current HP follows it (see [`adjust_current_hp`]).
    pub fn with_patch(&self, patch: CharacterPatch) -> RawCharacter {
        let mut next = self.clone();
        let CharacterPatch {
            name,
            background,
            origin,
            level,
            caps,
            special,
            skills,
            specialties,
            current_luck,
            current_hp,
            items,
        } = patch;

        if let Some(name) = name {
            next.name = name;
        }
        if let Some(background) = background {
            next.background = background;
        }
        if let Some(origin) = origin {
            next.origin = origin;
        }
        if let Some(level) = level {
            next.level = level;
        }
        if let Some(caps) = caps {
            next.caps = caps;
        }
        if let Some(special) = special {
            next.special = special;
        }
        if let Some(skills) = skills {
            next.skills.extend(skills);
        }
        if let Some(specialties) = specialties {
            next.specialties = specialties;
        }
        if let Some(current_luck) = current_luck {
            next.current_luck = Some(current_luck);
        }
        if let Some(current_hp) = current_hp {
            next.current_hp = Some(current_hp);
        }
        if let Some(items) = items {
            next.items = items.into_iter().filter(|item| item.quantity > 0).collect();
        }

        adjust_current_hp(self, &mut next);
        next
    }
}

/// Partial update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharacterPatch {
    pub name: Option<Option<String>>,
    pub background: Option<Option<String>>,
    pub origin: Option<Option<OriginId>>,
    pub level: Option<i32>,
    pub caps: Option<i32>,
    pub special: Option<SpecialValues>,
    /// Merged into the existing skill map
    pub skills: Option<BTreeMap<Skill, i32>>,
    pub specialties: Option<Vec<Skill>>,
    pub current_luck: Option<i32>,
    pub current_hp: Option<i32>,
    /// Replaces the inventory; zero-quantity lines are dropped
    pub items: Option<Vec<CharacterItem>>,
}

impl CharacterPatch {
    pub fn current_luck(value: i32) -> Self {
        CharacterPatch {
            current_luck: Some(value),
            ..Default::default()
        }
    }

    pub fn items(items: Vec<CharacterItem>) -> Self {
        CharacterPatch {
            items: Some(items),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == CharacterPatch::default()
    }
}

/// Keep current HP in step with max HP across an update
///
/// A rise in max HP raises current HP by the same amount; current HP is then
/// clamped to the new max. A character at full HP (`None`) stays full.
pub fn adjust_current_hp(prev: &RawCharacter, next: &mut RawCharacter) {
    let prev_max = prev.max_hp();
    let next_max = next.max_hp();
    let Some(mut hp) = next.current_hp else {
        return;
    };
    if next_max > prev_max {
        hp += next_max - prev_max;
    }
    next.current_hp = Some(hp.min(next_max));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let raw: RawCharacter = serde_json::from_str("{}").unwrap();
        assert_eq!(raw.level, 1);
        assert_eq!(raw.special.luck, 5);
        assert_eq!(raw.skill(Skill::Sneak), 0);
        assert_eq!(raw.current_luck(), 5);
    }

    #[test]
    fn test_item_side_wire_name() {
        let item: CharacterItem =
            serde_json::from_str(r#"{"id":"glove","variation":"left","mods":[]}"#).unwrap();
        assert_eq!(item.side, Some(Side::Left));
        assert_eq!(item.quantity, 1);
        assert!(!item.equipped);
    }

    #[test]
    fn test_patch_leaves_other_fields() {
        let raw = RawCharacter {
            caps: 30,
            ..Default::default()
        };
        let next = raw.with_patch(CharacterPatch::current_luck(2));
        assert_eq!(next.current_luck(), 2);
        assert_eq!(next.caps, 30);
        // The snapshot it came from is untouched
        assert_eq!(raw.current_luck, None);
    }

    #[test]
    fn test_patch_merges_skills() {
        let mut raw = RawCharacter::default();
        raw.skills.insert(Skill::Sneak, 2);
        let mut skills = BTreeMap::new();
        skills.insert(Skill::Repair, 3);
        let next = raw.with_patch(CharacterPatch {
            skills: Some(skills),
            ..Default::default()
        });
        assert_eq!(next.skill(Skill::Sneak), 2);
        assert_eq!(next.skill(Skill::Repair), 3);
    }

    #[test]
    fn test_patch_drops_empty_stacks() {
        let raw = RawCharacter::default();
        let next = raw.with_patch(CharacterPatch::items(vec![
            CharacterItem::new("ammo10mm").with_quantity(0),
            CharacterItem::new("stimpak").with_quantity(2),
        ]));
        assert_eq!(next.items.len(), 1);
        assert_eq!(next.items[0].id, "stimpak");
    }

    #[test]
    fn test_hp_rises_with_max() {
        let raw = RawCharacter {
            current_hp: Some(6),
            ..Default::default()
        };
        assert_eq!(raw.max_hp(), 10);
        let next = raw.with_patch(CharacterPatch {
            level: Some(3),
            ..Default::default()
        });
        assert_eq!(next.max_hp(), 12);
        assert_eq!(next.current_hp, Some(8));
    }

    #[test]
    fn test_hp_clamped_when_max_falls() {
        let raw = RawCharacter {
            current_hp: Some(9),
            ..Default::default()
        };
        let next = raw.with_patch(CharacterPatch {
            special: Some(SpecialValues {
                endurance: 2,
                ..SpecialValues::default()
            }),
            ..Default::default()
        });
        assert_eq!(next.max_hp(), 7);
        assert_eq!(next.current_hp, Some(7));
    }

    #[test]
    fn test_full_hp_stays_full() {
        let raw = RawCharacter::default();
        let next = raw.with_patch(CharacterPatch {
            level: Some(4),
            ..Default::default()
        });
        assert_eq!(next.current_hp, None);
    }

    #[test]
    fn test_ammo_count_sums_stacks() {
        let raw = RawCharacter {
            items: vec![
                CharacterItem::new("ammo10mm").with_quantity(12),
                CharacterItem::new("ammo10mm").with_quantity(3),
                CharacterItem::new("ammo5mm").with_quantity(40),
            ],
            ..Default::default()
        };
        assert_eq!(raw.ammo_count("ammo10mm"), 15);
        assert_eq!(raw.ammo_count("ammoFusionCell"), 0);
    }
}
