//! Core types shared across the sheet: attributes, skills, item taxonomy

use serde::{Deserialize, Serialize};

/// The seven SPECIAL attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Special {
    Strength,
    Perception,
    Endurance,
    Charisma,
    Intelligence,
    Agility,
    Luck,
}

impl Special {
    /// Get all attributes in sheet order
    pub fn all() -> &'static [Special] {
        &[
            Special::Strength,
            Special::Perception,
            Special::Endurance,
            Special::Charisma,
            Special::Intelligence,
            Special::Agility,
            Special::Luck,
        ]
    }
}

/// Attribute scores, one per SPECIAL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialValues {
    #[serde(default = "default_special")]
    pub strength: i32,
    #[serde(default = "default_special")]
    pub perception: i32,
    #[serde(default = "default_special")]
    pub endurance: i32,
    #[serde(default = "default_special")]
    pub charisma: i32,
    #[serde(default = "default_special")]
    pub intelligence: i32,
    #[serde(default = "default_special")]
    pub agility: i32,
    #[serde(default = "default_special")]
    pub luck: i32,
}

/// Score every attribute starts at
pub const DEFAULT_SPECIAL: i32 = 5;

fn default_special() -> i32 {
    DEFAULT_SPECIAL
}

impl Default for SpecialValues {
    fn default() -> Self {
        SpecialValues::uniform(DEFAULT_SPECIAL)
    }
}

impl SpecialValues {
    /// Every attribute set to the same score
    pub fn uniform(value: i32) -> Self {
        SpecialValues {
            strength: value,
            perception: value,
            endurance: value,
            charisma: value,
            intelligence: value,
            agility: value,
            luck: value,
        }
    }

    pub fn get(&self, attribute: Special) -> i32 {
        match attribute {
            Special::Strength => self.strength,
            Special::Perception => self.perception,
            Special::Endurance => self.endurance,
            Special::Charisma => self.charisma,
            Special::Intelligence => self.intelligence,
            Special::Agility => self.agility,
            Special::Luck => self.luck,
        }
    }

    pub fn set(&mut self, attribute: Special, value: i32) {
        let slot = match attribute {
            Special::Strength => &mut self.strength,
            Special::Perception => &mut self.perception,
            Special::Endurance => &mut self.endurance,
            Special::Charisma => &mut self.charisma,
            Special::Intelligence => &mut self.intelligence,
            Special::Agility => &mut self.agility,
            Special::Luck => &mut self.luck,
        };
        *slot = value;
    }
}

/// Skills a character can roll against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Skill {
    Athletics,
    Barter,
    BigGuns,
    EnergyWeapons,
    Explosives,
    Lockpick,
    Medicine,
    MeleeWeapons,
    Pilot,
    Repair,
    Science,
    SmallGuns,
    Sneak,
    Speech,
    Survival,
    Throwing,
    Unarmed,
}

impl Skill {
    /// Get all skills in sheet order
    pub fn all() -> &'static [Skill] {
        &[
            Skill::Athletics,
            Skill::Barter,
            Skill::BigGuns,
            Skill::EnergyWeapons,
            Skill::Explosives,
            Skill::Lockpick,
            Skill::Medicine,
            Skill::MeleeWeapons,
            Skill::Pilot,
            Skill::Repair,
            Skill::Science,
            Skill::SmallGuns,
            Skill::Sneak,
            Skill::Speech,
            Skill::Survival,
            Skill::Throwing,
            Skill::Unarmed,
        ]
    }

    /// Attribute a check with this skill uses unless the player picks another
    pub fn default_attribute(self) -> Special {
        match self {
            Skill::Athletics | Skill::MeleeWeapons | Skill::Unarmed => Special::Strength,
            Skill::Barter | Skill::Speech => Special::Charisma,
            Skill::BigGuns | Skill::Survival => Special::Endurance,
            Skill::EnergyWeapons | Skill::Explosives | Skill::Lockpick | Skill::Pilot => {
                Special::Perception
            }
            Skill::Medicine | Skill::Repair | Skill::Science => Special::Intelligence,
            Skill::SmallGuns | Skill::Sneak | Skill::Throwing => Special::Agility,
        }
    }
}

/// Side variant of a paired apparel piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Left,
    Right,
}

/// Damage channel, used both for weapon damage type and resistances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DamageChannel {
    Physical,
    Energy,
    Radiation,
}

impl DamageChannel {
    pub fn all() -> &'static [DamageChannel] {
        &[DamageChannel::Physical, DamageChannel::Energy, DamageChannel::Radiation]
    }
}

/// Weapon range band, ordered closest to farthest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Range {
    #[serde(rename = "rangeR")]
    Reach,
    #[serde(rename = "rangeC")]
    Close,
    #[serde(rename = "rangeM")]
    Medium,
    #[serde(rename = "rangeL")]
    Long,
    #[serde(rename = "rangeE")]
    Extreme,
}

impl Range {
    const SCALE: [Range; 5] = [
        Range::Reach,
        Range::Close,
        Range::Medium,
        Range::Long,
        Range::Extreme,
    ];

    /// Position on the five-step scale
    pub fn index(self) -> usize {
        self as usize
    }

    /// Move along the scale, clamped at both ends
    pub fn shifted(self, steps: i32) -> Range {
        let last = (Self::SCALE.len() - 1) as i64;
        let target = (self.index() as i64 + steps as i64).clamp(0, last);
        Self::SCALE[target as usize]
    }
}

/// Top-level item type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemType {
    Weapon,
    Apparel,
    Aid,
    Mod,
    Other,
}

/// Item category within a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemCategory {
    // Weapons
    SmallGuns,
    EnergyWeapons,
    BigGuns,
    MeleeWeapons,
    Explosives,
    Throwing,
    Unarmed,
    // Apparel
    Clothing,
    Outfit,
    Headgear,
    RaiderArmor,
    LeatherArmor,
    MetalArmor,
    CombatArmor,
    SyntheticArmor,
    VaultTecSecurity,
    RobotPart,
    // Aid
    Food,
    Drinks,
    Meds,
    // Other
    Ammo,
    Mods,
}

impl ItemCategory {
    /// Type this category belongs to
    pub fn item_type(self) -> ItemType {
        use ItemCategory::*;
        match self {
            SmallGuns | EnergyWeapons | BigGuns | MeleeWeapons | Explosives | Throwing
            | Unarmed => ItemType::Weapon,
            Clothing | Outfit | Headgear | RaiderArmor | LeatherArmor | MetalArmor
            | CombatArmor | SyntheticArmor | VaultTecSecurity | RobotPart => ItemType::Apparel,
            Food | Drinks | Meds => ItemType::Aid,
            Mods => ItemType::Mod,
            Ammo => ItemType::Other,
        }
    }

    /// Melee and unarmed weapons add the melee bonus and never use ammo
    pub fn is_melee(self) -> bool {
        matches!(self, ItemCategory::MeleeWeapons | ItemCategory::Unarmed)
    }
}

/// Slot a mod attaches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModSlot {
    #[serde(rename = "modSlotBarrel")]
    Barrel,
    #[serde(rename = "modSlotMagazine")]
    Magazine,
    #[serde(rename = "modSlotReceiver")]
    Receiver,
    #[serde(rename = "modSlotStock")]
    Stock,
    #[serde(rename = "modSlotSight")]
    Sight,
    #[serde(rename = "modSlotMuzzle")]
    Muzzle,
    #[serde(rename = "modSlotGrip")]
    Grip,
    #[serde(rename = "modSlotMaterial")]
    Material,
    #[serde(rename = "modSlotLining")]
    Lining,
    #[serde(rename = "modSlotWeave")]
    Weave,
    #[serde(rename = "modSlotRobotPlating")]
    RobotPlating,
    #[serde(rename = "modSlotRobotArmor")]
    RobotArmor,
    #[serde(other, rename = "modSlotMisc")]
    Misc,
}
