//! Item database - read-only lookup of item and mod records

use crate::item::Item;
use crate::types::{ItemCategory, ItemType};
use std::collections::HashMap;

/// Items granted by the system rather than acquired.
/// They skip the normal acquire/sell/delete/unequip flows.
pub const UNACQUIRABLE_IDS: &[&str] = &[
    "weaponUnarmedStrike",
    "weaponWeaponStock",
    "weaponWeaponStockOneHanded",
    "weaponBayonet",
    "weaponMissileLauncherBayonet",
    "weaponShredder",
    "robotPartSensors",
    "robotPartBody",
    "robotPartArms",
    "robotPartThrusters",
];

/// Read-only item lookup
pub trait ItemDatabase {
    /// Record for an id, `None` when unknown
    fn get_item(&self, id: &str) -> Option<&Item>;

    /// Categories grouped by item type
    fn item_type_map(&self) -> HashMap<ItemType, Vec<ItemCategory>> {
        use ItemCategory::*;
        let mut map = HashMap::new();
        map.insert(
            ItemType::Weapon,
            vec![SmallGuns, EnergyWeapons, BigGuns, MeleeWeapons, Explosives, Throwing, Unarmed],
        );
        map.insert(
            ItemType::Apparel,
            vec![
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
            ],
        );
        map.insert(ItemType::Aid, vec![Food, Drinks, Meds]);
        map.insert(ItemType::Mod, vec![Mods]);
        map.insert(ItemType::Other, vec![Ammo]);
        map
    }

    /// System-granted item that bypasses acquire/sell/delete/unequip
    fn is_unacquirable(&self, id: &str) -> bool {
        UNACQUIRABLE_IDS.contains(&id)
    }
}

/// In-memory item database keyed by id
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: HashMap<String, Item>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog; a later record replaces an earlier one with the same id
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        let mut catalog = Self::new();
        for item in items {
            catalog.insert(item);
        }
        catalog
    }

    /// Insert a record, returning the one it replaced
    pub fn insert(&mut self, item: Item) -> Option<Item> {
        self.items.insert(item.id.clone(), item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }
}

impl ItemDatabase for ItemCatalog {
    fn get_item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::fixtures;

    #[test]
    fn test_lookup() {
        let catalog = ItemCatalog::from_items([
            fixtures::weapon("weapon10mmPistol", ItemCategory::SmallGuns, 4),
            fixtures::ammo("ammo10mm"),
        ]);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get_item("ammo10mm").is_some());
        assert!(catalog.get_item("ammo5mm").is_none());
    }

    #[test]
    fn test_later_record_replaces() {
        let mut catalog = ItemCatalog::new();
        catalog.insert(fixtures::weapon("gun", ItemCategory::SmallGuns, 3));
        let replaced = catalog.insert(fixtures::weapon("gun", ItemCategory::SmallGuns, 5));
        assert_eq!(replaced.and_then(|i| i.weapon).map(|w| w.damage_rating), Some(3));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_unacquirable() {
        let catalog = ItemCatalog::new();
        assert!(catalog.is_unacquirable("weaponUnarmedStrike"));
        assert!(catalog.is_unacquirable("robotPartBody"));
        assert!(!catalog.is_unacquirable("weapon10mmPistol"));
    }

    #[test]
    fn test_type_map_covers_every_category() {
        let map = ItemCatalog::new().item_type_map();
        for (item_type, categories) in &map {
            for category in categories {
                assert_eq!(category.item_type(), *item_type);
            }
        }
        assert_eq!(map.values().map(Vec::len).sum::<usize>(), 22);
    }
}
