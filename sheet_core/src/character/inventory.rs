//! Inventory operations
//!
//! Every operation reads the current snapshot and returns the patch that
//! carries it out. Rejections return an error and leave nothing to apply.

use super::origin::{constants::DEFAULT_PLATING_MOD, robot_part_item_id, Origin, OriginId};
use super::raw::{CharacterItem, CharacterPatch, RawCharacter};
use crate::body::{has_apparel_conflict, BodyPlan};
use crate::database::ItemDatabase;
use crate::item::ModEffectResolver;
use crate::types::{ItemCategory, ItemType, ModSlot};
use std::collections::HashSet;
use thiserror::Error;

/// Rejected inventory operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Item not found: {0}")]
    UnknownItem(String),
    #[error("Item is not in the inventory: {0}")]
    NotInInventory(String),
    #[error("Cannot {action} this item!")]
    Unacquirable { action: &'static str },
    #[error("Cannot equip this item!")]
    NotEquippable,
    #[error("Only robot origins can equip robot parts.")]
    RobotPartsOnly,
    #[error("This origin can only equip robot parts.")]
    SpecializedArmorOnly,
    #[error("Not a mod: {0}")]
    NotAMod(String),
    #[error("Item cannot be modified: {0}")]
    NotModdable(String),
    #[error("Item does not have this mod")]
    ModNotApplied,
    #[error("Cannot remove plating mod. Replace it with another plating instead.")]
    PlatingRequired,
    #[error("Not enough items: requested {requested}, have {available}")]
    InsufficientQuantity { requested: u32, available: u32 },
}

/// Two lines stack when id, side and the set of mods match
pub fn same_configuration(a: &CharacterItem, b: &CharacterItem) -> bool {
    if a.id != b.id || a.side != b.side {
        return false;
    }
    let mods_a: HashSet<&str> = a.mods.iter().map(String::as_str).collect();
    let mods_b: HashSet<&str> = b.mods.iter().map(String::as_str).collect();
    mods_a == mods_b
}

/// Add a line, stacking onto a matching configuration
pub fn add_item(items: &[CharacterItem], new_item: CharacterItem) -> Vec<CharacterItem> {
    let mut items = items.to_vec();
    match items.iter_mut().find(|item| same_configuration(item, &new_item)) {
        Some(existing) => existing.quantity += new_item.quantity,
        None => items.push(new_item),
    }
    items
}

/// Take `quantity` from the matching stack; the stack goes away at 0
pub fn remove_item(items: &[CharacterItem], target: &CharacterItem, quantity: u32) -> Vec<CharacterItem> {
    let mut items = items.to_vec();
    if let Some(index) = items.iter().position(|item| same_configuration(item, target)) {
        let remaining = items[index].quantity.saturating_sub(quantity);
        if remaining == 0 {
            items.remove(index);
        } else {
            items[index].quantity = remaining;
        }
    }
    items
}

/// Consume `amount` units of an id across its stacks, in inventory order
pub fn consume_by_id(items: &[CharacterItem], id: &str, amount: u32) -> Vec<CharacterItem> {
    let mut left = amount;
    let mut result = Vec::with_capacity(items.len());
    for item in items {
        if item.id == id && left > 0 {
            let taken = item.quantity.min(left);
            left -= taken;
            if item.quantity > taken {
                let mut rest = item.clone();
                rest.quantity -= taken;
                result.push(rest);
            }
        } else {
            result.push(item.clone());
        }
    }
    result
}

fn find_line<'a>(raw: &'a RawCharacter, target: &CharacterItem) -> Result<&'a CharacterItem, InventoryError> {
    raw.items
        .iter()
        .find(|item| same_configuration(item, target))
        .ok_or_else(|| InventoryError::NotInInventory(target.id.clone()))
}

fn is_robot_part_id(id: &str) -> bool {
    BodyPlan::Robot
        .parts()
        .iter()
        .filter_map(|part| robot_part_item_id(*part))
        .any(|part_id| part_id == id)
}

fn mod_slot<D: ItemDatabase + ?Sized>(db: &D, mod_id: &str) -> Option<ModSlot> {
    db.get_item(mod_id)
        .and_then(|record| record.modification.as_ref())
        .map(|stats| stats.slot)
}

/// Mods with `mod_id` replacing any mod already in the same slot
fn with_mod_in_slot<D: ItemDatabase + ?Sized>(db: &D, mods: &[String], mod_id: &str, slot: ModSlot) -> Vec<String> {
    let mut mods: Vec<String> = mods
        .iter()
        .filter(|existing| mod_slot(db, existing) != Some(slot))
        .cloned()
        .collect();
    mods.push(mod_id.to_string());
    mods
}

/// Fit a mod to one unit of an inventory line
///
/// The modded unit splits off into its own stack. Plating fitted to one robot
/// part is fitted to every robot part.
pub fn apply_mod<D: ItemDatabase + ?Sized>(
    db: &D,
    raw: &RawCharacter,
    target: &CharacterItem,
    mod_id: &str,
) -> Result<CharacterPatch, InventoryError> {
    let line = find_line(raw, target)?;
    let item = db
        .get_item(&line.id)
        .ok_or_else(|| InventoryError::UnknownItem(line.id.clone()))?;
    if !item.is_moddable() {
        return Err(InventoryError::NotModdable(line.id.clone()));
    }
    let slot = mod_slot(db, mod_id).ok_or_else(|| InventoryError::NotAMod(mod_id.to_string()))?;

    let mut modded = line.clone();
    modded.quantity = 1;
    modded.mods = with_mod_in_slot(db, &line.mods, mod_id, slot);

    let mut items = remove_item(&raw.items, line, 1);
    items = add_item(&items, modded);

    if item.category == ItemCategory::RobotPart && slot == ModSlot::RobotPlating {
        for other in items.iter_mut().filter(|i| i.id != line.id && is_robot_part_id(&i.id)) {
            other.mods = with_mod_in_slot(db, &other.mods, mod_id, slot);
        }
    }

    tracing::debug!(item = %line.id, mod_id, "mod applied");
    Ok(CharacterPatch::items(items))
}

/// Take a mod off one unit of an inventory line
pub fn remove_mod<D: ItemDatabase + ?Sized>(
    db: &D,
    raw: &RawCharacter,
    target: &CharacterItem,
    mod_id: &str,
) -> Result<CharacterPatch, InventoryError> {
    let line = find_line(raw, target)?;
    if !line.mods.iter().any(|m| m == mod_id) {
        return Err(InventoryError::ModNotApplied);
    }
    if is_robot_part_id(&line.id) && mod_slot(db, mod_id) == Some(ModSlot::RobotPlating) {
        return Err(InventoryError::PlatingRequired);
    }

    let mut stripped = line.clone();
    stripped.quantity = 1;
    stripped.mods.retain(|m| m != mod_id);

    let items = remove_item(&raw.items, line, 1);
    Ok(CharacterPatch::items(add_item(&items, stripped)))
}

/// Equip or unequip an apparel line
///
/// Equipping unequips every other worn piece it conflicts with.
pub fn toggle_equip<D: ItemDatabase + ?Sized>(
    db: &D,
    raw: &RawCharacter,
    target: &CharacterItem,
) -> Result<CharacterPatch, InventoryError> {
    let line = find_line(raw, target)?;
    let item = db
        .get_item(&line.id)
        .ok_or_else(|| InventoryError::UnknownItem(line.id.clone()))?;
    if item.item_type() != ItemType::Apparel {
        return Err(InventoryError::NotEquippable);
    }

    if line.equipped {
        if db.is_unacquirable(&line.id) {
            return Err(InventoryError::Unacquirable { action: "unequip" });
        }
        let items = raw
            .items
            .iter()
            .map(|i| {
                let mut i = i.clone();
                if same_configuration(&i, line) {
                    i.equipped = false;
                }
                i
            })
            .collect();
        return Ok(CharacterPatch::items(items));
    }

    let origin = raw.origin();
    let is_robot_part = item.category == ItemCategory::RobotPart;
    if is_robot_part && !origin.is_robot() {
        return Err(InventoryError::RobotPartsOnly);
    }
    if !is_robot_part && origin.needs_specialized_armor {
        return Err(InventoryError::SpecializedArmorOnly);
    }

    let items = raw
        .items
        .iter()
        .map(|i| {
            let mut i = i.clone();
            if same_configuration(&i, line) {
                i.equipped = true;
            } else if i.equipped && has_apparel_conflict(db, line, &i) {
                tracing::debug!(item = %i.id, replaced_by = %line.id, "unequipped conflicting apparel");
                i.equipped = false;
            }
            i
        })
        .collect();
    Ok(CharacterPatch::items(items))
}

/// Sell units of a line for caps, `floor(quantity * unit_price)`
pub fn sell_item<D: ItemDatabase + ?Sized>(
    db: &D,
    raw: &RawCharacter,
    target: &CharacterItem,
    quantity: u32,
    unit_price: f64,
) -> Result<CharacterPatch, InventoryError> {
    if db.is_unacquirable(&target.id) {
        return Err(InventoryError::Unacquirable { action: "sell" });
    }
    let line = find_line(raw, target)?;
    if quantity > line.quantity {
        return Err(InventoryError::InsufficientQuantity {
            requested: quantity,
            available: line.quantity,
        });
    }
    let total = (quantity as f64 * unit_price).floor() as i32;
    Ok(CharacterPatch {
        caps: Some(raw.caps + total),
        items: Some(remove_item(&raw.items, line, quantity)),
        ..Default::default()
    })
}

/// Unit sale price of a line: its cost after mods
pub fn unit_value<D: ItemDatabase + ?Sized>(db: &D, line: &CharacterItem) -> Option<i32> {
    ModEffectResolver::new(db)
        .resolve_item(line)
        .map(|resolved| resolved.item.cost)
}

/// Share of an item's value paid out by a trader
pub const TRADE_VALUE_RATE: f64 = 0.7;

/// Price a trader pays for one unit of a line, rounded to two decimals
pub fn trade_value<D: ItemDatabase + ?Sized>(db: &D, line: &CharacterItem) -> Option<f64> {
    unit_value(db, line).map(|cost| (cost as f64 * TRADE_VALUE_RATE * 100.0).round() / 100.0)
}

/// Drop a whole line
pub fn delete_item<D: ItemDatabase + ?Sized>(
    db: &D,
    raw: &RawCharacter,
    target: &CharacterItem,
) -> Result<CharacterPatch, InventoryError> {
    if db.is_unacquirable(&target.id) {
        return Err(InventoryError::Unacquirable { action: "delete" });
    }
    find_line(raw, target)?;
    let items = raw
        .items
        .iter()
        .filter(|item| !same_configuration(item, target))
        .cloned()
        .collect();
    Ok(CharacterPatch::items(items))
}

/// Switch origin, keeping gear consistent with the new body plan
///
/// Moving to or from an origin that needs specialized armor unequips all
/// apparel. A robot origin gets its body parts (granted with standard plating
/// when missing) and equips them; other origins lose any robot parts.
pub fn change_origin<D: ItemDatabase + ?Sized>(
    db: &D,
    raw: &RawCharacter,
    origin: Option<OriginId>,
) -> CharacterPatch {
    let previous = raw.origin();
    let next = Origin::of(origin);
    let mut items = raw.items.clone();

    if previous.id != next.id && (previous.needs_specialized_armor || next.needs_specialized_armor) {
        for item in items.iter_mut().filter(|i| i.equipped) {
            if db.get_item(&item.id).is_some_and(|r| r.item_type() == ItemType::Apparel) {
                item.equipped = false;
            }
        }
    }

    if next.is_robot() {
        for part_id in next.body_parts().iter().filter_map(|p| robot_part_item_id(*p)) {
            match items.iter_mut().find(|i| i.id == part_id) {
                Some(existing) => existing.equipped = true,
                None => items.push(
                    CharacterItem::new(part_id)
                        .with_mods([DEFAULT_PLATING_MOD])
                        .equipped(),
                ),
            }
        }
    } else {
        items.retain(|i| !is_robot_part_id(&i.id));
    }

    CharacterPatch {
        origin: Some(origin),
        items: Some(items),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::CoverageTag;
    use crate::database::ItemCatalog;
    use crate::item::fixtures;
    use crate::types::Side;

    fn catalog() -> ItemCatalog {
        let mut robot_body = fixtures::apparel("robotPartBody", vec![CoverageTag::RobotPartBody], 1, 1, 0);
        robot_body.category = ItemCategory::RobotPart;
        let mut robot_arms = fixtures::apparel("robotPartArms", vec![CoverageTag::RobotPartArms], 1, 1, 0);
        robot_arms.category = ItemCategory::RobotPart;
        ItemCatalog::from_items([
            fixtures::weapon("pistol", ItemCategory::SmallGuns, 3),
            fixtures::apparel("vest", vec![CoverageTag::Torso], 1, 1, 0),
            fixtures::apparel("chest", vec![CoverageTag::Torso], 2, 2, 0),
            fixtures::apparel("glove", vec![CoverageTag::Arm], 1, 0, 0),
            robot_body,
            robot_arms,
            fixtures::ammo("ammo10mm"),
            fixtures::modification("modHeavyBarrel", ModSlot::Barrel, 1.0, 10, &["damageAdd:1"]),
            fixtures::modification("modShortBarrel", ModSlot::Barrel, 0.5, 5, &["rangeDecrease:1"]),
            fixtures::modification("modScope", ModSlot::Sight, 0.5, 25, &["rangeIncrease:1"]),
            fixtures::modification(DEFAULT_PLATING_MOD, ModSlot::RobotPlating, 0.0, 0, &[]),
            fixtures::modification("modRobotPlatingHeavy", ModSlot::RobotPlating, 2.0, 30, &["physicalResAdd:2"]),
        ])
    }

    #[test]
    fn test_same_configuration_ignores_mod_order() {
        let a = CharacterItem::new("pistol").with_mods(["modScope", "modHeavyBarrel"]);
        let b = CharacterItem::new("pistol").with_mods(["modHeavyBarrel", "modScope"]);
        let c = CharacterItem::new("pistol").with_mods(["modScope"]);
        assert!(same_configuration(&a, &b));
        assert!(!same_configuration(&a, &c));
        assert!(!same_configuration(
            &CharacterItem::new("glove").with_side(Side::Left),
            &CharacterItem::new("glove").with_side(Side::Right)
        ));
    }

    #[test]
    fn test_add_and_remove_stack() {
        let items = add_item(&[], CharacterItem::new("ammo10mm").with_quantity(5));
        let items = add_item(&items, CharacterItem::new("ammo10mm").with_quantity(3));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 8);

        let items = remove_item(&items, &CharacterItem::new("ammo10mm"), 8);
        assert!(items.is_empty());
    }

    #[test]
    fn test_consume_across_stacks() {
        let items = vec![
            CharacterItem::new("ammo10mm").with_quantity(2),
            CharacterItem::new("vest"),
            CharacterItem::new("ammo10mm").with_quantity(5),
        ];
        let items = consume_by_id(&items, "ammo10mm", 4);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "vest");
        assert_eq!(items[1].quantity, 3);
    }

    #[test]
    fn test_apply_mod_splits_stack_and_replaces_slot() {
        let db = catalog();
        let raw = RawCharacter {
            items: vec![CharacterItem::new("pistol").with_quantity(2).with_mods(["modShortBarrel"])],
            ..Default::default()
        };
        let patch = apply_mod(&db, &raw, &raw.items[0], "modHeavyBarrel").unwrap();
        let items = patch.items.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].quantity, 1);
        assert_eq!(items[0].mods, vec!["modShortBarrel".to_string()]);
        assert_eq!(items[1].mods, vec!["modHeavyBarrel".to_string()]);
    }

    #[test]
    fn test_apply_mod_rejections() {
        let db = catalog();
        let raw = RawCharacter {
            items: vec![CharacterItem::new("pistol"), CharacterItem::new("ammo10mm")],
            ..Default::default()
        };
        assert_eq!(
            apply_mod(&db, &raw, &raw.items[0], "vest"),
            Err(InventoryError::NotAMod("vest".to_string()))
        );
        assert_eq!(
            apply_mod(&db, &raw, &raw.items[1], "modScope"),
            Err(InventoryError::NotModdable("ammo10mm".to_string()))
        );
        assert_eq!(
            apply_mod(&db, &raw, &CharacterItem::new("vest"), "modScope"),
            Err(InventoryError::NotInInventory("vest".to_string()))
        );
    }

    #[test]
    fn test_plating_syncs_across_robot_parts() {
        let db = catalog();
        let raw = RawCharacter {
            origin: Some(OriginId::MrHandy),
            items: vec![
                CharacterItem::new("robotPartBody").with_mods([DEFAULT_PLATING_MOD]).equipped(),
                CharacterItem::new("robotPartArms").with_mods([DEFAULT_PLATING_MOD]).equipped(),
            ],
            ..Default::default()
        };
        let patch = apply_mod(&db, &raw, &raw.items[0], "modRobotPlatingHeavy").unwrap();
        for item in patch.items.unwrap() {
            assert_eq!(item.mods, vec!["modRobotPlatingHeavy".to_string()]);
        }
    }

    #[test]
    fn test_remove_mod() {
        let db = catalog();
        let raw = RawCharacter {
            items: vec![
                CharacterItem::new("pistol").with_mods(["modScope"]),
                CharacterItem::new("robotPartBody").with_mods([DEFAULT_PLATING_MOD]),
            ],
            ..Default::default()
        };
        let items = remove_mod(&db, &raw, &raw.items[0], "modScope").unwrap().items.unwrap();
        assert!(items.iter().any(|i| i.id == "pistol" && i.mods.is_empty()));

        assert_eq!(
            remove_mod(&db, &raw, &raw.items[0], "modHeavyBarrel"),
            Err(InventoryError::ModNotApplied)
        );
        assert_eq!(
            remove_mod(&db, &raw, &raw.items[1], DEFAULT_PLATING_MOD),
            Err(InventoryError::PlatingRequired)
        );
    }

    #[test]
    fn test_equip_unequips_conflicts() {
        let db = catalog();
        let raw = RawCharacter {
            items: vec![
                CharacterItem::new("vest").equipped(),
                CharacterItem::new("chest"),
                CharacterItem::new("glove").with_side(Side::Left).equipped(),
            ],
            ..Default::default()
        };
        let items = toggle_equip(&db, &raw, &raw.items[1]).unwrap().items.unwrap();
        assert!(!items[0].equipped);
        assert!(items[1].equipped);
        assert!(items[2].equipped);

        let items = toggle_equip(&db, &raw, &raw.items[0]).unwrap().items.unwrap();
        assert!(!items[0].equipped);
    }

    #[test]
    fn test_equip_rejections() {
        let db = catalog();
        let raw = RawCharacter {
            items: vec![CharacterItem::new("pistol"), CharacterItem::new("robotPartBody")],
            ..Default::default()
        };
        assert_eq!(toggle_equip(&db, &raw, &raw.items[0]), Err(InventoryError::NotEquippable));
        assert_eq!(toggle_equip(&db, &raw, &raw.items[1]), Err(InventoryError::RobotPartsOnly));

        let robot = RawCharacter {
            origin: Some(OriginId::MrHandy),
            items: vec![CharacterItem::new("vest"), CharacterItem::new("robotPartBody").equipped()],
            ..Default::default()
        };
        assert_eq!(
            toggle_equip(&db, &robot, &robot.items[0]),
            Err(InventoryError::SpecializedArmorOnly)
        );
        assert_eq!(
            toggle_equip(&db, &robot, &robot.items[1]),
            Err(InventoryError::Unacquirable { action: "unequip" })
        );
    }

    #[test]
    fn test_sell_adds_caps() {
        let db = catalog();
        let raw = RawCharacter {
            caps: 10,
            items: vec![CharacterItem::new("ammo10mm").with_quantity(10)],
            ..Default::default()
        };
        let patch = sell_item(&db, &raw, &raw.items[0], 4, 1.5).unwrap();
        assert_eq!(patch.caps, Some(16));
        assert_eq!(patch.items.unwrap()[0].quantity, 6);

        assert_eq!(
            sell_item(&db, &raw, &raw.items[0], 11, 1.0),
            Err(InventoryError::InsufficientQuantity { requested: 11, available: 10 })
        );
    }

    #[test]
    fn test_unit_value_includes_mods() {
        let db = catalog();
        let line = CharacterItem::new("pistol").with_mods(["modHeavyBarrel"]);
        assert_eq!(unit_value(&db, &line), Some(60));
        assert_eq!(unit_value(&db, &CharacterItem::new("ghost")), None);
    }

    #[test]
    fn test_trade_value_rounds_to_cents() {
        let db = catalog();
        let line = CharacterItem::new("pistol").with_mods(["modHeavyBarrel"]);
        assert_eq!(trade_value(&db, &line), Some(42.0));
        assert_eq!(trade_value(&db, &CharacterItem::new("ammo10mm")), Some(0.7));
        assert_eq!(trade_value(&db, &CharacterItem::new("ghost")), None);

        let raw = RawCharacter {
            items: vec![line.clone()],
            ..Default::default()
        };
        let price = trade_value(&db, &line).unwrap();
        let patch = sell_item(&db, &raw, &line, 1, price).unwrap();
        assert_eq!(patch.caps, Some(42));
    }

    #[test]
    fn test_unacquirable_cannot_be_deleted() {
        let db = catalog();
        let raw = RawCharacter {
            items: vec![CharacterItem::new("weaponUnarmedStrike"), CharacterItem::new("vest")],
            ..Default::default()
        };
        assert_eq!(
            delete_item(&db, &raw, &raw.items[0]),
            Err(InventoryError::Unacquirable { action: "delete" })
        );
        let items = delete_item(&db, &raw, &raw.items[1]).unwrap().items.unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_change_origin_grants_and_strips_robot_parts() {
        let db = catalog();
        let raw = RawCharacter {
            items: vec![CharacterItem::new("vest").equipped()],
            ..Default::default()
        };
        let robot = raw.with_patch(change_origin(&db, &raw, Some(OriginId::MrHandy)));
        assert!(!robot.items[0].equipped);
        assert_eq!(robot.items.len(), 5);
        assert!(robot.items[1..].iter().all(|i| i.equipped && i.mods == vec![DEFAULT_PLATING_MOD.to_string()]));

        let human = robot.with_patch(change_origin(&db, &robot, Some(OriginId::Survivor)));
        assert_eq!(human.items.len(), 1);
        assert_eq!(human.origin, Some(OriginId::Survivor));
    }
}
