//! Body locations - coverage tag expansion, body plans and apparel layering

use crate::character::CharacterItem;
use crate::database::ItemDatabase;
use crate::types::{ItemCategory, Side};
use serde::{Deserialize, Serialize};

/// A concrete body location that can carry damage reduction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyPart {
    Head,
    LeftArm,
    RightArm,
    Torso,
    LeftLeg,
    RightLeg,
    RobotPartSensors,
    RobotPartBody,
    RobotPartArms,
    RobotPartThrusters,
}

/// Coverage tag as written on apparel records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CoverageTag {
    Head,
    Torso,
    /// One arm: the item's side, or both when it has none
    Arm,
    /// Both arms, always
    Arms,
    Leg,
    Legs,
    RobotPartSensors,
    RobotPartBody,
    RobotPartArms,
    RobotPartThrusters,
}

/// Set of locations an origin's body has
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyPlan {
    Humanoid,
    Robot,
}

impl BodyPlan {
    pub fn parts(self) -> &'static [BodyPart] {
        match self {
            BodyPlan::Humanoid => &[
                BodyPart::Head,
                BodyPart::LeftArm,
                BodyPart::RightArm,
                BodyPart::Torso,
                BodyPart::LeftLeg,
                BodyPart::RightLeg,
            ],
            BodyPlan::Robot => &[
                BodyPart::RobotPartSensors,
                BodyPart::RobotPartBody,
                BodyPart::RobotPartArms,
                BodyPart::RobotPartThrusters,
            ],
        }
    }

    pub fn contains(self, part: BodyPart) -> bool {
        self.parts().contains(&part)
    }
}

fn paired(left: BodyPart, right: BodyPart, side: Option<Side>) -> Vec<BodyPart> {
    match side {
        Some(Side::Left) => vec![left],
        Some(Side::Right) => vec![right],
        None => vec![left, right],
    }
}

impl CoverageTag {
    /// Concrete locations this tag covers for an item worn on `side`
    pub fn locations(self, side: Option<Side>) -> Vec<BodyPart> {
        match self {
            CoverageTag::Head => vec![BodyPart::Head],
            CoverageTag::Torso => vec![BodyPart::Torso],
            CoverageTag::Arm => paired(BodyPart::LeftArm, BodyPart::RightArm, side),
            CoverageTag::Arms => vec![BodyPart::LeftArm, BodyPart::RightArm],
            CoverageTag::Leg => paired(BodyPart::LeftLeg, BodyPart::RightLeg, side),
            CoverageTag::Legs => vec![BodyPart::LeftLeg, BodyPart::RightLeg],
            CoverageTag::RobotPartSensors => vec![BodyPart::RobotPartSensors],
            CoverageTag::RobotPartBody => vec![BodyPart::RobotPartBody],
            CoverageTag::RobotPartArms => vec![BodyPart::RobotPartArms],
            CoverageTag::RobotPartThrusters => vec![BodyPart::RobotPartThrusters],
        }
    }
}

/// Expand coverage tags into concrete locations, without duplicates
pub fn map_locations(tags: &[CoverageTag], side: Option<Side>) -> Vec<BodyPart> {
    let mut locations = Vec::new();
    for tag in tags {
        for location in tag.locations(side) {
            if !locations.contains(&location) {
                locations.push(location);
            }
        }
    }
    locations
}

/// Which layer an apparel piece occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApparelLayer {
    Under,
    Over,
    Both,
}

impl ApparelLayer {
    /// Layer for an apparel category, `None` for non-apparel
    pub fn of(category: ItemCategory) -> Option<ApparelLayer> {
        use ItemCategory::*;
        match category {
            Clothing => Some(ApparelLayer::Under),
            Outfit | RobotPart | Headgear => Some(ApparelLayer::Both),
            RaiderArmor | LeatherArmor | MetalArmor | CombatArmor | SyntheticArmor
            | VaultTecSecurity => Some(ApparelLayer::Over),
            _ => None,
        }
    }

    fn clashes_with(self, other: ApparelLayer) -> bool {
        self == ApparelLayer::Both || other == ApparelLayer::Both || self == other
    }
}

/// Two apparel pieces conflict when they share a location and a layer
pub fn has_apparel_conflict<D: ItemDatabase + ?Sized>(
    db: &D,
    first: &CharacterItem,
    second: &CharacterItem,
) -> bool {
    let (Some(a), Some(b)) = (db.get_item(&first.id), db.get_item(&second.id)) else {
        return false;
    };
    let (Some(apparel_a), Some(apparel_b)) = (&a.apparel, &b.apparel) else {
        return false;
    };
    let (Some(layer_a), Some(layer_b)) = (ApparelLayer::of(a.category), ApparelLayer::of(b.category)) else {
        return false;
    };

    let locations_a = map_locations(&apparel_a.locations_covered, first.side);
    let locations_b = map_locations(&apparel_b.locations_covered, second.side);
    let overlaps = locations_a.iter().any(|loc| locations_b.contains(loc));

    overlaps && layer_a.clashes_with(layer_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::ItemCatalog;
    use crate::item::fixtures;

    #[test]
    fn test_side_agnostic_tags() {
        assert_eq!(map_locations(&[CoverageTag::Torso], Some(Side::Left)), vec![BodyPart::Torso]);
        assert_eq!(map_locations(&[CoverageTag::Head], None), vec![BodyPart::Head]);
    }

    #[test]
    fn test_plural_tags_ignore_side() {
        assert_eq!(
            map_locations(&[CoverageTag::Arms], Some(Side::Right)),
            vec![BodyPart::LeftArm, BodyPart::RightArm]
        );
        assert_eq!(
            map_locations(&[CoverageTag::Legs], None),
            vec![BodyPart::LeftLeg, BodyPart::RightLeg]
        );
    }

    #[test]
    fn test_singular_tags_follow_side() {
        assert_eq!(map_locations(&[CoverageTag::Arm], Some(Side::Left)), vec![BodyPart::LeftArm]);
        assert_eq!(map_locations(&[CoverageTag::Leg], Some(Side::Right)), vec![BodyPart::RightLeg]);
        assert_eq!(
            map_locations(&[CoverageTag::Leg], None),
            vec![BodyPart::LeftLeg, BodyPart::RightLeg]
        );
    }

    #[test]
    fn test_robot_tags_bypass_side() {
        assert_eq!(
            map_locations(&[CoverageTag::RobotPartArms], Some(Side::Left)),
            vec![BodyPart::RobotPartArms]
        );
        assert!(BodyPlan::Robot.contains(BodyPart::RobotPartThrusters));
        assert!(!BodyPlan::Humanoid.contains(BodyPart::RobotPartBody));
    }

    #[test]
    fn test_mapping_deduplicates() {
        let locations = map_locations(&[CoverageTag::Arm, CoverageTag::Arms], None);
        assert_eq!(locations, vec![BodyPart::LeftArm, BodyPart::RightArm]);
    }

    #[test]
    fn test_apparel_conflict_by_layer() {
        let mut shirt = fixtures::apparel("shirt", vec![CoverageTag::Torso, CoverageTag::Arms], 0, 0, 1);
        shirt.category = ItemCategory::Clothing;
        let vest = fixtures::apparel("vest", vec![CoverageTag::Torso], 1, 1, 0);
        let chest = fixtures::apparel("chest", vec![CoverageTag::Torso], 2, 2, 0);
        let left_glove = fixtures::apparel("glove", vec![CoverageTag::Arm], 1, 0, 0);
        let db = ItemCatalog::from_items([shirt, vest, chest, left_glove]);

        let shirt = CharacterItem::new("shirt");
        let vest = CharacterItem::new("vest");
        let chest = CharacterItem::new("chest");
        let mut glove_left = CharacterItem::new("glove");
        glove_left.side = Some(Side::Left);
        let mut glove_right = CharacterItem::new("glove");
        glove_right.side = Some(Side::Right);

        // Under + over layers stack
        assert!(!has_apparel_conflict(&db, &shirt, &vest));
        // Same layer, same location
        assert!(has_apparel_conflict(&db, &vest, &chest));
        // Same layer, different sides
        assert!(!has_apparel_conflict(&db, &glove_left, &glove_right));
    }
}
