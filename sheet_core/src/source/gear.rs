//! GearSource - Weight, carry bonus and damage reduction from inventory

use crate::body::map_locations;
use crate::character::CharacterItem;
use crate::item::ModifiedItem;
use crate::source::StatSource;
use crate::stat_block::StatAccumulator;
use crate::types::{DamageChannel, ItemCategory};

/// One inventory line, after mod resolution
pub struct GearSource {
    pub line: CharacterItem,
    pub item: ModifiedItem,
    /// Whether the wearer's origin has a robot body
    pub wearer_is_robot: bool,
}

impl GearSource {
    pub fn new(line: CharacterItem, item: ModifiedItem, wearer_is_robot: bool) -> Self {
        GearSource {
            line,
            item,
            wearer_is_robot,
        }
    }

    fn apply_apparel(&self, stats: &mut StatAccumulator) {
        let Some(apparel) = self.item.apparel() else {
            return;
        };
        stats.carry_weight_bonus += apparel.carry_weight_bonus;

        if self.item.item.category == ItemCategory::RobotPart && !self.wearer_is_robot {
            tracing::debug!(item = %self.line.id, "robot part on a non-robot origin, no damage reduction");
            return;
        }

        for part in map_locations(&apparel.locations_covered, self.line.side) {
            for channel in DamageChannel::all() {
                // Locations outside the body plan are dropped by the accumulator
                stats.offer_resistance(part, *channel, apparel.resistance(*channel));
            }
        }
    }
}

impl StatSource for GearSource {
    fn id(&self) -> &str {
        &self.line.id
    }

    fn priority(&self) -> i32 {
        0 // Gear applies at default priority
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        // Every line weighs, equipped or not
        stats.current_weight += self.item.item.weight * self.line.quantity as f64;

        if self.line.equipped {
            self.apply_apparel(stats);
        }
    }
}
