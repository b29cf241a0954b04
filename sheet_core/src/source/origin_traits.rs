//! OriginTraitSource - Intrinsic traits of the character's origin

use crate::character::Origin;
use crate::source::StatSource;
use crate::stat_block::StatAccumulator;
use crate::types::DamageChannel;

/// Origin traits that override gear
pub struct OriginTraitSource {
    pub origin: Origin,
}

impl OriginTraitSource {
    pub fn new(origin: Origin) -> Self {
        OriginTraitSource { origin }
    }
}

impl StatSource for OriginTraitSource {
    fn id(&self) -> &str {
        "origin_traits"
    }

    fn priority(&self) -> i32 {
        200 // After gear, so immunity wins
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        if self.origin.radiation_immune {
            stats.grant_immunity(DamageChannel::Radiation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{BodyPart, BodyPlan};
    use crate::character::OriginId;
    use crate::stat_block::Resistance;

    #[test]
    fn test_immunity_overrides_gear() {
        let mut acc = StatAccumulator::new();
        acc.open_locations(BodyPlan::Humanoid.parts());
        acc.offer_resistance(BodyPart::Head, DamageChannel::Radiation, 3);

        OriginTraitSource::new(Origin::of(Some(OriginId::Ghoul))).apply(&mut acc);

        for map in acc.locations.values() {
            assert_eq!(map.radiation, Resistance::Immune);
            assert_eq!(map.physical, Resistance::Value(0));
        }
    }

    #[test]
    fn test_plain_origin_changes_nothing() {
        let mut acc = StatAccumulator::new();
        acc.open_locations(BodyPlan::Humanoid.parts());
        OriginTraitSource::new(Origin::of(None)).apply(&mut acc);
        assert!(acc.locations.values().all(|m| m.radiation == Resistance::Value(0)));
    }
}
