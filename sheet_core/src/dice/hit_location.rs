//! Weighted hit location draw

use super::DiceRoller;
use crate::body::BodyPart;

/// Relative weight of each location; the torso is three times as likely
pub const HIT_LOCATION_WEIGHTS: [(BodyPart, u32); 6] = [
    (BodyPart::Head, 1),
    (BodyPart::Torso, 3),
    (BodyPart::LeftArm, 1),
    (BodyPart::RightArm, 1),
    (BodyPart::LeftLeg, 1),
    (BodyPart::RightLeg, 1),
];

/// Draw a location using [`HIT_LOCATION_WEIGHTS`]
pub fn roll_hit_location<R: DiceRoller + ?Sized>(rng: &mut R) -> BodyPart {
    let total: u32 = HIT_LOCATION_WEIGHTS.iter().map(|(_, weight)| weight).sum();
    let mut roll = rng.roll_die(total);
    for (part, weight) in HIT_LOCATION_WEIGHTS {
        if roll <= weight {
            return part;
        }
        roll -= weight;
    }
    BodyPart::Torso
}
