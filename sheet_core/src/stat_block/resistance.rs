//! Damage reduction values per channel

use crate::types::DamageChannel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Damage reduction on one channel
///
/// `Immune` orders above every finite value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resistance {
    Value(i32),
    Immune,
}

impl Resistance {
    pub fn is_immune(self) -> bool {
        self == Resistance::Immune
    }

    /// Finite value, `None` when immune
    pub fn value(self) -> Option<i32> {
        match self {
            Resistance::Value(v) => Some(v),
            Resistance::Immune => None,
        }
    }
}

impl Default for Resistance {
    fn default() -> Self {
        Resistance::Value(0)
    }
}

impl fmt::Display for Resistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resistance::Value(v) => write!(f, "{}", v),
            Resistance::Immune => write!(f, "∞"),
        }
    }
}

/// Damage reduction at one location, one value per channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResistanceMap {
    pub physical: Resistance,
    pub energy: Resistance,
    pub radiation: Resistance,
}

impl ResistanceMap {
    pub fn get(&self, channel: DamageChannel) -> Resistance {
        match channel {
            DamageChannel::Physical => self.physical,
            DamageChannel::Energy => self.energy,
            DamageChannel::Radiation => self.radiation,
        }
    }

    fn slot(&mut self, channel: DamageChannel) -> &mut Resistance {
        match channel {
            DamageChannel::Physical => &mut self.physical,
            DamageChannel::Energy => &mut self.energy,
            DamageChannel::Radiation => &mut self.radiation,
        }
    }

    /// Keep the higher of the current and offered value
    pub fn raise(&mut self, channel: DamageChannel, value: Resistance) {
        let slot = self.slot(channel);
        *slot = (*slot).max(value);
    }

    /// Overwrite a channel regardless of its current value
    pub fn force(&mut self, channel: DamageChannel, value: Resistance) {
        *self.slot(channel) = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immune_beats_any_value() {
        assert!(Resistance::Immune > Resistance::Value(i32::MAX));
        assert!(Resistance::Value(5) > Resistance::Value(2));
    }

    #[test]
    fn test_raise_keeps_max() {
        let mut map = ResistanceMap::default();
        map.raise(DamageChannel::Physical, Resistance::Value(2));
        map.raise(DamageChannel::Physical, Resistance::Value(5));
        map.raise(DamageChannel::Physical, Resistance::Value(3));
        assert_eq!(map.physical, Resistance::Value(5));
        assert_eq!(map.energy, Resistance::Value(0));
    }

    #[test]
    fn test_force_overrides() {
        let mut map = ResistanceMap::default();
        map.raise(DamageChannel::Radiation, Resistance::Value(4));
        map.force(DamageChannel::Radiation, Resistance::Immune);
        assert!(map.get(DamageChannel::Radiation).is_immune());
        assert_eq!(map.get(DamageChannel::Radiation).value(), None);
    }
}
