//! StatSource - Trait and implementations for stat providers

mod base_stats;
mod gear;
mod origin_traits;

pub use base_stats::BaseStatsSource;
pub use gear::GearSource;
pub use origin_traits::OriginTraitSource;

use crate::character::RawCharacter;
use crate::database::ItemDatabase;
use crate::item::ModEffectResolver;
use crate::stat_block::StatAccumulator;

/// Trait for anything that contributes to DerivedStats
pub trait StatSource: Send + Sync {
    /// Identifier for this source
    fn id(&self) -> &str;

    /// Priority for application order (higher = applied later)
    /// Default priority is 0.
    /// Suggested priorities:
    /// - Base stats: -100
    /// - Gear: 0
    /// - Origin traits: 200
    fn priority(&self) -> i32 {
        0
    }

    /// Apply this source's contribution to the accumulator
    fn apply(&self, stats: &mut StatAccumulator);
}

/// Every source a character's snapshot produces
///
/// Inventory lines whose item is missing from the database contribute nothing.
pub fn character_sources<D: ItemDatabase + ?Sized>(raw: &RawCharacter, db: &D) -> Vec<Box<dyn StatSource>> {
    let origin = raw.origin();
    let resolver = ModEffectResolver::new(db);

    let mut sources: Vec<Box<dyn StatSource>> = Vec::with_capacity(raw.items.len() + 2);
    sources.push(Box::new(BaseStatsSource::from_character(raw)));

    for line in &raw.items {
        match resolver.resolve_item(line) {
            Some(item) => sources.push(Box::new(GearSource::new(line.clone(), item, origin.is_robot()))),
            None => tracing::warn!(item = %line.id, "inventory item not in database, skipped"),
        }
    }

    sources.push(Box::new(OriginTraitSource::new(origin)));
    sources
}
