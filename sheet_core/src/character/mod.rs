//! Character model - raw snapshot, origins, store and inventory operations

pub mod inventory;
mod origin;
mod raw;
mod store;

pub use inventory::InventoryError;
pub use origin::{constants as origin_constants, robot_part_item_id, CarryWeightRule, Origin, OriginId};
pub use raw::{adjust_current_hp, CharacterItem, CharacterPatch, RawCharacter};
pub use store::{CharacterStore, MemoryStore};
