//! Roll session errors

use thiserror::Error;

/// A rejected dice session operation; the session and character are unchanged
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RollError {
    #[error("Select at least one die!")]
    NoDiceSelected,
    #[error("Not enough luck! Need {required}, have {available}")]
    InsufficientLuck { required: i32, available: i32 },
    #[error("Not enough ammo! Need {required}, have {available}")]
    InsufficientAmmo { required: u32, available: u32 },
    #[error("The session is closed")]
    SessionClosed,
    #[error("Roll the dice first")]
    NotRolled,
    #[error("Cannot change this after the first roll")]
    AlreadyRolled,
    #[error("No die at index {0}")]
    InvalidDie(usize),
    #[error("Item is not a weapon: {0}")]
    NotAWeapon(String),
    #[error("This weapon has no burst effect")]
    BurstUnavailable,
    #[error("At most {max} extra hits available, {requested} requested")]
    BurstExceedsLimit { requested: u32, max: u32 },
    #[error("Hit location cannot be rerolled with this weapon")]
    HitLocationLocked,
}
