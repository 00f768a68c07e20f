use thiserror::Error;

use crate::core::types::ActorHandle;

#[derive(Error, Debug)]
pub enum DuskError {
    #[error("Stale or unknown actor handle: {0:?}")]
    StaleHandle(ActorHandle),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Rejected request that performed no mutation
///
/// Reported synchronously to the acting player. Distinct from invariant
/// violations, which are operator-log-only and degrade to no-ops.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Slot is already occupied")]
    SlotOccupied,

    #[error("Item cannot be worn in that slot")]
    WrongSlot,

    #[error("Item is forbidden to your alignment")]
    AlignmentForbidden,

    #[error("Item is forbidden to your class")]
    ClassForbidden,

    #[error("Target is not in the same location")]
    NotSameLocation,

    #[error("Nothing equipped in that slot")]
    SlotEmpty,

    #[error("You are in no position to do that")]
    CannotFight,

    #[error("Not while fighting")]
    InCombat,
}

pub type Result<T> = std::result::Result<T, DuskError>;
