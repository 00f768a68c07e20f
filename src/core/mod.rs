//! Core types, configuration, and errors

pub mod config;
pub mod error;
pub mod types;

pub use config::{CombatConfig, SkillGainPolicy};
pub use error::{DuskError, Result, ValidationError};
pub use types::{Ability, ActorHandle, Alignment, AttackKind, Class, RoomId, Tick};
