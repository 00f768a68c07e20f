//! Fixed combat rule constants
//!
//! These are rules of the system, not tuning knobs; tunables live in
//! `crate::core::config`.

use crate::equip::DamageDice;

/// Ascending armor class every actor starts from
pub const BASE_ARMOR_CLASS: i32 = 10;

/// A natural roll of this value always misses
pub const FUMBLE_ROLL: u32 = 1;

/// A natural roll of this value always hits and doubles the damage dice
pub const CRITICAL_ROLL: u32 = 20;

/// Damage dice when nothing is wielded
pub const UNARMED_DICE: DamageDice = DamageDice::new(1, 3);

/// A landed hit never deals less than this after modifiers
pub const MIN_HIT_DAMAGE: i32 = 1;
