//! Timed and permanent attribute modifiers
//!
//! An affect is exclusively owned by the actor it is attached to: created by
//! an apply call, destroyed on expiry or explicit removal. Derived attributes
//! are always recomputed from scratch, never adjusted incrementally.

pub mod modifiers;

use serde::{Deserialize, Serialize};

pub use modifiers::{apply_affect, remove_affects_from, recompute, tick_affects, StackPolicy};

/// Where an affect came from
///
/// Used for stacking decisions (a fresh casting replaces or merges with a
/// stale one from the same source) and for removal by source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AffectSource {
    Spell(u32),
    Skill(u32),
    Equipment(u32),
}

/// Which derived attribute a modifier adjusts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplyTarget {
    None,
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
    ArmorClass,
    HitBonus,
    DamageBonus,
    MaxVitality,
}

/// Status bit-flags granted by affects and equipment
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct StatusFlags(pub u32);

impl StatusFlags {
    pub const NONE: StatusFlags = StatusFlags(0);
    /// Incoming damage is halved
    pub const SANCTUARY: StatusFlags = StatusFlags(1 << 0);
    /// Attack bonus is suppressed; the bare roll decides the hit
    pub const DAZED: StatusFlags = StatusFlags(1 << 1);

    pub fn contains(self, other: StatusFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for StatusFlags {
    type Output = StatusFlags;
    fn bitor(self, rhs: StatusFlags) -> StatusFlags {
        StatusFlags(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for StatusFlags {
    fn bitor_assign(&mut self, rhs: StatusFlags) {
        self.0 |= rhs.0;
    }
}

/// A single active modifier on an actor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affect {
    pub source: AffectSource,
    pub target: ApplyTarget,
    pub modifier: i32,
    /// Ticks remaining; `None` means permanent
    pub duration: Option<u32>,
    pub flags: StatusFlags,
}

impl Affect {
    pub fn new(source: AffectSource, target: ApplyTarget, modifier: i32) -> Self {
        Self {
            source,
            target,
            modifier,
            duration: None,
            flags: StatusFlags::NONE,
        }
    }

    pub fn with_duration(mut self, ticks: u32) -> Self {
        self.duration = Some(ticks);
        self
    }

    pub fn with_flags(mut self, flags: StatusFlags) -> Self {
        self.flags = flags;
        self
    }
}
