//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Game tick counter (simulation time unit)
pub type Tick = u64;

/// Generation-tagged handle into the actor registry
///
/// A handle is only valid while its generation matches the registry slot.
/// Reaping an actor bumps the slot generation, so stale handles held by
/// reactive code are detected and rejected instead of dereferencing a
/// half-destroyed actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorHandle {
    pub index: u32,
    pub generation: u32,
}

/// Location token for same-room validity checks
///
/// Opaque to this engine; the world/room collaborator assigns them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(pub u32);

/// The six ability scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

/// Kind of attack being resolved
///
/// All current kinds use strength for the attack bonus; the mapping lives
/// in `ability_for` so future kinds can diverge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    Unarmed,
    Slash,
    Pierce,
    Bludgeon,
}

impl AttackKind {
    /// Which ability feeds the attack bonus for this kind
    pub fn ability_for(self) -> Ability {
        match self {
            AttackKind::Unarmed
            | AttackKind::Slash
            | AttackKind::Pierce
            | AttackKind::Bludgeon => Ability::Strength,
        }
    }
}

/// Actor class, gating equipment and capping trainable skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Class {
    Warrior,
    Rogue,
    Cleric,
    Mage,
}

impl Class {
    /// Ceiling a skill can be trained to for this class
    pub fn skill_cap(self) -> u32 {
        match self {
            Class::Warrior => 95,
            Class::Rogue => 85,
            Class::Cleric => 70,
            Class::Mage => 60,
        }
    }
}

/// Moral alignment on a single axis, negative is evil
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Alignment(pub i32);

impl Alignment {
    pub const GOOD_THRESHOLD: i32 = 350;
    pub const EVIL_THRESHOLD: i32 = -350;

    pub fn is_good(self) -> bool {
        self.0 >= Self::GOOD_THRESHOLD
    }

    pub fn is_evil(self) -> bool {
        self.0 <= Self::EVIL_THRESHOLD
    }

    pub fn is_neutral(self) -> bool {
        !self.is_good() && !self.is_evil()
    }
}
