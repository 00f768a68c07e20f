//! Skill proficiency table and training
//!
//! Raw skill runs 0-100. Bonuses come from a banded tier lookup, so small
//! training gains only matter when they cross a band boundary. Improvement
//! chance tapers toward the class cap; the curve shape is a config policy.

use ahash::AHashMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::SkillGainPolicy;
use crate::core::types::Class;

/// Trainable skill families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillKind {
    Sword,
    Dagger,
    Bludgeon,
    Polearm,
    Unarmed,
    Shield,
}

/// Map a raw skill level (0-100) to its proficiency tier bonus
///
/// Monotonic by construction: higher skill never yields a lower tier.
pub fn proficiency_tier(skill: u32) -> i32 {
    match skill {
        0..=20 => 0,
        21..=40 => 1,
        41..=60 => 2,
        61..=80 => 3,
        81..=95 => 4,
        _ => 5,
    }
}

/// Per-actor skill proficiency table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillTable {
    skills: AHashMap<SkillKind, u32>,
}

impl SkillTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw skill level, zero if never practiced
    pub fn level(&self, kind: SkillKind) -> u32 {
        self.skills.get(&kind).copied().unwrap_or(0)
    }

    /// Proficiency tier for a skill family
    pub fn tier(&self, kind: SkillKind) -> i32 {
        proficiency_tier(self.level(kind))
    }

    /// Set a raw skill level directly (spawn loadouts, restores)
    pub fn set_level(&mut self, kind: SkillKind, level: u32) {
        self.skills.insert(kind, level.min(100));
    }

    /// Roll for improvement after the skill's success condition fired
    ///
    /// Chance tapers linearly toward the class cap and is zero at it.
    pub fn train_on_success(
        &mut self,
        kind: SkillKind,
        class: Class,
        policy: &SkillGainPolicy,
        rng: &mut impl Rng,
    ) -> bool {
        let cap = class.skill_cap();
        let current = self.level(kind);
        if current >= cap {
            return false;
        }

        let taper = 1.0 - current as f64 / cap as f64;
        if rng.gen_bool((policy.gain_chance * taper).clamp(0.0, 1.0)) {
            self.skills
                .insert(kind, (current + policy.gain_amount).min(cap));
            true
        } else {
            false
        }
    }

    /// Roll for decay after the skill's failure condition fired
    pub fn decay_on_failure(
        &mut self,
        kind: SkillKind,
        policy: &SkillGainPolicy,
        rng: &mut impl Rng,
    ) -> bool {
        let current = self.level(kind);
        if current == 0 {
            return false;
        }

        if rng.gen_bool(policy.miss_decay_chance.clamp(0.0, 1.0)) {
            self.skills.insert(kind, current - 1);
            true
        } else {
            false
        }
    }
}
