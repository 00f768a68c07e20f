//! Combat configuration with documented constants
//!
//! All tunable numbers are collected here with explanations of their purpose
//! and how they interact with each other. Fixed rule constants that are not
//! meant to be tuned live in `crate::combat::constants`.

use serde::{Deserialize, Serialize};

use crate::core::error::Result;

/// Configuration for the combat and lifecycle systems
///
/// These values have been tuned against the reference threshold table.
/// Changing the lifecycle thresholds changes when actors fall over and die.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    // === LIFECYCLE THRESHOLDS ===
    /// Vitality at or below this value means death
    ///
    /// Death triggers exactly at the boundary (`<=`), never below it.
    pub dead_threshold: i32,

    /// Vitality at or below this value (but above dead) is mortally wounded
    pub mortally_wounded_threshold: i32,

    /// Vitality at or below this value (but above mortal) is incapacitated
    pub incapacitated_threshold: i32,

    /// Vitality at or below this value (but above incapacitated) is stunned
    ///
    /// Entering stunned or anything more severe forces exit from combat.
    pub stunned_threshold: i32,

    // === ABILITY CEILINGS ===
    /// Ceiling for unmodified ability scores
    ///
    /// Base scores are clamped here when an actor is registered; only
    /// magical modifiers can push a derived score past it.
    pub mortal_ability_ceiling: i32,

    /// Ceiling for ability scores after magical modifiers
    ///
    /// Recomputed derived scores are clamped here, so no stack of affects
    /// can push an ability past it.
    pub elevated_ability_ceiling: i32,

    /// Floor for ability scores after modifiers
    pub ability_floor: i32,

    // === ATTACK CAPS ===
    /// Cap on the weapon enchantment contribution to the attack roll
    pub enchantment_bonus_cap: i32,

    /// Cap on the total attack bonus after all contributions
    ///
    /// Bounds stacking exploits regardless of how bonuses are combined.
    pub attack_bonus_cap: i32,

    // === ARMOR CAPS ===
    /// Cap on the armor-class contribution of a single equipped piece
    pub per_piece_ac_cap: i32,

    /// Cap on the summed magic armor bonus across all pieces
    pub magic_ac_cap: i32,

    // === DAMAGE ===
    /// Maximum damage a single hit can inflict, applied before halving
    pub per_hit_damage_cap: i32,

    // === SHIELD BLOCK ===
    /// Block probability contributed by each shield proficiency tier
    ///
    /// Block chance = tier * this value, checked only on a landed hit.
    /// At 0.05, a tier-4 defender blocks 20% of landed hits.
    pub block_chance_per_tier: f64,

    /// Durability lost per point of damage a block prevented
    ///
    /// At 1.0 a shield that prevents 12 damage loses 12 durability.
    /// The shield is destroyed when durability reaches zero.
    pub durability_loss_per_damage: f64,

    // === SKILL PROGRESSION ===
    /// Probability policy for skill improvement and decay
    pub skill_gain: SkillGainPolicy,
}

/// Tunable skill-gain curve
///
/// The exact shape of the improvement curve is a policy decision, not a
/// fixed formula. Improvement chance tapers linearly toward the class cap:
/// chance = base_chance * (1 - skill / class_cap).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillGainPolicy {
    /// Base probability of gaining a point when the success condition fires
    pub gain_chance: f64,

    /// Points gained on a successful improvement roll
    pub gain_amount: u32,

    /// Probability of losing a point when the failure condition fires
    ///
    /// Keeps rarely-practiced techniques from staying sharp forever.
    pub miss_decay_chance: f64,
}

impl Default for SkillGainPolicy {
    fn default() -> Self {
        Self {
            gain_chance: 0.25,
            gain_amount: 1,
            miss_decay_chance: 0.02,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            dead_threshold: -11,
            mortally_wounded_threshold: -6,
            incapacitated_threshold: -3,
            stunned_threshold: 0,
            mortal_ability_ceiling: 18,
            elevated_ability_ceiling: 25,
            ability_floor: 3,
            enchantment_bonus_cap: 3,
            attack_bonus_cap: 12,
            per_piece_ac_cap: 4,
            magic_ac_cap: 5,
            per_hit_damage_cap: 100,
            block_chance_per_tier: 0.05,
            durability_loss_per_damage: 1.0,
            skill_gain: SkillGainPolicy::default(),
        }
    }
}

impl CombatConfig {
    /// Parse a config from TOML text, filling omitted fields with defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
