//! Shield block check and durability wear
//!
//! A block is only rolled on a hit that already landed; it negates the hit's
//! damage entirely and wears the shield down in proportion to the damage it
//! prevented. A shield worn to zero shatters and detaches.

use rand::Rng;

use crate::actor::skills::SkillKind;
use crate::actor::Actor;
use crate::core::config::CombatConfig;
use crate::equip::{EquipSlot, Item, ItemKind};

/// Outcome of a block attempt against a landed hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockResult {
    /// Damage the block prevented; zero means the hit went through
    pub prevented: i32,
    /// The shield, if this block wore it to destruction
    pub destroyed: Option<Item>,
}

impl BlockResult {
    pub fn blocked(&self) -> bool {
        self.prevented > 0
    }

    fn none() -> Self {
        Self {
            prevented: 0,
            destroyed: None,
        }
    }
}

/// Roll the defender's shield block against a landed hit
///
/// Chance is proficiency tier times the per-tier rate, so an untrained
/// defender never blocks no matter what they carry.
pub fn try_block(
    defender: &mut Actor,
    incoming: i32,
    config: &CombatConfig,
    rng: &mut impl Rng,
) -> BlockResult {
    if defender.equipment.shield().is_none() || incoming <= 0 {
        return BlockResult::none();
    }

    let tier = defender.skills.tier(SkillKind::Shield);
    let chance = (tier as f64 * config.block_chance_per_tier).clamp(0.0, 1.0);
    if chance <= 0.0 || !rng.gen_bool(chance) {
        return BlockResult::none();
    }

    let wear = (incoming as f64 * config.durability_loss_per_damage).ceil() as i32;
    let mut destroyed = None;
    if let Some(shield) = defender.equipment.get_mut(EquipSlot::Shield) {
        if let ItemKind::Shield { durability } = &mut shield.kind {
            *durability -= wear.max(1);
            if *durability <= 0 {
                destroyed = defender.equipment.unequip(EquipSlot::Shield);
            }
        }
    }

    BlockResult {
        prevented: incoming,
        destroyed,
    }
}
