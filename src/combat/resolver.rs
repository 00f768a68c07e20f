//! Attack roll and damage dice math
//!
//! Pure functions over actor state; the orchestration (hooks, damage
//! application, feedback) lives on `crate::world::World::resolve`.

use rand::Rng;

use crate::actor::skills::SkillKind;
use crate::actor::Actor;
use crate::affect::StatusFlags;
use crate::combat::armor::armor_class;
use crate::combat::constants::{CRITICAL_ROLL, FUMBLE_ROLL, MIN_HIT_DAMAGE, UNARMED_DICE};
use crate::core::config::CombatConfig;
use crate::core::types::AttackKind;
use crate::equip::ItemKind;

/// Outcome of the to-hit roll, before damage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitCheck {
    pub roll: u32,
    pub bonus: i32,
    pub target_ac: i32,
    pub hit: bool,
    pub critical: bool,
}

/// Weapon skill family the attacker is swinging with
pub fn weapon_family(attacker: &Actor) -> SkillKind {
    match attacker.equipment.wielded().map(|item| &item.kind) {
        Some(ItemKind::Weapon { family, .. }) => *family,
        _ => SkillKind::Unarmed,
    }
}

/// Attack kind implied by the wielded weapon
pub fn attack_kind(attacker: &Actor) -> AttackKind {
    match attacker.equipment.wielded().map(|item| &item.kind) {
        Some(ItemKind::Weapon { attack, .. }) => *attack,
        _ => AttackKind::Unarmed,
    }
}

/// Total attack bonus: ability modifier + proficiency tier + capped
/// enchantment + situational, with the total itself capped
///
/// A dazed attacker gets no benefit from the bonus; penalties still apply.
pub fn attack_bonus(
    attacker: &Actor,
    kind: AttackKind,
    situational: i32,
    config: &CombatConfig,
) -> i32 {
    let ability = attacker.ability_mod(kind.ability_for());
    let proficiency = attacker.skills.tier(weapon_family(attacker));
    let enchantment = attacker
        .equipment
        .wielded()
        .map(|item| item.enchantment.min(config.enchantment_bonus_cap))
        .unwrap_or(0);

    let mut total = ability + proficiency + enchantment + attacker.hit_bonus + situational;
    if attacker.flags.contains(StatusFlags::DAZED) {
        total = total.min(0);
    }
    total.min(config.attack_bonus_cap)
}

/// Roll 1d20 and decide hit or miss against a freshly computed AC
///
/// Natural 1 always misses and natural 20 always hits, independent of
/// bonus and armor.
pub fn check_attack(
    attacker: &Actor,
    defender: &Actor,
    kind: AttackKind,
    situational: i32,
    config: &CombatConfig,
    rng: &mut impl Rng,
) -> HitCheck {
    let roll = rng.gen_range(1..=20);
    let bonus = attack_bonus(attacker, kind, situational, config);
    let target_ac = armor_class(defender, 0, config);

    let hit = match roll {
        FUMBLE_ROLL => false,
        CRITICAL_ROLL => true,
        _ => roll as i32 + bonus >= target_ac,
    };

    HitCheck {
        roll,
        bonus,
        target_ac,
        hit,
        critical: roll == CRITICAL_ROLL,
    }
}

/// Roll damage for a landed hit
///
/// Weapon dice (unarmed fallback) + ability modifier + affect damage bonus,
/// dice doubled on a critical, floored at the minimum hit damage.
pub fn damage_roll(attacker: &Actor, kind: AttackKind, critical: bool, rng: &mut impl Rng) -> i32 {
    let dice = match attacker.equipment.wielded().map(|item| &item.kind) {
        Some(ItemKind::Weapon { dice, .. }) => *dice,
        _ => UNARMED_DICE,
    };

    let mut rolled = dice.roll(rng);
    if critical {
        rolled += dice.roll(rng);
    }

    let total = rolled + attacker.ability_mod(kind.ability_for()) + attacker.damage_bonus;
    total.max(MIN_HIT_DAMAGE)
}
