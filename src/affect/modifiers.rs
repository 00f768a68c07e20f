//! Recompute-from-scratch modifier folding
//!
//! Every apply/remove/expiry resets derived attributes to base and re-folds
//! equipment modifiers, then timed affects, in that fixed order. The O(n)
//! cost is the correctness baseline: it is what keeps derived attributes
//! equal to base plus the sum of active modifiers after any sequence of
//! changes.

use crate::actor::Actor;
use crate::affect::{Affect, AffectSource, ApplyTarget, StatusFlags};
use crate::core::config::CombatConfig;

/// Modifiers beyond this magnitude are treated as corrupt and skipped
const MODIFIER_SANITY_LIMIT: i32 = 1_000;

/// How a fresh affect combines with an existing one from the same source
///
/// Chosen by the caller per effect family: a fresh stealth replaces a stale
/// one, stun ticks add up, and a refreshed ward merges durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackPolicy {
    Replace,
    Sum,
    AverageDuration,
}

/// Attach an affect to an actor under a stacking policy, then recompute
pub fn apply_affect(
    actor: &mut Actor,
    affect: Affect,
    policy: StackPolicy,
    config: &CombatConfig,
) {
    match policy {
        StackPolicy::Replace => {
            actor.affects.retain(|a| a.source != affect.source);
            actor.affects.push(affect);
        }
        StackPolicy::Sum => {
            actor.affects.push(affect);
        }
        StackPolicy::AverageDuration => {
            if let Some(existing) = actor
                .affects
                .iter_mut()
                .find(|a| a.source == affect.source && a.target == affect.target)
            {
                existing.duration = match (existing.duration, affect.duration) {
                    (Some(old), Some(new)) => Some((old + new) / 2),
                    (old, new) => new.or(old),
                };
                existing.modifier = affect.modifier;
                existing.flags = affect.flags;
            } else {
                actor.affects.push(affect);
            }
        }
    }
    recompute(actor, config);
}

/// Remove every affect from a source, then recompute
pub fn remove_affects_from(actor: &mut Actor, source: AffectSource, config: &CombatConfig) {
    let before = actor.affects.len();
    actor.affects.retain(|a| a.source != source);
    if actor.affects.len() != before {
        recompute(actor, config);
    }
}

/// Age timed affects one tick, expiring those that run out
///
/// Returns the expired affects so callers can report wear-off downstream.
pub fn tick_affects(actor: &mut Actor, config: &CombatConfig) -> Vec<Affect> {
    let mut expired = Vec::new();
    actor.affects.retain_mut(|affect| match affect.duration {
        Some(0) | Some(1) => {
            expired.push(affect.clone());
            false
        }
        Some(remaining) => {
            affect.duration = Some(remaining - 1);
            true
        }
        None => true,
    });

    if !expired.is_empty() {
        recompute(actor, config);
    }
    expired
}

/// Reset derived attributes to base and re-fold all active modifiers
///
/// Fold order is fixed for determinism: equipment first, timed affects
/// second. Each result is clamped into its valid range afterwards.
pub fn recompute(actor: &mut Actor, config: &CombatConfig) {
    actor.abilities = actor.base_abilities;
    actor.max_vitality = actor.base_max_vitality;
    actor.armor_bonus = 0;
    actor.hit_bonus = 0;
    actor.damage_bonus = 0;
    actor.flags = StatusFlags::NONE;

    let worn: Vec<(Vec<(ApplyTarget, i32)>, StatusFlags)> = actor
        .equipment
        .worn()
        .map(|(_, item)| (item.affects.clone(), item.grants))
        .collect();
    for (affects, grants) in worn {
        for (target, modifier) in affects {
            fold_modifier(actor, target, modifier);
        }
        actor.flags |= grants;
    }

    let timed: Vec<(ApplyTarget, i32, StatusFlags)> = actor
        .affects
        .iter()
        .map(|a| (a.target, a.modifier, a.flags))
        .collect();
    for (target, modifier, flags) in timed {
        fold_modifier(actor, target, modifier);
        actor.flags |= flags;
    }

    clamp_derived(actor, config);
}

fn fold_modifier(actor: &mut Actor, target: ApplyTarget, modifier: i32) {
    if modifier.abs() > MODIFIER_SANITY_LIMIT {
        tracing::warn!(
            actor = %actor.name,
            ?target,
            modifier,
            "skipping corrupt modifier during recompute"
        );
        return;
    }

    match target {
        ApplyTarget::None => {}
        ApplyTarget::Strength => actor.abilities.strength += modifier,
        ApplyTarget::Dexterity => actor.abilities.dexterity += modifier,
        ApplyTarget::Constitution => actor.abilities.constitution += modifier,
        ApplyTarget::Intelligence => actor.abilities.intelligence += modifier,
        ApplyTarget::Wisdom => actor.abilities.wisdom += modifier,
        ApplyTarget::Charisma => actor.abilities.charisma += modifier,
        ApplyTarget::ArmorClass => actor.armor_bonus += modifier,
        ApplyTarget::HitBonus => actor.hit_bonus += modifier,
        ApplyTarget::DamageBonus => actor.damage_bonus += modifier,
        ApplyTarget::MaxVitality => actor.max_vitality += modifier,
    }
}

fn clamp_derived(actor: &mut Actor, config: &CombatConfig) {
    actor
        .abilities
        .clamp_all(config.ability_floor, config.elevated_ability_ceiling);
    actor.max_vitality = actor.max_vitality.max(1);
    actor.vitality = actor.vitality.min(actor.max_vitality);
}
