//! Per-tick violence scheduling
//!
//! One tick walks a snapshot of the active combatant set, resolves one swing
//! per engaged actor, and flushes the reaper at the end. Every handle is
//! re-validated against the live world before use, since earlier resolutions
//! in the same tick may have killed or disengaged anyone in the snapshot.
//! A fault in one actor's resolution is logged and skipped, never allowed to
//! take the tick down.

use crate::combat::CombatEvent;
use crate::world::hooks::WorldHooks;
use crate::world::{reaper, World};

/// Run one violence tick: combat rounds, then corpse collection
pub fn run_violence_tick<H: WorldHooks>(world: &mut World<H>) -> Vec<CombatEvent> {
    world.tick += 1;
    let tick = world.tick;
    let mut events = Vec::new();

    for attacker in world.combatants.snapshot() {
        if !world.registry.is_live(attacker) {
            continue;
        }

        let Some(defender) = world.registry.get(attacker).and_then(|a| a.fighting) else {
            // Membership without a target; repair and move on
            tracing::warn!(?attacker, "combatant set member with no fighting target");
            world.combatants.remove(attacker);
            continue;
        };

        if !world.registry.is_live(defender) {
            world.stop_fighting(attacker, &mut events);
            continue;
        }

        let same_room = match (world.registry.get(attacker), world.registry.get(defender)) {
            (Some(a), Some(d)) => a.room == d.room,
            _ => false,
        };
        if !same_room {
            world.stop_fighting(attacker, &mut events);
            continue;
        }

        let can_fight = world
            .registry
            .get(attacker)
            .map(|a| a.position.can_fight())
            .unwrap_or(false);
        if !can_fight {
            continue;
        }

        match world.resolve(attacker, defender, &mut events) {
            Ok(result) => events.push(CombatEvent::AttackResolved {
                tick,
                attacker,
                defender,
                result,
            }),
            Err(err) => {
                tracing::warn!(?attacker, ?defender, %err, "attack resolution failed; skipping");
            }
        }
    }

    reaper::flush(world, &mut events);
    tracing::debug!(
        tick,
        combatants = world.combatants.len(),
        events = events.len(),
        "violence tick complete"
    );
    events
}
