//! Deferred corpse collection
//!
//! Death is split in two: the kill path marks an actor logically dead and
//! stages it here, and `flush` detaches it physically between ticks. Nothing
//! is freed while the violence scheduler may still be iterating, so a handle
//! that was valid at snapshot time stays addressable for the whole tick.

use crate::combat::CombatEvent;
use crate::core::types::ActorHandle;
use crate::world::hooks::WorldHooks;
use crate::world::World;

/// Staging area for actors awaiting physical detachment
#[derive(Debug, Clone, Default)]
pub struct DeferredReaper {
    pending: Vec<ActorHandle>,
}

impl DeferredReaper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a logically dead actor; staging twice is a no-op
    pub fn stage(&mut self, handle: ActorHandle) {
        if !self.pending.contains(&handle) {
            self.pending.push(handle);
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn take_pending(&mut self) -> Vec<ActorHandle> {
        std::mem::take(&mut self.pending)
    }
}

/// Physically detach every staged actor from the world
///
/// For each corpse: combat membership scrubbed, equipment stripped and
/// handed to the hosting world, every inbound reference (fighting, hunting,
/// following, group) torn down, and finally the registry slot freed, which
/// invalidates all outstanding handles at once.
pub fn flush<H: WorldHooks>(world: &mut World<H>, events: &mut Vec<CombatEvent>) {
    for corpse in world.reaper.take_pending() {
        world.combatants.remove(corpse);

        let stripped = match world.registry.get_mut(corpse) {
            Some(actor) => {
                let room = actor.room;
                let items = actor.equipment.strip_all();
                Some((room, items))
            }
            None => None,
        };
        if let Some((room, items)) = stripped {
            if !items.is_empty() {
                world.hooks.drop_equipment(corpse, room, items);
            }
        } else {
            tracing::warn!(?corpse, "staged corpse no longer resolves; skipping");
            continue;
        }

        for handle in world.registry.handles() {
            if handle == corpse {
                continue;
            }
            let untargeted = {
                let Some(other) = world.registry.get_mut(handle) else {
                    continue;
                };
                if other.hunting == Some(corpse) {
                    other.hunting = None;
                }
                if other.following == Some(corpse) {
                    other.following = None;
                }
                other.group.retain(|member| *member != corpse);
                other.fighting == Some(corpse)
            };
            if untargeted {
                world.stop_fighting(handle, events);
            }
        }

        world.registry.free(corpse);
        tracing::debug!(?corpse, "reaped");
        events.push(CombatEvent::Reaped { actor: corpse });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::position::Position;
    use crate::actor::Actor;
    use crate::core::config::CombatConfig;
    use crate::core::error::DuskError;
    use crate::core::types::{Class, RoomId};
    use crate::equip::{EquipSlot, Item};
    use crate::world::hooks::NullHooks;

    struct Salvage {
        dropped: Vec<(ActorHandle, RoomId, usize)>,
    }

    impl WorldHooks for Salvage {
        fn drop_equipment(&mut self, actor: ActorHandle, room: RoomId, items: Vec<Item>) {
            self.dropped.push((actor, room, items.len()));
        }
    }

    fn kill_and_stage(world: &mut World<impl WorldHooks>, handle: ActorHandle) {
        let mut events = Vec::new();
        world.apply_damage(handle, 10_000, &mut events).unwrap();
        assert!(world.actor(handle).unwrap().pending_reap);
    }

    #[test]
    fn test_flush_frees_slot_and_invalidates_handle() {
        let mut w = World::new(CombatConfig::default(), 42);
        let a = w.spawn(Actor::new("Brant", Class::Warrior).with_vitality(5));
        kill_and_stage(&mut w, a);

        let mut events = Vec::new();
        flush(&mut w, &mut events);
        assert!(matches!(w.actor(a), Err(DuskError::StaleHandle(_))));
        assert!(events.contains(&CombatEvent::Reaped { actor: a }));
        assert!(!w.reaper.has_pending());
    }

    #[test]
    fn test_flush_strips_equipment_to_hook() {
        let hooks = Salvage { dropped: Vec::new() };
        let mut w = World::with_hooks(CombatConfig::default(), hooks, 42);
        let a = w.spawn(Actor::new("Brant", Class::Warrior).with_vitality(5));
        w.actor_mut(a).unwrap().room = RoomId(3);
        w.equip_item(a, Item::armor("helm", 2, None), EquipSlot::Head)
            .unwrap();
        w.equip_item(a, Item::armor("boots", 1, None), EquipSlot::Feet)
            .unwrap();
        kill_and_stage(&mut w, a);

        let mut events = Vec::new();
        flush(&mut w, &mut events);
        assert_eq!(w.hooks.dropped, vec![(a, RoomId(3), 2)]);
    }

    #[test]
    fn test_flush_tears_down_inbound_references() {
        let mut w = World::with_hooks(CombatConfig::default(), NullHooks, 42);
        let victim = w.spawn(Actor::new("Sable", Class::Rogue).with_vitality(5));
        let stalker = w.spawn(Actor::new("Keld", Class::Warrior).with_vitality(30));
        let friend = w.spawn(Actor::new("Orin", Class::Cleric).with_vitality(30));

        let mut events = Vec::new();
        w.start_fight(stalker, victim, &mut events).unwrap();
        w.set_hunting(stalker, Some(victim)).unwrap();
        w.set_following(friend, Some(victim)).unwrap();
        w.add_to_group(friend, victim).unwrap();

        kill_and_stage(&mut w, victim);
        flush(&mut w, &mut events);

        let stalker_state = w.actor(stalker).unwrap();
        assert_eq!(stalker_state.fighting, None);
        assert_eq!(stalker_state.hunting, None);
        assert_eq!(stalker_state.position, Position::Standing);
        assert!(!w.combatants.contains(stalker));

        let friend_state = w.actor(friend).unwrap();
        assert_eq!(friend_state.following, None);
        assert!(friend_state.group.is_empty());
    }

    #[test]
    fn test_double_stage_reaps_once() {
        let mut w = World::new(CombatConfig::default(), 42);
        let a = w.spawn(Actor::new("Brant", Class::Warrior).with_vitality(5));
        kill_and_stage(&mut w, a);
        w.reaper.stage(a);

        let mut events = Vec::new();
        flush(&mut w, &mut events);
        let reaps = events
            .iter()
            .filter(|e| matches!(e, CombatEvent::Reaped { .. }))
            .count();
        assert_eq!(reaps, 1);
    }
}
