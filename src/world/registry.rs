//! Generational actor registry
//!
//! Actors live in slots addressed by `ActorHandle`. Freeing a slot bumps its
//! generation, so every handle held elsewhere goes stale at once; a stale
//! lookup returns `None` rather than a recycled stranger.

use serde::{Deserialize, Serialize};

use crate::actor::Actor;
use crate::core::types::ActorHandle;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Slot {
    generation: u32,
    actor: Option<Actor>,
}

/// Slot arena holding every actor in the world
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActorRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl ActorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.actor.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert an actor, reusing a freed slot when one exists
    pub fn insert(&mut self, actor: Actor) -> ActorHandle {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.actor = Some(actor);
            ActorHandle {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                actor: Some(actor),
            });
            ActorHandle {
                index,
                generation: 0,
            }
        }
    }

    /// Look up an actor, rejecting stale handles
    pub fn get(&self, handle: ActorHandle) -> Option<&Actor> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.actor.as_ref())
    }

    pub fn get_mut(&mut self, handle: ActorHandle) -> Option<&mut Actor> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.actor.as_mut())
    }

    /// Is the handle valid and the actor not logically dead?
    pub fn is_live(&self, handle: ActorHandle) -> bool {
        self.get(handle).map(|a| a.is_alive()).unwrap_or(false)
    }

    /// Free a slot, bumping its generation to invalidate outstanding handles
    ///
    /// Returns the evicted actor so the caller can salvage its possessions.
    pub fn free(&mut self, handle: ActorHandle) -> Option<Actor> {
        let slot = self
            .slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)?;
        let actor = slot.actor.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        Some(actor)
    }

    /// Handles of every occupied slot, in index order
    pub fn handles(&self) -> Vec<ActorHandle> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.actor.is_some())
            .map(|(index, slot)| ActorHandle {
                index: index as u32,
                generation: slot.generation,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Class;

    fn actor(name: &str) -> Actor {
        Actor::new(name, Class::Warrior)
    }

    #[test]
    fn test_insert_and_get() {
        let mut registry = ActorRegistry::new();
        let handle = registry.insert(actor("Brant"));
        assert_eq!(registry.get(handle).map(|a| a.name.as_str()), Some("Brant"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_free_invalidates_handle() {
        let mut registry = ActorRegistry::new();
        let handle = registry.insert(actor("Brant"));
        let evicted = registry.free(handle);
        assert_eq!(evicted.map(|a| a.name), Some("Brant".to_string()));
        assert!(registry.get(handle).is_none());
        assert!(!registry.is_live(handle));
    }

    #[test]
    fn test_reused_slot_rejects_stale_handle() {
        let mut registry = ActorRegistry::new();
        let old = registry.insert(actor("Brant"));
        registry.free(old);

        let fresh = registry.insert(actor("Sable"));
        assert_eq!(fresh.index, old.index);
        assert_ne!(fresh.generation, old.generation);

        assert!(registry.get(old).is_none());
        assert_eq!(registry.get(fresh).map(|a| a.name.as_str()), Some("Sable"));
    }

    #[test]
    fn test_double_free_is_noop() {
        let mut registry = ActorRegistry::new();
        let handle = registry.insert(actor("Brant"));
        assert!(registry.free(handle).is_some());
        assert!(registry.free(handle).is_none());
        assert_eq!(registry.free.len(), 1);
    }

    #[test]
    fn test_pending_reap_counts_as_not_live() {
        let mut registry = ActorRegistry::new();
        let handle = registry.insert(actor("Brant"));
        registry.get_mut(handle).unwrap().pending_reap = true;
        assert!(registry.get(handle).is_some());
        assert!(!registry.is_live(handle));
    }

    #[test]
    fn test_handles_enumerates_occupied_slots() {
        let mut registry = ActorRegistry::new();
        let a = registry.insert(actor("Brant"));
        let b = registry.insert(actor("Sable"));
        registry.free(a);
        assert_eq!(registry.handles(), vec![b]);
    }
}
