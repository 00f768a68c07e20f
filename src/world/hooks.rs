//! Reactive hook points around combat and death
//!
//! Hooks observe and may veto, but never touch the world directly; they get
//! plain data and return verdicts. The engine's own invariants (exactly-once
//! death, set consistency) hold regardless of what a hook answers.

use crate::core::types::{ActorHandle, RoomId};
use crate::equip::Item;

/// Answer from a pre-action hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookVerdict {
    Proceed,
    Veto,
}

/// Integration points a hosting world can implement
///
/// Every method has a permissive default, so an implementation only writes
/// the reactions it cares about.
pub trait WorldHooks {
    /// About to resolve a swing; `Veto` cancels it before the roll
    fn before_attack(&mut self, _attacker: ActorHandle, _defender: ActorHandle) -> HookVerdict {
        HookVerdict::Proceed
    }

    /// A swing fully resolved, with the damage that got through
    fn after_attack(&mut self, _attacker: ActorHandle, _defender: ActorHandle, _damage: i32) {}

    /// About to apply a vitality change; `Veto` suppresses it
    fn on_vitality_change(&mut self, _actor: ActorHandle, _delta: i32) -> HookVerdict {
        HookVerdict::Proceed
    }

    /// Is violence suppressed in this room (safe zones)?
    fn combat_suppressed(&mut self, _room: RoomId) -> bool {
        false
    }

    /// A corpse should appear where the actor died
    fn place_corpse(&mut self, _actor: ActorHandle, _room: RoomId) {}

    /// Equipment stripped at reap time; the hook takes custody
    fn drop_equipment(&mut self, _actor: ActorHandle, _room: RoomId, _items: Vec<Item>) {}

    /// Persist-on-death notification, fired before detachment
    fn save_on_death(&mut self, _actor: ActorHandle) {}

    /// An actor crossed a lifecycle boundary worth persisting
    fn save_on_state_change(&mut self, _actor: ActorHandle) {}
}

/// Hook sink that accepts everything and reacts to nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHooks;

impl WorldHooks for NullHooks {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_hooks_are_permissive() {
        let mut hooks = NullHooks;
        let a = ActorHandle {
            index: 0,
            generation: 0,
        };
        let b = ActorHandle {
            index: 1,
            generation: 0,
        };
        assert_eq!(hooks.before_attack(a, b), HookVerdict::Proceed);
        assert_eq!(hooks.on_vitality_change(a, -5), HookVerdict::Proceed);
        assert!(!hooks.combat_suppressed(RoomId(0)));
    }
}
