//! Active combatant set
//!
//! The violence scheduler only walks this set, never the whole registry.
//! Membership is tied 1:1 to a non-`None` fighting target; the world's
//! start/stop fighting operations keep the two in step. New entrants go to
//! the front so freshly started fights resolve soonest.

use crate::core::types::ActorHandle;

/// Ordered set of actors currently engaged in combat
#[derive(Debug, Clone, Default)]
pub struct ActiveCombatantSet {
    members: Vec<ActorHandle>,
}

impl ActiveCombatantSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, handle: ActorHandle) -> bool {
        self.members.contains(&handle)
    }

    /// Insert at the front; a handle already present is left where it is
    pub fn insert(&mut self, handle: ActorHandle) {
        if !self.contains(handle) {
            self.members.insert(0, handle);
        }
    }

    pub fn remove(&mut self, handle: ActorHandle) -> bool {
        let before = self.members.len();
        self.members.retain(|m| *m != handle);
        self.members.len() != before
    }

    /// Copy of the membership for snapshot iteration
    ///
    /// The scheduler mutates the live set mid-walk (deaths, flight), so it
    /// iterates a snapshot and re-validates each handle before acting.
    pub fn snapshot(&self) -> Vec<ActorHandle> {
        self.members.clone()
    }
}
