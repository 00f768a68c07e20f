//! Combat resolution: to-hit, damage, blocks, and skill feedback
//!
//! The functions here are pure over actor state; `crate::world` owns the
//! orchestration that wires them to hooks, damage application, and the
//! violence scheduler.

pub mod armor;
pub mod constants;
pub mod feedback;
pub mod resolver;
pub mod shield;

use serde::Serialize;

use crate::core::types::{ActorHandle, RoomId, Tick};
use resolver::HitCheck;

/// What applying damage did to the target's lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DamageOutcome {
    /// Target survived, possibly in a worse position
    Alive,
    /// Target crossed the death threshold this application
    Died,
    /// Nothing got through (veto, suppression, or a full block)
    NoDamage,
    /// Target was already dead or awaiting the reaper
    AlreadyDead,
}

/// Full record of one resolved attack
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DamageResult {
    pub outcome: DamageOutcome,
    pub hit: bool,
    pub critical: bool,
    pub blocked: bool,
    /// Damage actually applied after caps, halving, and blocks
    pub damage: i32,
    pub roll: u32,
}

impl DamageResult {
    /// A resolution that settled before any roll (veto, suppression, or a
    /// target already dead)
    pub fn no_roll(outcome: DamageOutcome) -> Self {
        Self {
            outcome,
            hit: false,
            critical: false,
            blocked: false,
            damage: 0,
            roll: 0,
        }
    }

    pub fn miss(check: &HitCheck) -> Self {
        Self {
            outcome: DamageOutcome::NoDamage,
            hit: false,
            critical: false,
            blocked: false,
            damage: 0,
            roll: check.roll,
        }
    }
}

/// Observable combat events emitted by the violence scheduler
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CombatEvent {
    AttackResolved {
        tick: Tick,
        attacker: ActorHandle,
        defender: ActorHandle,
        result: DamageResult,
    },
    FightStarted {
        attacker: ActorHandle,
        defender: ActorHandle,
    },
    FightStopped {
        actor: ActorHandle,
    },
    ShieldShattered {
        defender: ActorHandle,
        shield: String,
    },
    PositionChanged {
        actor: ActorHandle,
        from: crate::actor::position::Position,
        to: crate::actor::position::Position,
    },
    Died {
        actor: ActorHandle,
        room: RoomId,
    },
    Reaped {
        actor: ActorHandle,
    },
    AffectExpired {
        actor: ActorHandle,
    },
}
