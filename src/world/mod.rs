//! World state and the orchestration of combat over it
//!
//! `World` owns the actor registry, the active combatant set, the deferred
//! reaper, the RNG, and the hook sink. Everything that mutates shared state
//! goes through methods here, which is what keeps the paired invariants
//! (fighting target vs. set membership, logical vs. physical death) in step.

pub mod combatants;
pub mod hooks;
pub mod reaper;
pub mod registry;
pub mod scheduler;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::actor::position::{position_for, Position};
use crate::actor::Actor;
use crate::affect::{self, Affect, AffectSource, StackPolicy};
use crate::combat::feedback::{attacker_feedback, defender_feedback};
use crate::combat::resolver::{attack_kind, check_attack, damage_roll};
use crate::combat::shield::try_block;
use crate::combat::{CombatEvent, DamageOutcome, DamageResult};
use crate::core::config::CombatConfig;
use crate::core::error::{DuskError, Result, ValidationError};
use crate::core::types::{ActorHandle, RoomId, Tick};
use crate::equip::{EquipSlot, Item};
use combatants::ActiveCombatantSet;
use hooks::{HookVerdict, NullHooks, WorldHooks};
use reaper::DeferredReaper;
use registry::ActorRegistry;

/// The complete mutable state of one simulation instance
pub struct World<H: WorldHooks = NullHooks> {
    pub config: CombatConfig,
    pub registry: ActorRegistry,
    pub combatants: ActiveCombatantSet,
    pub reaper: DeferredReaper,
    pub hooks: H,
    pub rng: ChaCha8Rng,
    pub tick: Tick,
}

impl World<NullHooks> {
    pub fn new(config: CombatConfig, seed: u64) -> Self {
        Self::with_hooks(config, NullHooks, seed)
    }
}

impl<H: WorldHooks> World<H> {
    pub fn with_hooks(config: CombatConfig, hooks: H, seed: u64) -> Self {
        Self {
            config,
            registry: ActorRegistry::new(),
            combatants: ActiveCombatantSet::new(),
            reaper: DeferredReaper::new(),
            hooks,
            rng: ChaCha8Rng::seed_from_u64(seed),
            tick: 0,
        }
    }

    /// Register an actor in the world
    ///
    /// Unmodified ability scores are bounded to the mortal ceiling here;
    /// only magical modifiers can push a derived score past it, up to the
    /// elevated ceiling.
    pub fn spawn(&mut self, actor: Actor) -> ActorHandle {
        let handle = self.registry.insert(actor);
        if let Some(actor) = self.registry.get_mut(handle) {
            actor
                .base_abilities
                .clamp_all(self.config.ability_floor, self.config.mortal_ability_ceiling);
            affect::recompute(actor, &self.config);
        }
        handle
    }

    pub fn actor(&self, handle: ActorHandle) -> Result<&Actor> {
        self.registry
            .get(handle)
            .ok_or(DuskError::StaleHandle(handle))
    }

    pub fn actor_mut(&mut self, handle: ActorHandle) -> Result<&mut Actor> {
        self.registry
            .get_mut(handle)
            .ok_or(DuskError::StaleHandle(handle))
    }

    // === FIGHT MEMBERSHIP ===

    /// Engage two actors; the defender retaliates if idle
    ///
    /// Fighting target and combatant-set membership change together here and
    /// in `stop_fighting`, nowhere else.
    pub fn start_fight(
        &mut self,
        attacker: ActorHandle,
        defender: ActorHandle,
        events: &mut Vec<CombatEvent>,
    ) -> Result<()> {
        if !self.registry.is_live(attacker) {
            return Err(DuskError::StaleHandle(attacker));
        }
        if !self.registry.is_live(defender) {
            return Err(DuskError::StaleHandle(defender));
        }

        let attacker_room = self.actor(attacker)?.room;
        if self.actor(defender)?.room != attacker_room {
            return Err(ValidationError::NotSameLocation.into());
        }
        if !self.actor(attacker)?.position.can_fight() {
            return Err(ValidationError::CannotFight.into());
        }

        {
            let aggressor = self.actor_mut(attacker)?;
            aggressor.fighting = Some(defender);
        }
        self.combatants.insert(attacker);
        self.update_position(attacker, events);

        let retaliates = {
            let victim = self.actor_mut(defender)?;
            if victim.fighting.is_none() && victim.position.can_fight() {
                victim.fighting = Some(attacker);
                true
            } else {
                false
            }
        };
        if retaliates {
            self.combatants.insert(defender);
            self.update_position(defender, events);
        }

        events.push(CombatEvent::FightStarted { attacker, defender });
        Ok(())
    }

    /// Disengage an actor from combat
    pub fn stop_fighting(&mut self, handle: ActorHandle, events: &mut Vec<CombatEvent>) {
        let was_fighting = self
            .registry
            .get_mut(handle)
            .map(|actor| actor.fighting.take().is_some())
            .unwrap_or(false);
        let was_member = self.combatants.remove(handle);
        if was_fighting || was_member {
            self.update_position(handle, events);
            events.push(CombatEvent::FightStopped { actor: handle });
        }
    }

    /// Disengage and relocate; pursuers keep their hunting reference
    pub fn flee(
        &mut self,
        handle: ActorHandle,
        to: RoomId,
        events: &mut Vec<CombatEvent>,
    ) -> Result<()> {
        if !self.registry.is_live(handle) {
            return Err(DuskError::StaleHandle(handle));
        }
        if self.actor(handle)?.fighting.is_none() {
            return Err(ValidationError::CannotFight.into());
        }

        self.stop_fighting(handle, events);
        self.actor_mut(handle)?.room = to;
        Ok(())
    }

    // === ATTACK RESOLUTION ===

    /// Resolve one swing from attacker to defender
    ///
    /// Roll, block, damage application, and skill feedback in one pass.
    /// Suppressed rooms and hook vetoes short-circuit before the roll.
    pub fn resolve(
        &mut self,
        attacker: ActorHandle,
        defender: ActorHandle,
        events: &mut Vec<CombatEvent>,
    ) -> Result<DamageResult> {
        let attacker_alive = self
            .registry
            .get(attacker)
            .ok_or(DuskError::StaleHandle(attacker))?
            .is_alive();
        let (defender_alive, room) = {
            let def = self
                .registry
                .get(defender)
                .ok_or(DuskError::StaleHandle(defender))?;
            (def.is_alive(), def.room)
        };

        // A logically dead target stays addressable until the reaper runs;
        // swinging at it is a benign no-op, not an error
        if !defender_alive {
            return Ok(DamageResult::no_roll(DamageOutcome::AlreadyDead));
        }
        if !attacker_alive {
            return Ok(DamageResult::no_roll(DamageOutcome::NoDamage));
        }

        if self.hooks.combat_suppressed(room)
            || self.hooks.before_attack(attacker, defender) == HookVerdict::Veto
        {
            return Ok(DamageResult::no_roll(DamageOutcome::NoDamage));
        }

        let (check, raw_damage) = {
            let World {
                registry,
                rng,
                config,
                ..
            } = self;
            let atk = registry.get(attacker).ok_or(DuskError::StaleHandle(attacker))?;
            let def = registry.get(defender).ok_or(DuskError::StaleHandle(defender))?;
            let kind = attack_kind(atk);
            let check = check_attack(atk, def, kind, 0, config, rng);
            let raw = if check.hit {
                damage_roll(atk, kind, check.critical, rng)
            } else {
                0
            };
            (check, raw)
        };

        let result = if !check.hit {
            DamageResult::miss(&check)
        } else {
            let block = {
                let World {
                    registry,
                    rng,
                    config,
                    ..
                } = self;
                let def = registry
                    .get_mut(defender)
                    .ok_or(DuskError::StaleHandle(defender))?;
                try_block(def, raw_damage, config, rng)
            };

            if let Some(shield) = &block.destroyed {
                events.push(CombatEvent::ShieldShattered {
                    defender,
                    shield: shield.name.clone(),
                });
                if let Some(def) = self.registry.get_mut(defender) {
                    affect::recompute(def, &self.config);
                }
            }

            if block.blocked() {
                DamageResult {
                    outcome: DamageOutcome::NoDamage,
                    hit: true,
                    critical: check.critical,
                    blocked: true,
                    damage: 0,
                    roll: check.roll,
                }
            } else {
                let (outcome, applied) = self.apply_damage(defender, raw_damage, events)?;
                DamageResult {
                    outcome,
                    hit: true,
                    critical: check.critical,
                    blocked: false,
                    damage: applied,
                    roll: check.roll,
                }
            }
        };

        {
            let World {
                registry,
                rng,
                config,
                ..
            } = self;
            if let Some(atk) = registry.get_mut(attacker) {
                attacker_feedback(atk, result.hit, &config.skill_gain, rng);
            }
            if let Some(def) = registry.get_mut(defender) {
                defender_feedback(def, result.hit, &config.skill_gain, rng);
            }
        }

        self.hooks.after_attack(attacker, defender, result.damage);
        Ok(result)
    }

    // === DAMAGE AND HEALING ===

    /// Apply damage to a target, walking the full pipeline
    ///
    /// Cap, hook veto, sanctuary halving, vitality change, position
    /// re-derivation, and the death path, in that order. Returns the outcome
    /// and the damage that actually landed.
    pub fn apply_damage(
        &mut self,
        target: ActorHandle,
        amount: i32,
        events: &mut Vec<CombatEvent>,
    ) -> Result<(DamageOutcome, i32)> {
        let actor = self
            .registry
            .get(target)
            .ok_or(DuskError::StaleHandle(target))?;
        if !actor.is_alive() {
            return Ok((DamageOutcome::AlreadyDead, 0));
        }
        let sanctuary = actor
            .flags
            .contains(crate::affect::StatusFlags::SANCTUARY);

        let mut damage = amount.min(self.config.per_hit_damage_cap);
        if sanctuary {
            damage /= 2;
        }
        if damage <= 0 {
            return Ok((DamageOutcome::NoDamage, 0));
        }

        if self.hooks.on_vitality_change(target, -damage) == HookVerdict::Veto {
            return Ok((DamageOutcome::NoDamage, 0));
        }

        if let Some(actor) = self.registry.get_mut(target) {
            actor.vitality -= damage;
        }
        self.update_position(target, events);

        let died = self
            .registry
            .get(target)
            .map(|a| a.position == Position::Dead)
            .unwrap_or(false);
        if died {
            self.kill(target, events);
            Ok((DamageOutcome::Died, damage))
        } else {
            Ok((DamageOutcome::Alive, damage))
        }
    }

    /// Restore vitality, clamped to the maximum; the dead stay dead
    pub fn heal(
        &mut self,
        target: ActorHandle,
        amount: i32,
        events: &mut Vec<CombatEvent>,
    ) -> Result<i32> {
        let actor = self
            .registry
            .get(target)
            .ok_or(DuskError::StaleHandle(target))?;
        if !actor.is_alive() {
            return Ok(0);
        }

        if self.hooks.on_vitality_change(target, amount) == HookVerdict::Veto {
            return Ok(0);
        }

        let healed = {
            let actor = self
                .registry
                .get_mut(target)
                .ok_or(DuskError::StaleHandle(target))?;
            let before = actor.vitality;
            actor.vitality = (before + amount.max(0)).min(actor.max_vitality);
            actor.vitality - before
        };
        self.update_position(target, events);
        Ok(healed)
    }

    /// Re-derive position from vitality, with forced combat exit
    fn update_position(&mut self, handle: ActorHandle, events: &mut Vec<CombatEvent>) {
        let Some(actor) = self.registry.get_mut(handle) else {
            return;
        };
        let from = actor.position;
        let to = position_for(actor.vitality, from, actor.fighting.is_some(), &self.config);
        if to == from {
            return;
        }
        actor.position = to;
        events.push(CombatEvent::PositionChanged {
            actor: handle,
            from,
            to,
        });

        if to.forces_combat_exit() {
            if let Some(actor) = self.registry.get_mut(handle) {
                actor.fighting = None;
            }
            self.combatants.remove(handle);
            self.hooks.save_on_state_change(handle);
        }
    }

    /// Mark an actor logically dead and stage it for the reaper
    ///
    /// Guarded by `pending_reap`, so the death path runs exactly once no
    /// matter how many times the threshold is crossed in one tick.
    fn kill(&mut self, target: ActorHandle, events: &mut Vec<CombatEvent>) {
        let room = {
            let Some(actor) = self.registry.get_mut(target) else {
                return;
            };
            if actor.pending_reap {
                return;
            }
            actor.pending_reap = true;
            actor.fighting = None;
            actor.room
        };
        self.combatants.remove(target);
        self.hooks.save_on_death(target);
        self.hooks.place_corpse(target, room);
        events.push(CombatEvent::Died {
            actor: target,
            room,
        });
        self.reaper.stage(target);
    }

    // === STANCE COMMANDS ===

    /// Voluntarily change stance (rest, sit, sleep, stand)
    pub fn set_stance(&mut self, handle: ActorHandle, stance: Position) -> Result<()> {
        if !stance.is_voluntary() {
            return Err(ValidationError::CannotFight.into());
        }
        let actor = self
            .registry
            .get_mut(handle)
            .ok_or(DuskError::StaleHandle(handle))?;
        if !actor.is_alive() || actor.position.forces_combat_exit() {
            return Err(ValidationError::CannotFight.into());
        }
        if actor.fighting.is_some() && stance != Position::Standing {
            return Err(ValidationError::InCombat.into());
        }
        actor.position = stance;
        Ok(())
    }

    // === EQUIPMENT ===

    /// Bind an item to a slot, then recompute derived attributes
    ///
    /// On failure the item comes back with the error; nothing is lost.
    pub fn equip_item(
        &mut self,
        handle: ActorHandle,
        item: Item,
        slot: EquipSlot,
    ) -> std::result::Result<(), (DuskError, Item)> {
        let Some(actor) = self.registry.get_mut(handle) else {
            return Err((DuskError::StaleHandle(handle), item));
        };
        let alignment = actor.alignment;
        let class = actor.class;
        match actor.equipment.equip(item, slot, alignment, class) {
            Ok(()) => {
                affect::recompute(actor, &self.config);
                Ok(())
            }
            Err((err, item)) => Err((err.into(), item)),
        }
    }

    /// Detach the item in a slot, then recompute derived attributes
    pub fn unequip_item(&mut self, handle: ActorHandle, slot: EquipSlot) -> Result<Item> {
        let actor = self
            .registry
            .get_mut(handle)
            .ok_or(DuskError::StaleHandle(handle))?;
        let item = actor
            .equipment
            .unequip(slot)
            .ok_or(ValidationError::SlotEmpty)?;
        affect::recompute(actor, &self.config);
        Ok(item)
    }

    // === AFFECTS ===

    pub fn apply_affect_to(
        &mut self,
        handle: ActorHandle,
        affect: Affect,
        policy: StackPolicy,
    ) -> Result<()> {
        let actor = self
            .registry
            .get_mut(handle)
            .ok_or(DuskError::StaleHandle(handle))?;
        affect::apply_affect(actor, affect, policy, &self.config);
        Ok(())
    }

    pub fn remove_affects(&mut self, handle: ActorHandle, source: AffectSource) -> Result<()> {
        let actor = self
            .registry
            .get_mut(handle)
            .ok_or(DuskError::StaleHandle(handle))?;
        affect::remove_affects_from(actor, source, &self.config);
        Ok(())
    }

    /// Age every actor's timed affects one tick
    pub fn age_affects(&mut self, events: &mut Vec<CombatEvent>) {
        for handle in self.registry.handles() {
            let expired = {
                let Some(actor) = self.registry.get_mut(handle) else {
                    continue;
                };
                affect::tick_affects(actor, &self.config)
            };
            if !expired.is_empty() {
                events.push(CombatEvent::AffectExpired { actor: handle });
                self.update_position(handle, events);
            }
        }
    }

    // === PURSUIT AND GROUPING ===

    pub fn set_hunting(&mut self, handle: ActorHandle, prey: Option<ActorHandle>) -> Result<()> {
        self.actor_mut(handle)?.hunting = prey;
        Ok(())
    }

    pub fn set_following(
        &mut self,
        handle: ActorHandle,
        leader: Option<ActorHandle>,
    ) -> Result<()> {
        self.actor_mut(handle)?.following = leader;
        Ok(())
    }

    pub fn add_to_group(&mut self, leader: ActorHandle, member: ActorHandle) -> Result<()> {
        if !self.registry.is_live(member) {
            return Err(DuskError::StaleHandle(member));
        }
        let group = &mut self.actor_mut(leader)?.group;
        if !group.contains(&member) {
            group.push(member);
        }
        Ok(())
    }
}
