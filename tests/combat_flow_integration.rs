//! End-to-end combat flow tests
//!
//! These drive full fights through the public world API: engagement,
//! per-tick resolution, blocks and shield wear, lifecycle transitions,
//! death, and reaping.

use duskhold::actor::position::Position;
use duskhold::actor::skills::SkillKind;
use duskhold::actor::Actor;
use duskhold::affect::{Affect, AffectSource, ApplyTarget, StackPolicy, StatusFlags};
use duskhold::combat::{CombatEvent, DamageOutcome};
use duskhold::core::config::CombatConfig;
use duskhold::core::types::{ActorHandle, AttackKind, Class, RoomId};
use duskhold::equip::{DamageDice, EquipSlot, Item};
use duskhold::world::hooks::{HookVerdict, WorldHooks};
use duskhold::world::scheduler::run_violence_tick;
use duskhold::world::World;

fn swordsman(name: &str, vitality: i32, skill: u32) -> Actor {
    let mut actor = Actor::new(name, Class::Warrior).with_vitality(vitality);
    actor.skills.set_level(SkillKind::Sword, skill);
    actor
        .equipment
        .equip(
            Item::weapon(
                "longsword",
                SkillKind::Sword,
                AttackKind::Slash,
                DamageDice::new(1, 8),
            ),
            EquipSlot::Wield,
            actor.alignment,
            actor.class,
        )
        .unwrap();
    actor
}

/// The reference wound scenario: a 5-vitality actor taking 6 damage lands
/// at -1, which is stunned and out of combat, not dead.
#[test]
fn test_wounded_to_stunned_not_dead() {
    let mut w = World::new(CombatConfig::default(), 42);
    let a = w.spawn(Actor::new("Hollis", Class::Cleric).with_vitality(5));
    let b = w.spawn(swordsman("Brant", 40, 50));
    let mut events = Vec::new();
    w.start_fight(b, a, &mut events).unwrap();

    let (outcome, dealt) = w.apply_damage(a, 6, &mut events).unwrap();
    assert_eq!(outcome, DamageOutcome::Alive);
    assert_eq!(dealt, 6);

    let hollis = w.actor(a).unwrap();
    assert_eq!(hollis.vitality, -1);
    assert_eq!(hollis.position, Position::Stunned);
    assert_eq!(hollis.fighting, None);
    assert!(!w.combatants.contains(a));
    assert!(hollis.is_alive());
}

#[test]
fn test_full_fight_death_drops_gear_and_disengages_winner() {
    struct Floor {
        drops: Vec<(RoomId, usize)>,
        corpses: Vec<ActorHandle>,
    }
    impl WorldHooks for Floor {
        fn place_corpse(&mut self, actor: ActorHandle, _room: RoomId) {
            self.corpses.push(actor);
        }
        fn drop_equipment(&mut self, _actor: ActorHandle, room: RoomId, items: Vec<Item>) {
            self.drops.push((room, items.len()));
        }
    }

    let hooks = Floor {
        drops: Vec::new(),
        corpses: Vec::new(),
    };
    let mut w = World::with_hooks(CombatConfig::default(), hooks, 7);
    let strong = w.spawn(swordsman("Brant", 80, 80));
    let weak = w.spawn(swordsman("Sable", 15, 5));

    let mut events = Vec::new();
    w.start_fight(strong, weak, &mut events).unwrap();

    let mut all_events = events;
    for _ in 0..2000 {
        all_events.extend(run_violence_tick(&mut w));
        if !w.registry.is_live(weak) && w.actor(weak).is_err() {
            break;
        }
    }

    // The weak side died and was reaped
    assert!(w.actor(weak).is_err());
    assert_eq!(w.hooks.corpses, vec![weak]);
    // Their sword hit the floor in the room they died in
    assert_eq!(w.hooks.drops, vec![(RoomId(0), 1)]);
    // The winner is disengaged and back to standing
    let winner = w.actor(strong).unwrap();
    assert_eq!(winner.fighting, None);
    assert_eq!(winner.position, Position::Standing);
    assert!(w.combatants.is_empty());
    // Death and reap each happened exactly once
    let deaths = all_events
        .iter()
        .filter(|e| matches!(e, CombatEvent::Died { .. }))
        .count();
    let reaps = all_events
        .iter()
        .filter(|e| matches!(e, CombatEvent::Reaped { .. }))
        .count();
    assert_eq!((deaths, reaps), (1, 1));
}

#[test]
fn test_sanctuary_extends_survival() {
    let survival = |warded: bool| {
        let mut w = World::new(CombatConfig::default(), 11);
        let attacker = w.spawn(swordsman("Brant", 200, 80));
        let victim = w.spawn(Actor::new("Hollis", Class::Cleric).with_vitality(40));
        if warded {
            w.apply_affect_to(
                victim,
                Affect::new(AffectSource::Spell(1), ApplyTarget::None, 0)
                    .with_flags(StatusFlags::SANCTUARY),
                StackPolicy::Replace,
            )
            .unwrap();
        }
        let mut events = Vec::new();
        w.start_fight(attacker, victim, &mut events).unwrap();
        let mut ticks = 0;
        for _ in 0..2000 {
            let events = run_violence_tick(&mut w);
            ticks += 1;
            if events.iter().any(|e| matches!(e, CombatEvent::Died { .. })) {
                break;
            }
        }
        ticks
    };

    assert!(survival(true) > survival(false));
}

#[test]
fn test_shield_wears_down_and_shatters_mid_fight() {
    let mut config = CombatConfig::default();
    config.block_chance_per_tier = 0.2;
    let mut w = World::new(config, 3);

    let attacker = w.spawn(swordsman("Brant", 500, 80));
    let mut turtle = swordsman("Orin", 500, 10);
    turtle.skills.set_level(SkillKind::Shield, 90);
    turtle
        .equipment
        .equip(
            Item::shield("kite shield", 40),
            EquipSlot::Shield,
            turtle.alignment,
            turtle.class,
        )
        .unwrap();
    let defender = w.spawn(turtle);

    let mut events = Vec::new();
    w.start_fight(attacker, defender, &mut events).unwrap();

    let mut shattered = false;
    for _ in 0..2000 {
        let events = run_violence_tick(&mut w);
        if events
            .iter()
            .any(|e| matches!(e, CombatEvent::ShieldShattered { .. }))
        {
            shattered = true;
            break;
        }
    }
    assert!(shattered, "shield never shattered");
    assert!(w.actor(defender).unwrap().equipment.shield().is_none());
}

#[test]
fn test_veto_hook_suppresses_all_damage() {
    struct Pacifist;
    impl WorldHooks for Pacifist {
        fn on_vitality_change(&mut self, _actor: ActorHandle, delta: i32) -> HookVerdict {
            if delta < 0 {
                HookVerdict::Veto
            } else {
                HookVerdict::Proceed
            }
        }
    }

    let mut w = World::with_hooks(CombatConfig::default(), Pacifist, 42);
    let a = w.spawn(swordsman("Brant", 30, 80));
    let b = w.spawn(swordsman("Sable", 30, 80));
    let mut events = Vec::new();
    w.start_fight(a, b, &mut events).unwrap();

    for _ in 0..100 {
        run_violence_tick(&mut w);
    }
    assert_eq!(w.actor(a).unwrap().vitality, 30);
    assert_eq!(w.actor(b).unwrap().vitality, 30);
}

#[test]
fn test_safe_room_suppresses_swings() {
    struct Temple;
    impl WorldHooks for Temple {
        fn combat_suppressed(&mut self, room: RoomId) -> bool {
            room == RoomId(0)
        }
    }

    let mut w = World::with_hooks(CombatConfig::default(), Temple, 42);
    let a = w.spawn(swordsman("Brant", 30, 80));
    let b = w.spawn(swordsman("Sable", 30, 80));
    let mut events = Vec::new();
    w.start_fight(a, b, &mut events).unwrap();

    let events = run_violence_tick(&mut w);
    for event in &events {
        if let CombatEvent::AttackResolved { result, .. } = event {
            assert_eq!(result.outcome, DamageOutcome::NoDamage);
            assert_eq!(result.damage, 0);
        }
    }
    assert_eq!(w.actor(a).unwrap().vitality, 30);
    assert_eq!(w.actor(b).unwrap().vitality, 30);
}

#[test]
fn test_skills_drift_over_a_long_fight() {
    let mut w = World::new(CombatConfig::default(), 19);
    let a = w.spawn(swordsman("Brant", 100_000, 30));
    let b = w.spawn(swordsman("Sable", 100_000, 30));
    let mut events = Vec::new();
    w.start_fight(a, b, &mut events).unwrap();

    for _ in 0..500 {
        run_violence_tick(&mut w);
    }

    // With hits landing regularly over 500 exchanges, practice shows
    let a_skill = w.actor(a).unwrap().skills.level(SkillKind::Sword);
    let b_skill = w.actor(b).unwrap().skills.level(SkillKind::Sword);
    assert!(
        a_skill != 30 || b_skill != 30,
        "no skill movement after 500 ticks"
    );
}

#[test]
fn test_affect_ages_out_during_fight() {
    let mut w = World::new(CombatConfig::default(), 42);
    let a = w.spawn(swordsman("Brant", 30, 50));
    w.apply_affect_to(
        a,
        Affect::new(AffectSource::Spell(2), ApplyTarget::Strength, 4).with_duration(3),
        StackPolicy::Replace,
    )
    .unwrap();
    let boosted = w.actor(a).unwrap().abilities.strength;

    let mut events = Vec::new();
    for _ in 0..3 {
        w.age_affects(&mut events);
    }
    assert!(events
        .iter()
        .any(|e| matches!(e, CombatEvent::AffectExpired { .. })));
    assert_eq!(w.actor(a).unwrap().abilities.strength, boosted - 4);
}
