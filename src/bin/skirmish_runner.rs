//! Headless Skirmish Runner
//!
//! Runs seeded actor-vs-actor skirmishes and prints a JSON summary, for
//! balance tuning and regression comparison across config changes.

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use duskhold::actor::skills::SkillKind;
use duskhold::actor::Actor;
use duskhold::combat::CombatEvent;
use duskhold::core::config::CombatConfig;
use duskhold::core::types::{AttackKind, Class};
use duskhold::equip::{DamageDice, EquipSlot, Item};
use duskhold::world::scheduler::run_violence_tick;
use duskhold::world::World;

/// Headless Skirmish Runner - seeded duels with a JSON summary
#[derive(Parser, Debug)]
#[command(name = "skirmish_runner")]
#[command(about = "Run seeded actor-vs-actor skirmishes and output JSON summaries")]
struct Args {
    /// Path to a TOML combat config; defaults apply when omitted
    #[arg(long)]
    config: Option<String>,

    /// Number of duels to run
    #[arg(long, default_value_t = 100)]
    duels: u32,

    /// Maximum ticks per duel before calling it a draw
    #[arg(long, default_value_t = 2000)]
    max_ticks: u64,

    /// Vitality both duelists start with
    #[arg(long, default_value_t = 60)]
    vitality: i32,

    /// Weapon skill both duelists start with
    #[arg(long, default_value_t = 60)]
    skill: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose per-tick logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct SkirmishSummary {
    duels: u32,
    first_wins: u32,
    second_wins: u32,
    draws: u32,
    total_ticks: u64,
    mean_ticks_to_death: f64,
    total_swings: u64,
    total_hits: u64,
    total_crits: u64,
    total_blocks: u64,
    hit_rate: f64,
    seed: u64,
}

fn duelist(name: &str, vitality: i32, skill: u32) -> Actor {
    let mut actor = Actor::new(name, Class::Warrior).with_vitality(vitality);
    actor.skills.set_level(SkillKind::Sword, skill);
    actor.skills.set_level(SkillKind::Shield, skill);
    let sword = Item::weapon(
        "longsword",
        SkillKind::Sword,
        AttackKind::Slash,
        DamageDice::new(1, 8),
    );
    if let Err((err, _)) = actor.equipment.equip(sword, EquipSlot::Wield, actor.alignment, actor.class) {
        eprintln!("Warning: failed to arm {}: {}", name, err);
    }
    let shield = Item::shield("kite shield", 200);
    if let Err((err, _)) = actor.equipment.equip(shield, EquipSlot::Shield, actor.alignment, actor.class) {
        eprintln!("Warning: failed to shield {}: {}", name, err);
    }
    actor
}

fn main() {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => {
            let text = match std::fs::read_to_string(path) {
                Ok(text) => text,
                Err(err) => {
                    eprintln!("Error: cannot read config '{}': {}", path, err);
                    std::process::exit(1);
                }
            };
            match CombatConfig::from_toml_str(&text) {
                Ok(config) => config,
                Err(err) => {
                    eprintln!("Error: cannot parse config '{}': {}", path, err);
                    std::process::exit(1);
                }
            }
        }
        None => CombatConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);

    let mut summary = SkirmishSummary {
        duels: args.duels,
        first_wins: 0,
        second_wins: 0,
        draws: 0,
        total_ticks: 0,
        mean_ticks_to_death: 0.0,
        total_swings: 0,
        total_hits: 0,
        total_crits: 0,
        total_blocks: 0,
        hit_rate: 0.0,
        seed,
    };
    let mut decided_ticks: Vec<u64> = Vec::new();

    for duel in 0..args.duels {
        let mut world = World::new(config.clone(), seed.wrapping_add(duel as u64));
        let first = world.spawn(duelist("First", args.vitality, args.skill));
        let second = world.spawn(duelist("Second", args.vitality, args.skill));

        let mut events = Vec::new();
        if let Err(err) = world.start_fight(first, second, &mut events) {
            eprintln!("Error: cannot start duel {}: {}", duel, err);
            std::process::exit(1);
        }

        let mut decided = false;
        for _ in 0..args.max_ticks {
            let tick_events = run_violence_tick(&mut world);
            summary.total_ticks += 1;
            for event in &tick_events {
                match event {
                    CombatEvent::AttackResolved { result, .. } => {
                        summary.total_swings += 1;
                        if result.hit {
                            summary.total_hits += 1;
                        }
                        if result.critical {
                            summary.total_crits += 1;
                        }
                        if result.blocked {
                            summary.total_blocks += 1;
                        }
                    }
                    CombatEvent::Died { .. } => decided = true,
                    _ => {}
                }
            }
            if decided {
                break;
            }
        }

        if decided {
            decided_ticks.push(world.tick);
            if world.registry.is_live(first) {
                summary.first_wins += 1;
            } else {
                summary.second_wins += 1;
            }
        } else {
            summary.draws += 1;
        }
    }

    if !decided_ticks.is_empty() {
        summary.mean_ticks_to_death =
            decided_ticks.iter().sum::<u64>() as f64 / decided_ticks.len() as f64;
    }
    if summary.total_swings > 0 {
        summary.hit_rate = summary.total_hits as f64 / summary.total_swings as f64;
    }

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(err) => {
            eprintln!("Error: cannot serialize summary: {}", err);
            std::process::exit(1);
        }
    }
}
