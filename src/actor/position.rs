//! Vitality-driven lifecycle state machine
//!
//! Position is a pure function of current vitality against the configured
//! threshold table, re-derived after every vitality mutation. Dead is
//! terminal; every other state is reversible by healing.

use serde::{Deserialize, Serialize};

use crate::core::config::CombatConfig;

/// Lifecycle status, most severe first
///
/// Declaration order gives the severity ordering: `Dead` compares lowest,
/// `Standing` highest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Position {
    Dead,
    MortallyWounded,
    Incapacitated,
    Stunned,
    Sleeping,
    Resting,
    Sitting,
    Fighting,
    Standing,
}

impl Position {
    /// Positions an actor can choose voluntarily while healthy
    pub fn is_voluntary(self) -> bool {
        matches!(
            self,
            Position::Sleeping | Position::Resting | Position::Sitting | Position::Standing
        )
    }

    /// Can an actor in this position swing a weapon?
    pub fn can_fight(self) -> bool {
        matches!(self, Position::Fighting | Position::Standing)
    }

    /// Positions that force an exit from combat when entered
    pub fn forces_combat_exit(self) -> bool {
        self <= Position::Stunned
    }
}

/// Derive the position for a vitality value
///
/// `current` is consulted only when vitality is healthy, so that voluntary
/// rest positions survive a heal. A downed actor who recovers above the
/// stunned threshold stands up.
pub fn position_for(
    vitality: i32,
    current: Position,
    fighting: bool,
    config: &CombatConfig,
) -> Position {
    if vitality <= config.dead_threshold {
        Position::Dead
    } else if vitality <= config.mortally_wounded_threshold {
        Position::MortallyWounded
    } else if vitality <= config.incapacitated_threshold {
        Position::Incapacitated
    } else if vitality <= config.stunned_threshold {
        Position::Stunned
    } else if fighting {
        Position::Fighting
    } else {
        match current {
            Position::Sleeping | Position::Resting | Position::Sitting => current,
            _ => Position::Standing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> CombatConfig {
        CombatConfig::default()
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Position::Dead < Position::MortallyWounded);
        assert!(Position::MortallyWounded < Position::Incapacitated);
        assert!(Position::Incapacitated < Position::Stunned);
        assert!(Position::Stunned < Position::Sleeping);
        assert!(Position::Fighting < Position::Standing);
    }

    #[test]
    fn test_death_exactly_at_threshold() {
        let c = cfg();
        assert_eq!(
            position_for(c.dead_threshold, Position::Standing, false, &c),
            Position::Dead
        );
        assert_ne!(
            position_for(c.dead_threshold + 1, Position::Standing, false, &c),
            Position::Dead
        );
    }

    #[test]
    fn test_threshold_table_consistency() {
        // Every integer vitality in a wide bounded range maps to exactly
        // the band the threshold table prescribes.
        let c = cfg();
        for v in -200..=200 {
            let pos = position_for(v, Position::Standing, false, &c);
            let expected = if v <= c.dead_threshold {
                Position::Dead
            } else if v <= c.mortally_wounded_threshold {
                Position::MortallyWounded
            } else if v <= c.incapacitated_threshold {
                Position::Incapacitated
            } else if v <= c.stunned_threshold {
                Position::Stunned
            } else {
                Position::Standing
            };
            assert_eq!(pos, expected, "vitality {}", v);
        }
    }

    #[test]
    fn test_negative_one_is_stunned_not_dead() {
        let c = cfg();
        assert_eq!(
            position_for(-1, Position::Fighting, true, &c),
            Position::Stunned
        );
    }

    #[test]
    fn test_healthy_fighter_stays_fighting() {
        let c = cfg();
        assert_eq!(
            position_for(20, Position::Fighting, true, &c),
            Position::Fighting
        );
    }

    #[test]
    fn test_voluntary_rest_survives_heal() {
        let c = cfg();
        assert_eq!(
            position_for(30, Position::Resting, false, &c),
            Position::Resting
        );
        assert_eq!(
            position_for(30, Position::Sleeping, false, &c),
            Position::Sleeping
        );
    }

    #[test]
    fn test_recovered_actor_stands_up() {
        let c = cfg();
        assert_eq!(
            position_for(5, Position::Stunned, false, &c),
            Position::Standing
        );
        assert_eq!(
            position_for(5, Position::Incapacitated, false, &c),
            Position::Standing
        );
    }

    #[test]
    fn test_forced_combat_exit_band() {
        assert!(Position::Dead.forces_combat_exit());
        assert!(Position::MortallyWounded.forces_combat_exit());
        assert!(Position::Incapacitated.forces_combat_exit());
        assert!(Position::Stunned.forces_combat_exit());
        assert!(!Position::Sleeping.forces_combat_exit());
        assert!(!Position::Fighting.forces_combat_exit());
    }
}
