//! Use-based skill feedback from combat exchanges
//!
//! Every resolved exchange is a practice opportunity. The attacker trains
//! the weapon family they swung with; a shield-carrying defender trains
//! shield work whether or not a block fired, since every incoming swing is
//! practice.

use rand::Rng;

use crate::actor::skills::SkillKind;
use crate::actor::Actor;
use crate::combat::resolver::weapon_family;
use crate::core::config::SkillGainPolicy;

/// Apply use-based feedback to the attacker after their swing
///
/// A landed hit is the success condition; a miss risks decay.
pub fn attacker_feedback(
    attacker: &mut Actor,
    hit: bool,
    policy: &SkillGainPolicy,
    rng: &mut impl Rng,
) -> (bool, bool) {
    let family = weapon_family(attacker);
    let class = attacker.class;
    if hit {
        (
            attacker.skills.train_on_success(family, class, policy, rng),
            false,
        )
    } else {
        (false, attacker.skills.decay_on_failure(family, policy, rng))
    }
}

/// Apply use-based feedback to a shield-carrying defender
///
/// An attack that missed them counts as successful shield work; a hit that
/// got through risks decay. Defenders without a shield learn nothing here.
pub fn defender_feedback(
    defender: &mut Actor,
    attacker_hit: bool,
    policy: &SkillGainPolicy,
    rng: &mut impl Rng,
) -> (bool, bool) {
    if defender.equipment.shield().is_none() {
        return (false, false);
    }

    let class = defender.class;
    if attacker_hit {
        (
            false,
            defender.skills.decay_on_failure(SkillKind::Shield, policy, rng),
        )
    } else {
        (
            defender
                .skills
                .train_on_success(SkillKind::Shield, class, policy, rng),
            false,
        )
    }
}
