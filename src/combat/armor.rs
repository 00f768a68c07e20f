//! Ascending armor-class computation
//!
//! AC is recomputed fresh on every resolution and never cached. All caps
//! are applied here at compute time rather than stored on items or actors,
//! so bonus stacking past design limits is impossible no matter how many
//! pieces are combined.

use crate::actor::{ability_modifier, Actor};
use crate::combat::constants::BASE_ARMOR_CLASS;
use crate::core::config::CombatConfig;
use crate::core::types::Ability;
use crate::equip::ItemKind;

/// Compute the defender's ascending armor class
///
/// base + Σ(per-piece armor, capped) + (magic armor, capped) + dexterity
/// modifier (capped by the most restrictive equipped piece) + situational.
pub fn armor_class(defender: &Actor, situational: i32, config: &CombatConfig) -> i32 {
    let mut piece_total = 0;
    let mut magic_total = 0;
    let mut dex_cap: Option<i32> = None;

    for (_, item) in defender.equipment.worn() {
        if let ItemKind::Armor {
            piece_ac,
            max_dex_bonus,
        } = item.kind
        {
            piece_total += piece_ac.min(config.per_piece_ac_cap);
            magic_total += item.enchantment;
            if let Some(max_dex) = max_dex_bonus {
                dex_cap = Some(dex_cap.map_or(max_dex, |cap: i32| cap.min(max_dex)));
            }
        }
    }

    // Spell wards count toward the same capped magic total as enchantments
    magic_total += defender.armor_bonus;
    magic_total = magic_total.min(config.magic_ac_cap);

    let mut dex_bonus = ability_modifier(defender.ability(Ability::Dexterity));
    if let Some(cap) = dex_cap {
        dex_bonus = dex_bonus.min(cap);
    }

    BASE_ARMOR_CLASS + piece_total + magic_total + dex_bonus + situational
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::AbilitySet;
    use crate::core::types::{Alignment, Class};
    use crate::equip::{EquipSlot, Item};

    fn cfg() -> CombatConfig {
        CombatConfig::default()
    }

    fn wearer() -> Actor {
        Actor::new("Sable", Class::Rogue)
    }

    fn equip(actor: &mut Actor, item: Item, slot: EquipSlot) {
        actor
            .equipment
            .equip(item, slot, Alignment(0), Class::Rogue)
            .unwrap();
    }

    #[test]
    fn test_naked_ac_is_base_plus_dex() {
        let config = cfg();
        let mut sable = wearer();
        sable.abilities.set(Ability::Dexterity, 16);
        assert_eq!(armor_class(&sable, 0, &config), BASE_ARMOR_CLASS + 3);
    }

    #[test]
    fn test_per_piece_cap_applies() {
        let config = cfg();
        let mut sable = wearer().with_abilities(AbilitySet::uniform(10));
        // Piece claims 9 AC but the per-piece cap bounds it
        equip(&mut sable, Item::armor("tower plate", 9, None), EquipSlot::Body);
        assert_eq!(
            armor_class(&sable, 0, &config),
            BASE_ARMOR_CLASS + config.per_piece_ac_cap
        );
    }

    #[test]
    fn test_magic_bonus_capped_across_pieces() {
        let config = cfg();
        let mut sable = wearer().with_abilities(AbilitySet::uniform(10));
        equip(
            &mut sable,
            Item::armor("runed helm", 1, None).with_enchantment(4),
            EquipSlot::Head,
        );
        equip(
            &mut sable,
            Item::armor("runed greaves", 1, None).with_enchantment(4),
            EquipSlot::Legs,
        );
        // 8 total enchantment collapses to the magic cap
        assert_eq!(
            armor_class(&sable, 0, &config),
            BASE_ARMOR_CLASS + 2 + config.magic_ac_cap
        );
    }

    #[test]
    fn test_most_restrictive_dex_cap_wins() {
        let config = cfg();
        let mut sable = wearer();
        sable.abilities.set(Ability::Dexterity, 20);
        equip(
            &mut sable,
            Item::armor("light vest", 1, Some(4)),
            EquipSlot::Body,
        );
        equip(
            &mut sable,
            Item::armor("heavy greaves", 1, Some(1)),
            EquipSlot::Legs,
        );
        // Dex modifier is +5 but the greaves allow only +1
        assert_eq!(armor_class(&sable, 0, &config), BASE_ARMOR_CLASS + 2 + 1);
    }

    #[test]
    fn test_situational_bonus_added() {
        let config = cfg();
        let sable = wearer().with_abilities(AbilitySet::uniform(10));
        assert_eq!(
            armor_class(&sable, 2, &config),
            armor_class(&sable, 0, &config) + 2
        );
    }

    #[test]
    fn test_spell_ward_shares_magic_cap() {
        let config = cfg();
        let mut sable = wearer().with_abilities(AbilitySet::uniform(10));
        sable.armor_bonus = 20;
        assert_eq!(
            armor_class(&sable, 0, &config),
            BASE_ARMOR_CLASS + config.magic_ac_cap
        );
    }
}
