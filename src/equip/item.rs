//! Items that can be wielded or worn
//!
//! An item contributes modifiers only while bound to a slot; binding and
//! unbinding move the item by value, so an item can never be bound in two
//! places at once.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::actor::skills::SkillKind;
use crate::affect::{ApplyTarget, StatusFlags};
use crate::core::types::{Alignment, AttackKind, Class};

/// Damage dice for a weapon or unarmed strike
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageDice {
    pub count: u32,
    pub sides: u32,
}

impl DamageDice {
    pub const fn new(count: u32, sides: u32) -> Self {
        Self { count, sides }
    }

    pub fn roll(&self, rng: &mut impl Rng) -> i32 {
        (0..self.count)
            .map(|_| rng.gen_range(1..=self.sides.max(1)) as i32)
            .sum()
    }

    pub fn minimum(&self) -> i32 {
        self.count as i32
    }

    pub fn maximum(&self) -> i32 {
        (self.count * self.sides.max(1)) as i32
    }
}

/// What an item does when equipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon {
        family: SkillKind,
        attack: AttackKind,
        dice: DamageDice,
    },
    Armor {
        /// Armor-class contribution; capped at compute time, not here
        piece_ac: i32,
        /// Ceiling this piece imposes on the wearer's dexterity AC bonus
        max_dex_bonus: Option<i32>,
    },
    Shield {
        durability: i32,
    },
    Trinket,
}

/// Alignment/class gates on who may equip an item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRestriction {
    pub forbid_good: bool,
    pub forbid_evil: bool,
    pub forbid_neutral: bool,
    /// `None` means any class
    pub allowed_classes: Option<Vec<Class>>,
}

impl ItemRestriction {
    pub fn alignment_allowed(&self, alignment: Alignment) -> bool {
        !(self.forbid_good && alignment.is_good()
            || self.forbid_evil && alignment.is_evil()
            || self.forbid_neutral && alignment.is_neutral())
    }

    pub fn class_allowed(&self, class: Class) -> bool {
        match &self.allowed_classes {
            Some(classes) => classes.contains(&class),
            None => true,
        }
    }
}

/// An equippable item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub kind: ItemKind,
    /// Magic bonus; feeds attack or AC depending on kind, capped downstream
    pub enchantment: i32,
    pub restriction: ItemRestriction,
    /// Modifiers contributed while worn
    pub affects: Vec<(ApplyTarget, i32)>,
    /// Status flags granted while worn
    pub grants: StatusFlags,
}

impl Item {
    pub fn weapon(name: &str, family: SkillKind, attack: AttackKind, dice: DamageDice) -> Self {
        Self {
            name: name.to_string(),
            kind: ItemKind::Weapon {
                family,
                attack,
                dice,
            },
            enchantment: 0,
            restriction: ItemRestriction::default(),
            affects: Vec::new(),
            grants: StatusFlags::NONE,
        }
    }

    pub fn armor(name: &str, piece_ac: i32, max_dex_bonus: Option<i32>) -> Self {
        Self {
            name: name.to_string(),
            kind: ItemKind::Armor {
                piece_ac,
                max_dex_bonus,
            },
            enchantment: 0,
            restriction: ItemRestriction::default(),
            affects: Vec::new(),
            grants: StatusFlags::NONE,
        }
    }

    pub fn shield(name: &str, durability: i32) -> Self {
        Self {
            name: name.to_string(),
            kind: ItemKind::Shield { durability },
            enchantment: 0,
            restriction: ItemRestriction::default(),
            affects: Vec::new(),
            grants: StatusFlags::NONE,
        }
    }

    pub fn with_enchantment(mut self, bonus: i32) -> Self {
        self.enchantment = bonus;
        self
    }

    pub fn with_affect(mut self, target: ApplyTarget, modifier: i32) -> Self {
        self.affects.push((target, modifier));
        self
    }

    pub fn with_restriction(mut self, restriction: ItemRestriction) -> Self {
        self.restriction = restriction;
        self
    }

    pub fn is_shield(&self) -> bool {
        matches!(self.kind, ItemKind::Shield { .. })
    }
}
