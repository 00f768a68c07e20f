//! Actors: the combat-capable entities of the simulation
//!
//! An actor's derived attributes (`abilities`, `max_vitality`, the combat
//! bonuses, status flags) are always a pure fold of base values plus active
//! modifiers; `crate::affect::recompute` is the only writer of derived state.

pub mod position;
pub mod skills;

use serde::{Deserialize, Serialize};

use crate::affect::{Affect, StatusFlags};
use crate::core::types::{Ability, ActorHandle, Alignment, Class, RoomId};
use crate::equip::EquipmentSlots;
use position::Position;
use skills::SkillTable;

/// The six ability scores as one block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySet {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl AbilitySet {
    pub const fn uniform(score: i32) -> Self {
        Self {
            strength: score,
            dexterity: score,
            constitution: score,
            intelligence: score,
            wisdom: score,
            charisma: score,
        }
    }

    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    pub fn set(&mut self, ability: Ability, score: i32) {
        match ability {
            Ability::Strength => self.strength = score,
            Ability::Dexterity => self.dexterity = score,
            Ability::Constitution => self.constitution = score,
            Ability::Intelligence => self.intelligence = score,
            Ability::Wisdom => self.wisdom = score,
            Ability::Charisma => self.charisma = score,
        }
    }

    /// Clamp every score into `[floor, ceiling]`
    pub fn clamp_all(&mut self, floor: i32, ceiling: i32) {
        self.strength = self.strength.clamp(floor, ceiling);
        self.dexterity = self.dexterity.clamp(floor, ceiling);
        self.constitution = self.constitution.clamp(floor, ceiling);
        self.intelligence = self.intelligence.clamp(floor, ceiling);
        self.wisdom = self.wisdom.clamp(floor, ceiling);
        self.charisma = self.charisma.clamp(floor, ceiling);
    }
}

impl Default for AbilitySet {
    fn default() -> Self {
        Self::uniform(13)
    }
}

/// Modifier for an ability score, rounding toward negative infinity
pub fn ability_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// A combat-capable entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    pub class: Class,
    pub alignment: Alignment,
    pub room: RoomId,

    // Base values; never touched by modifiers
    pub base_abilities: AbilitySet,
    pub base_max_vitality: i32,

    // Derived values; written only by recompute
    pub abilities: AbilitySet,
    pub max_vitality: i32,
    pub flags: StatusFlags,
    pub armor_bonus: i32,
    pub hit_bonus: i32,
    pub damage_bonus: i32,

    pub vitality: i32,
    pub position: Position,
    /// Current fighting target; tied 1:1 to combatant-set membership
    pub fighting: Option<ActorHandle>,

    pub equipment: EquipmentSlots,
    pub affects: Vec<Affect>,
    pub skills: SkillTable,

    /// Logically dead, awaiting physical detachment by the reaper
    pub pending_reap: bool,

    // References torn down at reap time
    pub hunting: Option<ActorHandle>,
    pub following: Option<ActorHandle>,
    pub group: Vec<ActorHandle>,
}

impl Actor {
    pub fn new(name: &str, class: Class) -> Self {
        let abilities = AbilitySet::default();
        Self {
            name: name.to_string(),
            class,
            alignment: Alignment(0),
            room: RoomId(0),
            base_abilities: abilities,
            base_max_vitality: 20,
            abilities,
            max_vitality: 20,
            flags: StatusFlags::NONE,
            armor_bonus: 0,
            hit_bonus: 0,
            damage_bonus: 0,
            vitality: 20,
            position: Position::Standing,
            fighting: None,
            equipment: EquipmentSlots::new(),
            affects: Vec::new(),
            skills: SkillTable::new(),
            pending_reap: false,
            hunting: None,
            following: None,
            group: Vec::new(),
        }
    }

    pub fn with_abilities(mut self, abilities: AbilitySet) -> Self {
        self.base_abilities = abilities;
        self.abilities = abilities;
        self
    }

    pub fn with_vitality(mut self, max: i32) -> Self {
        self.base_max_vitality = max;
        self.max_vitality = max;
        self.vitality = max;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn ability(&self, ability: Ability) -> i32 {
        self.abilities.get(ability)
    }

    pub fn ability_mod(&self, ability: Ability) -> i32 {
        ability_modifier(self.ability(ability))
    }

    pub fn is_alive(&self) -> bool {
        self.position != Position::Dead && !self.pending_reap
    }

    pub fn is_fighting(&self) -> bool {
        self.fighting.is_some()
    }
}
