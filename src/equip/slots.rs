//! Fixed body-position slots binding items to an actor
//!
//! Equip failures hand the item back to the caller, never dropping it.
//! Unequip detaches and returns the item; the caller owns it again.

use serde::{Deserialize, Serialize};

use crate::core::error::ValidationError;
use crate::core::types::{Alignment, Class};
use crate::equip::item::{Item, ItemKind};

/// Body positions an item can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipSlot {
    Head,
    Neck,
    Body,
    Arms,
    Hands,
    Waist,
    Legs,
    Feet,
    Shield,
    Wield,
}

impl EquipSlot {
    pub const ALL: [EquipSlot; 10] = [
        EquipSlot::Head,
        EquipSlot::Neck,
        EquipSlot::Body,
        EquipSlot::Arms,
        EquipSlot::Hands,
        EquipSlot::Waist,
        EquipSlot::Legs,
        EquipSlot::Feet,
        EquipSlot::Shield,
        EquipSlot::Wield,
    ];

    pub const COUNT: usize = Self::ALL.len();

    fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    /// Can an item of this kind be bound to this slot?
    fn accepts(self, kind: &ItemKind) -> bool {
        match kind {
            ItemKind::Weapon { .. } => self == EquipSlot::Wield,
            ItemKind::Shield { .. } => self == EquipSlot::Shield,
            ItemKind::Armor { .. } => {
                !matches!(self, EquipSlot::Wield | EquipSlot::Shield | EquipSlot::Neck)
            }
            ItemKind::Trinket => matches!(self, EquipSlot::Neck | EquipSlot::Waist),
        }
    }
}

/// Per-actor equipment bindings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquipmentSlots {
    slots: [Option<Item>; EquipSlot::COUNT],
}

impl EquipmentSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an item to a slot, validating first
    ///
    /// On failure the item comes back with the error; no state changed.
    pub fn equip(
        &mut self,
        item: Item,
        slot: EquipSlot,
        alignment: Alignment,
        class: Class,
    ) -> Result<(), (ValidationError, Item)> {
        if self.slots[slot.index()].is_some() {
            return Err((ValidationError::SlotOccupied, item));
        }
        if !slot.accepts(&item.kind) {
            return Err((ValidationError::WrongSlot, item));
        }
        if !item.restriction.alignment_allowed(alignment) {
            return Err((ValidationError::AlignmentForbidden, item));
        }
        if !item.restriction.class_allowed(class) {
            return Err((ValidationError::ClassForbidden, item));
        }

        self.slots[slot.index()] = Some(item);
        Ok(())
    }

    /// Detach the item in a slot, returning it to the caller's custody
    pub fn unequip(&mut self, slot: EquipSlot) -> Option<Item> {
        self.slots[slot.index()].take()
    }

    pub fn get(&self, slot: EquipSlot) -> Option<&Item> {
        self.slots[slot.index()].as_ref()
    }

    pub fn get_mut(&mut self, slot: EquipSlot) -> Option<&mut Item> {
        self.slots[slot.index()].as_mut()
    }

    /// All currently bound items with their slots
    pub fn worn(&self) -> impl Iterator<Item = (EquipSlot, &Item)> {
        EquipSlot::ALL
            .iter()
            .filter_map(|slot| self.get(*slot).map(|item| (*slot, item)))
    }

    /// Detach everything, in slot order
    pub fn strip_all(&mut self) -> Vec<Item> {
        EquipSlot::ALL
            .iter()
            .filter_map(|slot| self.unequip(*slot))
            .collect()
    }

    pub fn wielded(&self) -> Option<&Item> {
        self.get(EquipSlot::Wield)
    }

    pub fn shield(&self) -> Option<&Item> {
        self.get(EquipSlot::Shield).filter(|item| item.is_shield())
    }
}
