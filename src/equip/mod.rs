//! Equipment: items and the fixed body slots binding them to actors

pub mod item;
pub mod slots;

pub use item::{DamageDice, Item, ItemKind, ItemRestriction};
pub use slots::{EquipSlot, EquipmentSlots};
