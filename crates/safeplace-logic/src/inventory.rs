//! Fixed-size slot inventory with stacking and portion tracking.
//!
//! The inventory is an ordered array of slots; an empty slot is `None`
//! and keeps its position. Stackable items merge into existing stacks up
//! to their per-slot cap and overflow into fresh slots. Non-stackable
//! items take one slot per unit. Adding is all-or-nothing.
//!
//! Portioned consumables (water bottles, rations) also carry a portion
//! count. Invariant for such slots: `quantity == ceil(portions /
//! portions_per_unit)`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::items::Item;

/// Inventory sizing rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Number of slots.
    pub slot_count: usize,
    /// Per-slot cap for stackable items that don't declare their own.
    pub default_max_stack: u32,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            slot_count: 10,
            default_max_stack: 99,
        }
    }
}

/// Contents of an occupied slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySlot {
    pub item_id: String,
    pub quantity: u32,
    /// Remaining portions, for portioned consumables only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portions: Option<u32>,
}

/// Item id + quantity pair used by recipes and crafting results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStack {
    pub item_id: String,
    pub quantity: u32,
}

impl ItemStack {
    pub fn new(item_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
        }
    }
}

/// Inventory operation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// Not enough free slots / stack room for the whole quantity.
    InventoryFull { item_id: String },
    SlotOutOfRange(usize),
    EmptySlot(usize),
    ZeroQuantity,
    /// The slot holds a different item than the caller expected.
    ItemMismatch {
        slot: usize,
        expected: String,
        found: String,
    },
}

impl fmt::Display for InventoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InventoryError::InventoryFull { item_id } => {
                write!(f, "no room for '{}'", item_id)
            }
            InventoryError::SlotOutOfRange(i) => write!(f, "slot {} out of range", i),
            InventoryError::EmptySlot(i) => write!(f, "slot {} is empty", i),
            InventoryError::ZeroQuantity => write!(f, "quantity must be positive"),
            InventoryError::ItemMismatch {
                slot,
                expected,
                found,
            } => write!(
                f,
                "slot {} holds '{}', expected '{}'",
                slot, found, expected
            ),
        }
    }
}

impl std::error::Error for InventoryError {}

/// Result of eating / drinking / using one portion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortionConsumption {
    /// Effect strength delivered by this use.
    pub effect_applied: u32,
    pub portions_remaining: u32,
    pub units_remaining: u32,
    /// The slot emptied and was cleared.
    pub item_consumed: bool,
    pub message: String,
}

/// The character's inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    slots: Vec<Option<InventorySlot>>,
    default_max_stack: u32,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_config(&InventoryConfig::default())
    }
}

impl Inventory {
    pub fn new(slot_count: usize) -> Self {
        Self::with_config(&InventoryConfig {
            slot_count,
            ..InventoryConfig::default()
        })
    }

    pub fn with_config(config: &InventoryConfig) -> Self {
        Self {
            slots: vec![None; config.slot_count],
            default_max_stack: config.default_max_stack.max(1),
        }
    }

    pub fn slots(&self) -> &[Option<InventorySlot>] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&InventorySlot> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn free_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.is_none()).count()
    }

    pub fn is_full(&self) -> bool {
        self.free_slots() == 0
    }

    /// Total units of `item_id` across all slots.
    pub fn count(&self, item_id: &str) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|s| s.item_id == item_id)
            .map(|s| s.quantity)
            .sum()
    }

    pub fn has(&self, item_id: &str, quantity: u32) -> bool {
        self.count(item_id) >= quantity
    }

    /// Index of the first slot holding `item_id`.
    pub fn find(&self, item_id: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.as_ref().is_some_and(|s| s.item_id == item_id))
    }

    fn stack_cap(&self, item: &Item) -> u32 {
        if item.stackable {
            item.max_stack.unwrap_or(self.default_max_stack).max(1)
        } else {
            1
        }
    }

    /// Add `quantity` units of `item`. Either everything fits or nothing
    /// changes.
    pub fn add_item(&mut self, item: &Item, quantity: u32) -> Result<(), InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::ZeroQuantity);
        }
        let cap = self.stack_cap(item);

        // Room in existing stacks first.
        let mut top_ups: Vec<(usize, u32)> = Vec::new();
        let mut remaining = quantity;
        if item.stackable {
            for (i, slot) in self.slots.iter().enumerate() {
                if remaining == 0 {
                    break;
                }
                if let Some(s) = slot {
                    if s.item_id == item.id && s.quantity < cap {
                        let add = remaining.min(cap - s.quantity);
                        top_ups.push((i, add));
                        remaining -= add;
                    }
                }
            }
        }

        let new_slots_needed = remaining.div_ceil(cap) as usize;
        if new_slots_needed > self.free_slots() {
            log::info!(
                "inventory full: cannot add {} x{} ({} slots needed, {} free)",
                item.id,
                quantity,
                new_slots_needed,
                self.free_slots()
            );
            return Err(InventoryError::InventoryFull {
                item_id: item.id.clone(),
            });
        }

        let per_unit = if item.is_portioned() {
            item.portions_per_unit
        } else {
            None
        };

        for (i, add) in top_ups {
            if let Some(s) = self.slots[i].as_mut() {
                s.quantity += add;
                if let (Some(p), Some(ppu)) = (s.portions.as_mut(), per_unit) {
                    *p += add * ppu;
                }
            }
        }

        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            if slot.is_none() {
                let qty = remaining.min(cap);
                *slot = Some(InventorySlot {
                    item_id: item.id.clone(),
                    quantity: qty,
                    portions: per_unit.map(|ppu| qty * ppu),
                });
                remaining -= qty;
            }
        }

        Ok(())
    }

    /// Remove up to `quantity` units of `item_id`, front to back.
    /// Returns how many were actually removed.
    pub fn remove_item(&mut self, item_id: &str, quantity: u32) -> u32 {
        let mut remaining = quantity;
        for index in 0..self.slots.len() {
            if remaining == 0 {
                break;
            }
            let matches = self.slots[index]
                .as_ref()
                .is_some_and(|s| s.item_id == item_id);
            if matches {
                remaining -= self.take_from(index, remaining);
            }
        }
        quantity - remaining
    }

    /// Remove up to `quantity` units from one slot. Returns the amount
    /// removed.
    pub fn remove_from_slot(&mut self, index: usize, quantity: u32) -> Result<u32, InventoryError> {
        match self.slots.get(index) {
            None => Err(InventoryError::SlotOutOfRange(index)),
            Some(None) => Err(InventoryError::EmptySlot(index)),
            Some(Some(_)) => Ok(self.take_from(index, quantity)),
        }
    }

    fn take_from(&mut self, index: usize, quantity: u32) -> u32 {
        let Some(slot) = self.slots[index].as_mut() else {
            return 0;
        };
        let taken = quantity.min(slot.quantity);
        let left = slot.quantity - taken;
        if left == 0 {
            self.slots[index] = None;
        } else {
            // Portions shrink in proportion to the units kept.
            if let Some(p) = slot.portions.as_mut() {
                *p = (u64::from(*p) * u64::from(left)).div_ceil(u64::from(slot.quantity)) as u32;
            }
            slot.quantity = left;
        }
        taken
    }

    /// Use one portion (or one unit, for plain items) from `index`.
    pub fn consume_portion(
        &mut self,
        index: usize,
        item: &Item,
    ) -> Result<PortionConsumption, InventoryError> {
        let slot = match self.slots.get_mut(index) {
            None => return Err(InventoryError::SlotOutOfRange(index)),
            Some(None) => return Err(InventoryError::EmptySlot(index)),
            Some(Some(slot)) => slot,
        };
        if slot.item_id != item.id {
            return Err(InventoryError::ItemMismatch {
                slot: index,
                expected: item.id.clone(),
                found: slot.item_id.clone(),
            });
        }

        let result = match (item.is_portioned(), item.portions_per_unit) {
            (true, Some(ppu)) => {
                let current = slot.portions.unwrap_or(slot.quantity * ppu);
                let portions_remaining = current.saturating_sub(1);
                let units_remaining = portions_remaining.div_ceil(ppu);
                slot.portions = Some(portions_remaining);
                slot.quantity = units_remaining;
                let size = item.portion_size.as_deref().unwrap_or("porzione");
                PortionConsumption {
                    effect_applied: item.portion_effect.unwrap_or(0),
                    portions_remaining,
                    units_remaining,
                    item_consumed: portions_remaining == 0,
                    message: format!("Hai consumato un {} di {}.", size, item.name),
                }
            }
            _ => {
                slot.quantity -= 1;
                PortionConsumption {
                    effect_applied: item.effect(),
                    portions_remaining: slot.quantity,
                    units_remaining: slot.quantity,
                    item_consumed: slot.quantity == 0,
                    message: format!("Hai utilizzato {}.", item.name),
                }
            }
        };

        if result.item_consumed {
            self.slots[index] = None;
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::ItemKind;

    fn wood() -> Item {
        let mut item = Item::new("wood", "Legno", ItemKind::Material);
        item.stackable = true;
        item.max_stack = Some(10);
        item
    }

    fn knife() -> Item {
        Item::new("knife", "Coltello", ItemKind::Weapon)
    }

    fn water() -> Item {
        let mut item = Item::new("water", "Bottiglia d'acqua", ItemKind::Consumable);
        item.stackable = true;
        item.portions_per_unit = Some(4);
        item.portion_effect = Some(5);
        item.portion_size = Some("sorso".into());
        item
    }

    #[test]
    fn default_has_ten_empty_slots() {
        let inv = Inventory::default();
        assert_eq!(inv.slot_count(), 10);
        assert_eq!(inv.free_slots(), 10);
        assert!(!inv.is_full());
    }

    #[test]
    fn stackables_merge_then_overflow() {
        let mut inv = Inventory::new(4);
        inv.add_item(&wood(), 6).unwrap();
        inv.add_item(&wood(), 7).unwrap();
        assert_eq!(inv.count("wood"), 13);
        assert_eq!(inv.slot(0).unwrap().quantity, 10);
        assert_eq!(inv.slot(1).unwrap().quantity, 3);
        assert_eq!(inv.free_slots(), 2);
    }

    #[test]
    fn non_stackables_take_one_slot_each() {
        let mut inv = Inventory::new(3);
        inv.add_item(&knife(), 2).unwrap();
        assert_eq!(inv.free_slots(), 1);
        assert!(inv.slots()[..2]
            .iter()
            .all(|s| s.as_ref().unwrap().quantity == 1));
    }

    #[test]
    fn add_is_all_or_nothing() {
        let mut inv = Inventory::new(2);
        inv.add_item(&knife(), 1).unwrap();
        let before = inv.clone();
        let err = inv.add_item(&knife(), 2).unwrap_err();
        assert_eq!(
            err,
            InventoryError::InventoryFull {
                item_id: "knife".into()
            }
        );
        assert_eq!(inv, before);
    }

    #[test]
    fn zero_quantity_rejected() {
        let mut inv = Inventory::new(2);
        assert_eq!(
            inv.add_item(&wood(), 0).unwrap_err(),
            InventoryError::ZeroQuantity
        );
    }

    #[test]
    fn remove_by_id_drains_front_to_back_and_keeps_positions() {
        let mut inv = Inventory::new(4);
        inv.add_item(&knife(), 1).unwrap();
        inv.add_item(&wood(), 15).unwrap();
        // slots: knife, wood 10, wood 5, empty
        let removed = inv.remove_item("wood", 12);
        assert_eq!(removed, 12);
        assert!(inv.slot(0).is_some());
        assert!(inv.slot(1).is_none(), "drained slot becomes None");
        assert_eq!(inv.slot(2).unwrap().quantity, 3);
        assert_eq!(inv.slot_count(), 4);
    }

    #[test]
    fn remove_never_takes_more_than_owned() {
        let mut inv = Inventory::new(2);
        inv.add_item(&wood(), 3).unwrap();
        assert_eq!(inv.remove_item("wood", 10), 3);
        assert_eq!(inv.count("wood"), 0);
        assert_eq!(inv.remove_item("ghost", 1), 0);
    }

    #[test]
    fn remove_from_slot_errors() {
        let mut inv = Inventory::new(2);
        assert_eq!(
            inv.remove_from_slot(5, 1).unwrap_err(),
            InventoryError::SlotOutOfRange(5)
        );
        assert_eq!(
            inv.remove_from_slot(0, 1).unwrap_err(),
            InventoryError::EmptySlot(0)
        );
        inv.add_item(&wood(), 4).unwrap();
        assert_eq!(inv.remove_from_slot(0, 1).unwrap(), 1);
        assert_eq!(inv.count("wood"), 3);
        assert_eq!(inv.remove_from_slot(0, 9).unwrap(), 3);
        assert!(inv.slot(0).is_none());
    }

    #[test]
    fn portioned_items_start_full() {
        let mut inv = Inventory::new(2);
        inv.add_item(&water(), 2).unwrap();
        assert_eq!(inv.slot(0).unwrap().portions, Some(8));
        inv.add_item(&water(), 1).unwrap();
        assert_eq!(inv.slot(0).unwrap().portions, Some(12));
        assert_eq!(inv.slot(0).unwrap().quantity, 3);
    }

    #[test]
    fn consume_portion_updates_units() {
        let mut inv = Inventory::new(2);
        inv.add_item(&water(), 2).unwrap();
        let r = inv.consume_portion(0, &water()).unwrap();
        assert_eq!(r.effect_applied, 5);
        assert_eq!(r.portions_remaining, 7);
        assert_eq!(r.units_remaining, 2);
        assert!(!r.item_consumed);
        assert_eq!(r.message, "Hai consumato un sorso di Bottiglia d'acqua.");

        for _ in 0..3 {
            inv.consume_portion(0, &water()).unwrap();
        }
        assert_eq!(inv.slot(0).unwrap().quantity, 1);
        assert_eq!(inv.slot(0).unwrap().portions, Some(4));

        for _ in 0..3 {
            inv.consume_portion(0, &water()).unwrap();
        }
        let last = inv.consume_portion(0, &water()).unwrap();
        assert!(last.item_consumed);
        assert!(inv.slot(0).is_none());
    }

    #[test]
    fn consume_plain_item_uses_one_unit() {
        let mut bandage = Item::new("bandage", "Benda", ItemKind::Consumable);
        bandage.stackable = true;
        bandage.effect_value = Some(10);
        let mut inv = Inventory::new(1);
        inv.add_item(&bandage, 2).unwrap();
        let r = inv.consume_portion(0, &bandage).unwrap();
        assert_eq!(r.effect_applied, 10);
        assert_eq!(r.units_remaining, 1);
        assert_eq!(r.message, "Hai utilizzato Benda.");
        assert!(inv.consume_portion(0, &bandage).unwrap().item_consumed);
        assert_eq!(
            inv.consume_portion(0, &bandage).unwrap_err(),
            InventoryError::EmptySlot(0)
        );
    }

    #[test]
    fn consume_checks_item_identity() {
        let mut inv = Inventory::new(1);
        inv.add_item(&wood(), 1).unwrap();
        let err = inv.consume_portion(0, &water()).unwrap_err();
        assert!(matches!(err, InventoryError::ItemMismatch { slot: 0, .. }));
    }

    #[test]
    fn removing_units_shrinks_portions() {
        let mut inv = Inventory::new(1);
        inv.add_item(&water(), 3).unwrap();
        inv.remove_item("water", 1);
        let slot = inv.slot(0).unwrap();
        assert_eq!(slot.quantity, 2);
        assert_eq!(slot.portions, Some(8));
    }
}
