//! Read-only inventory snapshots.
//!
//! Slot storage belongs to the caller. A snapshot is a copy of its
//! `slot -> stack` contents taken for one planning call.

use std::collections::BTreeMap;

use craftplan_common::ItemType;
use serde::{Deserialize, Serialize};

/// A stack of one item type in a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Item type in the stack
    pub item: ItemType,
    /// Number of items
    pub count: u32,
}

impl ItemStack {
    /// Creates a stack.
    #[must_use]
    pub const fn new(item: ItemType, count: u32) -> Self {
        Self { item, count }
    }
}

/// Slot-indexed contents of one inventory.
///
/// Only occupied slots are stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventorySnapshot {
    slots: BTreeMap<usize, ItemStack>,
}

impl InventorySnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a snapshot from `(slot index, stack)` pairs.
    ///
    /// A repeated index keeps the last stack.
    #[must_use]
    pub fn from_slots(slots: impl IntoIterator<Item = (usize, ItemStack)>) -> Self {
        Self {
            slots: slots.into_iter().collect(),
        }
    }

    /// Sets or clears a slot.
    pub fn set_slot(&mut self, index: usize, stack: Option<ItemStack>) {
        match stack {
            Some(stack) => {
                self.slots.insert(index, stack);
            },
            None => {
                self.slots.remove(&index);
            },
        }
    }

    /// Stack in a slot, if any.
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&ItemStack> {
        self.slots.get(&index)
    }

    /// Occupied slots with their indices, in slot order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &ItemStack)> {
        self.slots.iter().map(|(&index, stack)| (index, stack))
    }

    /// Stacks in slot order.
    pub fn stacks(&self) -> impl Iterator<Item = &ItemStack> {
        self.slots.values()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Checks if every slot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slots_leaves_gaps_empty() {
        let snapshot = InventorySnapshot::from_slots([
            (3, ItemStack::new(ItemType::Stone, 4)),
            (1, ItemStack::new(ItemType::Wood, 20)),
        ]);

        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.slot(0).is_none());
        assert_eq!(snapshot.slot(1), Some(&ItemStack::new(ItemType::Wood, 20)));
        assert!(snapshot.slot(2).is_none());
        assert_eq!(
            snapshot.stacks().map(|s| s.item).collect::<Vec<_>>(),
            vec![ItemType::Wood, ItemType::Stone]
        );
    }

    #[test]
    fn test_sparse_indices_store_only_occupied_slots() {
        let snapshot = InventorySnapshot::from_slots([
            (50_000_000, ItemStack::new(ItemType::Wood, 20)),
            (usize::MAX, ItemStack::new(ItemType::Coal, 1)),
        ]);

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.slot(usize::MAX), Some(&ItemStack::new(ItemType::Coal, 1)));
        assert_eq!(
            snapshot.occupied().map(|(index, _)| index).collect::<Vec<_>>(),
            vec![50_000_000, usize::MAX]
        );
    }

    #[test]
    fn test_set_and_clear_slot() {
        let mut snapshot = InventorySnapshot::new();
        assert!(snapshot.is_empty());

        snapshot.set_slot(2, Some(ItemStack::new(ItemType::Coal, 5)));
        let occupied: Vec<_> = snapshot.occupied().collect();
        assert_eq!(occupied, vec![(2, &ItemStack::new(ItemType::Coal, 5))]);

        snapshot.set_slot(2, None);
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_repeated_index_keeps_last() {
        let snapshot = InventorySnapshot::from_slots([
            (0, ItemStack::new(ItemType::Wood, 1)),
            (0, ItemStack::new(ItemType::Sand, 7)),
        ]);
        assert_eq!(snapshot.slot(0), Some(&ItemStack::new(ItemType::Sand, 7)));
    }
}
