//! Item tallies and the sufficiency check.
//!
//! A tally maps item types to counts. An absent entry means "none known",
//! which compares as zero.

use std::collections::BTreeMap;

use craftplan_common::ItemType;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::inventory::InventorySnapshot;

/// Counts of items available or required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemTally {
    counts: BTreeMap<ItemType, u32>,
}

impl ItemTally {
    /// Creates an empty tally.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for `item`, or `None` when the tally has no entry.
    #[must_use]
    pub fn get(&self, item: ItemType) -> Option<u32> {
        self.counts.get(&item).copied()
    }

    /// Count for `item`, treating a missing entry as zero.
    #[must_use]
    pub fn count(&self, item: ItemType) -> u32 {
        self.get(item).unwrap_or(0)
    }

    /// Sets the count for `item`, replacing any previous entry.
    pub fn set(&mut self, item: ItemType, count: u32) {
        self.counts.insert(item, count);
    }

    /// Adds `count` to the entry for `item`, creating it if needed.
    pub fn add(&mut self, item: ItemType, count: u32) {
        let entry = self.counts.entry(item).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    /// Entries in item order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemType, u32)> + '_ {
        self.counts.iter().map(|(&item, &count)| (item, count))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Checks if the tally has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Checks whether every requirement is met by this tally.
    ///
    /// Stops at the first requirement that is short. A missing entry
    /// counts as zero.
    #[must_use]
    pub fn covers(&self, required: &ItemTally) -> bool {
        required
            .iter()
            .all(|(item, needed)| self.count(item) >= needed)
    }

    /// Amounts still missing to meet `required`, one entry per short item.
    #[must_use]
    pub fn shortfall(&self, required: &ItemTally) -> ItemTally {
        required
            .iter()
            .filter_map(|(item, needed)| {
                let have = self.count(item);
                (have < needed).then(|| (item, needed - have))
            })
            .collect()
    }
}

impl FromIterator<(ItemType, u32)> for ItemTally {
    /// Repeated items are summed.
    fn from_iter<I: IntoIterator<Item = (ItemType, u32)>>(iter: I) -> Self {
        let mut tally = Self::new();
        for (item, count) in iter {
            tally.add(item, count);
        }
        tally
    }
}

impl<const N: usize> From<[(ItemType, u32); N]> for ItemTally {
    fn from(entries: [(ItemType, u32); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl Extend<(ItemType, u32)> for ItemTally {
    fn extend<I: IntoIterator<Item = (ItemType, u32)>>(&mut self, iter: I) {
        for (item, count) in iter {
            self.add(item, count);
        }
    }
}

/// Sums every stack of every snapshot into one tally.
#[must_use]
pub fn tally_items<'a>(snapshots: impl IntoIterator<Item = &'a InventorySnapshot>) -> ItemTally {
    snapshots
        .into_iter()
        .flat_map(InventorySnapshot::stacks)
        .map(|stack| (stack.item, stack.count))
        .collect()
}

/// Checks whether the combined snapshots hold every required item.
///
/// True for an empty requirement set.
#[must_use]
pub fn has_enough_items<'a>(
    snapshots: impl IntoIterator<Item = &'a InventorySnapshot>,
    required: &ItemTally,
) -> bool {
    let available = tally_items(snapshots);
    let enough = available.covers(required);
    trace!(
        "Sufficiency check over {} item types: {}",
        required.len(),
        enough
    );
    enough
}
