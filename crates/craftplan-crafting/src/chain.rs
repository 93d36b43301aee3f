//! Recipe-chain resolution.
//!
//! Expands a target item into the ordered list of production steps needed to
//! obtain one unit of it, walking ingredient recipes breadth-first.
//!
//! # Algorithm
//!
//! ```text
//! queue = [(target, 1)]          ledger = copy of available
//! while let Some(step) = queue.pop_front():
//!     no recipe?           -> raw resource, emit step, terminal
//!     ledger[item] >= amt  -> already in stock, skip
//!     otherwise            -> ledger[item] -= amt, emit step,
//!                             enqueue each ingredient (per-craft count)
//! ```
//!
//! The ledger is shared by the whole expansion. A step already covered by
//! stock is skipped without consuming it; a short step is debited, so later
//! claims on the same item in queue order see the reduced balance. Ledger
//! entries may go negative. Raw resources never consult the ledger, so a raw
//! target is listed even when held. Recipe yield is not used to scale ingredient
//! counts.

use std::collections::{BTreeMap, VecDeque};

use craftplan_common::ItemType;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::recipes::RecipeCatalog;
use crate::tally::ItemTally;

/// One step of a resolved chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    /// Item to produce or gather
    pub item: ItemType,
    /// Units required by the parent step
    pub amount_required: u32,
}

impl ProductInfo {
    /// Creates a step.
    #[must_use]
    pub const fn new(item: ItemType, amount_required: u32) -> Self {
        Self {
            item,
            amount_required,
        }
    }
}

/// Remaining availability during and after a resolution.
///
/// Counts are signed; a negative entry means stock is exhausted and more is
/// still owed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainLedger {
    counts: BTreeMap<ItemType, i64>,
}

impl ChainLedger {
    /// Remaining count for `item`, if the ledger has an entry.
    #[must_use]
    pub fn get(&self, item: ItemType) -> Option<i64> {
        self.counts.get(&item).copied()
    }

    /// Entries in item order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemType, i64)> + '_ {
        self.counts.iter().map(|(&item, &count)| (item, count))
    }

    /// Amounts owed beyond stock, one entry per negative balance.
    #[must_use]
    pub fn deficits(&self) -> ItemTally {
        self.iter()
            .filter(|&(_, count)| count < 0)
            .map(|(item, count)| (item, u32::try_from(-count).unwrap_or(u32::MAX)))
            .collect()
    }

    fn covers(&self, item: ItemType, amount: u32) -> bool {
        self.get(item).is_some_and(|known| known >= i64::from(amount))
    }

    fn debit(&mut self, item: ItemType, amount: u32) {
        let entry = self.counts.entry(item).or_insert(0);
        *entry -= i64::from(amount);
    }
}

impl From<&ItemTally> for ChainLedger {
    fn from(tally: &ItemTally) -> Self {
        Self {
            counts: tally
                .iter()
                .map(|(item, count)| (item, i64::from(count)))
                .collect(),
        }
    }
}

/// Full outcome of a resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainResolution {
    /// Steps in breadth-first discovery order
    pub steps: Vec<ProductInfo>,
    /// Ledger state after the expansion
    pub ledger: ChainLedger,
    /// Raw resources reached by the expansion, summed per item
    pub raw_requirements: ItemTally,
    /// Sum of craft times over crafted steps, one craft per step
    pub total_craft_ticks: u64,
}

impl ChainResolution {
    /// Raw resources the expansion reached that `available` cannot cover.
    #[must_use]
    pub fn missing_raw(&self, available: &ItemTally) -> ItemTally {
        available.shortfall(&self.raw_requirements)
    }

    /// Steps that have a recipe and must actually be crafted.
    pub fn crafted_steps<'a>(
        &'a self,
        catalog: &'a RecipeCatalog,
    ) -> impl Iterator<Item = &'a ProductInfo> + 'a {
        self.steps
            .iter()
            .filter(move |step| catalog.contains(step.item))
    }
}

/// Breadth-first recipe-chain resolver over a catalog.
#[derive(Debug, Clone, Copy)]
pub struct ChainResolver<'c> {
    catalog: &'c RecipeCatalog,
    skip_raw_resources: bool,
}

impl<'c> ChainResolver<'c> {
    /// Creates a resolver over `catalog`.
    #[must_use]
    pub const fn new(catalog: &'c RecipeCatalog) -> Self {
        Self {
            catalog,
            skip_raw_resources: false,
        }
    }

    /// Leaves raw resources out of the step list.
    ///
    /// Raw resources are terminal either way; by default they are listed
    /// with their per-craft count.
    #[must_use]
    pub const fn skip_raw_resources(mut self, skip: bool) -> Self {
        self.skip_raw_resources = skip;
        self
    }

    /// Steps needed to obtain one unit of `item`.
    ///
    /// `available` is copied; the caller's tally is never modified. An empty
    /// list means the item is already in stock.
    #[must_use]
    pub fn resolve(&self, item: ItemType, available: &ItemTally) -> Vec<ProductInfo> {
        self.resolve_detailed(item, available).steps
    }

    /// Like [`resolve`](Self::resolve), also returning the final ledger and
    /// aggregate figures.
    #[must_use]
    pub fn resolve_detailed(&self, item: ItemType, available: &ItemTally) -> ChainResolution {
        let mut resolution = ChainResolution {
            ledger: ChainLedger::from(available),
            ..ChainResolution::default()
        };
        let mut queue = VecDeque::from([ProductInfo::new(item, 1)]);

        while let Some(current) = queue.pop_front() {
            let Some(recipe) = self.catalog.get_item_recipe(current.item) else {
                trace!(
                    "{} x{} is a raw resource",
                    current.item,
                    current.amount_required
                );
                resolution
                    .raw_requirements
                    .add(current.item, current.amount_required);
                if !self.skip_raw_resources {
                    resolution.steps.push(current);
                }
                continue;
            };

            if resolution
                .ledger
                .covers(current.item, current.amount_required)
            {
                trace!(
                    "{} x{} already in stock",
                    current.item,
                    current.amount_required
                );
                continue;
            }

            resolution
                .ledger
                .debit(current.item, current.amount_required);
            resolution.total_craft_ticks += u64::from(recipe.craft_time_ticks);
            resolution.steps.push(current);

            queue.extend(
                recipe
                    .ingredients
                    .iter()
                    .map(|ingredient| ProductInfo::new(ingredient.item, ingredient.quantity)),
            );
        }

        debug!(
            "Resolved {} into {} steps ({} ticks)",
            item,
            resolution.steps.len(),
            resolution.total_craft_ticks
        );
        resolution
    }
}

/// Steps needed to obtain one unit of `item` from the built-in catalog.
#[must_use]
pub fn get_recipe_product_chain(item: ItemType, available: &ItemTally) -> Vec<ProductInfo> {
    ChainResolver::new(RecipeCatalog::builtin()).resolve(item, available)
}
