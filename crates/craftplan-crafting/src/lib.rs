//! # Craftplan Crafting
//!
//! Recipe planning for inventory-driven crafting.
//!
//! This crate provides:
//! - A read-only recipe catalog with a built-in recipe table
//! - Recipe file loading from TOML
//! - Inventory snapshots and item tallies
//! - The sufficiency check over several inventories
//! - Breadth-first recipe-chain resolution against available stock
//!
//! ```
//! use craftplan_crafting::prelude::*;
//!
//! let stock = ItemTally::from([(ItemType::Wood, 20)]);
//! let steps = get_recipe_product_chain(ItemType::Workbench, &stock);
//! assert_eq!(steps[0], ProductInfo::new(ItemType::Workbench, 1));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod builtin;
pub mod chain;
pub mod inventory;
pub mod loader;
pub mod recipes;
pub mod tally;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::chain::*;
    pub use crate::inventory::*;
    pub use crate::loader::*;
    pub use crate::recipes::*;
    pub use crate::tally::*;
    pub use craftplan_common::prelude::*;
}

pub use prelude::*;
