//! Error types for craftplan.

use thiserror::Error;

use crate::item::ItemType;

/// Errors raised by recipe lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CraftingError {
    /// A recipe was required but the catalog has none for this item.
    #[error("No recipe found for item: {}", item.display_name())]
    RecipeNotFound {
        /// The item that has no recipe
        item: ItemType,
    },
}

/// Result type for crafting operations.
pub type CraftingResult<T> = Result<T, CraftingError>;

/// An item name that matches no known item type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown item type: {0}")]
pub struct ParseItemError(pub String);

/// A schema version string that is not `major.minor.patch`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid schema version: {0}")]
pub struct ParseVersionError(pub String);
