//! # Craftplan Common
//!
//! Common types shared by every craftplan crate.
//!
//! This crate provides:
//! - The item type enumeration used as the key type everywhere
//! - Crafting station tags carried by recipes
//! - Schema versions for recipe files
//! - Error types for recipe lookup and catalog loading

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod item;
pub mod version;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::item::*;
    pub use crate::version::*;
}

pub use prelude::*;
