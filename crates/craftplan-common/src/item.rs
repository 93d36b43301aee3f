//! Item types and crafting station tags.
//!
//! [`ItemType`] is the key type for every tally, ledger and recipe in
//! craftplan. Its declaration order is its total order, which keeps map
//! iteration and therefore every derived result deterministic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseItemError;

/// A kind of item or material.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    // --- Raw resources ---
    /// Logs felled from trees.
    Wood,
    /// Rough stone.
    Stone,
    /// Plant fiber.
    Fiber,
    /// Riverbank clay.
    Clay,
    /// Sand.
    Sand,
    /// Coal lumps.
    Coal,
    /// Unrefined iron ore.
    IronOre,
    /// Unrefined copper ore.
    CopperOre,

    // --- Intermediates ---
    /// Sawn wooden planks.
    Plank,
    /// Wooden sticks.
    Stick,
    /// Braided fiber rope.
    Rope,
    /// Fired clay brick.
    Brick,
    /// Glass pane.
    Glass,
    /// Smelted iron.
    IronIngot,
    /// Smelted copper.
    CopperIngot,
    /// Drawn copper wire.
    CopperWire,

    // --- Tools and light ---
    /// Handheld torch.
    Torch,
    /// Stone axe.
    StoneAxe,
    /// Stone pickaxe.
    StonePickaxe,
    /// Iron pickaxe.
    IronPickaxe,
    /// Glass lantern.
    Lantern,

    // --- Placeables ---
    /// Workbench.
    Workbench,
    /// Smelting furnace.
    Furnace,
    /// Smithing anvil.
    Anvil,
    /// Storage chest.
    Chest,
    /// Brick wall segment.
    Wall,
    /// Wooden door.
    Door,
}

impl ItemType {
    /// Every item type in declaration order.
    #[must_use]
    pub const fn all() -> &'static [ItemType] {
        &[
            Self::Wood,
            Self::Stone,
            Self::Fiber,
            Self::Clay,
            Self::Sand,
            Self::Coal,
            Self::IronOre,
            Self::CopperOre,
            Self::Plank,
            Self::Stick,
            Self::Rope,
            Self::Brick,
            Self::Glass,
            Self::IronIngot,
            Self::CopperIngot,
            Self::CopperWire,
            Self::Torch,
            Self::StoneAxe,
            Self::StonePickaxe,
            Self::IronPickaxe,
            Self::Lantern,
            Self::Workbench,
            Self::Furnace,
            Self::Anvil,
            Self::Chest,
            Self::Wall,
            Self::Door,
        ]
    }

    /// Human readable name, used in diagnostics.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Wood => "Wood",
            Self::Stone => "Stone",
            Self::Fiber => "Fiber",
            Self::Clay => "Clay",
            Self::Sand => "Sand",
            Self::Coal => "Coal",
            Self::IronOre => "Iron Ore",
            Self::CopperOre => "Copper Ore",
            Self::Plank => "Plank",
            Self::Stick => "Stick",
            Self::Rope => "Rope",
            Self::Brick => "Brick",
            Self::Glass => "Glass",
            Self::IronIngot => "Iron Ingot",
            Self::CopperIngot => "Copper Ingot",
            Self::CopperWire => "Copper Wire",
            Self::Torch => "Torch",
            Self::StoneAxe => "Stone Axe",
            Self::StonePickaxe => "Stone Pickaxe",
            Self::IronPickaxe => "Iron Pickaxe",
            Self::Lantern => "Lantern",
            Self::Workbench => "Workbench",
            Self::Furnace => "Furnace",
            Self::Anvil => "Anvil",
            Self::Chest => "Chest",
            Self::Wall => "Wall",
            Self::Door => "Door",
        }
    }

    /// Snake case key, matching the serialized form.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Wood => "wood",
            Self::Stone => "stone",
            Self::Fiber => "fiber",
            Self::Clay => "clay",
            Self::Sand => "sand",
            Self::Coal => "coal",
            Self::IronOre => "iron_ore",
            Self::CopperOre => "copper_ore",
            Self::Plank => "plank",
            Self::Stick => "stick",
            Self::Rope => "rope",
            Self::Brick => "brick",
            Self::Glass => "glass",
            Self::IronIngot => "iron_ingot",
            Self::CopperIngot => "copper_ingot",
            Self::CopperWire => "copper_wire",
            Self::Torch => "torch",
            Self::StoneAxe => "stone_axe",
            Self::StonePickaxe => "stone_pickaxe",
            Self::IronPickaxe => "iron_pickaxe",
            Self::Lantern => "lantern",
            Self::Workbench => "workbench",
            Self::Furnace => "furnace",
            Self::Anvil => "anvil",
            Self::Chest => "chest",
            Self::Wall => "wall",
            Self::Door => "door",
        }
    }

    /// Position in declaration order.
    #[must_use]
    pub const fn ordinal(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ItemType {
    type Err = ParseItemError;

    /// Accepts the snake case key or the display name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|item| {
                item.key().eq_ignore_ascii_case(wanted)
                    || item.display_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| ParseItemError(wanted.to_string()))
    }
}

/// A facility a recipe must be executed at.
///
/// Craftplan carries stations as data only; reachability is the caller's
/// concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CraftingStation {
    /// Carpentry and assembly.
    Workbench,
    /// Smelting and firing.
    Furnace,
    /// Smithing.
    Anvil,
}

impl CraftingStation {
    /// Get display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Workbench => "Workbench",
            Self::Furnace => "Furnace",
            Self::Anvil => "Anvil",
        }
    }

    /// Get all stations.
    #[must_use]
    pub const fn all() -> &'static [CraftingStation] {
        &[Self::Workbench, Self::Furnace, Self::Anvil]
    }
}

impl fmt::Display for CraftingStation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
