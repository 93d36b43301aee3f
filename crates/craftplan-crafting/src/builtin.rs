//! Built-in recipe table.
//!
//! Raw resources (wood, stone, fiber, clay, sand, coal and ores) have no
//! entry here.

use craftplan_common::{CraftingStation, ItemType};

use crate::recipes::Recipe;

/// Every built-in recipe, one per product.
pub(crate) fn builtin_recipes() -> Vec<Recipe> {
    use CraftingStation::{Anvil, Furnace, Workbench};
    use ItemType as I;

    vec![
        // Hand crafting
        Recipe::builder(I::Plank)
            .yields(4)
            .ingredient(I::Wood, 1)
            .craft_time(20)
            .build(),
        Recipe::builder(I::Stick)
            .yields(4)
            .ingredient(I::Plank, 2)
            .craft_time(10)
            .build(),
        Recipe::builder(I::Rope)
            .ingredient(I::Fiber, 3)
            .craft_time(30)
            .build(),
        Recipe::builder(I::Torch)
            .yields(4)
            .ingredient(I::Stick, 1)
            .ingredient(I::Coal, 1)
            .craft_time(10)
            .build(),
        Recipe::builder(I::Workbench)
            .ingredient(I::Wood, 15)
            .craft_time(120)
            .build(),
        // Workbench
        Recipe::builder(I::Chest)
            .ingredient(I::Plank, 8)
            .craft_time(90)
            .station(Workbench)
            .build(),
        Recipe::builder(I::StoneAxe)
            .ingredient(I::Stick, 2)
            .ingredient(I::Stone, 3)
            .ingredient(I::Rope, 1)
            .craft_time(60)
            .station(Workbench)
            .build(),
        Recipe::builder(I::StonePickaxe)
            .ingredient(I::Stick, 2)
            .ingredient(I::Stone, 3)
            .ingredient(I::Rope, 1)
            .craft_time(60)
            .station(Workbench)
            .build(),
        Recipe::builder(I::Furnace)
            .ingredient(I::Stone, 20)
            .craft_time(150)
            .station(Workbench)
            .build(),
        Recipe::builder(I::Door)
            .ingredient(I::Plank, 6)
            .ingredient(I::IronIngot, 1)
            .craft_time(60)
            .station(Workbench)
            .build(),
        Recipe::builder(I::Wall)
            .yields(2)
            .ingredient(I::Brick, 6)
            .craft_time(60)
            .station(Workbench)
            .build(),
        Recipe::builder(I::Anvil)
            .ingredient(I::IronIngot, 10)
            .ingredient(I::Brick, 5)
            .craft_time(200)
            .station(Workbench)
            .build(),
        // Furnace
        Recipe::builder(I::Brick)
            .ingredient(I::Clay, 2)
            .craft_time(80)
            .station(Furnace)
            .build(),
        Recipe::builder(I::Glass)
            .ingredient(I::Sand, 2)
            .craft_time(80)
            .station(Furnace)
            .build(),
        Recipe::builder(I::IronIngot)
            .ingredient(I::IronOre, 2)
            .ingredient(I::Coal, 1)
            .craft_time(100)
            .station(Furnace)
            .build(),
        Recipe::builder(I::CopperIngot)
            .ingredient(I::CopperOre, 2)
            .ingredient(I::Coal, 1)
            .craft_time(100)
            .station(Furnace)
            .build(),
        // Anvil
        Recipe::builder(I::CopperWire)
            .yields(2)
            .ingredient(I::CopperIngot, 1)
            .craft_time(40)
            .station(Anvil)
            .build(),
        Recipe::builder(I::IronPickaxe)
            .ingredient(I::Stick, 2)
            .ingredient(I::IronIngot, 3)
            .craft_time(120)
            .station(Anvil)
            .build(),
        Recipe::builder(I::Lantern)
            .ingredient(I::IronIngot, 1)
            .ingredient(I::Glass, 2)
            .ingredient(I::Torch, 1)
            .ingredient(I::CopperWire, 1)
            .craft_time(60)
            .station(Anvil)
            .build(),
    ]
}
