//! Subcommands and their output.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Result};
use clap::Subcommand;
use craftplan_common::{CraftingStation, ItemType};
use craftplan_crafting::{
    has_enough_items, tally_items, ChainResolver, InventorySnapshot, ItemStack, ItemTally,
    Recipe, RecipeCatalog,
};
use serde_json::json;
use tracing::debug;

use crate::config::PlannerConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the recipe that produces an item
    Recipe {
        /// Item key or display name
        item: ItemType,
    },

    /// Resolve the production chain for one unit of an item
    Chain {
        /// Item key or display name
        item: ItemType,

        /// Available stock, repeatable
        #[arg(long = "have", value_name = "ITEM=COUNT", value_parser = parse_item_count)]
        have: Vec<(ItemType, u32)>,

        /// Leave raw resources out of the step list
        #[arg(long)]
        skip_raw: bool,

        /// Print the full resolution as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether held items cover a requirement
    Check {
        /// Held stacks, repeatable
        #[arg(long = "have", value_name = "ITEM=COUNT", value_parser = parse_item_count)]
        have: Vec<(ItemType, u32)>,

        /// Required amounts, repeatable
        #[arg(
            long = "need",
            value_name = "ITEM=COUNT",
            value_parser = parse_item_count,
            required = true
        )]
        need: Vec<(ItemType, u32)>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List recipes in the catalog
    List {
        /// Only recipes made at this station
        #[arg(long, value_parser = parse_station, conflicts_with = "hand")]
        station: Option<CraftingStation>,

        /// Only hand-crafted recipes
        #[arg(long)]
        hand: bool,

        /// Only recipes that consume this item
        #[arg(long)]
        uses: Option<ItemType>,
    },
}

/// What a command runs against.
pub struct Context<'a> {
    pub catalog: &'a RecipeCatalog,
    pub config: &'a PlannerConfig,
    pub config_path: &'a Path,
}

/// Parses `item=count`.
pub fn parse_item_count(s: &str) -> Result<(ItemType, u32), String> {
    let (item, count) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ITEM=COUNT, got '{s}'"))?;
    let item = item.parse::<ItemType>().map_err(|e| e.to_string())?;
    let count = count
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid count '{count}': {e}"))?;
    Ok((item, count))
}

/// Parses a station by display name, ignoring case.
pub fn parse_station(s: &str) -> Result<CraftingStation, String> {
    CraftingStation::all()
        .iter()
        .copied()
        .find(|station| station.display_name().eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| format!("unknown station '{s}'"))
}

pub fn dispatch(command: Commands, ctx: &Context<'_>, out: &mut impl Write) -> Result<()> {
    debug!("Running {:?}", command);
    match command {
        Commands::Init { force } => cmd_init(ctx.config_path, force, out),
        Commands::Recipe { item } => cmd_recipe(ctx, item, out),
        Commands::Chain {
            item,
            have,
            skip_raw,
            json,
        } => cmd_chain(ctx, item, have.into_iter().collect(), skip_raw, json, out),
        Commands::Check { have, need, json } => {
            cmd_check(&have, need.into_iter().collect(), json, out)
        },
        Commands::List {
            station,
            hand,
            uses,
        } => cmd_list(ctx, station, hand, uses, out),
    }
}

fn cmd_init(path: &Path, force: bool, out: &mut impl Write) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    PlannerConfig::default().save_to(path)?;
    writeln!(out, "Wrote {}", path.display())?;
    Ok(())
}

fn cmd_recipe(ctx: &Context<'_>, item: ItemType, out: &mut impl Write) -> Result<()> {
    let recipe = ctx.catalog.force_get_item_recipe(item)?;
    write_recipe(recipe, ctx.config.ticks_per_second, out)?;
    for ingredient in &recipe.ingredients {
        writeln!(out, "  {} x {}", ingredient.quantity, ingredient.item)?;
    }
    Ok(())
}

fn cmd_chain(
    ctx: &Context<'_>,
    item: ItemType,
    available: ItemTally,
    skip_raw: bool,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let resolution = ChainResolver::new(ctx.catalog)
        .skip_raw_resources(skip_raw || ctx.config.skip_raw_resources)
        .resolve_detailed(item, &available);

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&resolution)?)?;
        return Ok(());
    }

    if resolution.steps.is_empty() {
        writeln!(out, "{item} is already in stock")?;
        return Ok(());
    }

    writeln!(out, "Chain for {item}:")?;
    for (index, step) in resolution.steps.iter().enumerate() {
        let tag = if ctx.catalog.contains(step.item) {
            ""
        } else {
            "  (raw)"
        };
        writeln!(
            out,
            "{:>4}. {} x{}{}",
            index + 1,
            step.item,
            step.amount_required,
            tag
        )?;
    }

    let seconds =
        resolution.total_craft_ticks as f64 / f64::from(ctx.config.ticks_per_second);
    writeln!(
        out,
        "Craft time: {} ticks ({seconds:.2}s)",
        resolution.total_craft_ticks
    )?;

    let missing = resolution.missing_raw(&available);
    if !missing.is_empty() {
        writeln!(out, "Missing raw resources:")?;
        for (raw, count) in missing.iter() {
            writeln!(out, "  {raw} x{count}")?;
        }
    }
    Ok(())
}

fn cmd_check(
    have: &[(ItemType, u32)],
    required: ItemTally,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let snapshot = InventorySnapshot::from_slots(
        have.iter()
            .enumerate()
            .map(|(slot, &(item, count))| (slot, ItemStack::new(item, count))),
    );
    let enough = has_enough_items([&snapshot], &required);
    let shortfall = tally_items([&snapshot]).shortfall(&required);

    if json {
        let report = json!({ "enough": enough, "shortfall": shortfall });
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    if enough {
        writeln!(out, "Enough items")?;
    } else {
        writeln!(out, "Not enough items:")?;
        for (item, count) in shortfall.iter() {
            writeln!(out, "  {item} short by {count}")?;
        }
    }
    Ok(())
}

fn cmd_list(
    ctx: &Context<'_>,
    station: Option<CraftingStation>,
    hand: bool,
    uses: Option<ItemType>,
    out: &mut impl Write,
) -> Result<()> {
    let mut recipes: Vec<&Recipe> = match (station, hand) {
        (Some(_), true) => bail!("--station and --hand are exclusive"),
        (Some(station), false) => ctx.catalog.by_station(Some(station)),
        (None, true) => ctx.catalog.by_station(None),
        (None, false) => ctx.catalog.iter().collect(),
    };
    if let Some(item) = uses {
        let users = ctx.catalog.recipes_using(item);
        recipes.retain(|recipe| users.contains(recipe));
    }

    for recipe in recipes {
        write_recipe(recipe, ctx.config.ticks_per_second, out)?;
    }
    Ok(())
}

fn write_recipe(recipe: &Recipe, ticks_per_second: u32, out: &mut impl Write) -> Result<()> {
    let station = recipe
        .station
        .map_or("hand", CraftingStation::display_name);
    writeln!(
        out,
        "{} x{} ({}, {:.2}s)",
        recipe.product,
        recipe.yield_amount,
        station,
        recipe.craft_time_secs(ticks_per_second)
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(command: Commands) -> String {
        let config = PlannerConfig::default();
        let ctx = Context {
            catalog: RecipeCatalog::builtin(),
            config: &config,
            config_path: Path::new(crate::config::CONFIG_FILE),
        };
        let mut out = Vec::new();
        dispatch(command, &ctx, &mut out).expect("command succeeds");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn test_parse_item_count() {
        assert_eq!(parse_item_count("wood=20"), Ok((ItemType::Wood, 20)));
        assert_eq!(parse_item_count("Iron Ore=3"), Ok((ItemType::IronOre, 3)));
        assert!(parse_item_count("wood").is_err());
        assert!(parse_item_count("wood=-1").is_err());
        assert!(parse_item_count("mithril=1").is_err());
    }

    #[test]
    fn test_parse_station() {
        assert_eq!(parse_station("furnace"), Ok(CraftingStation::Furnace));
        assert!(parse_station("forge").is_err());
    }

    #[test]
    fn test_recipe_output() {
        let text = run(Commands::Recipe {
            item: ItemType::Workbench,
        });
        assert_eq!(text, "Workbench x1 (hand, 2.00s)\n  15 x Wood\n");
    }

    #[test]
    fn test_recipe_for_raw_item_fails() {
        let config = PlannerConfig::default();
        let ctx = Context {
            catalog: RecipeCatalog::builtin(),
            config: &config,
            config_path: Path::new(crate::config::CONFIG_FILE),
        };
        let err = dispatch(
            Commands::Recipe {
                item: ItemType::Wood,
            },
            &ctx,
            &mut Vec::new(),
        )
        .expect_err("raw item has no recipe");
        assert_eq!(err.to_string(), "No recipe found for item: Wood");
    }

    #[test]
    fn test_chain_output() {
        let text = run(Commands::Chain {
            item: ItemType::Workbench,
            have: vec![(ItemType::Wood, 10)],
            skip_raw: false,
            json: false,
        });
        assert_eq!(
            text,
            "Chain for Workbench:\n   1. Workbench x1\n   2. Wood x15  (raw)\n\
             Craft time: 120 ticks (2.00s)\nMissing raw resources:\n  Wood x5\n"
        );
    }

    #[test]
    fn test_chain_in_stock() {
        let text = run(Commands::Chain {
            item: ItemType::Torch,
            have: vec![(ItemType::Torch, 4)],
            skip_raw: false,
            json: false,
        });
        assert_eq!(text, "Torch is already in stock\n");
    }

    #[test]
    fn test_chain_json() {
        let text = run(Commands::Chain {
            item: ItemType::Workbench,
            have: vec![(ItemType::Wood, 20)],
            skip_raw: false,
            json: true,
        });
        let value: serde_json::Value = serde_json::from_str(&text).expect("json");
        assert_eq!(value["steps"][0]["item"], "workbench");
        assert_eq!(value["steps"][1]["amount_required"], 15);
        assert_eq!(value["ledger"]["workbench"], -1);
        assert_eq!(value["total_craft_ticks"], 120);
    }

    #[test]
    fn test_check_output() {
        let text = run(Commands::Check {
            have: vec![(ItemType::Wood, 10)],
            need: vec![(ItemType::Wood, 15)],
            json: false,
        });
        assert_eq!(text, "Not enough items:\n  Wood short by 5\n");

        let text = run(Commands::Check {
            have: vec![(ItemType::Wood, 10), (ItemType::Wood, 10)],
            need: vec![(ItemType::Wood, 15)],
            json: false,
        });
        assert_eq!(text, "Enough items\n");
    }

    #[test]
    fn test_init_writes_default_config() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("craftplan.toml");
        let config = PlannerConfig::default();
        let ctx = Context {
            catalog: RecipeCatalog::builtin(),
            config: &config,
            config_path: &path,
        };

        dispatch(Commands::Init { force: false }, &ctx, &mut Vec::new()).expect("init");
        assert_eq!(PlannerConfig::load_from(&path), config);

        assert!(dispatch(Commands::Init { force: false }, &ctx, &mut Vec::new()).is_err());
        assert!(dispatch(Commands::Init { force: true }, &ctx, &mut Vec::new()).is_ok());
    }

    #[test]
    fn test_list_filters() {
        let text = run(Commands::List {
            station: Some(CraftingStation::Furnace),
            hand: false,
            uses: Some(ItemType::Coal),
        });
        let products: Vec<_> = text
            .lines()
            .map(|line| line.split(" x").next().unwrap_or_default())
            .collect();
        assert_eq!(products, vec!["Iron Ingot", "Copper Ingot"]);
    }
}
