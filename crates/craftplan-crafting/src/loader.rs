//! Recipe catalog loading from TOML.
//!
//! This module provides:
//! - The on-disk recipe file format
//! - Per-recipe validation on load
//! - Loading single files or whole directories into a [`RecipeCatalog`]
//!
//! ```toml
//! version = "1.0.0"
//!
//! [[recipes]]
//! product = "workbench"
//! craft_time_ticks = 120
//! ingredients = [{ item = "wood", quantity = 15 }]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use craftplan_common::{CraftingStation, ItemType, SchemaVersion};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::recipes::{CatalogError, CatalogResult, Recipe, RecipeCatalog};

/// A recipe ingredient from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientDefinition {
    /// Item type consumed.
    pub item: ItemType,
    /// Quantity required per craft.
    pub quantity: u32,
}

/// A recipe definition loaded from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDefinition {
    /// Item produced.
    pub product: ItemType,
    /// Units produced per craft.
    #[serde(rename = "yield", default = "default_yield")]
    pub yield_amount: u32,
    /// Ingredients in declared order.
    #[serde(default)]
    pub ingredients: Vec<IngredientDefinition>,
    /// Time to craft in game ticks.
    #[serde(default = "default_craft_time")]
    pub craft_time_ticks: u32,
    /// Required station (None = hand crafting).
    #[serde(default)]
    pub station: Option<CraftingStation>,
}

const fn default_yield() -> u32 {
    1
}

const fn default_craft_time() -> u32 {
    60 // 1 second at 60 ticks/second
}

impl RecipeDefinition {
    /// Converts to a catalog recipe.
    #[must_use]
    pub fn to_recipe(&self) -> Recipe {
        let mut builder = Recipe::builder(self.product)
            .yields(self.yield_amount)
            .craft_time(self.craft_time_ticks);

        for ingredient in &self.ingredients {
            builder = builder.ingredient(ingredient.item, ingredient.quantity);
        }

        if let Some(station) = self.station {
            builder = builder.station(station);
        }

        builder.build()
    }
}

/// A collection of recipes from a single file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeFile {
    /// File format version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Recipes in this file.
    #[serde(default)]
    pub recipes: Vec<RecipeDefinition>,
}

fn default_version() -> String {
    SchemaVersion::RECIPE_FILE.to_string()
}

impl RecipeFile {
    /// Checks the declared version against the supported schema.
    pub fn check_version(&self) -> CatalogResult<SchemaVersion> {
        let found: SchemaVersion = self.version.parse()?;
        if !SchemaVersion::RECIPE_FILE.can_read(&found) {
            return Err(CatalogError::IncompatibleVersion {
                found,
                supported: SchemaVersion::RECIPE_FILE,
            });
        }
        Ok(found)
    }
}

/// Statistics for the recipe loader.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecipeLoaderStats {
    /// Number of files loaded.
    pub files_loaded: u32,
    /// Number of recipes accepted.
    pub recipes_loaded: u32,
    /// Number of recipes rejected by validation.
    pub validation_errors: u32,
}

/// Accumulates recipes from files and builds a catalog.
///
/// Invalid recipes are skipped with a warning. Cycles and malformed files are
/// hard errors.
#[derive(Debug, Default)]
pub struct RecipeLoader {
    recipes: Vec<Recipe>,
    stats: RecipeLoaderStats,
}

impl RecipeLoader {
    /// Creates a new recipe loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns loader statistics.
    #[must_use]
    pub fn stats(&self) -> &RecipeLoaderStats {
        &self.stats
    }

    /// Loads recipes from TOML text. `source` names it in log messages.
    pub fn load_str(&mut self, content: &str, source: &str) -> CatalogResult<u32> {
        let recipe_file: RecipeFile = toml::from_str(content)?;
        let version = recipe_file.check_version()?;
        debug!("Parsing {} (format {})", source, version);

        let mut loaded_count = 0;
        for definition in recipe_file.recipes {
            let recipe = definition.to_recipe();
            if let Err(e) = recipe.validate() {
                warn!("Invalid recipe in {}: {}", source, e);
                self.stats.validation_errors += 1;
                continue;
            }
            self.recipes.push(recipe);
            loaded_count += 1;
        }

        self.stats.files_loaded += 1;
        self.stats.recipes_loaded += loaded_count;
        debug!("Loaded {} recipes from {}", loaded_count, source);

        Ok(loaded_count)
    }

    /// Loads recipes from a single file.
    pub fn load_file(&mut self, path: &Path) -> CatalogResult<u32> {
        debug!("Loading recipe file: {:?}", path);
        let content = fs::read_to_string(path)?;
        self.load_str(&content, &path.display().to_string())
    }

    /// Loads every `.toml` file in a directory, in file name order.
    pub fn load_dir(&mut self, dir: &Path) -> CatalogResult<u32> {
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        paths.sort();

        let mut total = 0;
        for path in &paths {
            total += self.load_file(path)?;
        }

        info!(
            "Loaded {} recipes from {} files in {:?}",
            total,
            paths.len(),
            dir
        );
        Ok(total)
    }

    /// Loads a file, or every recipe file if `path` is a directory.
    pub fn load_path(&mut self, path: &Path) -> CatalogResult<u32> {
        if path.is_dir() {
            self.load_dir(path)
        } else {
            self.load_file(path)
        }
    }

    /// Builds a validated catalog from everything loaded so far.
    pub fn build(self) -> CatalogResult<RecipeCatalog> {
        RecipeCatalog::new(self.recipes)
    }
}

/// Loads a catalog from a recipe file or directory.
pub fn load_catalog(path: &Path) -> CatalogResult<RecipeCatalog> {
    let mut loader = RecipeLoader::new();
    loader.load_path(path)?;
    let catalog = loader.build()?;
    info!("Recipe catalog loaded with {} recipes", catalog.len());
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORKBENCH_TOML: &str = r#"
version = "1.0.0"

[[recipes]]
product = "workbench"
craft_time_ticks = 120

[[recipes.ingredients]]
item = "wood"
quantity = 15

[[recipes]]
product = "plank"
yield = 4
ingredients = [{ item = "wood", quantity = 1 }]
"#;

    #[test]
    fn test_parse_toml() {
        let recipe_file: RecipeFile = toml::from_str(WORKBENCH_TOML).expect("parse");
        assert_eq!(recipe_file.version, "1.0.0");
        assert_eq!(recipe_file.recipes.len(), 2);

        let recipe = recipe_file.recipes[0].to_recipe();
        assert_eq!(recipe.product, ItemType::Workbench);
        assert_eq!(recipe.yield_amount, 1);
        assert_eq!(recipe.craft_time_ticks, 120);
        assert_eq!(recipe.ingredient_count(ItemType::Wood), Some(15));
        assert_eq!(recipe.station, None);

        let plank = recipe_file.recipes[1].to_recipe();
        assert_eq!(plank.yield_amount, 4);
        assert_eq!(plank.craft_time_ticks, 60);
    }

    #[test]
    fn test_station_parses() {
        let content = r#"
[[recipes]]
product = "iron_ingot"
station = "furnace"
ingredients = [{ item = "iron_ore", quantity = 2 }, { item = "coal", quantity = 1 }]
"#;
        let mut loader = RecipeLoader::new();
        assert_eq!(loader.load_str(content, "inline").expect("load"), 1);
        let catalog = loader.build().expect("catalog");
        let recipe = catalog.get_item_recipe(ItemType::IronIngot).expect("ingot");
        assert_eq!(recipe.station, Some(CraftingStation::Furnace));
        assert_eq!(
            recipe.ingredients.iter().map(|i| i.item).collect::<Vec<_>>(),
            vec![ItemType::IronOre, ItemType::Coal]
        );
    }

    #[test]
    fn test_invalid_recipe_skipped() {
        let content = r#"
[[recipes]]
product = "plank"
yield = 0
ingredients = [{ item = "wood", quantity = 1 }]

[[recipes]]
product = "stick"
ingredients = [{ item = "plank", quantity = 2 }]
"#;
        let mut loader = RecipeLoader::new();
        assert_eq!(loader.load_str(content, "inline").expect("load"), 1);
        assert_eq!(loader.stats().validation_errors, 1);
        assert_eq!(loader.stats().recipes_loaded, 1);
    }

    #[test]
    fn test_unknown_item_is_parse_error() {
        let content = r#"
[[recipes]]
product = "mithril"
"#;
        let mut loader = RecipeLoader::new();
        assert!(matches!(
            loader.load_str(content, "inline"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_incompatible_version() {
        let content = r#"
version = "2.0.0"
recipes = []
"#;
        let mut loader = RecipeLoader::new();
        assert!(matches!(
            loader.load_str(content, "inline"),
            Err(CatalogError::IncompatibleVersion { .. })
        ));
    }

    #[test]
    fn test_cycle_fails_build() {
        let content = r#"
[[recipes]]
product = "plank"
ingredients = [{ item = "stick", quantity = 1 }]

[[recipes]]
product = "stick"
ingredients = [{ item = "plank", quantity = 1 }]
"#;
        let mut loader = RecipeLoader::new();
        loader.load_str(content, "inline").expect("load");
        assert!(matches!(loader.build(), Err(CatalogError::Cycle(_))));
    }

    #[test]
    fn test_load_dir() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("a_basic.toml"), WORKBENCH_TOML).expect("write");
        fs::write(
            dir.path().join("b_extra.toml"),
            r#"
[[recipes]]
product = "stick"
yield = 4
ingredients = [{ item = "plank", quantity = 2 }]
"#,
        )
        .expect("write");
        fs::write(dir.path().join("notes.txt"), "not a recipe").expect("write");

        let catalog = load_catalog(dir.path()).expect("catalog");
        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains(ItemType::Stick));
    }

    #[test]
    fn test_missing_path_is_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("nope.toml");
        assert!(matches!(load_catalog(&missing), Err(CatalogError::Io(_))));
    }
}
