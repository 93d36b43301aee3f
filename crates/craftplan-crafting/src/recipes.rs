//! Recipe definitions and the recipe catalog.
//!
//! This module provides:
//! - Recipe data with ordered ingredients, yield, craft time and station
//! - A read-only catalog indexed by product
//! - Lenient and strict lookup, plus the process-wide built-in catalog

use std::collections::BTreeMap;
use std::sync::OnceLock;

use craftplan_common::{
    CraftingError, CraftingResult, CraftingStation, ItemType, ParseVersionError, SchemaVersion,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::builtin::builtin_recipes;

/// Errors that can occur while building or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Failed to read a recipe file.
    #[error("Failed to read recipe file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML.
    #[error("Failed to parse recipe TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A recipe breaks a catalog invariant.
    #[error("Recipe validation error: {0}")]
    Validation(String),

    /// The file's version string is malformed.
    #[error(transparent)]
    InvalidVersion(#[from] ParseVersionError),

    /// The file was written for a schema this build cannot read.
    #[error("Incompatible recipe file version {found} (supported: {supported})")]
    IncompatibleVersion {
        /// Version declared by the file
        found: SchemaVersion,
        /// Version this build reads
        supported: SchemaVersion,
    },

    /// An item transitively requires itself.
    #[error("Recipe cycle detected: {}", format_cycle(.0))]
    Cycle(Vec<ItemType>),
}

fn format_cycle(cycle: &[ItemType]) -> String {
    cycle
        .iter()
        .map(|item| item.display_name())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// An ingredient consumed by one craft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Item type required
    pub item: ItemType,
    /// Quantity required per craft
    pub quantity: u32,
}

impl Ingredient {
    /// Creates a new ingredient requirement.
    #[must_use]
    pub const fn new(item: ItemType, quantity: u32) -> Self {
        Self { item, quantity }
    }
}

/// A production rule for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Item produced
    pub product: ItemType,
    /// Units of product created per craft
    pub yield_amount: u32,
    /// Ingredients in declared order
    pub ingredients: Vec<Ingredient>,
    /// Craft duration for automated crafters, in ticks
    pub craft_time_ticks: u32,
    /// Required station (None = hand crafting)
    pub station: Option<CraftingStation>,
}

impl Recipe {
    /// Creates a new recipe builder.
    #[must_use]
    pub fn builder(product: ItemType) -> RecipeBuilder {
        RecipeBuilder::new(product)
    }

    /// Per-craft count of an ingredient, if the recipe uses it.
    #[must_use]
    pub fn ingredient_count(&self, item: ItemType) -> Option<u32> {
        self.ingredients
            .iter()
            .find(|ingredient| ingredient.item == item)
            .map(|ingredient| ingredient.quantity)
    }

    /// Craft duration in seconds at the given tick rate.
    #[must_use]
    pub fn craft_time_secs(&self, ticks_per_second: u32) -> f32 {
        if ticks_per_second == 0 {
            return 0.0;
        }
        self.craft_time_ticks as f32 / ticks_per_second as f32
    }

    /// Checks the per-recipe invariants.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.yield_amount == 0 {
            return Err(CatalogError::Validation(format!(
                "Recipe for {} has zero yield",
                self.product
            )));
        }

        for (i, ingredient) in self.ingredients.iter().enumerate() {
            if ingredient.quantity == 0 {
                return Err(CatalogError::Validation(format!(
                    "Recipe for {} ingredient {} ({}) has zero quantity",
                    self.product, i, ingredient.item
                )));
            }
            if self.ingredients[..i]
                .iter()
                .any(|earlier| earlier.item == ingredient.item)
            {
                return Err(CatalogError::Validation(format!(
                    "Recipe for {} lists {} more than once",
                    self.product, ingredient.item
                )));
            }
        }

        Ok(())
    }
}

/// Builder for creating recipes.
#[derive(Debug)]
pub struct RecipeBuilder {
    product: ItemType,
    yield_amount: u32,
    ingredients: Vec<Ingredient>,
    craft_time_ticks: u32,
    station: Option<CraftingStation>,
}

impl RecipeBuilder {
    fn new(product: ItemType) -> Self {
        Self {
            product,
            yield_amount: 1,
            ingredients: Vec::new(),
            craft_time_ticks: 60,
            station: None,
        }
    }

    /// Sets units produced per craft.
    #[must_use]
    pub const fn yields(mut self, amount: u32) -> Self {
        self.yield_amount = amount;
        self
    }

    /// Adds an ingredient requirement.
    #[must_use]
    pub fn ingredient(mut self, item: ItemType, quantity: u32) -> Self {
        self.ingredients.push(Ingredient::new(item, quantity));
        self
    }

    /// Sets the craft time in ticks.
    #[must_use]
    pub const fn craft_time(mut self, ticks: u32) -> Self {
        self.craft_time_ticks = ticks;
        self
    }

    /// Sets the required station.
    #[must_use]
    pub const fn station(mut self, station: CraftingStation) -> Self {
        self.station = Some(station);
        self
    }

    /// Builds the recipe.
    #[must_use]
    pub fn build(self) -> Recipe {
        Recipe {
            product: self.product,
            yield_amount: self.yield_amount,
            ingredients: self.ingredients,
            craft_time_ticks: self.craft_time_ticks,
            station: self.station,
        }
    }
}

/// Read-only recipe table indexed by product.
///
/// At most one recipe is indexed per product. When the input lists a product
/// twice the first recipe wins and later ones are discarded.
#[derive(Debug, Clone, Default)]
pub struct RecipeCatalog {
    /// Recipes in declaration order.
    recipes: Vec<Recipe>,
    /// Index into `recipes` by product.
    by_product: BTreeMap<ItemType, usize>,
}

impl RecipeCatalog {
    /// Builds a catalog and checks every invariant, including acyclicity.
    pub fn new(recipes: impl IntoIterator<Item = Recipe>) -> CatalogResult<Self> {
        let catalog = Self::from_trusted(recipes);
        catalog.validate()?;
        Ok(catalog)
    }

    /// Indexes recipes without validating them.
    pub(crate) fn from_trusted(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        let mut catalog = Self::default();
        for recipe in recipes {
            if catalog.by_product.contains_key(&recipe.product) {
                warn!(
                    "Duplicate recipe for {}, keeping the first definition",
                    recipe.product
                );
                continue;
            }
            catalog
                .by_product
                .insert(recipe.product, catalog.recipes.len());
            catalog.recipes.push(recipe);
        }
        catalog
    }

    /// The process-wide built-in catalog, built on first use.
    pub fn builtin() -> &'static RecipeCatalog {
        static BUILTIN: OnceLock<RecipeCatalog> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let catalog = Self::from_trusted(builtin_recipes());
            debug!("Built-in recipe catalog ready with {} recipes", catalog.len());
            catalog
        })
    }

    /// Checks per-recipe invariants and rejects recipe cycles.
    pub fn validate(&self) -> CatalogResult<()> {
        for recipe in &self.recipes {
            recipe.validate()?;
        }
        match self.find_cycle() {
            Some(cycle) => Err(CatalogError::Cycle(cycle)),
            None => Ok(()),
        }
    }

    /// Looks up the recipe producing `item`.
    ///
    /// `None` means the item is a raw resource with no known recipe.
    #[must_use]
    pub fn get_item_recipe(&self, item: ItemType) -> Option<&Recipe> {
        self.by_product
            .get(&item)
            .and_then(|&index| self.recipes.get(index))
    }

    /// Looks up the recipe producing `item`, failing if there is none.
    pub fn force_get_item_recipe(&self, item: ItemType) -> CraftingResult<&Recipe> {
        self.get_item_recipe(item)
            .ok_or(CraftingError::RecipeNotFound { item })
    }

    /// Returns true if `item` can be crafted.
    #[must_use]
    pub fn contains(&self, item: ItemType) -> bool {
        self.by_product.contains_key(&item)
    }

    /// Craftable items in item order.
    pub fn craftable_items(&self) -> impl Iterator<Item = ItemType> + '_ {
        self.by_product.keys().copied()
    }

    /// Recipes executed at `station` (None = hand crafting).
    #[must_use]
    pub fn by_station(&self, station: Option<CraftingStation>) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|recipe| recipe.station == station)
            .collect()
    }

    /// Recipes that consume `item` directly.
    #[must_use]
    pub fn recipes_using(&self, item: ItemType) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|recipe| recipe.ingredient_count(item).is_some())
            .collect()
    }

    /// Returns an iterator over all recipes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    /// Returns the number of recipes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Returns true if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    fn find_cycle(&self) -> Option<Vec<ItemType>> {
        let mut marks = BTreeMap::new();
        let mut path = Vec::new();
        self.recipes
            .iter()
            .find_map(|recipe| self.visit(recipe.product, &mut marks, &mut path))
    }

    /// Depth-first walk; `false` marks an item on the current path.
    fn visit(
        &self,
        item: ItemType,
        marks: &mut BTreeMap<ItemType, bool>,
        path: &mut Vec<ItemType>,
    ) -> Option<Vec<ItemType>> {
        match marks.get(&item) {
            Some(true) => return None,
            Some(false) => {
                let start = path.iter().position(|&p| p == item).unwrap_or(0);
                let mut cycle = path[start..].to_vec();
                cycle.push(item);
                return Some(cycle);
            },
            None => {},
        }

        let Some(recipe) = self.get_item_recipe(item) else {
            marks.insert(item, true);
            return None;
        };

        marks.insert(item, false);
        path.push(item);
        for ingredient in &recipe.ingredients {
            if let Some(cycle) = self.visit(ingredient.item, marks, path) {
                return Some(cycle);
            }
        }
        path.pop();
        marks.insert(item, true);
        None
    }
}

impl<'a> IntoIterator for &'a RecipeCatalog {
    type Item = &'a Recipe;
    type IntoIter = std::slice::Iter<'a, Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.recipes.iter()
    }
}

/// Looks up `item` in the built-in catalog.
#[must_use]
pub fn get_item_recipe(item: ItemType) -> Option<&'static Recipe> {
    RecipeCatalog::builtin().get_item_recipe(item)
}

/// Looks up `item` in the built-in catalog, failing if it has no recipe.
pub fn force_get_item_recipe(item: ItemType) -> CraftingResult<&'static Recipe> {
    RecipeCatalog::builtin().force_get_item_recipe(item)
}
