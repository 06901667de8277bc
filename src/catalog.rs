//! Read-only blueprint catalog

use std::collections::HashMap;

use crate::models::{ItemId, Recipe, RecipeId};

/// Indexed store of recipes, queried by consumed item.
pub trait Catalog {
    /// Ids of all recipes that take `item` as an input.
    fn recipes_consuming(&self, item: ItemId) -> &[RecipeId];

    /// Full definition of a recipe. `None` means the index references a
    /// recipe the store does not hold.
    fn recipe(&self, id: RecipeId) -> Option<&Recipe>;
}

/// In-memory catalog, built once and then shared by reference.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    recipes: HashMap<RecipeId, Recipe>,
    consumers: HashMap<ItemId, Vec<RecipeId>>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a recipe and index it under each of its inputs. A recipe with an
    /// id already present replaces the earlier definition.
    pub fn insert(&mut self, recipe: Recipe) {
        for input in &recipe.inputs {
            self.index_consumer(input.item, recipe.id);
        }
        self.recipes.insert(recipe.id, recipe);
    }

    /// Builder form of [`StaticCatalog::insert`].
    pub fn with_recipe(mut self, recipe: Recipe) -> Self {
        self.insert(recipe);
        self
    }

    /// Record that `recipe` consumes `item` without storing a definition.
    pub fn index_consumer(&mut self, item: ItemId, recipe: RecipeId) {
        let ids = self.consumers.entry(item).or_default();
        if !ids.contains(&recipe) {
            ids.push(recipe);
        }
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// All recipes, sorted by id.
    pub fn recipes(&self) -> Vec<&Recipe> {
        let mut recipes: Vec<_> = self.recipes.values().collect();
        recipes.sort_by_key(|r| r.id);
        recipes
    }
}

impl Catalog for StaticCatalog {
    fn recipes_consuming(&self, item: ItemId) -> &[RecipeId] {
        self.consumers.get(&item).map(Vec::as_slice).unwrap_or(&[])
    }

    fn recipe(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.get(&id)
    }
}
