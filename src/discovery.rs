//! Breadth-first discovery of every recipe reachable from owned materials

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::models::{ItemId, ItemKind, MaterialSet, Recipe, RecipeId};

/// Reachable recipe graph for one set of owned materials.
#[derive(Debug, Default)]
pub struct Discovery<'c> {
    /// Discovered recipes keyed by id
    pub recipes: BTreeMap<RecipeId, &'c Recipe>,
    /// Owned items and outputs of discovered recipes. Items with no entry
    /// cannot be obtained.
    pub classification: HashMap<ItemId, ItemKind>,
    /// First discovered recipe producing each `Produced` item
    pub produced_by: HashMap<ItemId, RecipeId>,
    /// Recipe ids the catalog indexes but cannot define
    pub skipped: Vec<RecipeId>,
}

impl Discovery<'_> {
    pub fn kind(&self, item: ItemId) -> Option<ItemKind> {
        self.classification.get(&item).copied()
    }

    pub fn producer(&self, item: ItemId) -> Option<RecipeId> {
        self.produced_by.get(&item).copied()
    }
}

/// Walk the catalog outward from `owned`, one wave of new items at a time.
pub fn discover<'c, C: Catalog + ?Sized>(owned: &MaterialSet, catalog: &'c C) -> Discovery<'c> {
    let mut discovery = Discovery::default();
    let mut seen: HashSet<RecipeId> = HashSet::new();

    let mut wave: Vec<ItemId> = owned.items().collect();
    for &item in &wave {
        discovery.classification.insert(item, ItemKind::Owned);
    }

    let mut depth = 0usize;
    while !wave.is_empty() {
        let mut next_wave = Vec::new();

        for &item in &wave {
            for &recipe_id in catalog.recipes_consuming(item) {
                if !seen.insert(recipe_id) {
                    continue;
                }

                let Some(recipe) = catalog.recipe(recipe_id) else {
                    warn!(recipe = %recipe_id, item = %item, "catalog has no definition for indexed recipe");
                    discovery.skipped.push(recipe_id);
                    continue;
                };
                discovery.recipes.insert(recipe_id, recipe);

                for output in &recipe.outputs {
                    // Owned items and items already queued keep their first classification
                    if discovery.classification.contains_key(&output.item) {
                        continue;
                    }
                    discovery.classification.insert(output.item, ItemKind::Produced);
                    discovery.produced_by.entry(output.item).or_insert(recipe_id);
                    next_wave.push(output.item);
                }
            }
        }

        debug!(depth, items = wave.len(), produced = next_wave.len(), "discovery wave");
        depth += 1;
        wave = next_wave;
    }

    debug!(
        recipes = discovery.recipes.len(),
        items = discovery.classification.len(),
        skipped = discovery.skipped.len(),
        "discovery finished"
    );
    discovery
}
