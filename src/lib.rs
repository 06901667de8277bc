//! Blueprint Finder
//!
//! Works out which blueprints can be built from a set of owned materials,
//! either directly or through intermediate products, and ranks them by the
//! share of inputs that can be satisfied.
//!
//! ```no_run
//! use blueprint_finder::{find_producible_recipes, ItemGroup, ItemId, MaterialSet, Recipe, StaticCatalog};
//!
//! let catalog = StaticCatalog::new()
//!     .with_recipe(Recipe::new(100, vec![ItemGroup::new(1, 1)], vec![ItemGroup::new(2, 1)]));
//! let owned: MaterialSet = [(ItemId(1), 10)].into_iter().collect();
//!
//! for entry in find_producible_recipes(&catalog, &owned, 50.0) {
//!     println!("{} {}%", entry.recipe.id, entry.completeness);
//! }
//! ```

pub mod assets;
pub mod calculator;
pub mod catalog;
pub mod completeness;
pub mod db;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod models;
pub mod names;
pub mod ranking;

pub use calculator::{FindReport, analyze, find_producible_recipes};
pub use catalog::{Catalog, StaticCatalog};
pub use error::FinderError;
pub use models::{ItemGroup, ItemId, ItemKind, MaterialSet, Quantity, RankedRecipe, Recipe, RecipeId, RecipeState};
