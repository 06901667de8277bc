//! Fixpoint resolution of recipe completeness
//!
//! A recipe resolves once every input is decided: owned items count as
//! valid, items with no classification as invalid, and produced items take
//! the viability of their producer. Recipes waiting on a producer that never
//! resolves (cycles, or chains hanging off one) stay unknown.

use std::collections::HashMap;

use tracing::debug;

use crate::discovery::Discovery;
use crate::models::{ItemId, ItemKind, Recipe, RecipeId, RecipeState};

/// Per-recipe states after the fixpoint is reached.
#[derive(Debug, Default)]
pub struct Resolution {
    pub states: HashMap<RecipeId, RecipeState>,
    /// Passes run, including the final one that made no progress
    pub passes: usize,
}

impl Resolution {
    pub fn state(&self, id: RecipeId) -> RecipeState {
        self.states.get(&id).copied().unwrap_or(RecipeState::Unknown)
    }

    pub fn resolved_count(&self) -> usize {
        self.states.values().filter(|s| s.is_resolved()).count()
    }

    pub fn unresolved_count(&self) -> usize {
        self.states.len() - self.resolved_count()
    }
}

enum InputVerdict {
    Valid,
    Invalid,
    Pending,
}

/// Resolve every discovered recipe reachable from owned materials.
pub fn resolve(discovery: &Discovery<'_>, threshold: f64) -> Resolution {
    let mut resolution = Resolution {
        states: discovery
            .recipes
            .keys()
            .map(|&id| (id, RecipeState::Unknown))
            .collect(),
        passes: 0,
    };
    let mut unresolved: Vec<&Recipe> = discovery.recipes.values().copied().collect();

    loop {
        resolution.passes += 1;
        let mut progress = 0usize;

        let mut waiting = Vec::with_capacity(unresolved.len());

        // States resolved earlier in the pass are visible to later recipes
        for recipe in unresolved {
            match evaluate(recipe, discovery, &resolution, threshold) {
                Some(state) => {
                    resolution.states.insert(recipe.id, state);
                    progress += 1;
                }
                None => waiting.push(recipe),
            }
        }
        unresolved = waiting;

        debug!(pass = resolution.passes, progress, remaining = unresolved.len(), "resolver pass");
        if progress == 0 || unresolved.is_empty() {
            break;
        }
    }

    resolution
}

/// `None` while some input waits on an unresolved producer.
fn evaluate(
    recipe: &Recipe,
    discovery: &Discovery<'_>,
    resolution: &Resolution,
    threshold: f64,
) -> Option<RecipeState> {
    let mut valid = 0u32;
    let mut invalid = 0u32;

    for input in &recipe.inputs {
        match verdict(input.item, discovery, resolution) {
            InputVerdict::Valid => valid += 1,
            InputVerdict::Invalid => invalid += 1,
            InputVerdict::Pending => return None,
        }
    }

    let completeness = completeness_ratio(valid, invalid);
    Some(RecipeState::Resolved {
        completeness,
        viable: completeness >= threshold,
    })
}

fn verdict(item: ItemId, discovery: &Discovery<'_>, resolution: &Resolution) -> InputVerdict {
    match discovery.kind(item) {
        None => InputVerdict::Invalid,
        Some(ItemKind::Owned) => InputVerdict::Valid,
        Some(ItemKind::Produced) => {
            let Some(producer) = discovery.producer(item) else {
                return InputVerdict::Invalid;
            };
            match resolution.state(producer) {
                RecipeState::Resolved { viable: true, .. } => InputVerdict::Valid,
                RecipeState::Resolved { viable: false, .. } => InputVerdict::Invalid,
                RecipeState::Unknown => InputVerdict::Pending,
            }
        }
    }
}

/// Percentage of valid inputs; zero when there are no inputs at all.
pub fn completeness_ratio(valid: u32, invalid: u32) -> f64 {
    let total = valid + invalid;
    if total == 0 {
        return 0.0;
    }
    f64::from(valid) / f64::from(total) * 100.0
}
