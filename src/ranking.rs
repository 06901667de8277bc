//! Ranking of viable recipes

use crate::completeness::Resolution;
use crate::discovery::Discovery;
use crate::models::{ItemKind, RankedRecipe, Recipe, RecipeState};

/// Viable recipes sorted by rounded completeness, highest first. Equal
/// percentages keep ascending recipe id order.
pub fn rank<'c>(discovery: &Discovery<'c>, resolution: &Resolution) -> Vec<RankedRecipe<'c>> {
    let mut ranked: Vec<RankedRecipe<'c>> = discovery
        .recipes
        .values()
        .filter_map(|&recipe| match resolution.state(recipe.id) {
            RecipeState::Resolved {
                completeness,
                viable: true,
            } => Some(RankedRecipe {
                recipe,
                completeness: round_percent(completeness),
                direct: is_direct(recipe, discovery),
            }),
            _ => None,
        })
        .collect();

    ranked.sort_by(|a, b| b.completeness.cmp(&a.completeness));
    ranked
}

fn is_direct(recipe: &Recipe, discovery: &Discovery<'_>) -> bool {
    recipe
        .inputs
        .iter()
        .all(|input| discovery.kind(input.item) == Some(ItemKind::Owned))
}

/// Round half away from zero, clamped to 0..=100.
fn round_percent(completeness: f64) -> u32 {
    completeness.round().clamp(0.0, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::completeness::resolve;
    use crate::discovery::discover;
    use crate::models::{ItemGroup, ItemId, MaterialSet};

    #[test]
    fn rounds_half_up() {
        assert_eq!(round_percent(66.666), 67);
        assert_eq!(round_percent(33.333), 33);
        assert_eq!(round_percent(12.5), 13);
        assert_eq!(round_percent(100.0), 100);
    }

    #[test]
    fn orders_by_completeness_then_id() {
        let catalog = StaticCatalog::new()
            .with_recipe(Recipe::new(
                100,
                vec![ItemGroup::new(1, 1), ItemGroup::new(9, 1)],
                vec![ItemGroup::new(50, 1)],
            ))
            .with_recipe(Recipe::new(200, vec![ItemGroup::new(1, 1)], vec![ItemGroup::new(51, 1)]))
            .with_recipe(Recipe::new(
                300,
                vec![ItemGroup::new(1, 1), ItemGroup::new(8, 1)],
                vec![ItemGroup::new(52, 1)],
            ));
        let owned: MaterialSet = [(ItemId(1), 1)].into_iter().collect();
        let discovery = discover(&owned, &catalog);
        let resolution = resolve(&discovery, 50.0);

        let ranked = rank(&discovery, &resolution);

        let order: Vec<_> = ranked.iter().map(|r| (r.recipe.id.0, r.completeness)).collect();
        assert_eq!(order, vec![(200, 100), (100, 50), (300, 50)]);
        assert!(ranked.iter().all(|r| r.direct == (r.recipe.id.0 == 200)));
    }

    #[test]
    fn drops_unviable_and_unknown() {
        let catalog = StaticCatalog::new()
            .with_recipe(Recipe::new(
                100,
                vec![ItemGroup::new(1, 1), ItemGroup::new(9, 1)],
                vec![ItemGroup::new(50, 1)],
            ))
            .with_recipe(Recipe::new(
                200,
                vec![ItemGroup::new(1, 1), ItemGroup::new(60, 1)],
                vec![ItemGroup::new(60, 1)],
            ));
        let owned: MaterialSet = [(ItemId(1), 1)].into_iter().collect();
        let discovery = discover(&owned, &catalog);
        let resolution = resolve(&discovery, 75.0);

        assert!(rank(&discovery, &resolution).is_empty());
    }

    #[test]
    fn zero_input_recipe_ranks_direct_at_zero() {
        let recipe = Recipe::new(500, Vec::new(), vec![ItemGroup::new(2, 1)]);
        let mut discovery = Discovery::default();
        discovery.recipes.insert(recipe.id, &recipe);

        let resolution = resolve(&discovery, 0.0);
        let ranked = rank(&discovery, &resolution);
        let entries: Vec<_> = ranked.iter().map(|r| (r.recipe.id.0, r.completeness, r.direct)).collect();
        assert_eq!(entries, vec![(500, 0, true)]);

        let resolution = resolve(&discovery, 0.1);
        assert!(rank(&discovery, &resolution).is_empty());
    }
}
