//! Producible blueprint finder
//!
//! Chains the three stages together: discover the reachable recipes,
//! resolve their completeness, then rank the viable ones.

use crate::catalog::Catalog;
use crate::completeness::resolve;
use crate::discovery::discover;
use crate::models::{MaterialSet, RankedRecipe};
use crate::names::NameIndex;
use crate::ranking::rank;

const BLUEPRINT_LINK: &str = "https://www.fuzzwork.co.uk/blueprint/?typeid=";

/// Recipes producible from `owned`, best first.
///
/// `threshold` is a completeness percentage. Values outside 0..=100 are
/// accepted: below zero every resolved recipe passes, above 100 none do.
pub fn find_producible_recipes<'c, C: Catalog + ?Sized>(
    catalog: &'c C,
    owned: &MaterialSet,
    threshold: f64,
) -> Vec<RankedRecipe<'c>> {
    analyze(catalog, owned, threshold).ranked
}

/// Ranked recipes together with counts from each stage.
#[derive(Debug)]
pub struct FindReport<'c> {
    pub threshold: f64,
    pub owned: usize,
    pub discovered: usize,
    pub resolved: usize,
    pub unresolved: usize,
    pub skipped: usize,
    pub passes: usize,
    pub ranked: Vec<RankedRecipe<'c>>,
}

pub fn analyze<'c, C: Catalog + ?Sized>(catalog: &'c C, owned: &MaterialSet, threshold: f64) -> FindReport<'c> {
    let discovery = discover(owned, catalog);
    let resolution = resolve(&discovery, threshold);
    let ranked = rank(&discovery, &resolution);

    FindReport {
        threshold,
        owned: owned.len(),
        discovered: discovery.recipes.len(),
        resolved: resolution.resolved_count(),
        unresolved: resolution.unresolved_count(),
        skipped: discovery.skipped.len(),
        passes: resolution.passes,
        ranked,
    }
}

impl std::fmt::Display for FindReport<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let direct = self.ranked.iter().filter(|r| r.direct).count();

        writeln!(f, "=== Blueprint Summary ===")?;
        writeln!(f, "Owned materials:      {}", self.owned)?;
        writeln!(f, "Minimum completeness: {}%", self.threshold)?;
        writeln!(f)?;
        writeln!(f, "Blueprints reached:   {}", self.discovered)?;
        writeln!(f, "  resolved:           {} ({} passes)", self.resolved, self.passes)?;
        writeln!(f, "  unresolvable:       {}", self.unresolved)?;
        writeln!(f, "  missing data:       {}", self.skipped)?;
        writeln!(f)?;
        writeln!(f, "Producible:           {} ({} direct)", self.ranked.len(), direct)?;

        Ok(())
    }
}

/// Format ranked recipes as a readable table
pub fn format_ranked(ranked: &[RankedRecipe<'_>], names: &NameIndex, language: usize) -> String {
    if ranked.is_empty() {
        return "It is impossible to build anything using the provided assets.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:<48} {:>8} {:>12}  {}\n", "Blueprint", "Type", "Completeness", "Link"));
    output.push_str(&format!("{}\n", "-".repeat(120)));

    for entry in ranked {
        let id = entry.recipe.id;
        let kind = if entry.direct { "direct" } else { "indirect" };
        output.push_str(&format!(
            "{:<48} {:>8} {:>11}%  {}{}\n",
            names.name_of(id, language),
            kind,
            entry.completeness,
            BLUEPRINT_LINK,
            id
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::models::{ItemGroup, ItemId, Recipe};

    fn catalog() -> StaticCatalog {
        StaticCatalog::new()
            .with_recipe(Recipe::new(100, vec![ItemGroup::new(1, 1)], vec![ItemGroup::new(2, 1)]))
            .with_recipe(Recipe::new(
                200,
                vec![ItemGroup::new(2, 1), ItemGroup::new(3, 1)],
                vec![ItemGroup::new(4, 1)],
            ))
    }

    #[test]
    fn report_counts_every_stage() {
        let catalog = catalog();
        let owned: MaterialSet = [(ItemId(1), 10)].into_iter().collect();

        let report = analyze(&catalog, &owned, 75.0);

        assert_eq!(report.discovered, 2);
        assert_eq!(report.resolved, 2);
        assert_eq!(report.unresolved, 0);
        assert_eq!(report.ranked.len(), 1);
        assert!(report.to_string().contains("Producible:           1 (1 direct)"));
    }

    #[test]
    fn formats_names_and_links() {
        let catalog = catalog();
        let owned: MaterialSet = [(ItemId(1), 10)].into_iter().collect();
        let mut names = NameIndex::new();
        names.insert(ItemId(100), 0, "Iron Plate Blueprint");

        let ranked = find_producible_recipes(&catalog, &owned, 50.0);
        let table = format_ranked(&ranked, &names, 0);

        assert!(table.contains("Iron Plate Blueprint"));
        assert!(table.contains("https://www.fuzzwork.co.uk/blueprint/?typeid=100"));
        assert!(table.contains("<< Error >>"));
        assert!(table.contains("indirect"));
    }

    #[test]
    fn empty_result_message() {
        let names = NameIndex::new();
        assert_eq!(
            format_ranked(&[], &names, 0),
            "It is impossible to build anything using the provided assets.\n"
        );
    }
}
