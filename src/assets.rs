//! Parsing of pasted asset lists
//!
//! Each line is `name<TAB>quantity`, optionally followed by more
//! tab-separated columns, as copied from an in-game inventory window.

use anyhow::Result;
use regex::Regex;
use tracing::warn;

use crate::models::{MaterialSet, Quantity};
use crate::names::NameIndex;

#[derive(Debug, Default)]
pub struct Assets {
    pub materials: MaterialSet,
    /// Language most names matched in
    pub language: Option<usize>,
    /// Names that did not match any item
    pub unknown: Vec<String>,
}

/// Compiled patterns for reading asset lists
pub struct AssetParser {
    separators: Regex,
    leading_digits: Regex,
}

impl AssetParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            // Grouping separators: 1,000 / 1.000 / 1 000 / 1'000
            separators: Regex::new(r"[,.'\s\u{a0}]")?,
            leading_digits: Regex::new(r"^\d+")?,
        })
    }

    pub fn parse(&self, text: &str, names: &NameIndex) -> Assets {
        let mut assets = Assets::default();
        let mut language_usage: Vec<usize> = Vec::new();

        for line in text.lines() {
            let mut columns = line.split('\t');
            let name = columns.next().unwrap_or("").trim();
            if name.is_empty() {
                continue;
            }

            let Some(info) = names.resolve(name) else {
                warn!(name, "unknown asset name");
                assets.unknown.push(name.to_string());
                continue;
            };

            let quantity = self.quantity(columns.next().unwrap_or(""));
            assets.materials.add(info.item, quantity);

            if language_usage.len() <= info.language {
                language_usage.resize(info.language + 1, 0);
            }
            language_usage[info.language] += 1;
        }

        // Ties go to the lowest language index
        assets.language = language_usage
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .max_by(|(la, ca), (lb, cb)| ca.cmp(cb).then(lb.cmp(la)))
            .map(|(language, _)| language);

        assets
    }

    /// Digits of a quantity column with grouping separators removed.
    /// Anything unparseable counts as zero.
    pub fn quantity(&self, column: &str) -> Quantity {
        let cleaned = self.separators.replace_all(column.trim(), "");
        self.leading_digits
            .find(&cleaned)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemId;

    fn names() -> NameIndex {
        let mut names = NameIndex::new();
        names.insert(ItemId(34), 0, "Tritanium");
        names.insert(ItemId(35), 0, "Pyerite");
        names.insert(ItemId(35), 1, "Pyerit");
        names.insert(ItemId(36), 1, "Mexallon DE");
        names
    }

    fn parser() -> AssetParser {
        AssetParser::new().expect("patterns compile")
    }

    #[test]
    fn quantities() {
        let parser = AssetParser::new().expect("patterns compile");
        assert_eq!(parser.quantity("1,000"), 1000);
        assert_eq!(parser.quantity("2 500 000"), 2_500_000);
        assert_eq!(parser.quantity("12 m3"), 12);
        assert_eq!(parser.quantity(""), 0);
        assert_eq!(parser.quantity("n/a"), 0);
    }

    #[test]
    fn sums_duplicate_lines() {
        let text = "Tritanium\t1,000\tMineral\nPyerite\t5\nTritanium\t24\n";
        let assets = parser().parse(text, &names());

        assert_eq!(assets.materials.quantity(ItemId(34)), Some(1024));
        assert_eq!(assets.materials.quantity(ItemId(35)), Some(5));
        assert_eq!(assets.language, Some(0));
        assert!(assets.unknown.is_empty());
    }

    #[test]
    fn collects_unknown_names() {
        let assets = parser().parse("Veldspar\t10\n\nTritanium\n", &names());

        assert_eq!(assets.unknown, vec!["Veldspar".to_string()]);
        assert_eq!(assets.materials.quantity(ItemId(34)), Some(0));
    }

    #[test]
    fn picks_dominant_language() {
        let assets = parser().parse("Pyerit\t1\nMexallon DE\t1\nTritanium\t1\n", &names());
        assert_eq!(assets.language, Some(1));
    }
}
