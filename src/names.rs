//! Localized item names

use std::collections::HashMap;

use crate::models::ItemId;

/// Languages of the static export, in column order.
pub const LANGUAGES: [&str; 7] = ["en", "de", "es", "fr", "ja", "ru", "zh"];

pub const MISSING_NAME: &str = "<< Error >>";

/// A name resolved back to its item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameInfo {
    pub item: ItemId,
    pub language: usize,
    pub name: String,
}

/// Item names per language, with a reverse index for pasted asset lists.
#[derive(Debug, Default)]
pub struct NameIndex {
    by_item: HashMap<ItemId, Vec<Option<String>>>,
    by_name: HashMap<String, Vec<(usize, ItemId)>>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name of `item` in `language`. Blank names are ignored.
    pub fn insert(&mut self, item: ItemId, language: usize, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }

        let names = self.by_item.entry(item).or_default();
        if names.len() <= language {
            names.resize(language + 1, None);
        }
        names[language] = Some(name.to_string());

        let entries = self.by_name.entry(name.to_string()).or_default();
        if !entries.contains(&(language, item)) {
            entries.push((language, item));
            entries.sort();
        }
    }

    /// Name of `item` in `language`, falling back to the first language.
    pub fn name_of(&self, item: ItemId, language: usize) -> &str {
        self.by_item
            .get(&item)
            .and_then(|names| {
                names
                    .get(language)
                    .and_then(Option::as_deref)
                    .or_else(|| names.first().and_then(Option::as_deref))
            })
            .unwrap_or(MISSING_NAME)
    }

    /// Look a name up in every language, preferring the lowest language index.
    pub fn resolve(&self, name: &str) -> Option<NameInfo> {
        let name = name.trim();
        let &(language, item) = self.by_name.get(name)?.first()?;
        Some(NameInfo {
            item,
            language,
            name: name.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.by_item.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_item.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> NameIndex {
        let mut names = NameIndex::new();
        names.insert(ItemId(34), 0, "Tritanium");
        names.insert(ItemId(34), 1, "Tritanium");
        names.insert(ItemId(34), 4, "トリタニウム");
        names.insert(ItemId(35), 0, "Pyerite");
        names.insert(ItemId(35), 1, "Pyerit");
        names
    }

    #[test]
    fn falls_back_to_first_language() {
        let names = index();
        assert_eq!(names.name_of(ItemId(35), 1), "Pyerit");
        assert_eq!(names.name_of(ItemId(35), 4), "Pyerite");
        assert_eq!(names.name_of(ItemId(99), 0), MISSING_NAME);
    }

    #[test]
    fn resolves_lowest_language() {
        let names = index();
        let info = names.resolve("Tritanium").expect("resolves");
        assert_eq!(info.item, ItemId(34));
        assert_eq!(info.language, 0);

        let info = names.resolve(" Pyerit ").expect("resolves");
        assert_eq!(info.language, 1);
        assert!(names.resolve("Mexallon").is_none());
    }

    #[test]
    fn blank_names_are_ignored() {
        let mut names = NameIndex::new();
        names.insert(ItemId(1), 0, "  ");
        assert!(names.is_empty());
    }
}
