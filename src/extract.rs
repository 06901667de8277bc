//! Import of the static blueprint export
//!
//! The export is a JSON document with two tables:
//!
//! ```json
//! {
//!   "blueprints": [[blueprintId, [[materialId, qty], ...], [[productId, qty], ...]], ...],
//!   "names": [[itemId, ["Tritanium", 0, "Tritanium ES", ...]], ...]
//! }
//! ```
//!
//! Names are listed per language. A number in place of a name refers back
//! to the name of an earlier language for the same item.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Deserialize;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::db;
use crate::error::FinderError;
use crate::models::{ItemGroup, ItemId, Recipe};

#[derive(Debug, Deserialize)]
struct RawExport {
    #[serde(default)]
    blueprints: Vec<RawBlueprint>,
    #[serde(default)]
    names: Vec<RawNames>,
}

/// `[id, materials, products]`
#[derive(Debug, Deserialize)]
struct RawBlueprint(u64, Vec<(u64, u64)>, Vec<(u64, u64)>);

/// `[itemId, names]`
#[derive(Debug, Deserialize)]
struct RawNames(u64, Vec<RawName>);

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawName {
    Text(String),
    BackRef(usize),
}

/// Find export files: the path itself, or every `*.json` below a directory
pub fn find_export_files(source: &Path) -> Result<Vec<PathBuf>> {
    if source.is_file() {
        return Ok(vec![source.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(source)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path.to_path_buf());
        }
    }

    if files.is_empty() {
        return Err(FinderError::NoExportFiles(source.to_path_buf()).into());
    }
    Ok(files)
}

fn parse_export(path: &Path) -> Result<RawExport> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let export = serde_json::from_str(&content).map_err(|source| FinderError::MalformedExport {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(export)
}

/// Expand compressed names into one entry per language.
fn expand_names(raw: &[RawName]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(raw.len());
    for name in raw {
        let expanded = match name {
            RawName::Text(text) => text.trim().to_string(),
            RawName::BackRef(index) => names.get(*index).cloned().unwrap_or_default(),
        };
        names.push(expanded);
    }
    names
}

fn recipe_from_raw(raw: &RawBlueprint) -> Recipe {
    let RawBlueprint(id, materials, products) = raw;
    Recipe::new(*id, item_groups(materials), item_groups(products))
}

fn item_groups(list: &[(u64, u64)]) -> Vec<ItemGroup> {
    list.iter().map(|&(item, qty)| ItemGroup::new(item, qty)).collect()
}

/// Import every export file under `source` into the database
pub fn extract_to_database(conn: &Connection, source: &Path) -> Result<ExtractStats> {
    let mut stats = ExtractStats::default();

    let files = find_export_files(source)?;
    info!(files = files.len(), source = %source.display(), "importing blueprint export");

    for path in &files {
        let export = match parse_export(path) {
            Ok(export) => export,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping export file");
                stats.errors += 1;
                continue;
            }
        };

        let tx = conn.unchecked_transaction()?;
        let (recipes_before, names_before) = (stats.recipes, stats.names);

        for raw in &export.blueprints {
            let recipe = recipe_from_raw(raw);
            // Blueprints that cannot manufacture anything are not useful
            if recipe.inputs.is_empty() || recipe.outputs.is_empty() {
                stats.skipped += 1;
                continue;
            }

            db::upsert_recipe(&tx, &recipe)?;
            stats.recipes += 1;
            stats.inputs += recipe.inputs.len();
            stats.outputs += recipe.outputs.len();
        }

        for RawNames(item, raw_names) in &export.names {
            for (language, name) in expand_names(raw_names).iter().enumerate() {
                if name.is_empty() {
                    continue;
                }
                db::insert_item_name(&tx, ItemId(*item), language, name)?;
                stats.names += 1;
            }
        }

        tx.commit()?;
        info!(
            path = %path.display(),
            recipes = stats.recipes - recipes_before,
            names = stats.names - names_before,
            "imported export file"
        );
    }

    Ok(stats)
}

#[derive(Debug, Default)]
pub struct ExtractStats {
    pub recipes: usize,
    pub inputs: usize,
    pub outputs: usize,
    pub names: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl std::fmt::Display for ExtractStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Extracted {} blueprints ({} inputs, {} outputs) and {} names. Skipped: {}, Errors: {}",
            self.recipes, self.inputs, self.outputs, self.names, self.skipped, self.errors
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    const EXPORT: &str = r#"{
        "blueprints": [
            [681, [[34, 86]], [[165, 1]]],
            [682, [[34, 133], [35, 34]], [[166, 1]]],
            [999, [], [[167, 1]]]
        ],
        "names": [
            [34, ["Tritanium", 0, "Tritanio", "", "トリタニウム"]],
            [165, ["Clone Grade Alpha"]]
        ]
    }"#;

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        db::init_schema(&conn).expect("schema");
        conn
    }

    #[test]
    fn expands_back_references() {
        let raw = vec![
            RawName::Text("Tritanium".into()),
            RawName::BackRef(0),
            RawName::Text("".into()),
            RawName::BackRef(7),
        ];
        assert_eq!(expand_names(&raw), vec!["Tritanium", "Tritanium", "", ""]);
    }

    #[test]
    fn imports_single_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("export.json");
        fs::write(&path, EXPORT).expect("write export");
        let conn = memory_db();

        let stats = extract_to_database(&conn, &path).expect("extract");

        assert_eq!(stats.recipes, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.names, 5);
        let catalog = db::load_catalog(&conn).expect("catalog");
        assert_eq!(catalog.recipes_consuming(ItemId(34)), &[ItemId(681), ItemId(682)]);
        let names = db::load_names(&conn).expect("names");
        assert_eq!(names.name_of(ItemId(34), 1), "Tritanium");
        assert_eq!(names.name_of(ItemId(34), 3), "Tritanium");
        assert_eq!(names.name_of(ItemId(34), 2), "Tritanio");
    }

    #[test]
    fn malformed_files_are_counted_not_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("a.json"), EXPORT).expect("write export");
        fs::write(dir.path().join("b.json"), "{ not json").expect("write broken");
        fs::write(dir.path().join("notes.txt"), "ignored").expect("write other");
        let conn = memory_db();

        let stats = extract_to_database(&conn, dir.path()).expect("extract");

        assert_eq!(stats.recipes, 2);
        assert_eq!(stats.errors, 1);
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = find_export_files(dir.path()).expect_err("no files");
        assert!(matches!(err.downcast_ref::<FinderError>(), Some(FinderError::NoExportFiles(_))));
    }
}
