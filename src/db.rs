//! Database schema and operations

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};

use crate::catalog::StaticCatalog;
use crate::error::FinderError;
use crate::models::{ItemGroup, ItemId, Recipe, RecipeId};
use crate::names::NameIndex;

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Blueprints, keyed by the blueprint's own type id
        CREATE TABLE IF NOT EXISTS recipes (
            id INTEGER PRIMARY KEY
        );

        -- Materials a blueprint consumes
        CREATE TABLE IF NOT EXISTS recipe_inputs (
            recipe_id INTEGER NOT NULL,
            position INTEGER NOT NULL,
            item_id INTEGER NOT NULL,
            quantity INTEGER NOT NULL,
            PRIMARY KEY (recipe_id, position)
        );

        -- Products a blueprint yields
        CREATE TABLE IF NOT EXISTS recipe_outputs (
            recipe_id INTEGER NOT NULL,
            position INTEGER NOT NULL,
            item_id INTEGER NOT NULL,
            quantity INTEGER NOT NULL,
            PRIMARY KEY (recipe_id, position)
        );

        -- Localized item names, one row per language
        CREATE TABLE IF NOT EXISTS item_names (
            item_id INTEGER NOT NULL,
            language INTEGER NOT NULL,
            name TEXT NOT NULL,
            PRIMARY KEY (item_id, language)
        );

        CREATE INDEX IF NOT EXISTS idx_recipe_inputs_item ON recipe_inputs(item_id);
        CREATE INDEX IF NOT EXISTS idx_item_names_name ON item_names(name);
        "#,
    )?;
    Ok(())
}

/// Insert or replace a blueprint together with its inputs and outputs
pub fn upsert_recipe(conn: &Connection, recipe: &Recipe) -> Result<()> {
    let id = to_sql_id(recipe.id);
    conn.execute("INSERT OR REPLACE INTO recipes (id) VALUES (?1)", [id])?;
    conn.execute("DELETE FROM recipe_inputs WHERE recipe_id = ?1", [id])?;
    conn.execute("DELETE FROM recipe_outputs WHERE recipe_id = ?1", [id])?;

    // One row per group, in listed order; repeated items stay separate
    for (position, input) in recipe.inputs.iter().enumerate() {
        conn.execute(
            "INSERT INTO recipe_inputs (recipe_id, position, item_id, quantity) VALUES (?1, ?2, ?3, ?4)",
            (id, position as i64, to_sql_id(input.item), to_sql_quantity(input.quantity)),
        )?;
    }
    for (position, output) in recipe.outputs.iter().enumerate() {
        conn.execute(
            "INSERT INTO recipe_outputs (recipe_id, position, item_id, quantity) VALUES (?1, ?2, ?3, ?4)",
            (id, position as i64, to_sql_id(output.item), to_sql_quantity(output.quantity)),
        )?;
    }
    Ok(())
}

/// Insert or replace the name of an item in one language
pub fn insert_item_name(conn: &Connection, item: ItemId, language: usize, name: &str) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO item_names (item_id, language, name) VALUES (?1, ?2, ?3)",
        (to_sql_id(item), language as i64, name),
    )?;
    Ok(())
}

/// Clear all extracted data (for re-extraction)
pub fn clear_extracted_data(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        DELETE FROM recipe_outputs;
        DELETE FROM recipe_inputs;
        DELETE FROM recipes;
        DELETE FROM item_names;
        "#,
    )?;
    Ok(())
}

/// Load every blueprint into an in-memory catalog
pub fn load_catalog(conn: &Connection) -> Result<StaticCatalog> {
    let mut catalog = StaticCatalog::new();
    for recipe in list_recipes(conn)? {
        catalog.insert(recipe);
    }
    Ok(catalog)
}

/// Load all item names
pub fn load_names(conn: &Connection) -> Result<NameIndex> {
    let mut stmt = conn.prepare("SELECT item_id, language, name FROM item_names ORDER BY item_id, language")?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut names = NameIndex::new();
    for row in rows {
        let (item, language, name) = row?;
        names.insert(ItemId(item as u64), language as usize, &name);
    }
    Ok(names)
}

/// List all blueprints, ordered by id
pub fn list_recipes(conn: &Connection) -> Result<Vec<Recipe>> {
    let mut recipes: Vec<Recipe> = {
        let mut stmt = conn.prepare("SELECT id FROM recipes ORDER BY id")?;
        let rows = stmt.query_map([], |row| row.get::<_, i64>(0))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(Recipe::new(row? as u64, Vec::new(), Vec::new()));
        }
        results
    };

    let inputs = item_groups(conn, "recipe_inputs")?;
    let outputs = item_groups(conn, "recipe_outputs")?;

    for recipe in &mut recipes {
        recipe.inputs = inputs.get(&recipe.id).cloned().unwrap_or_default();
        recipe.outputs = outputs.get(&recipe.id).cloned().unwrap_or_default();
    }
    Ok(recipes)
}

/// Get a single blueprint
pub fn get_recipe(conn: &Connection, id: RecipeId) -> Result<Recipe> {
    let found: Option<i64> = conn
        .query_row("SELECT id FROM recipes WHERE id = ?1", [to_sql_id(id)], |row| row.get(0))
        .optional()?;
    if found.is_none() {
        return Err(FinderError::UnknownRecipe(id).into());
    }

    Ok(Recipe {
        id,
        inputs: recipe_groups(conn, "recipe_inputs", id)?,
        outputs: recipe_groups(conn, "recipe_outputs", id)?,
    })
}

fn item_groups(
    conn: &Connection,
    table: &str,
) -> Result<std::collections::HashMap<RecipeId, Vec<ItemGroup>>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT recipe_id, item_id, quantity FROM {table} ORDER BY recipe_id, position"
    ))?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, i64>(2)?,
        ))
    })?;

    let mut groups: std::collections::HashMap<RecipeId, Vec<ItemGroup>> = std::collections::HashMap::new();
    for row in rows {
        let (recipe_id, item_id, quantity) = row?;
        groups
            .entry(ItemId(recipe_id as u64))
            .or_default()
            .push(ItemGroup::new(item_id as u64, quantity as u64));
    }
    Ok(groups)
}

fn recipe_groups(conn: &Connection, table: &str, id: RecipeId) -> Result<Vec<ItemGroup>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT item_id, quantity FROM {table} WHERE recipe_id = ?1 ORDER BY position"
    ))?;

    let rows = stmt.query_map([to_sql_id(id)], |row| {
        Ok(ItemGroup::new(row.get::<_, i64>(0)? as u64, row.get::<_, i64>(1)? as u64))
    })?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

// SQLite integers are signed; type ids and quantities fit comfortably.
fn to_sql_id(id: ItemId) -> i64 {
    id.0 as i64
}

fn to_sql_quantity(quantity: u64) -> i64 {
    i64::try_from(quantity).unwrap_or(i64::MAX)
}
