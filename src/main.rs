//! Blueprint Finder
//!
//! Finds the blueprints you can build from the materials you own.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rusqlite::Connection;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blueprint_finder::assets::AssetParser;
use blueprint_finder::models::{ItemGroup, ItemId, Recipe};
use blueprint_finder::names::{LANGUAGES, NameIndex};
use blueprint_finder::{calculator, db, extract};

#[derive(Parser)]
#[command(name = "blueprint-finder")]
#[command(about = "Finds the blueprints you can build from the materials you own")]
struct Cli {
    /// Path to the SQLite database
    #[arg(short, long, default_value = "blueprints.db")]
    database: PathBuf,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Import blueprints and names from a static data export
    Extract {
        /// Export JSON file, or a directory to search for them
        source: PathBuf,

        /// Clear existing data before extraction
        #[arg(long)]
        clear: bool,
    },

    /// Find blueprints buildable from an asset list
    Find {
        /// Asset list, one `name<TAB>quantity` per line ("-" for stdin)
        #[arg(default_value = "-")]
        assets: PathBuf,

        /// Minimum completeness percentage a blueprint must reach
        #[arg(short, long, default_value = "100")]
        completeness: f64,

        /// Print stage counts after the list
        #[arg(short, long)]
        verbose: bool,
    },

    /// List all blueprints in the database
    ListRecipes,

    /// Show details for a specific blueprint
    Recipe {
        /// Blueprint type id
        id: u64,
    },

    /// Initialize empty database with schema
    Init,

    /// Load sample data for testing (without an export)
    LoadSample,
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "blueprint_finder=info".into());

    // Logs go to stderr so result tables stay pipeable
    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let conn = Connection::open(&cli.database)
        .with_context(|| format!("Failed to open database {}", cli.database.display()))?;
    db::init_schema(&conn)?;

    match cli.command {
        Commands::Extract { source, clear } => {
            if clear {
                println!("Clearing existing data...");
                db::clear_extracted_data(&conn)?;
            }

            let stats = extract::extract_to_database(&conn, &source)?;
            println!("\n{}", stats);
        }

        Commands::Find {
            assets,
            completeness,
            verbose,
        } => {
            let text = read_assets(&assets)?;
            let catalog = db::load_catalog(&conn)?;
            let names = db::load_names(&conn)?;

            let parsed = AssetParser::new()?.parse(&text, &names);
            if !parsed.unknown.is_empty() {
                println!("Ignored {} unknown asset(s): {}\n", parsed.unknown.len(), parsed.unknown.join(", "));
            }

            let report = calculator::analyze(&catalog, &parsed.materials, completeness);
            let language = parsed.language.unwrap_or(0);
            print!("{}", calculator::format_ranked(&report.ranked, &names, language));

            if verbose {
                println!("\n{}", report);
            }
        }

        Commands::ListRecipes => {
            let recipes = db::list_recipes(&conn)?;
            if recipes.is_empty() {
                println!("No blueprints in database. Run 'extract' or 'load-sample' first.");
            } else {
                let names = db::load_names(&conn)?;
                println!("{:<10} {:<48} {:>7} {:>8}", "Id", "Blueprint", "Inputs", "Outputs");
                println!("{}", "-".repeat(76));
                for r in recipes {
                    println!(
                        "{:<10} {:<48} {:>7} {:>8}",
                        r.id,
                        names.name_of(r.id, 0),
                        r.inputs.len(),
                        r.outputs.len()
                    );
                }
            }
        }

        Commands::Recipe { id } => {
            let recipe = db::get_recipe(&conn, ItemId(id))?;
            let names = db::load_names(&conn)?;
            print_recipe(&recipe, &names);
        }

        Commands::Init => {
            println!("Database initialized at: {}", cli.database.display());
        }

        Commands::LoadSample => {
            load_sample_data(&conn)?;
            println!("Sample data loaded successfully!");
        }
    }

    Ok(())
}

fn read_assets(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).context("Failed to read assets from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn print_recipe(recipe: &Recipe, names: &NameIndex) {
    println!("Blueprint: {}", names.name_of(recipe.id, 0));
    println!("  ID: {}", recipe.id);

    if !recipe.inputs.is_empty() {
        println!("  Materials:");
        for input in &recipe.inputs {
            println!("    {} x {}", input.quantity, names.name_of(input.item, 0));
        }
    }
    if !recipe.outputs.is_empty() {
        println!("  Products:");
        for output in &recipe.outputs {
            println!("    {} x {}", output.quantity, names.name_of(output.item, 0));
        }
    }

    let translated: Vec<_> = LANGUAGES
        .iter()
        .enumerate()
        .skip(1)
        .map(|(language, code)| format!("{}: {}", code, names.name_of(recipe.id, language)))
        .collect();
    println!("  Names: {}", translated.join(", "));
}

/// Load a small mineral-to-module chain for testing without an export
fn load_sample_data(conn: &Connection) -> Result<()> {
    db::clear_extracted_data(conn)?;

    let items: &[(u64, &str)] = &[
        (34, "Tritanium"),
        (35, "Pyerite"),
        (36, "Mexallon"),
        (37, "Isogen"),
        (11399, "Morphite"),
        (11530, "Plasma Thruster"),
        (11531, "Plasma Thruster Blueprint"),
        (11532, "Fusion Reactor Unit"),
        (11533, "Fusion Reactor Unit Blueprint"),
        (11540, "Propulsion Assembly"),
        (11541, "Propulsion Assembly Blueprint"),
        (11550, "Hull Plating"),
        (11551, "Hull Plating Blueprint"),
    ];
    for &(item, name) in items {
        db::insert_item_name(conn, ItemId(item), 0, name)?;
    }

    let recipes = [
        // Minerals only
        Recipe::new(
            11531,
            vec![ItemGroup::new(34, 1000), ItemGroup::new(35, 250)],
            vec![ItemGroup::new(11530, 1)],
        ),
        // Needs Morphite, which nothing produces
        Recipe::new(
            11533,
            vec![ItemGroup::new(36, 120), ItemGroup::new(11399, 4)],
            vec![ItemGroup::new(11532, 1)],
        ),
        // Built from the two components above
        Recipe::new(
            11541,
            vec![
                ItemGroup::new(11530, 2),
                ItemGroup::new(11532, 1),
                ItemGroup::new(37, 40),
            ],
            vec![ItemGroup::new(11540, 1)],
        ),
        Recipe::new(
            11551,
            vec![ItemGroup::new(34, 5000), ItemGroup::new(36, 300)],
            vec![ItemGroup::new(11550, 1)],
        ),
    ];
    for recipe in &recipes {
        db::upsert_recipe(conn, recipe)?;
    }

    println!("Loaded {} sample blueprints", recipes.len());
    Ok(())
}
