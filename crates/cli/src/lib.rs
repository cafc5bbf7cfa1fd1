pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::anyhow;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use whatcanicook_core::config::{AppConfig, LoadOptions, LogFormat};
use whatcanicook_core::domain::pantry::PantryInput;
use whatcanicook_core::domain::recipe::RecipeId;
use whatcanicook_core::export::{IngredientRow, RecipeDraft};
use whatcanicook_core::filters::RecipeFilter;

#[derive(Debug, Parser)]
#[command(
    name = "whatcanicook",
    about = "WhatCanICook pantry and recipe CLI",
    long_about = "Track pantry ingredients with estimated expiry dates and see which recipes you can cook with them.",
    after_help = "Examples:\n  whatcanicook pantry add Milk --amount 1 --unit l\n  whatcanicook cook\n  whatcanicook recipes --meal Dinner"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, database connectivity, and recipe files")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(subcommand, about = "List, add, remove, or edit pantry items")]
    Pantry(PantryCommand),
    #[command(about = "Rank recipes by how much of each you can make from the pantry")]
    Cook {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "List recipes, optionally filtered by name, meal, and cuisine")]
    Recipes {
        #[arg(long, default_value = "", help = "Case-insensitive name search")]
        search: String,
        #[arg(long, default_value = "")]
        meal: String,
        #[arg(long, default_value = "")]
        cuisine: String,
        #[arg(long, help = "List saved favorites instead of recipe files")]
        favorites: bool,
    },
    #[command(about = "Show one recipe with ingredients checked against the pantry")]
    Recipe { id: String },
    #[command(about = "Add a recipe to favorites, or remove it if already there")]
    Favorite { id: String },
    #[command(about = "Write all favorites to a JSON file")]
    ExportFavorites {
        #[arg(long, help = "Output path (default favorites.json)")]
        out: Option<PathBuf>,
    },
    #[command(about = "Build a recipe from the given fields and write it as a recipe file")]
    NewRecipe(NewRecipeArgs),
}

#[derive(Debug, Subcommand)]
enum PantryCommand {
    List,
    Add {
        name: String,
        #[arg(long, default_value = "")]
        amount: String,
        #[arg(long, default_value = "")]
        unit: String,
    },
    Remove {
        index: usize,
    },
    #[command(about = "Take an item out for editing; re-add it with `pantry add`")]
    Edit {
        index: usize,
    },
}

#[derive(Debug, Args)]
struct NewRecipeArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    meal: String,
    #[arg(long, default_value = "")]
    cuisine: String,
    #[arg(long, default_value = "")]
    cook_time: String,
    #[arg(long, default_value = "")]
    servings: String,
    #[arg(long, default_value_t = 0)]
    complexity: u8,
    #[arg(long, default_value = "", help = "Image file name under images/")]
    image: String,
    #[arg(long, default_value = "")]
    source: String,
    #[arg(
        long = "ingredient",
        value_parser = parse_ingredient,
        help = "Ingredient as `name|amount|unit`; repeat for each row"
    )]
    ingredients: Vec<IngredientRow>,
    #[arg(long = "step", help = "Instruction step; repeat in order")]
    steps: Vec<String>,
    #[arg(long, help = "Output path (default: recipes directory)")]
    out: Option<PathBuf>,
}

impl NewRecipeArgs {
    fn into_parts(self) -> (RecipeDraft, Option<PathBuf>) {
        let draft = RecipeDraft {
            name: self.name,
            meal: self.meal,
            cuisine: self.cuisine,
            cook_time: self.cook_time,
            servings: self.servings,
            complexity: self.complexity,
            image: self.image,
            source: self.source,
            ingredients: self.ingredients,
            steps: self.steps,
        };
        (draft, self.out)
    }
}

fn parse_ingredient(raw: &str) -> Result<IngredientRow, String> {
    let mut parts = raw.splitn(3, '|').map(str::trim);
    let name = parts.next().unwrap_or_default();
    let amount = parts.next().unwrap_or_default();
    let unit = parts.next().unwrap_or_default();
    if name.is_empty() {
        return Err("ingredient name must not be empty".to_string());
    }
    Ok(IngredientRow::new(name, amount, unit))
}

fn init_logging(config: &AppConfig) -> anyhow::Result<()> {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|error| anyhow!("failed to install log subscriber: {error}"))
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    // Commands report config failures themselves; logging just stays off.
    if let Ok(config) = AppConfig::load(LoadOptions::default()) {
        if let Err(error) = init_logging(&config) {
            eprintln!("{error}");
        }
    }

    let today = Local::now().date_naive();
    let result = match cli.command {
        Command::Migrate => commands::migrate::run(),
        Command::Config => commands::CommandResult::text(commands::config::run()),
        Command::Doctor { json } => commands::CommandResult::text(commands::doctor::run(json)),
        Command::Pantry(PantryCommand::List) => commands::pantry::list(today),
        Command::Pantry(PantryCommand::Add { name, amount, unit }) => {
            commands::pantry::add(PantryInput::new(name).with_amount(amount, unit), today)
        }
        Command::Pantry(PantryCommand::Remove { index }) => commands::pantry::remove(index),
        Command::Pantry(PantryCommand::Edit { index }) => commands::pantry::edit(index),
        Command::Cook { json } => commands::cook::run(json),
        Command::Recipes { search, meal, cuisine, favorites } => {
            commands::recipes::list(RecipeFilter { query: search, meal, cuisine }, favorites)
        }
        Command::Recipe { id } => commands::recipes::show(&id),
        Command::Favorite { id } => commands::favorites::toggle(&id),
        Command::ExportFavorites { out } => commands::favorites::export(out),
        Command::NewRecipe(args) => {
            let (draft, out) = args.into_parts();
            let id = RecipeId::Number(Local::now().timestamp_millis());
            commands::recipes::create(draft, id, out)
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
