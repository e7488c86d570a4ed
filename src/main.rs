use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;
mod migrate;

use cli::mealplan::MealPlanCommands;

/// mealvote - family meal plan voting
#[derive(Parser)]
#[command(name = "mealvote")]
#[command(about = "Turn family recipe votes into a meal plan and shopping list", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Manage meal plans
    #[command(subcommand)]
    Mealplan(MealPlanCommands),
    /// Aggregate the ingredients of recipes, in the given order
    ShoppingList {
        #[arg(required = true)]
        recipe_ids: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = mealvote::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealvote::observability::init_observability(
        "mealvote",
        env!("CARGO_PKG_VERSION"),
        &config.log,
    )?;

    match cli.command {
        Commands::Migrate => migrate::migrate(&config).await,
        Commands::Reset => migrate::reset(&config).await,
        Commands::Mealplan(command) => cli::mealplan::run(config, command).await,
        Commands::ShoppingList { recipe_ids } => {
            cli::mealplan::shopping_list(config, recipe_ids).await
        }
    }
}
