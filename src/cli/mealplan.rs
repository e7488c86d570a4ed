use clap::{Args, Subcommand};
use mealvote::{Config, open_store};
use mealvote_mealplan::{Command, Finalization, Finalizer, Query, calculate_shopping_list};
use mealvote_shared::{mealplan::MealPlanKey, user::Claims};
use serde_json::json;

use super::print_json;

#[derive(Args, Debug)]
pub struct Scope {
    /// Family owning the selection list
    #[arg(long)]
    pub family: String,

    /// Selection list the meal plans belong to
    #[arg(long = "selection-list")]
    pub selection_list: String,
}

impl Scope {
    fn key(&self, meal_plan_id: impl Into<String>) -> MealPlanKey {
        MealPlanKey::new(&self.family, &self.selection_list, meal_plan_id)
    }
}

#[derive(Args, Debug)]
pub struct Member {
    /// Acting family member id
    #[arg(long)]
    pub user: String,

    /// Act as a child instead of a parent
    #[arg(long)]
    pub child: bool,
}

impl From<&Member> for Claims {
    fn from(member: &Member) -> Self {
        if member.child {
            Claims::child(&member.user)
        } else {
            Claims::parent(&member.user)
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum MealPlanCommands {
    /// Create an empty, unconfirmed meal plan
    Create {
        #[command(flatten)]
        scope: Scope,
    },
    /// List meal plans of a selection list
    List {
        #[command(flatten)]
        scope: Scope,
    },
    /// Show a meal plan, finalizing it on first read
    Show {
        #[command(flatten)]
        scope: Scope,
        id: String,
    },
    /// Run finalization and report what it did
    Finalize {
        #[command(flatten)]
        scope: Scope,
        id: String,
    },
    /// Flip the confirmed status of a meal plan
    Toggle {
        #[command(flatten)]
        scope: Scope,
        #[command(flatten)]
        member: Member,
        id: String,
    },
    /// Delete a meal plan and its ballots
    Delete {
        #[command(flatten)]
        scope: Scope,
        #[command(flatten)]
        member: Member,
        id: String,
    },
    /// Rank recipes from the confirmed ballots without writing anything
    Votes {
        #[command(flatten)]
        scope: Scope,
        id: String,
    },
}

#[tracing::instrument(skip(config))]
pub async fn run(config: Config, command: MealPlanCommands) -> anyhow::Result<()> {
    let store = open_store(&config.database).await?;

    match command {
        MealPlanCommands::Create { scope } => {
            let id = Command(store)
                .create(&scope.family, &scope.selection_list)
                .await?;

            print_json(&json!({ "id": id }))
        }
        MealPlanCommands::List { scope } => {
            let summaries = Query(store)
                .list(&scope.family, &scope.selection_list)
                .await?;

            print_json(&summaries)
        }
        MealPlanCommands::Show { scope, id } => {
            let finalizer = Finalizer::new(store).with_options(config.finalize_options());
            let meal_plan = finalizer.get_meal_plan(&scope.key(id)).await?;

            print_json(&meal_plan)
        }
        MealPlanCommands::Finalize { scope, id } => {
            let finalizer = Finalizer::new(store).with_options(config.finalize_options());
            let outcome = match finalizer.finalize(&scope.key(&id)).await? {
                Finalization::Missing => json!({ "id": id, "outcome": "missing" }),
                Finalization::Skipped(state) => {
                    json!({ "id": id, "outcome": "skipped", "state": state.to_string() })
                }
                Finalization::Unchanged => json!({ "id": id, "outcome": "unchanged" }),
                Finalization::Finalized { recipes, items } => json!({
                    "id": id,
                    "outcome": "finalized",
                    "recipes": recipes,
                    "items": items,
                }),
            };

            print_json(&outcome)
        }
        MealPlanCommands::Toggle { scope, member, id } => {
            let is_confirmed = Command(store)
                .toggle_status(&scope.key(id), &(&member).into())
                .await?;

            print_json(&json!({ "is_confirmed": is_confirmed }))
        }
        MealPlanCommands::Delete { scope, member, id } => {
            Command(store)
                .delete(&scope.key(id), &(&member).into())
                .await?;

            Ok(())
        }
        MealPlanCommands::Votes { scope, id } => {
            let finalizer = Finalizer::new(store).with_options(config.finalize_options());
            let recipe_ids = finalizer.calculate_votes(&scope.key(id)).await?;

            print_json(&recipe_ids)
        }
    }
}

#[tracing::instrument(skip(config))]
pub async fn shopping_list(config: Config, recipe_ids: Vec<String>) -> anyhow::Result<()> {
    let store = open_store(&config.database).await?;
    let shopping_list = calculate_shopping_list(&store, &recipe_ids).await?;

    print_json(&shopping_list)
}
