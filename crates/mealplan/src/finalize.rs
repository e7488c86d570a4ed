use mealvote_shared::{
    Error, Store,
    mealplan::{IngredientLineItem, MealPlan, MealPlanKey, MealPlanPatch, MealPlanState},
};

use crate::{Commit, MAX_ATTEMPTS, MAX_RECIPES, VoteTally};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalizeOptions {
    pub max_recipes: usize,
    pub max_attempts: u32,
}

impl Default for FinalizeOptions {
    fn default() -> Self {
        Self {
            max_recipes: MAX_RECIPES,
            max_attempts: MAX_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Finalization {
    Missing,
    /// Already confirmed or populated, left untouched.
    Skipped(MealPlanState),
    /// No confirmed vote yet, nothing written.
    Unchanged,
    Finalized { recipes: usize, items: usize },
}

/// Fixes the recipe selection and shopping list of a meal plan, once.
#[derive(Clone)]
pub struct Finalizer<S> {
    store: S,
    options: FinalizeOptions,
}

impl<S: Store> Finalizer<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            options: FinalizeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FinalizeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Finalizes the meal plan if needed, then returns its current snapshot.
    ///
    /// A failed finalization is logged and does not fail the read: the snapshot
    /// is returned as it stands and the next read tries again.
    pub async fn get_meal_plan(
        &self,
        key: &MealPlanKey,
    ) -> mealvote_shared::Result<Option<MealPlan>> {
        if let Err(err) = self.finalize(key).await {
            tracing::error!(err = %err, meal_plan = %key, "failed to finalize meal plan");
        }

        let meal_plan = self.store.read_meal_plan(key).await?;

        if meal_plan.is_none() {
            tracing::warn!(meal_plan = %key, "meal plan not found");
        }

        Ok(meal_plan)
    }

    pub async fn finalize(&self, key: &MealPlanKey) -> mealvote_shared::Result<Finalization> {
        let commit = crate::run_atomic(
            &self.store,
            key,
            self.options.max_attempts,
            move |meal_plan| self.decide(key, meal_plan),
        )
        .await?;

        let finalization = match commit {
            Commit::NotFound => Finalization::Missing,
            Commit::Skipped(meal_plan) if meal_plan.needs_finalization() => {
                Finalization::Unchanged
            }
            Commit::Skipped(meal_plan) => Finalization::Skipped(meal_plan.state()),
            Commit::Committed(patch) => {
                tracing::info!(
                    meal_plan = %key,
                    recipes = patch.recipe_ids.len(),
                    items = patch.shopping_list.len(),
                    "meal plan finalized"
                );

                Finalization::Finalized {
                    recipes: patch.recipe_ids.len(),
                    items: patch.shopping_list.len(),
                }
            }
        };

        Ok(finalization)
    }

    /// Top recipes of the confirmed ballots, most voted first.
    pub async fn calculate_votes(
        &self,
        key: &MealPlanKey,
    ) -> mealvote_shared::Result<Vec<String>> {
        let ballots = crate::read_ballots(&self.store, key).await?;
        let tally = VoteTally::from_ballots(&ballots);

        tracing::debug!(
            meal_plan = %key,
            candidates = tally.len(),
            "votes tallied"
        );

        Ok(tally.ranked(self.options.max_recipes))
    }

    pub async fn calculate_shopping_list(
        &self,
        recipe_ids: &[String],
    ) -> mealvote_shared::Result<Vec<IngredientLineItem>> {
        crate::shopping_list::calculate_shopping_list(&self.store, recipe_ids).await
    }

    async fn decide(
        &self,
        key: &MealPlanKey,
        meal_plan: MealPlan,
    ) -> mealvote_shared::Result<Option<MealPlanPatch>> {
        if !meal_plan.needs_finalization() {
            return Ok(None);
        }

        let recipe_ids = self.calculate_votes(key).await?;
        let shopping_list = self.calculate_shopping_list(&recipe_ids).await?;

        // JSON has no encoding for NaN or infinity.
        if let Some(item) = shopping_list.iter().find(|item| !item.amount.is_finite()) {
            return Err(Error::InvalidAmount {
                ingredient_id: item.id.to_owned(),
            });
        }

        let patch = MealPlanPatch {
            recipe_ids,
            shopping_list,
        };

        if patch.is_empty() {
            return Ok(None);
        }

        Ok(Some(patch))
    }
}
