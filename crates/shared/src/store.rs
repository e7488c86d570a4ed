use async_trait::async_trait;

use crate::Result;
use crate::mealplan::{
    Ballot, IngredientLineItem, MealPlan, MealPlanKey, MealPlanPatch, MealPlanSummary,
};

#[async_trait]
pub trait BallotStore: Send + Sync {
    /// Every ballot stored for the meal plan, confirmed or not, in store order.
    async fn read_ballots(&self, key: &MealPlanKey) -> Result<Vec<Ballot>>;
}

#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn read_recipe_ingredients(&self, recipe_id: &str) -> Result<Vec<IngredientLineItem>>;
}

#[async_trait]
pub trait MealPlanStore: Send + Sync {
    async fn create_meal_plan(&self, family_id: &str, selection_list_id: &str) -> Result<String>;

    async fn delete_meal_plan(&self, key: &MealPlanKey) -> Result<()>;

    async fn list_meal_plans(
        &self,
        family_id: &str,
        selection_list_id: &str,
    ) -> Result<Vec<MealPlanSummary>>;

    async fn read_meal_plan(&self, key: &MealPlanKey) -> Result<Option<MealPlan>>;

    /// Writes `patch` only if the stored version still equals `expected_version`.
    ///
    /// Returns `false` when another writer got there first.
    async fn write_meal_plan_patch(
        &self,
        key: &MealPlanKey,
        expected_version: u64,
        patch: &MealPlanPatch,
    ) -> Result<bool>;

    async fn set_confirmed(&self, key: &MealPlanKey, is_confirmed: bool) -> Result<()>;
}

pub trait Store: BallotStore + RecipeStore + MealPlanStore {}

impl<T: BallotStore + RecipeStore + MealPlanStore> Store for T {}
