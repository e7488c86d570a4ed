use mealvote_shared::{Error, MealPlanStore, mealplan::MealPlanKey, user::Claims};
use validator::Validate;

#[derive(Validate)]
pub struct CreateInput {
    #[validate(length(min = 1, max = 128))]
    pub family_id: String,
    #[validate(length(min = 1, max = 128))]
    pub selection_list_id: String,
}

#[derive(Clone)]
pub struct Command<S>(pub S);

impl<S: MealPlanStore> Command<S> {
    /// Creates an unconfirmed, empty meal plan and returns its id.
    pub async fn create(
        &self,
        family_id: impl Into<String>,
        selection_list_id: impl Into<String>,
    ) -> mealvote_shared::Result<String> {
        let input = CreateInput {
            family_id: family_id.into(),
            selection_list_id: selection_list_id.into(),
        };
        input.validate()?;

        let id = self
            .0
            .create_meal_plan(&input.family_id, &input.selection_list_id)
            .await?;

        tracing::info!(
            meal_plan_id = %id,
            family_id = %input.family_id,
            selection_list_id = %input.selection_list_id,
            "meal plan created"
        );

        Ok(id)
    }

    pub async fn delete(&self, key: &MealPlanKey, claims: &Claims) -> mealvote_shared::Result<()> {
        let member_id = claims.require_parent()?;

        self.0.delete_meal_plan(key).await?;

        tracing::info!(meal_plan = %key, by = %member_id, "meal plan removed");

        Ok(())
    }

    /// Flips `is_confirmed` and returns the new value.
    ///
    /// Plain read then write: concurrent toggles are last-write-wins.
    pub async fn toggle_status(
        &self,
        key: &MealPlanKey,
        claims: &Claims,
    ) -> mealvote_shared::Result<bool> {
        let member_id = claims.require_parent()?;

        let Some(meal_plan) = self.0.read_meal_plan(key).await? else {
            return Err(Error::NotFound(key.to_string()));
        };

        let is_confirmed = !meal_plan.is_confirmed;
        self.0.set_confirmed(key, is_confirmed).await?;

        tracing::info!(
            meal_plan = %key,
            by = %member_id,
            is_confirmed,
            "meal plan status toggled"
        );

        Ok(is_confirmed)
    }
}
