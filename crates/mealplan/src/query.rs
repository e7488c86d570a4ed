use mealvote_shared::{MealPlanStore, mealplan::MealPlanSummary};

#[derive(Clone)]
pub struct Query<S>(pub S);

impl<S: MealPlanStore> Query<S> {
    pub async fn list(
        &self,
        family_id: impl AsRef<str>,
        selection_list_id: impl AsRef<str>,
    ) -> mealvote_shared::Result<Vec<MealPlanSummary>> {
        self.0
            .list_meal_plans(family_id.as_ref(), selection_list_id.as_ref())
            .await
    }
}
