use serde::{Deserialize, Serialize};
use strum::Display;

/// Location of a meal plan: `families/{family}/selectionLists/{list}/mealPlans/{id}`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MealPlanKey {
    pub family_id: String,
    pub selection_list_id: String,
    pub meal_plan_id: String,
}

impl MealPlanKey {
    pub fn new(
        family_id: impl Into<String>,
        selection_list_id: impl Into<String>,
        meal_plan_id: impl Into<String>,
    ) -> Self {
        Self {
            family_id: family_id.into(),
            selection_list_id: selection_list_id.into(),
            meal_plan_id: meal_plan_id.into(),
        }
    }
}

impl std::fmt::Display for MealPlanKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "families/{}/selectionLists/{}/mealPlans/{}",
            self.family_id, self.selection_list_id, self.meal_plan_id
        )
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct IngredientLineItem {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

#[derive(Display, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MealPlanState {
    #[default]
    UnconfirmedEmpty,
    UnconfirmedPopulated,
    Confirmed,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct MealPlan {
    pub id: String,
    pub family_id: String,
    pub selection_list_id: String,
    pub created_at: u64,
    pub is_confirmed: bool,
    pub recipe_ids: Vec<String>,
    pub shopping_list: Vec<IngredientLineItem>,
    pub version: u64,
}

impl MealPlan {
    pub fn state(&self) -> MealPlanState {
        if self.is_confirmed {
            MealPlanState::Confirmed
        } else if self.recipe_ids.is_empty() && self.shopping_list.is_empty() {
            MealPlanState::UnconfirmedEmpty
        } else {
            MealPlanState::UnconfirmedPopulated
        }
    }

    /// Only an unconfirmed plan that was never populated may be tallied.
    pub fn needs_finalization(&self) -> bool {
        self.state() == MealPlanState::UnconfirmedEmpty
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MealPlanPatch {
    pub recipe_ids: Vec<String>,
    pub shopping_list: Vec<IngredientLineItem>,
}

impl MealPlanPatch {
    pub fn is_empty(&self) -> bool {
        self.recipe_ids.is_empty() && self.shopping_list.is_empty()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MealPlanSummary {
    pub id: String,
    pub is_confirmed: bool,
}

/// A voter's short-list of recipes for one meal plan.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Ballot {
    pub id: String,
    pub meal_plan_id: String,
    pub user_id: String,
    pub is_confirmed: bool,
    pub recipe_ids: Vec<String>,
}
