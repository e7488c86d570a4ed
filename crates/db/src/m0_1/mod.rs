mod meal_plan_create_selection_list_idx;
mod meal_plan_create_table;
mod recipe_ingredient_create_table;
mod short_list_create_meal_plan_idx;
mod short_list_create_table;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "mealvote",
    "m0_1",
    vec_box![],
    vec_box![
        meal_plan_create_table::Operation,
        meal_plan_create_selection_list_idx::Operation,
        short_list_create_table::Operation,
        short_list_create_meal_plan_idx::Operation,
        recipe_ingredient_create_table::Operation
    ]
);
