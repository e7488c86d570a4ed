use futures::future::try_join_all;
use mealvote_shared::{Error, RecipeStore, mealplan::IngredientLineItem};

/// Concatenates the ingredients of every recipe, in `recipe_ids` order.
///
/// Recipes are fetched concurrently. Items are copied as-is: duplicates across
/// recipes are kept and units are not normalized. If any fetch fails the whole
/// list fails with [`Error::IngredientFetchFailed`].
pub async fn calculate_shopping_list<S: RecipeStore + ?Sized>(
    store: &S,
    recipe_ids: &[String],
) -> mealvote_shared::Result<Vec<IngredientLineItem>> {
    if recipe_ids.is_empty() {
        return Ok(vec![]);
    }

    let fetches = recipe_ids.iter().map(|recipe_id| async move {
        store
            .read_recipe_ingredients(recipe_id)
            .await
            .map_err(|err| {
                tracing::warn!(err = %err, recipe_id = %recipe_id, "failed to fetch recipe ingredients");

                Error::IngredientFetchFailed {
                    recipe_id: recipe_id.to_owned(),
                    reason: err.to_string(),
                }
            })
    });

    let ingredients = try_join_all(fetches).await?;
    let shopping_list = ingredients.into_iter().flatten().collect::<Vec<_>>();

    tracing::debug!(
        recipes = recipe_ids.len(),
        items = shopping_list.len(),
        "shopping list calculated"
    );

    Ok(shopping_list)
}
