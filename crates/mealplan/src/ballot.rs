use mealvote_shared::{BallotStore, mealplan::Ballot, mealplan::MealPlanKey};

/// Reads every ballot cast for a meal plan. Confirmation is not filtered here.
pub async fn read_ballots<S: BallotStore + ?Sized>(
    store: &S,
    key: &MealPlanKey,
) -> mealvote_shared::Result<Vec<Ballot>> {
    let ballots = store.read_ballots(key).await.inspect_err(|err| {
        tracing::warn!(err = %err, meal_plan_id = %key.meal_plan_id, "failed to read ballots");
    })?;

    tracing::debug!(
        meal_plan_id = %key.meal_plan_id,
        count = ballots.len(),
        "ballots read"
    );

    Ok(ballots)
}
