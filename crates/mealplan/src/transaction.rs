use std::future::Future;

use mealvote_shared::{
    Error, MealPlanStore,
    mealplan::{MealPlan, MealPlanKey, MealPlanPatch},
};

/// Attempts a transaction makes before giving up on a contended meal plan.
pub const MAX_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum Commit {
    NotFound,
    /// The closure decided there was nothing to write.
    Skipped(MealPlan),
    Committed(MealPlanPatch),
}

/// Optimistic read-decide-write on a single meal plan.
///
/// `f` receives the current snapshot and returns the patch to apply, if any.
/// The patch is committed only if the meal plan version did not move since the
/// read; otherwise the snapshot is read again and `f` is called again, up to
/// `max_attempts` times.
pub async fn run_atomic<S, F, Fut>(
    store: &S,
    key: &MealPlanKey,
    max_attempts: u32,
    mut f: F,
) -> mealvote_shared::Result<Commit>
where
    S: MealPlanStore + ?Sized,
    F: FnMut(MealPlan) -> Fut,
    Fut: Future<Output = mealvote_shared::Result<Option<MealPlanPatch>>>,
{
    let max_attempts = max_attempts.max(1);

    for attempt in 1..=max_attempts {
        let Some(meal_plan) = store.read_meal_plan(key).await? else {
            return Ok(Commit::NotFound);
        };

        let version = meal_plan.version;
        let Some(patch) = f(meal_plan.clone()).await? else {
            return Ok(Commit::Skipped(meal_plan));
        };

        if store.write_meal_plan_patch(key, version, &patch).await? {
            return Ok(Commit::Committed(patch));
        }

        tracing::warn!(
            meal_plan_id = %key.meal_plan_id,
            attempt,
            version,
            "meal plan changed during transaction"
        );
    }

    Err(Error::TransactionAborted {
        attempts: max_attempts,
    })
}
