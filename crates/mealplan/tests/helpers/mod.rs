use std::{
    collections::{HashMap, HashSet},
    path::PathBuf,
    str::FromStr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use mealvote_db::table::{RecipeIngredient, ShortList};
use mealvote_mealplan::SqliteStore;
use mealvote_shared::{
    BallotStore, Error, MealPlanStore, RecipeStore,
    mealplan::{
        Ballot, IngredientLineItem, MealPlan, MealPlanKey, MealPlanPatch, MealPlanSummary,
    },
};
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::migrator::{Migrate, Plan};

pub const FAMILY: &str = "family";
pub const SELECTION_LIST: &str = "selection";

static CREATED_AT: AtomicI64 = AtomicI64::new(1);

pub async fn setup_test_store(path: PathBuf) -> anyhow::Result<SqliteStore> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    mealvote_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(SqliteStore::new(pool))
}

#[allow(dead_code)]
pub async fn insert_ballot(
    store: &SqliteStore,
    meal_plan_id: &str,
    user_id: &str,
    is_confirmed: bool,
    recipe_ids: &[&str],
) -> anyhow::Result<String> {
    let id = format!("{meal_plan_id}:{user_id}");
    let statement = Query::insert()
        .into_table(ShortList::Table)
        .columns([
            ShortList::Id,
            ShortList::MealPlanId,
            ShortList::UserId,
            ShortList::IsConfirmed,
            ShortList::RecipeIds,
            ShortList::CreatedAt,
        ])
        .values_panic([
            id.to_owned().into(),
            meal_plan_id.into(),
            user_id.into(),
            is_confirmed.into(),
            serde_json::to_string(recipe_ids)?.into(),
            CREATED_AT.fetch_add(1, Ordering::SeqCst).into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values)
        .execute(&store.write_db)
        .await?;

    Ok(id)
}

#[allow(dead_code)]
pub async fn insert_ingredients(
    store: &SqliteStore,
    recipe_id: &str,
    ingredients: &[IngredientLineItem],
) -> anyhow::Result<()> {
    for (position, ingredient) in ingredients.iter().enumerate() {
        let statement = Query::insert()
            .into_table(RecipeIngredient::Table)
            .columns([
                RecipeIngredient::RecipeId,
                RecipeIngredient::Position,
                RecipeIngredient::Id,
                RecipeIngredient::Name,
                RecipeIngredient::Amount,
                RecipeIngredient::Unit,
            ])
            .values_panic([
                recipe_id.into(),
                (position as i64).into(),
                ingredient.id.to_owned().into(),
                ingredient.name.to_owned().into(),
                ingredient.amount.into(),
                ingredient.unit.to_owned().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&store.write_db)
            .await?;
    }

    Ok(())
}

#[allow(dead_code)]
pub fn item(id: &str, name: &str, amount: f64, unit: &str) -> IngredientLineItem {
    IngredientLineItem {
        id: id.to_owned(),
        name: name.to_owned(),
        amount,
        unit: unit.to_owned(),
    }
}

#[allow(dead_code)]
pub fn ballot(user_id: &str, is_confirmed: bool, recipe_ids: &[&str]) -> Ballot {
    Ballot {
        id: user_id.to_owned(),
        user_id: user_id.to_owned(),
        is_confirmed,
        recipe_ids: recipe_ids.iter().map(|id| id.to_string()).collect(),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn key(meal_plan_id: impl Into<String>) -> MealPlanKey {
    MealPlanKey::new(FAMILY, SELECTION_LIST, meal_plan_id)
}

#[derive(Default)]
struct Inner {
    meal_plans: Mutex<HashMap<String, MealPlan>>,
    ballots: Mutex<HashMap<String, Vec<Ballot>>>,
    recipes: Mutex<HashMap<String, Vec<IngredientLineItem>>>,
    latencies: Mutex<HashMap<String, Duration>>,
    failing_recipes: Mutex<HashSet<String>>,
    completed_recipes: Mutex<Vec<String>>,
    ballot_latency: Mutex<Duration>,
    fail_ballots: AtomicBool,
    ballot_reads: AtomicUsize,
    ingredient_reads: AtomicUsize,
    commits: AtomicUsize,
    conflicts: AtomicUsize,
}

/// In-memory store with injectable latency and failures.
#[derive(Clone, Default)]
pub struct FakeStore(Arc<Inner>);

#[allow(dead_code)]
impl FakeStore {
    pub fn insert_meal_plan(&self, meal_plan: MealPlan) -> MealPlanKey {
        let key = MealPlanKey::new(
            &meal_plan.family_id,
            &meal_plan.selection_list_id,
            &meal_plan.id,
        );
        self.0
            .meal_plans
            .lock()
            .unwrap()
            .insert(meal_plan.id.to_owned(), meal_plan);

        key
    }

    pub fn empty_meal_plan(&self, id: &str) -> MealPlanKey {
        self.insert_meal_plan(MealPlan {
            id: id.to_owned(),
            family_id: FAMILY.to_owned(),
            selection_list_id: SELECTION_LIST.to_owned(),
            ..Default::default()
        })
    }

    pub fn meal_plan(&self, id: &str) -> Option<MealPlan> {
        self.0.meal_plans.lock().unwrap().get(id).cloned()
    }

    pub fn add_ballot(&self, meal_plan_id: &str, ballot: Ballot) {
        self.0
            .ballots
            .lock()
            .unwrap()
            .entry(meal_plan_id.to_owned())
            .or_default()
            .push(Ballot {
                meal_plan_id: meal_plan_id.to_owned(),
                ..ballot
            });
    }

    pub fn add_recipe(&self, recipe_id: &str, ingredients: Vec<IngredientLineItem>) {
        self.0
            .recipes
            .lock()
            .unwrap()
            .insert(recipe_id.to_owned(), ingredients);
    }

    pub fn set_latency(&self, recipe_id: &str, latency: Duration) {
        self.0
            .latencies
            .lock()
            .unwrap()
            .insert(recipe_id.to_owned(), latency);
    }

    pub fn set_ballot_latency(&self, latency: Duration) {
        *self.0.ballot_latency.lock().unwrap() = latency;
    }

    pub fn fail_recipe(&self, recipe_id: &str, fail: bool) {
        let mut failing = self.0.failing_recipes.lock().unwrap();
        if fail {
            failing.insert(recipe_id.to_owned());
        } else {
            failing.remove(recipe_id);
        }
    }

    pub fn fail_ballots(&self, fail: bool) {
        self.0.fail_ballots.store(fail, Ordering::SeqCst);
    }

    pub fn completed_recipes(&self) -> Vec<String> {
        self.0.completed_recipes.lock().unwrap().clone()
    }

    pub fn ballot_reads(&self) -> usize {
        self.0.ballot_reads.load(Ordering::SeqCst)
    }

    pub fn ingredient_reads(&self) -> usize {
        self.0.ingredient_reads.load(Ordering::SeqCst)
    }

    pub fn commits(&self) -> usize {
        self.0.commits.load(Ordering::SeqCst)
    }

    pub fn conflicts(&self) -> usize {
        self.0.conflicts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BallotStore for FakeStore {
    async fn read_ballots(&self, key: &MealPlanKey) -> mealvote_shared::Result<Vec<Ballot>> {
        self.0.ballot_reads.fetch_add(1, Ordering::SeqCst);

        let latency = *self.0.ballot_latency.lock().unwrap();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        if self.0.fail_ballots.load(Ordering::SeqCst) {
            return Err(Error::StoreUnavailable(anyhow::anyhow!("ballots offline")));
        }

        Ok(self
            .0
            .ballots
            .lock()
            .unwrap()
            .get(&key.meal_plan_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl RecipeStore for FakeStore {
    async fn read_recipe_ingredients(
        &self,
        recipe_id: &str,
    ) -> mealvote_shared::Result<Vec<IngredientLineItem>> {
        self.0.ingredient_reads.fetch_add(1, Ordering::SeqCst);

        let latency = self.0.latencies.lock().unwrap().get(recipe_id).copied();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if self.0.failing_recipes.lock().unwrap().contains(recipe_id) {
            return Err(Error::StoreUnavailable(anyhow::anyhow!(
                "recipe {recipe_id} offline"
            )));
        }

        self.0
            .completed_recipes
            .lock()
            .unwrap()
            .push(recipe_id.to_owned());

        Ok(self
            .0
            .recipes
            .lock()
            .unwrap()
            .get(recipe_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl MealPlanStore for FakeStore {
    async fn create_meal_plan(
        &self,
        family_id: &str,
        selection_list_id: &str,
    ) -> mealvote_shared::Result<String> {
        let id = format!("plan-{}", self.0.meal_plans.lock().unwrap().len() + 1);
        self.insert_meal_plan(MealPlan {
            id: id.to_owned(),
            family_id: family_id.to_owned(),
            selection_list_id: selection_list_id.to_owned(),
            ..Default::default()
        });

        Ok(id)
    }

    async fn delete_meal_plan(&self, key: &MealPlanKey) -> mealvote_shared::Result<()> {
        match self.0.meal_plans.lock().unwrap().remove(&key.meal_plan_id) {
            Some(_) => Ok(()),
            None => Err(Error::NotFound(key.to_string())),
        }
    }

    async fn list_meal_plans(
        &self,
        family_id: &str,
        selection_list_id: &str,
    ) -> mealvote_shared::Result<Vec<MealPlanSummary>> {
        let mut summaries = self
            .0
            .meal_plans
            .lock()
            .unwrap()
            .values()
            .filter(|m| m.family_id == family_id && m.selection_list_id == selection_list_id)
            .map(|m| MealPlanSummary {
                id: m.id.to_owned(),
                is_confirmed: m.is_confirmed,
            })
            .collect::<Vec<_>>();
        summaries.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(summaries)
    }

    async fn read_meal_plan(&self, key: &MealPlanKey) -> mealvote_shared::Result<Option<MealPlan>> {
        Ok(self
            .0
            .meal_plans
            .lock()
            .unwrap()
            .get(&key.meal_plan_id)
            .filter(|m| {
                m.family_id == key.family_id && m.selection_list_id == key.selection_list_id
            })
            .cloned())
    }

    async fn write_meal_plan_patch(
        &self,
        key: &MealPlanKey,
        expected_version: u64,
        patch: &MealPlanPatch,
    ) -> mealvote_shared::Result<bool> {
        let mut meal_plans = self.0.meal_plans.lock().unwrap();
        let Some(meal_plan) = meal_plans.get_mut(&key.meal_plan_id) else {
            return Ok(false);
        };

        if meal_plan.version != expected_version {
            self.0.conflicts.fetch_add(1, Ordering::SeqCst);
            return Ok(false);
        }

        meal_plan.recipe_ids = patch.recipe_ids.to_vec();
        meal_plan.shopping_list = patch.shopping_list.to_vec();
        meal_plan.version += 1;
        self.0.commits.fetch_add(1, Ordering::SeqCst);

        Ok(true)
    }

    async fn set_confirmed(
        &self,
        key: &MealPlanKey,
        is_confirmed: bool,
    ) -> mealvote_shared::Result<()> {
        let mut meal_plans = self.0.meal_plans.lock().unwrap();
        let Some(meal_plan) = meal_plans.get_mut(&key.meal_plan_id) else {
            return Err(Error::NotFound(key.to_string()));
        };

        meal_plan.is_confirmed = is_confirmed;
        meal_plan.version += 1;

        Ok(())
    }
}
