use async_trait::async_trait;
use mealvote_db::table::{MealPlan as MealPlanTable, RecipeIngredient, ShortList};
use mealvote_shared::{
    BallotStore, Error, MealPlanStore, RecipeStore,
    mealplan::{
        Ballot, IngredientLineItem, MealPlan, MealPlanKey, MealPlanPatch, MealPlanSummary,
    },
};
use sea_query::{Cond, Condition, Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow, types::Json};
use time::OffsetDateTime;
use ulid::Ulid;

/// Document store backed by SQLite, one row per meal plan, ballot and ingredient.
#[derive(Clone)]
pub struct SqliteStore {
    pub read_db: SqlitePool,
    pub write_db: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            read_db: pool.clone(),
            write_db: pool,
        }
    }
}

#[derive(FromRow)]
struct MealPlanRow {
    id: String,
    family_id: String,
    selection_list_id: String,
    is_confirmed: bool,
    recipe_ids: Json<Vec<String>>,
    shopping_list: Json<Vec<IngredientLineItem>>,
    version: i64,
    created_at: i64,
}

impl From<MealPlanRow> for MealPlan {
    fn from(row: MealPlanRow) -> Self {
        MealPlan {
            id: row.id,
            family_id: row.family_id,
            selection_list_id: row.selection_list_id,
            created_at: u64::try_from(row.created_at).unwrap_or_default(),
            is_confirmed: row.is_confirmed,
            recipe_ids: row.recipe_ids.0,
            shopping_list: row.shopping_list.0,
            version: u64::try_from(row.version).unwrap_or_default(),
        }
    }
}

#[derive(FromRow)]
struct SummaryRow {
    id: String,
    is_confirmed: bool,
}

#[derive(FromRow)]
struct BallotRow {
    id: String,
    meal_plan_id: String,
    user_id: String,
    is_confirmed: bool,
    recipe_ids: Json<Vec<String>>,
}

#[derive(FromRow)]
struct IngredientRow {
    id: String,
    name: String,
    amount: f64,
    unit: String,
}

fn key_condition(key: &MealPlanKey) -> Condition {
    Cond::all()
        .add(Expr::col(MealPlanTable::Id).eq(&key.meal_plan_id))
        .add(Expr::col(MealPlanTable::FamilyId).eq(&key.family_id))
        .add(Expr::col(MealPlanTable::SelectionListId).eq(&key.selection_list_id))
}

#[async_trait]
impl BallotStore for SqliteStore {
    async fn read_ballots(&self, key: &MealPlanKey) -> mealvote_shared::Result<Vec<Ballot>> {
        let statement = Query::select()
            .columns([
                ShortList::Id,
                ShortList::MealPlanId,
                ShortList::UserId,
                ShortList::IsConfirmed,
                ShortList::RecipeIds,
            ])
            .from(ShortList::Table)
            .and_where(Expr::col(ShortList::MealPlanId).eq(&key.meal_plan_id))
            .order_by_expr(Expr::col(ShortList::CreatedAt), Order::Asc)
            .order_by_expr(Expr::col(ShortList::Id), Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, BallotRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| Ballot {
                id: row.id,
                meal_plan_id: row.meal_plan_id,
                user_id: row.user_id,
                is_confirmed: row.is_confirmed,
                recipe_ids: row.recipe_ids.0,
            })
            .collect())
    }
}

#[async_trait]
impl RecipeStore for SqliteStore {
    async fn read_recipe_ingredients(
        &self,
        recipe_id: &str,
    ) -> mealvote_shared::Result<Vec<IngredientLineItem>> {
        let statement = Query::select()
            .columns([
                RecipeIngredient::Id,
                RecipeIngredient::Name,
                RecipeIngredient::Amount,
                RecipeIngredient::Unit,
            ])
            .from(RecipeIngredient::Table)
            .and_where(Expr::col(RecipeIngredient::RecipeId).eq(recipe_id))
            .order_by_expr(Expr::col(RecipeIngredient::Position), Order::Asc)
            .order_by_expr(Expr::col(RecipeIngredient::Id), Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| IngredientLineItem {
                id: row.id,
                name: row.name,
                amount: row.amount,
                unit: row.unit,
            })
            .collect())
    }
}

#[async_trait]
impl MealPlanStore for SqliteStore {
    async fn create_meal_plan(
        &self,
        family_id: &str,
        selection_list_id: &str,
    ) -> mealvote_shared::Result<String> {
        let id = Ulid::new().to_string();
        let created_at = OffsetDateTime::now_utc().unix_timestamp();

        let statement = Query::insert()
            .into_table(MealPlanTable::Table)
            .columns([
                MealPlanTable::Id,
                MealPlanTable::FamilyId,
                MealPlanTable::SelectionListId,
                MealPlanTable::IsConfirmed,
                MealPlanTable::RecipeIds,
                MealPlanTable::ShoppingList,
                MealPlanTable::Version,
                MealPlanTable::CreatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                family_id.into(),
                selection_list_id.into(),
                false.into(),
                "[]".into(),
                "[]".into(),
                0i64.into(),
                created_at.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        Ok(id)
    }

    async fn delete_meal_plan(&self, key: &MealPlanKey) -> mealvote_shared::Result<()> {
        let mut tx = self.write_db.begin().await?;

        let statement = Query::delete()
            .from_table(MealPlanTable::Table)
            .cond_where(key_condition(key))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(key.to_string()));
        }

        let statement = Query::delete()
            .from_table(ShortList::Table)
            .and_where(Expr::col(ShortList::MealPlanId).eq(&key.meal_plan_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn list_meal_plans(
        &self,
        family_id: &str,
        selection_list_id: &str,
    ) -> mealvote_shared::Result<Vec<MealPlanSummary>> {
        let statement = Query::select()
            .columns([MealPlanTable::Id, MealPlanTable::IsConfirmed])
            .from(MealPlanTable::Table)
            .and_where(Expr::col(MealPlanTable::FamilyId).eq(family_id))
            .and_where(Expr::col(MealPlanTable::SelectionListId).eq(selection_list_id))
            .order_by_expr(Expr::cust("rowid"), Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, SummaryRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| MealPlanSummary {
                id: row.id,
                is_confirmed: row.is_confirmed,
            })
            .collect())
    }

    async fn read_meal_plan(&self, key: &MealPlanKey) -> mealvote_shared::Result<Option<MealPlan>> {
        let statement = Query::select()
            .columns([
                MealPlanTable::Id,
                MealPlanTable::FamilyId,
                MealPlanTable::SelectionListId,
                MealPlanTable::IsConfirmed,
                MealPlanTable::RecipeIds,
                MealPlanTable::ShoppingList,
                MealPlanTable::Version,
                MealPlanTable::CreatedAt,
            ])
            .from(MealPlanTable::Table)
            .cond_where(key_condition(key))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, MealPlanRow, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn write_meal_plan_patch(
        &self,
        key: &MealPlanKey,
        expected_version: u64,
        patch: &MealPlanPatch,
    ) -> mealvote_shared::Result<bool> {
        let recipe_ids = serde_json::to_string(&patch.recipe_ids)?;
        let shopping_list = serde_json::to_string(&patch.shopping_list)?;

        let statement = Query::update()
            .table(MealPlanTable::Table)
            .value(MealPlanTable::RecipeIds, recipe_ids)
            .value(MealPlanTable::ShoppingList, shopping_list)
            .value(
                MealPlanTable::Version,
                Expr::col(MealPlanTable::Version).add(1),
            )
            .cond_where(key_condition(key))
            .and_where(Expr::col(MealPlanTable::Version).eq(expected_version as i64))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn set_confirmed(
        &self,
        key: &MealPlanKey,
        is_confirmed: bool,
    ) -> mealvote_shared::Result<()> {
        let statement = Query::update()
            .table(MealPlanTable::Table)
            .value(MealPlanTable::IsConfirmed, is_confirmed)
            .value(
                MealPlanTable::Version,
                Expr::col(MealPlanTable::Version).add(1),
            )
            .cond_where(key_condition(key))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(key.to_string()));
        }

        Ok(())
    }
}
