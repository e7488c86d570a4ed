use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::MealPlan;

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(MealPlan::Table)
        .col(
            ColumnDef::new(MealPlan::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(ColumnDef::new(MealPlan::FamilyId).string().not_null())
        .col(ColumnDef::new(MealPlan::SelectionListId).string().not_null())
        .col(
            ColumnDef::new(MealPlan::IsConfirmed)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(MealPlan::RecipeIds)
                .text()
                .not_null()
                .default("[]"),
        )
        .col(
            ColumnDef::new(MealPlan::ShoppingList)
                .text()
                .not_null()
                .default("[]"),
        )
        .col(
            ColumnDef::new(MealPlan::Version)
                .big_integer()
                .not_null()
                .default(0),
        )
        .col(ColumnDef::new(MealPlan::CreatedAt).big_integer().not_null())
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(MealPlan::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for Operation {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = up_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = down_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
