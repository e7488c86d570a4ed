use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::ShortList;

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(ShortList::Table)
        .col(
            ColumnDef::new(ShortList::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(ShortList::MealPlanId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(ColumnDef::new(ShortList::UserId).string().not_null())
        .col(
            ColumnDef::new(ShortList::IsConfirmed)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(ShortList::RecipeIds)
                .text()
                .not_null()
                .default("[]"),
        )
        .col(ColumnDef::new(ShortList::CreatedAt).big_integer().not_null())
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(ShortList::Table).to_owned()
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
