use sea_query::{ColumnDef, Index, Table, TableCreateStatement, TableDropStatement};

use crate::table::RecipeIngredient;

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(RecipeIngredient::Table)
        .col(
            ColumnDef::new(RecipeIngredient::RecipeId)
                .string()
                .not_null(),
        )
        .col(
            ColumnDef::new(RecipeIngredient::Position)
                .integer()
                .not_null()
                .default(0),
        )
        .col(ColumnDef::new(RecipeIngredient::Id).string().not_null())
        .col(ColumnDef::new(RecipeIngredient::Name).string().not_null())
        .col(ColumnDef::new(RecipeIngredient::Amount).double().not_null())
        .col(ColumnDef::new(RecipeIngredient::Unit).string().not_null())
        .primary_key(
            Index::create()
                .col(RecipeIngredient::RecipeId)
                .col(RecipeIngredient::Id),
        )
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(RecipeIngredient::Table).to_owned()
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
