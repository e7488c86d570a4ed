use sqlx_migrator::{Info, Migrator};

mod m0_1;
pub mod table;

pub fn migrator() -> Result<Migrator<sqlx::Sqlite>, sqlx_migrator::Error> {
    let mut migrator = Migrator::default();
    migrator.add_migrations(vec![Box::new(m0_1::Migration)])?;

    Ok(migrator)
}

#[cfg(test)]
mod tests {
    use sqlx::SqlitePool;
    use sqlx_migrator::migrator::{Migrate, Plan};

    #[tokio::test]
    async fn test_migrator_creates_tables() -> anyhow::Result<()> {
        let pool = SqlitePool::connect("sqlite::memory:").await?;
        let mut conn = pool.acquire().await?;
        super::migrator()?.run(&mut conn, &Plan::apply_all()).await?;

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE '\\_%' ESCAPE '\\' ORDER BY name",
        )
        .fetch_all(&mut *conn)
        .await?;
        let tables = tables.into_iter().map(|(name,)| name).collect::<Vec<_>>();

        assert_eq!(tables, vec!["meal_plan", "recipe_ingredient", "short_list"]);

        Ok(())
    }
}
