use anyhow::{Context, Result};
use models::SavedDiff;
pub mod models;
use sqlx::{Pool, Sqlite, sqlite::SqlitePoolOptions};

use crate::config::database_config::DatabaseConfig;

#[derive(Clone, Debug)]
pub struct Database {
    connection_pool: Pool<Sqlite>,
}

impl Database {
    pub async fn try_new(config: &DatabaseConfig) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .test_before_acquire(true)
            .connect(&config.sqlite_url)
            .await
            .with_context(|| {
                format!(
                    "Cannot connect to database with url: {}",
                    &config.sqlite_url
                )
            })?;

        Self::run_migrations(&pool).await?;

        Ok(Self {
            connection_pool: pool,
        })
    }

    async fn run_migrations(pool: &Pool<Sqlite>) -> Result<()> {
        sqlx::migrate!("src/database/migrations")
            .run(pool)
            .await
            .context("Cannot check for pending migrations")
    }

    pub async fn insert_saved_diff(&self, diff: &SavedDiff) -> Result<()> {
        sqlx::query(
            r#"
            insert into saved_diffs (
                id, diff_type, original_content, modified_content, title,
                description, is_public, tags, share_token, view_count,
                created_date, updated_date
            )
            values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(diff.id)
        .bind(&diff.diff_type)
        .bind(&diff.original_content)
        .bind(&diff.modified_content)
        .bind(&diff.title)
        .bind(&diff.description)
        .bind(diff.is_public)
        .bind(&diff.tags)
        .bind(&diff.share_token)
        .bind(diff.view_count)
        .bind(diff.created_date)
        .bind(diff.updated_date)
        .execute(&self.connection_pool)
        .await
        .context("Cannot insert saved diff")?;

        Ok(())
    }

    pub async fn get_saved_diff_by_token(&self, share_token: &str) -> Result<Option<SavedDiff>> {
        sqlx::query_as::<_, SavedDiff>(
            r#"
            select
                id, diff_type, original_content, modified_content, title,
                description, is_public, tags, share_token, view_count,
                created_date, updated_date
            from saved_diffs
            where share_token = ?
            "#,
        )
        .bind(share_token)
        .fetch_optional(&self.connection_pool)
        .await
        .context("Cannot fetch saved diff")
    }

    /// Bump the view count in a single statement and return the new value,
    /// so concurrent fetches each see an accurate count.
    pub async fn increment_view_count(&self, share_token: &str) -> Result<i64> {
        let (view_count,): (i64,) = sqlx::query_as(
            r#"
            update saved_diffs
            set view_count = view_count + 1
            where share_token = ?
            returning view_count
            "#,
        )
        .bind(share_token)
        .fetch_one(&self.connection_pool)
        .await
        .context("Cannot increment view count")?;

        Ok(view_count)
    }
}
