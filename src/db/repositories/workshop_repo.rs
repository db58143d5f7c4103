//! Workshop repository

use sqlx::{SqliteExecutor, SqlitePool};

use crate::{
    error::AppResult,
    models::{Workshop, WorkshopSummary},
};

/// Repository for workshop database operations
pub struct WorkshopRepository;

impl WorkshopRepository {
    /// List one catalog page, ordered by start date
    pub async fn list_page(
        pool: &SqlitePool,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Workshop>> {
        let workshops = sqlx::query_as::<_, Workshop>(
            r#"SELECT * FROM workshops ORDER BY start_date LIMIT ?1 OFFSET ?2"#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(workshops)
    }

    /// List every workshop for the admin panel
    pub async fn list_all(pool: &SqlitePool) -> AppResult<Vec<Workshop>> {
        let workshops = sqlx::query_as::<_, Workshop>(
            r#"SELECT * FROM workshops ORDER BY start_date ASC, created_at DESC"#,
        )
        .fetch_all(pool)
        .await?;

        Ok(workshops)
    }

    /// Count all workshops
    pub async fn count(pool: &SqlitePool) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM workshops"#)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Find workshop by slug
    pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> AppResult<Option<Workshop>> {
        let workshop = sqlx::query_as::<_, Workshop>(r#"SELECT * FROM workshops WHERE slug = ?1"#)
            .bind(slug)
            .fetch_optional(pool)
            .await?;

        Ok(workshop)
    }

    /// Check whether a slug is taken, optionally ignoring one row during updates
    pub async fn slug_exists(
        executor: impl SqliteExecutor<'_>,
        slug: &str,
        exclude_id: Option<i64>,
    ) -> AppResult<bool> {
        let existing: Option<i64> = sqlx::query_scalar(
            r#"SELECT id FROM workshops WHERE slug = ?1 AND (?2 IS NULL OR id != ?2)"#,
        )
        .bind(slug)
        .bind(exclude_id)
        .fetch_optional(executor)
        .await?;

        Ok(existing.is_some())
    }

    /// Short suggestions list for a detail page, excluding the shown workshop
    pub async fn suggestions(
        pool: &SqlitePool,
        exclude_slug: &str,
        limit: i64,
    ) -> AppResult<Vec<WorkshopSummary>> {
        let suggestions = sqlx::query_as::<_, WorkshopSummary>(
            r#"
            SELECT slug, title, summary FROM workshops
            WHERE slug != ?1
            ORDER BY start_date
            LIMIT ?2
            "#,
        )
        .bind(exclude_slug)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(suggestions)
    }

    /// Create a workshop
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &SqlitePool,
        slug: &str,
        title: &str,
        summary: &str,
        description: &str,
        start_date: &str,
        location: &str,
        capacity: i64,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO workshops (slug, title, summary, description, start_date, location, capacity)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(slug)
        .bind(title)
        .bind(summary)
        .bind(description)
        .bind(start_date)
        .bind(location)
        .bind(capacity)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Update a workshop; returns the changed-row count
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        slug: &str,
        title: &str,
        summary: &str,
        description: &str,
        start_date: &str,
        location: &str,
        capacity: i64,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE workshops
            SET slug = ?2, title = ?3, summary = ?4, description = ?5,
                start_date = ?6, location = ?7, capacity = ?8
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(slug)
        .bind(title)
        .bind(summary)
        .bind(description)
        .bind(start_date)
        .bind(location)
        .bind(capacity)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete a workshop; returns the changed-row count
    pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<u64> {
        let result = sqlx::query(r#"DELETE FROM workshops WHERE id = ?1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
