//! Category repository

use sqlx::SqlitePool;

use crate::{error::AppResult, models::Category};

/// Repository for category database operations
pub struct CategoryRepository;

impl CategoryRepository {
    /// List all categories, alphabetically
    pub async fn list_all(pool: &SqlitePool) -> AppResult<Vec<Category>> {
        let categories =
            sqlx::query_as::<_, Category>(r#"SELECT id, name FROM categories ORDER BY name ASC"#)
                .fetch_all(pool)
                .await?;

        Ok(categories)
    }

    /// Create a category
    pub async fn create(pool: &SqlitePool, name: &str) -> AppResult<()> {
        sqlx::query(r#"INSERT INTO categories (name) VALUES (?1)"#)
            .bind(name)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Rename a category; returns the changed-row count
    pub async fn rename(pool: &SqlitePool, id: i64, name: &str) -> AppResult<u64> {
        let result = sqlx::query(r#"UPDATE categories SET name = ?2 WHERE id = ?1"#)
            .bind(id)
            .bind(name)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Delete a category; referencing tasks fall back to no category
    pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<u64> {
        let result = sqlx::query(r#"DELETE FROM categories WHERE id = ?1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
