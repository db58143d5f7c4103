//! Task repository

use sqlx::{SqliteExecutor, SqlitePool};

use crate::{
    error::AppResult,
    models::{Task, TaskWithContext},
};

/// Repository for task database operations
pub struct TaskRepository;

impl TaskRepository {
    /// Create a task; primary tasks carry no owner
    pub async fn create(
        pool: &SqlitePool,
        user_id: Option<i64>,
        category_id: Option<i64>,
        title: &str,
        description: &str,
        is_primary: bool,
        created_by: i64,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tasks (user_id, category_id, title, description, is_primary, created_by)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(user_id)
        .bind(category_id)
        .bind(title)
        .bind(description)
        .bind(is_primary)
        .bind(created_by)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Find task by ID
    pub async fn find_by_id(
        executor: impl SqliteExecutor<'_>,
        id: i64,
    ) -> AppResult<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(r#"SELECT * FROM tasks WHERE id = ?1"#)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(task)
    }

    /// List broadcast tasks with category and creator context, newest first
    pub async fn list_primary(pool: &SqlitePool) -> AppResult<Vec<TaskWithContext>> {
        let tasks = sqlx::query_as::<_, TaskWithContext>(
            r#"
            SELECT t.*, c.name AS category_name, u.email AS creator_email
            FROM tasks t
            LEFT JOIN categories c ON t.category_id = c.id
            LEFT JOIN users u ON t.created_by = u.id
            WHERE t.is_primary = 1
            ORDER BY t.created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// List one page of a user's own tasks with category context
    pub async fn list_for_owner(
        pool: &SqlitePool,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<TaskWithContext>> {
        let tasks = sqlx::query_as::<_, TaskWithContext>(
            r#"
            SELECT t.*, c.name AS category_name, NULL AS creator_email
            FROM tasks t
            LEFT JOIN categories c ON t.category_id = c.id
            WHERE t.user_id = ?1
            ORDER BY t.created_at DESC
            LIMIT ?2 OFFSET ?3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Count a user's own tasks
    pub async fn count_for_owner(pool: &SqlitePool, user_id: i64) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM tasks WHERE user_id = ?1"#)
            .bind(user_id)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Update task fields; returns the changed-row count
    pub async fn update(
        executor: impl SqliteExecutor<'_>,
        id: i64,
        title: &str,
        description: &str,
        completed: bool,
        category_id: Option<i64>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = ?2, description = ?3, completed = ?4, category_id = ?5,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(completed)
        .bind(category_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete task by ID; returns the changed-row count
    pub async fn delete(executor: impl SqliteExecutor<'_>, id: i64) -> AppResult<u64> {
        let result = sqlx::query(r#"DELETE FROM tasks WHERE id = ?1"#)
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    /// Count every task in the store; used by ownership tests
    #[cfg(test)]
    pub async fn count_all(pool: &SqlitePool) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM tasks"#)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
