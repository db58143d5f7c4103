//! Category management
//!
//! Categories are admin-gated. An earlier generation of this application let
//! any authenticated user manage them; the stricter policy was kept and the
//! choice is recorded in DESIGN.md.

use sqlx::SqlitePool;

use crate::{
    db::repositories::CategoryRepository,
    error::{AppError, AppResult},
    models::Category,
};

/// Category service
pub struct CategoryService;

impl CategoryService {
    /// List all categories, alphabetically
    pub async fn list(pool: &SqlitePool) -> AppResult<Vec<Category>> {
        CategoryRepository::list_all(pool).await
    }

    /// Create a category with a unique name
    pub async fn create(pool: &SqlitePool, name: &str) -> AppResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Category name required.".to_string()));
        }

        CategoryRepository::create(pool, name).await.map_err(friendly_unique)
    }

    /// Rename a category
    pub async fn rename(pool: &SqlitePool, id: i64, name: &str) -> AppResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Category name required.".to_string()));
        }

        let changed = CategoryRepository::rename(pool, id, name)
            .await
            .map_err(friendly_unique)?;
        if changed == 0 {
            return Err(AppError::NotFound("Category".to_string()));
        }
        Ok(())
    }

    /// Delete a category; tasks that referenced it keep no category
    pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<()> {
        let changed = CategoryRepository::delete(pool, id).await?;
        if changed == 0 {
            return Err(AppError::NotFound("Category".to_string()));
        }
        Ok(())
    }
}

fn friendly_unique(e: AppError) -> AppError {
    match e {
        AppError::AlreadyExists(_) => {
            AppError::AlreadyExists("Category already exists.".to_string())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::memory_pool;

    #[tokio::test]
    async fn test_create_rename_delete() {
        let pool = memory_pool().await;
        CategoryService::create(&pool, "  Chores ").await.unwrap();

        let listed = CategoryService::list(&pool).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Chores");

        CategoryService::rename(&pool, listed[0].id, "Errands").await.unwrap();
        let listed = CategoryService::list(&pool).await.unwrap();
        assert_eq!(listed[0].name, "Errands");

        CategoryService::delete(&pool, listed[0].id).await.unwrap();
        assert!(CategoryService::list(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_names_map_to_friendly_error() {
        let pool = memory_pool().await;
        CategoryService::create(&pool, "Work").await.unwrap();

        let err = CategoryService::create(&pool, "Work").await.unwrap_err();
        assert_eq!(err.flash_message(), "Category already exists.");
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected() {
        let pool = memory_pool().await;
        let err = CategoryService::create(&pool, "   ").await.unwrap_err();
        assert_eq!(err.flash_message(), "Category name required.");
    }

    #[tokio::test]
    async fn test_deleting_category_detaches_tasks() {
        let pool = memory_pool().await;
        CategoryService::create(&pool, "Work").await.unwrap();
        let category = &CategoryService::list(&pool).await.unwrap()[0];

        let hash = crate::services::auth_service::hash_password("Str0ng!pass").unwrap();
        let user = crate::db::repositories::UserRepository::create(
            &pool,
            "alice",
            "alice@example.com",
            "5551234567",
            None,
            None,
            &hash,
            crate::models::Role::User,
        )
        .await
        .unwrap();
        crate::db::repositories::TaskRepository::create(
            &pool,
            Some(user.id),
            Some(category.id),
            "Tagged",
            "",
            false,
            user.id,
        )
        .await
        .unwrap();

        CategoryService::delete(&pool, category.id).await.unwrap();

        let task: crate::models::Task =
            sqlx::query_as("SELECT * FROM tasks ORDER BY id LIMIT 1")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(task.category_id, None);
    }
}
