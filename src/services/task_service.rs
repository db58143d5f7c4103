//! Task service
//!
//! The ownership check and its mutation run inside one transaction so the
//! owning user cannot change between the read and the write.

use sqlx::SqlitePool;

use crate::{
    db::repositories::TaskRepository,
    error::{AppError, AppResult},
    models::SessionUser,
    services::access,
};

/// Task service for business logic
pub struct TaskService;

impl TaskService {
    /// Create a personal task owned by the acting user
    pub async fn create_personal(
        pool: &SqlitePool,
        actor: &SessionUser,
        title: &str,
        description: &str,
        category_id: Option<i64>,
    ) -> AppResult<()> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("Task title required.".to_string()));
        }

        TaskRepository::create(
            pool,
            Some(actor.id),
            category_id,
            title,
            description.trim(),
            false,
            actor.id,
        )
        .await
    }

    /// Create a broadcast task visible to everyone; admin only
    pub async fn create_primary(
        pool: &SqlitePool,
        actor: &SessionUser,
        title: &str,
        description: &str,
        category_id: Option<i64>,
    ) -> AppResult<()> {
        if !actor.is_admin() {
            return Err(AppError::Forbidden("Admins only.".to_string()));
        }
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("Task title required.".to_string()));
        }

        TaskRepository::create(pool, None, category_id, title, description.trim(), true, actor.id)
            .await
    }

    /// Update a task the actor is allowed to modify
    pub async fn update(
        pool: &SqlitePool,
        actor: &SessionUser,
        id: i64,
        title: &str,
        description: &str,
        completed: bool,
        category_id: Option<i64>,
    ) -> AppResult<()> {
        let mut tx = pool.begin().await?;

        let task = TaskRepository::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Task".to_string()))?;

        if !access::can_modify_task(actor, &task) {
            return Err(AppError::Forbidden("Not allowed.".to_string()));
        }

        TaskRepository::update(&mut *tx, id, title.trim(), description.trim(), completed, category_id)
            .await?;
        tx.commit().await?;

        Ok(())
    }

    /// Delete a task the actor is allowed to modify
    pub async fn delete(pool: &SqlitePool, actor: &SessionUser, id: i64) -> AppResult<()> {
        let mut tx = pool.begin().await?;

        let task = TaskRepository::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Task".to_string()))?;

        if !access::can_modify_task(actor, &task) {
            return Err(AppError::Forbidden("Not allowed.".to_string()));
        }

        TaskRepository::delete(&mut *tx, id).await?;
        tx.commit().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{connection::memory_pool, repositories::UserRepository},
        models::{Role, Task},
        services::auth_service,
    };

    async fn seed_user(pool: &SqlitePool, username: &str, role: Role) -> SessionUser {
        let hash = auth_service::hash_password("Str0ng!pass").unwrap();
        let user = UserRepository::create(
            pool,
            username,
            &format!("{username}@example.com"),
            "5551234567",
            None,
            None,
            &hash,
            role,
        )
        .await
        .unwrap();
        user.session_projection()
    }

    async fn latest_task(pool: &SqlitePool) -> Task {
        sqlx::query_as::<_, Task>("SELECT * FROM tasks ORDER BY id DESC LIMIT 1")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_personal_task_belongs_to_creator() {
        let pool = memory_pool().await;
        let alice = seed_user(&pool, "alice", Role::User).await;

        TaskService::create_personal(&pool, &alice, "  Write tests  ", "soon", None)
            .await
            .unwrap();

        let task = latest_task(&pool).await;
        assert_eq!(task.user_id, Some(alice.id));
        assert_eq!(task.title, "Write tests");
        assert!(!task.is_primary);
    }

    #[tokio::test]
    async fn test_blank_title_is_rejected() {
        let pool = memory_pool().await;
        let alice = seed_user(&pool, "alice", Role::User).await;

        let err = TaskService::create_personal(&pool, &alice, "   ", "", None)
            .await
            .unwrap_err();
        assert_eq!(err.flash_message(), "Task title required.");
        assert_eq!(TaskRepository::count_all(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_primary_task_has_no_owner() {
        let pool = memory_pool().await;
        let admin = seed_user(&pool, "root", Role::Admin).await;

        TaskService::create_primary(&pool, &admin, "Announcement", "all hands", None)
            .await
            .unwrap();

        let task = latest_task(&pool).await;
        assert_eq!(task.user_id, None);
        assert!(task.is_primary);
        assert_eq!(task.created_by, Some(admin.id));
    }

    #[tokio::test]
    async fn test_non_owner_cannot_delete_and_row_survives() {
        let pool = memory_pool().await;
        let alice = seed_user(&pool, "alice", Role::User).await;
        let mallory = seed_user(&pool, "mallory", Role::User).await;

        TaskService::create_personal(&pool, &alice, "Private", "", None)
            .await
            .unwrap();
        let task = latest_task(&pool).await;

        let err = TaskService::delete(&pool, &mallory, task.id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert_eq!(TaskRepository::count_all(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_admin_cannot_edit_personal_but_may_edit_primary() {
        let pool = memory_pool().await;
        let alice = seed_user(&pool, "alice", Role::User).await;
        let admin = seed_user(&pool, "root", Role::Admin).await;

        TaskService::create_personal(&pool, &alice, "Mine", "", None)
            .await
            .unwrap();
        let personal = latest_task(&pool).await;
        let err = TaskService::update(&pool, &admin, personal.id, "Hijack", "", false, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        TaskService::create_primary(&pool, &admin, "Broadcast", "", None)
            .await
            .unwrap();
        let primary = latest_task(&pool).await;
        TaskService::update(&pool, &admin, primary.id, "Broadcast v2", "edited", true, None)
            .await
            .unwrap();

        let reread = TaskRepository::find_by_id(&pool, primary.id).await.unwrap().unwrap();
        assert_eq!(reread.title, "Broadcast v2");
        assert!(reread.completed);
    }

    #[tokio::test]
    async fn test_owner_update_changes_fields() {
        let pool = memory_pool().await;
        let alice = seed_user(&pool, "alice", Role::User).await;

        TaskService::create_personal(&pool, &alice, "Draft", "old", None)
            .await
            .unwrap();
        let task = latest_task(&pool).await;

        TaskService::update(&pool, &alice, task.id, "Final", "new", true, None)
            .await
            .unwrap();
        let reread = TaskRepository::find_by_id(&pool, task.id).await.unwrap().unwrap();
        assert_eq!(reread.title, "Final");
        assert_eq!(reread.description, "new");
        assert!(reread.completed);
    }

    #[tokio::test]
    async fn test_missing_task_reports_not_found() {
        let pool = memory_pool().await;
        let alice = seed_user(&pool, "alice", Role::User).await;

        let err = TaskService::delete(&pool, &alice, 404).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
