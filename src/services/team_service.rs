//! Team roster management
//!
//! Admin-managed roster entries with optional avatar images. Avatar files are
//! written by the handler before the row is touched; this service reports
//! which previously stored files became orphans so the handler can delete
//! them.

use sqlx::SqlitePool;

use crate::{
    constants::{MIN_TEAM_BIO_LENGTH, MIN_TEAM_NAME_LENGTH, MIN_TEAM_ROLE_LENGTH},
    db::repositories::TeamRepository,
    error::{AppError, AppResult},
};

/// Team member fields submitted from the admin panel
#[derive(Debug, Default)]
pub struct TeamMemberInput {
    pub name: String,
    pub role: String,
    pub bio: String,
    pub remove_avatar: bool,
    /// Already-stored upload, if a new image was attached
    pub new_avatar_path: Option<String>,
}

/// Team service for roster management
pub struct TeamService;

impl TeamService {
    /// Add a roster entry
    pub async fn create(pool: &SqlitePool, input: TeamMemberInput) -> AppResult<()> {
        let (name, role, bio) = validate(&input)?;

        TeamRepository::create(pool, &name, &role, &bio, input.new_avatar_path.as_deref()).await
    }

    /// Update a roster entry; returns files that should be deleted from disk
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        input: TeamMemberInput,
    ) -> AppResult<Vec<String>> {
        let (name, role, bio) = validate(&input)?;

        let existing = TeamRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Team member".to_string()))?;

        let mut avatar_path = existing.avatar_path.clone();
        let mut removed = Vec::new();

        if let Some(new) = &input.new_avatar_path {
            if let Some(old) = existing.avatar_path.clone() {
                removed.push(old);
            }
            avatar_path = Some(new.clone());
        } else if input.remove_avatar {
            if let Some(old) = existing.avatar_path.clone() {
                removed.push(old);
            }
            avatar_path = None;
        }

        let changed =
            TeamRepository::update(pool, id, &name, &role, &bio, avatar_path.as_deref()).await?;
        if changed == 0 {
            return Err(AppError::NotFound("Team member".to_string()));
        }

        Ok(removed)
    }

    /// Remove a roster entry; returns the avatar file to delete, if any
    pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<Option<String>> {
        let existing = TeamRepository::find_by_id(pool, id).await?;
        TeamRepository::delete(pool, id).await?;

        Ok(existing.and_then(|m| m.avatar_path))
    }
}

fn validate(input: &TeamMemberInput) -> AppResult<(String, String, String)> {
    let name = input.name.trim().to_string();
    let role = input.role.trim().to_string();
    let bio = input.bio.trim().to_string();

    let mut errors: Vec<&str> = Vec::new();
    if name.len() < MIN_TEAM_NAME_LENGTH {
        errors.push("Name must be at least 3 characters.");
    }
    if role.len() < MIN_TEAM_ROLE_LENGTH {
        errors.push("Role must be at least 2 characters.");
    }
    if bio.len() < MIN_TEAM_BIO_LENGTH {
        errors.push("Bio must be at least 10 characters.");
    }
    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }

    Ok((name, role, bio))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::memory_pool;

    fn member(name: &str) -> TeamMemberInput {
        TeamMemberInput {
            name: name.to_string(),
            role: "Backend".to_string(),
            bio: "Writes careful services.".to_string(),
            remove_avatar: false,
            new_avatar_path: None,
        }
    }

    async fn first_member_id(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT id FROM team_members ORDER BY id LIMIT 1")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let pool = memory_pool().await;
        TeamService::create(&pool, member("Ada")).await.unwrap();
        assert_eq!(TeamRepository::count(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_validation_blocks_short_fields() {
        let pool = memory_pool().await;
        let bad = TeamMemberInput {
            name: "Al".to_string(),
            role: "X".to_string(),
            bio: "short".to_string(),
            ..TeamMemberInput::default()
        };
        let err = TeamService::create(&pool, bad).await.unwrap_err();
        let message = err.flash_message();
        assert!(message.contains("Name must be at least 3 characters."));
        assert!(message.contains("Role must be at least 2 characters."));
        assert!(message.contains("Bio must be at least 10 characters."));
        assert_eq!(TeamRepository::count(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_new_avatar_reports_old_file_for_deletion() {
        let pool = memory_pool().await;
        let mut with_avatar = member("Ada");
        with_avatar.new_avatar_path = Some("/uploads/team/old.png".to_string());
        TeamService::create(&pool, with_avatar).await.unwrap();
        let id = first_member_id(&pool).await;

        let mut replacement = member("Ada");
        replacement.new_avatar_path = Some("/uploads/team/new.png".to_string());
        let removed = TeamService::update(&pool, id, replacement).await.unwrap();
        assert_eq!(removed, vec!["/uploads/team/old.png".to_string()]);

        let stored = TeamRepository::find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(stored.avatar_path.as_deref(), Some("/uploads/team/new.png"));
    }

    #[tokio::test]
    async fn test_remove_flag_clears_avatar() {
        let pool = memory_pool().await;
        let mut with_avatar = member("Ada");
        with_avatar.new_avatar_path = Some("/uploads/team/a.png".to_string());
        TeamService::create(&pool, with_avatar).await.unwrap();
        let id = first_member_id(&pool).await;

        let mut clearing = member("Ada");
        clearing.remove_avatar = true;
        let removed = TeamService::update(&pool, id, clearing).await.unwrap();
        assert_eq!(removed, vec!["/uploads/team/a.png".to_string()]);

        let stored = TeamRepository::find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(stored.avatar_path, None);
    }

    #[tokio::test]
    async fn test_delete_returns_avatar_for_cleanup() {
        let pool = memory_pool().await;
        let mut with_avatar = member("Ada");
        with_avatar.new_avatar_path = Some("/uploads/team/a.png".to_string());
        TeamService::create(&pool, with_avatar).await.unwrap();
        let id = first_member_id(&pool).await;

        let removed = TeamService::delete(&pool, id).await.unwrap();
        assert_eq!(removed.as_deref(), Some("/uploads/team/a.png"));
        assert_eq!(TeamRepository::count(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_missing_member_reports_not_found() {
        let pool = memory_pool().await;
        let err = TeamService::update(&pool, 404, member("Ada")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
