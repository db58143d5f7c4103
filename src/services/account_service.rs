//! Account self-service
//!
//! Profile edits always target the acting user's own row. The session carries
//! only a projection of that row, so every successful edit returns a fresh
//! projection for the caller to write back into the session.

use sqlx::SqlitePool;

use crate::{
    db::repositories::{UserChanges, UserRepository},
    error::{AppError, AppResult},
    models::{SessionUser, User},
    services::auth_service,
    utils::validation,
};

/// A profile update submitted from the account page.
///
/// `new_avatar_path` is the already-stored upload, if any; the caller removes
/// it again when this update fails.
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub name: String,
    pub nickname: String,
    pub password: String,
    pub confirm: String,
    pub remove_avatar: bool,
    pub new_avatar_path: Option<String>,
}

/// Result of a successful profile update
#[derive(Debug)]
pub struct ProfileOutcome {
    /// Fresh projection to write back into the session
    pub session_user: SessionUser,
    /// Previously stored avatar files that should now be deleted from disk
    pub removed_avatars: Vec<String>,
}

/// Account service for self-management
pub struct AccountService;

impl AccountService {
    /// Load the acting user's profile row
    pub async fn get_profile(pool: &SqlitePool, user_id: i64) -> AppResult<User> {
        UserRepository::find_by_id(pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Account".to_string()))
    }

    /// Apply a profile update to the acting user's own row
    pub async fn update_profile(
        pool: &SqlitePool,
        user_id: i64,
        update: ProfileUpdate,
    ) -> AppResult<ProfileOutcome> {
        let current = Self::get_profile(pool, user_id).await?;

        let username = update.username.trim().to_lowercase();
        let email = update.email.trim().to_lowercase();
        let phone = update.phone.trim().to_string();
        let name = update.name.trim().to_string();
        let nickname = update.nickname.trim().to_string();

        let mut errors: Vec<&str> = Vec::new();
        if let Err(e) = validation::validate_username(&username) {
            errors.push(e);
        }
        if let Err(e) = validation::validate_email(&email) {
            errors.push(e);
        }
        if let Err(e) = validation::validate_phone(&phone) {
            errors.push(e);
        }
        if let Err(e) = validation::validate_name(&name) {
            errors.push(e);
        }
        if let Err(e) = validation::validate_nickname(&nickname) {
            errors.push(e);
        }
        if !update.password.is_empty() {
            if let Err(e) = validation::validate_password(&update.password) {
                errors.push(e);
            }
            if update.password != update.confirm {
                errors.push("Passwords do not match.");
            }
        }
        if !errors.is_empty() {
            return Err(AppError::validation(errors));
        }

        // new upload wins over the remove flag
        let avatar_path: Option<Option<&str>> = if let Some(new) = update.new_avatar_path.as_deref()
        {
            Some(Some(new))
        } else if update.remove_avatar {
            Some(None)
        } else {
            None
        };

        let password_hash = if update.password.is_empty() {
            None
        } else {
            Some(auth_service::hash_password(&update.password)?)
        };

        let changed = UserRepository::update(
            pool,
            user_id,
            UserChanges {
                username: &username,
                email: &email,
                phone: &phone,
                name: (!name.is_empty()).then_some(name.as_str()),
                nickname: (!nickname.is_empty()).then_some(nickname.as_str()),
                role: None,
                password_hash: password_hash.as_deref(),
                avatar_path,
            },
        )
        .await
        .map_err(|e| match e {
            AppError::AlreadyExists(_) => {
                AppError::AlreadyExists("Username or email already exists.".to_string())
            }
            other => other,
        })?;

        if changed == 0 {
            return Err(AppError::NotFound("Account".to_string()));
        }

        let mut removed_avatars = Vec::new();
        if let Some(old) = current.avatar_path {
            let replaced = update.new_avatar_path.is_some();
            if replaced || update.remove_avatar {
                removed_avatars.push(old);
            }
        }

        let session_user = Self::get_profile(pool, user_id).await?.session_projection();

        Ok(ProfileOutcome {
            session_user,
            removed_avatars,
        })
    }

    /// Clear the acting user's avatar; returns the file to delete, if any
    pub async fn remove_avatar(
        pool: &SqlitePool,
        user_id: i64,
    ) -> AppResult<(SessionUser, Option<String>)> {
        let current = Self::get_profile(pool, user_id).await?;

        let removed = current.avatar_path.clone();
        if removed.is_some() {
            UserRepository::update_avatar(pool, user_id, None).await?;
        }

        let session_user = Self::get_profile(pool, user_id).await?.session_projection();
        Ok((session_user, removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::connection::memory_pool,
        models::Role,
    };

    async fn seed_user(pool: &SqlitePool, username: &str) -> User {
        let hash = auth_service::hash_password("Str0ng!pass").unwrap();
        UserRepository::create(
            pool,
            username,
            &format!("{username}@example.com"),
            "5551234567",
            None,
            None,
            &hash,
            Role::User,
        )
        .await
        .unwrap()
    }

    fn base_update(user: &User) -> ProfileUpdate {
        ProfileUpdate {
            username: user.username.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            ..ProfileUpdate::default()
        }
    }

    #[tokio::test]
    async fn test_update_refreshes_session_projection() {
        let pool = memory_pool().await;
        let user = seed_user(&pool, "alice").await;

        let mut update = base_update(&user);
        update.nickname = "Ally".to_string();
        update.name = "Alice Liddell".to_string();

        let outcome = AccountService::update_profile(&pool, user.id, update).await.unwrap();
        assert_eq!(outcome.session_user.nickname.as_deref(), Some("Ally"));
        assert_eq!(outcome.session_user.name.as_deref(), Some("Alice Liddell"));
        assert!(outcome.removed_avatars.is_empty());
    }

    #[tokio::test]
    async fn test_password_change_requires_matching_confirm() {
        let pool = memory_pool().await;
        let user = seed_user(&pool, "alice").await;

        let mut update = base_update(&user);
        update.password = "N3w!passwd".to_string();
        update.confirm = "different".to_string();

        let err = AccountService::update_profile(&pool, user.id, update).await.unwrap_err();
        assert!(err.flash_message().contains("Passwords do not match."));
    }

    #[tokio::test]
    async fn test_new_avatar_replaces_and_reports_old_file() {
        let pool = memory_pool().await;
        let user = seed_user(&pool, "alice").await;
        UserRepository::update_avatar(&pool, user.id, Some("/uploads/avatars/old.png"))
            .await
            .unwrap();

        let mut update = base_update(&user);
        update.new_avatar_path = Some("/uploads/avatars/new.png".to_string());

        let outcome = AccountService::update_profile(&pool, user.id, update).await.unwrap();
        assert_eq!(
            outcome.session_user.avatar_path.as_deref(),
            Some("/uploads/avatars/new.png")
        );
        assert_eq!(outcome.removed_avatars, vec!["/uploads/avatars/old.png".to_string()]);
    }

    #[tokio::test]
    async fn test_duplicate_email_maps_to_friendly_error() {
        let pool = memory_pool().await;
        seed_user(&pool, "bob").await;
        let user = seed_user(&pool, "alice").await;

        let mut update = base_update(&user);
        update.email = "bob@example.com".to_string();

        let err = AccountService::update_profile(&pool, user.id, update).await.unwrap_err();
        assert_eq!(err.flash_message(), "Username or email already exists.");
    }

    #[tokio::test]
    async fn test_remove_avatar_is_idempotent() {
        let pool = memory_pool().await;
        let user = seed_user(&pool, "alice").await;
        UserRepository::update_avatar(&pool, user.id, Some("/uploads/avatars/a.png"))
            .await
            .unwrap();

        let (session_user, removed) = AccountService::remove_avatar(&pool, user.id).await.unwrap();
        assert_eq!(session_user.avatar_path, None);
        assert_eq!(removed.as_deref(), Some("/uploads/avatars/a.png"));

        let (_, removed_again) = AccountService::remove_avatar(&pool, user.id).await.unwrap();
        assert_eq!(removed_again, None);
    }
}
