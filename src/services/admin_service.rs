//! Admin user management
//!
//! Creating, editing, and deleting accounts from the admin panel. The
//! self-management rules live in [`crate::services::access`]: an admin can
//! never downgrade their own role or delete their own account.

use sqlx::SqlitePool;

use crate::{
    db::repositories::{UserChanges, UserRepository},
    error::{AppError, AppResult},
    models::{Role, SessionUser, User},
    services::{access, auth_service},
    utils::validation,
};

/// User fields submitted from the admin panel.
///
/// An empty password keeps the stored hash on update; creation requires one.
#[derive(Debug, Default)]
pub struct AdminUserInput {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub name: String,
    pub nickname: String,
    pub role: Role,
    pub password: String,
}

/// Admin service for account management
pub struct AdminService;

impl AdminService {
    /// List all accounts for the panel
    pub async fn list_users(pool: &SqlitePool) -> AppResult<Vec<User>> {
        UserRepository::list_all(pool).await
    }

    /// Create an account with an explicit role
    pub async fn create_user(pool: &SqlitePool, input: AdminUserInput) -> AppResult<User> {
        let (username, email, phone, name, nickname) = normalize(&input);

        let mut errors = field_errors(&username, &email, &phone, &name, &nickname);
        if let Err(e) = validation::validate_password(&input.password) {
            errors.push(e);
        }
        if !errors.is_empty() {
            return Err(AppError::validation(errors));
        }

        let password_hash = auth_service::hash_password(&input.password)?;

        UserRepository::create(
            pool,
            &username,
            &email,
            &phone,
            (!name.is_empty()).then_some(name.as_str()),
            (!nickname.is_empty()).then_some(nickname.as_str()),
            &password_hash,
            input.role,
        )
        .await
        .map_err(friendly_unique)
    }

    /// Update an account; refreshes the acting admin's session projection
    /// when they edited their own row
    pub async fn update_user(
        pool: &SqlitePool,
        actor: &SessionUser,
        target_id: i64,
        input: AdminUserInput,
    ) -> AppResult<Option<SessionUser>> {
        let (username, email, phone, name, nickname) = normalize(&input);

        let mut errors = field_errors(&username, &email, &phone, &name, &nickname);
        if !input.password.is_empty() {
            if let Err(e) = validation::validate_password(&input.password) {
                errors.push(e);
            }
        }
        if !access::role_change_allowed(actor, target_id, input.role) {
            errors.push("You cannot downgrade your own admin role.");
        }
        if !errors.is_empty() {
            return Err(AppError::validation(errors));
        }

        let password_hash = if input.password.is_empty() {
            None
        } else {
            Some(auth_service::hash_password(&input.password)?)
        };

        let changed = UserRepository::update(
            pool,
            target_id,
            UserChanges {
                username: &username,
                email: &email,
                phone: &phone,
                name: (!name.is_empty()).then_some(name.as_str()),
                nickname: (!nickname.is_empty()).then_some(nickname.as_str()),
                role: Some(input.role),
                password_hash: password_hash.as_deref(),
                avatar_path: None,
            },
        )
        .await
        .map_err(friendly_unique)?;

        if changed == 0 {
            return Err(AppError::NotFound("User".to_string()));
        }

        if target_id == actor.id {
            let refreshed = UserRepository::find_by_id(pool, target_id)
                .await?
                .ok_or_else(|| AppError::NotFound("User".to_string()))?;
            return Ok(Some(refreshed.session_projection()));
        }

        Ok(None)
    }

    /// Delete an account other than the acting admin's own
    pub async fn delete_user(
        pool: &SqlitePool,
        actor: &SessionUser,
        target_id: i64,
    ) -> AppResult<()> {
        if !access::can_delete_user(actor, target_id) {
            return Err(AppError::Forbidden(
                "You cannot delete your own admin account.".to_string(),
            ));
        }

        UserRepository::delete(pool, target_id).await?;
        Ok(())
    }
}

fn normalize(input: &AdminUserInput) -> (String, String, String, String, String) {
    (
        input.username.trim().to_lowercase(),
        input.email.trim().to_lowercase(),
        input.phone.trim().to_string(),
        input.name.trim().to_string(),
        input.nickname.trim().to_string(),
    )
}

fn field_errors(
    username: &str,
    email: &str,
    phone: &str,
    name: &str,
    nickname: &str,
) -> Vec<&'static str> {
    let mut errors = Vec::new();
    if let Err(e) = validation::validate_username(username) {
        errors.push(e);
    }
    if let Err(e) = validation::validate_email(email) {
        errors.push(e);
    }
    if let Err(e) = validation::validate_phone(phone) {
        errors.push(e);
    }
    if let Err(e) = validation::validate_name(name) {
        errors.push(e);
    }
    if let Err(e) = validation::validate_nickname(nickname) {
        errors.push(e);
    }
    errors
}

fn friendly_unique(e: AppError) -> AppError {
    match e {
        AppError::AlreadyExists(_) => {
            AppError::AlreadyExists("Username or email already exists.".to_string())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::memory_pool;

    fn input(username: &str, role: Role) -> AdminUserInput {
        AdminUserInput {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            phone: "5551234567".to_string(),
            name: String::new(),
            nickname: String::new(),
            role,
            password: "Str0ng!pass".to_string(),
        }
    }

    async fn seed_admin(pool: &SqlitePool) -> SessionUser {
        AdminService::create_user(pool, input("root", Role::Admin))
            .await
            .unwrap()
            .session_projection()
    }

    #[tokio::test]
    async fn test_create_user_with_role() {
        let pool = memory_pool().await;
        let user = AdminService::create_user(&pool, input("alice", Role::User))
            .await
            .unwrap();
        assert_eq!(user.role, Role::User);

        let admin = AdminService::create_user(&pool, input("root", Role::Admin))
            .await
            .unwrap();
        assert_eq!(admin.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_self_role_downgrade_is_rejected_and_store_unchanged() {
        let pool = memory_pool().await;
        let admin = seed_admin(&pool).await;

        let mut attempt = input("root", Role::User);
        attempt.password = String::new();
        let err = AdminService::update_user(&pool, &admin, admin.id, attempt)
            .await
            .unwrap_err();
        assert!(err.flash_message().contains("cannot downgrade"));

        let stored = UserRepository::find_by_id(&pool, admin.id).await.unwrap().unwrap();
        assert_eq!(stored.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_self_update_returns_fresh_session_projection() {
        let pool = memory_pool().await;
        let admin = seed_admin(&pool).await;

        let mut change = input("root", Role::Admin);
        change.nickname = "boss".to_string();
        change.password = String::new();

        let refreshed = AdminService::update_user(&pool, &admin, admin.id, change)
            .await
            .unwrap()
            .expect("self-update refreshes the session");
        assert_eq!(refreshed.nickname.as_deref(), Some("boss"));
    }

    #[tokio::test]
    async fn test_updating_another_user_leaves_session_alone() {
        let pool = memory_pool().await;
        let admin = seed_admin(&pool).await;
        let alice = AdminService::create_user(&pool, input("alice", Role::User))
            .await
            .unwrap();

        let mut change = input("alice", Role::Admin);
        change.password = String::new();
        let refreshed = AdminService::update_user(&pool, &admin, alice.id, change)
            .await
            .unwrap();
        assert!(refreshed.is_none());

        let stored = UserRepository::find_by_id(&pool, alice.id).await.unwrap().unwrap();
        assert_eq!(stored.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_admin_cannot_delete_own_account() {
        let pool = memory_pool().await;
        let admin = seed_admin(&pool).await;

        let err = AdminService::delete_user(&pool, &admin, admin.id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert!(UserRepository::find_by_id(&pool, admin.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_missing_target_reports_not_found() {
        let pool = memory_pool().await;
        let admin = seed_admin(&pool).await;

        let mut change = input("ghost", Role::User);
        change.password = String::new();
        let err = AdminService::update_user(&pool, &admin, 404, change)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
