//! Authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sqlx::SqlitePool;

use crate::{
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    handlers::auth::request::RegisterForm,
    models::{Role, User},
    utils::validation,
};

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))?
        .to_string();

    Ok(hash)
}

/// Verify a password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Register a new user with the default role
    pub async fn register(pool: &SqlitePool, form: &RegisterForm) -> AppResult<User> {
        let username = form.username.trim().to_lowercase();
        let email = form.email.trim().to_lowercase();
        let phone = form.phone.trim().to_string();
        let name = form.name.trim().to_string();
        let nickname = form.nickname.trim().to_string();

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
        if let Err(e) = validation::validate_password(&form.password) {
            errors.push(e);
        }
        if form.password != form.confirm {
            errors.push("Passwords do not match.");
        }
        if !errors.is_empty() {
            return Err(AppError::validation(errors));
        }

        let password_hash = hash_password(&form.password)?;

        UserRepository::create(
            pool,
            &username,
            &email,
            &phone,
            (!name.is_empty()).then_some(name.as_str()),
            (!nickname.is_empty()).then_some(nickname.as_str()),
            &password_hash,
            Role::User,
        )
        .await
        .map_err(|e| match e {
            AppError::AlreadyExists(_) => {
                AppError::AlreadyExists("Username or email already exists.".to_string())
            }
            other => other,
        })
    }

    /// Login with username or email and password.
    ///
    /// Every failure path returns the same generic error so responses never
    /// reveal whether an identifier exists.
    pub async fn login(pool: &SqlitePool, identifier: &str, password: &str) -> AppResult<User> {
        let ident = identifier.trim().to_lowercase();

        let plausible = validation::validate_email(&ident).is_ok()
            || validation::looks_like_username(&ident);
        if !plausible || password.is_empty() {
            return Err(AppError::InvalidCredentials);
        }

        let user = UserRepository::find_by_identifier(pool, &ident)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::memory_pool;

    fn register_form(username: &str, email: &str) -> RegisterForm {
        RegisterForm {
            username: username.to_string(),
            email: email.to_string(),
            phone: "+15551234567".to_string(),
            name: String::new(),
            nickname: String::new(),
            password: "Str0ng!pass".to_string(),
            confirm: "Str0ng!pass".to_string(),
        }
    }

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hash = hash_password("Str0ng!pass").unwrap();
        assert!(verify_password("Str0ng!pass", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[tokio::test]
    async fn test_register_normalizes_and_logs_in() {
        let pool = memory_pool().await;
        let user = AuthService::register(&pool, &register_form("Alice_1", "Alice@Example.COM"))
            .await
            .unwrap();
        assert_eq!(user.username, "alice_1");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.role, Role::User);

        // both identifiers work, case-insensitively
        assert!(AuthService::login(&pool, "ALICE_1", "Str0ng!pass").await.is_ok());
        assert!(AuthService::login(&pool, "alice@example.com", "Str0ng!pass").await.is_ok());
    }

    #[tokio::test]
    async fn test_register_rejects_duplicates_with_friendly_message() {
        let pool = memory_pool().await;
        AuthService::register(&pool, &register_form("alice", "alice@example.com"))
            .await
            .unwrap();

        let err = AuthService::register(&pool, &register_form("alice", "other@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.flash_message(), "Username or email already exists.");
    }

    #[tokio::test]
    async fn test_login_failures_share_identical_error_text() {
        let pool = memory_pool().await;
        AuthService::register(&pool, &register_form("alice", "alice@example.com"))
            .await
            .unwrap();

        let wrong_password = AuthService::login(&pool, "alice", "Wr0ng!pass1")
            .await
            .unwrap_err();
        let unknown_user = AuthService::login(&pool, "nosuchuser", "Wr0ng!pass1")
            .await
            .unwrap_err();
        assert_eq!(wrong_password.flash_message(), unknown_user.flash_message());
        assert_eq!(wrong_password.flash_message(), "Invalid credentials.");
    }

    #[tokio::test]
    async fn test_register_aggregates_field_errors() {
        let pool = memory_pool().await;
        let mut form = register_form("x", "not-an-email");
        form.password = "weak".to_string();
        form.confirm = "different".to_string();

        let err = AuthService::register(&pool, &form).await.unwrap_err();
        let message = err.flash_message();
        assert!(message.contains("Invalid username."));
        assert!(message.contains("Invalid email."));
        assert!(message.contains("Passwords do not match."));
    }
}
