//! User repository

use sqlx::{SqliteExecutor, SqlitePool};

use crate::{
    error::AppResult,
    models::{Role, User},
};

/// Field changes applied by a full-row user update.
///
/// `None` on an optional field leaves the stored value untouched;
/// `avatar_path` distinguishes "leave alone" (`None`) from "set or clear"
/// (`Some(value)`).
#[derive(Debug, Default)]
pub struct UserChanges<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub name: Option<&'a str>,
    pub nickname: Option<&'a str>,
    pub role: Option<Role>,
    pub password_hash: Option<&'a str>,
    pub avatar_path: Option<Option<&'a str>>,
}

/// Repository for user database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &SqlitePool,
        username: &str,
        email: &str,
        phone: &str,
        name: Option<&str>,
        nickname: Option<&str>,
        password_hash: &str,
        role: Role,
    ) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, phone, name, nickname, password_hash, role)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(phone)
        .bind(name)
        .bind(nickname)
        .bind(password_hash)
        .bind(role)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(
        executor: impl SqliteExecutor<'_>,
        id: i64,
    ) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE id = ?1"#)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(user)
    }

    /// Find user by username or email (for login)
    pub async fn find_by_identifier(
        executor: impl SqliteExecutor<'_>,
        identifier: &str,
    ) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT * FROM users WHERE username = ?1 OR email = ?1"#,
        )
        .bind(identifier)
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }

    /// List all users, newest first
    pub async fn list_all(pool: &SqlitePool) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(r#"SELECT * FROM users ORDER BY created_at DESC"#)
            .fetch_all(pool)
            .await?;

        Ok(users)
    }

    /// Apply a full-row update; returns the changed-row count
    pub async fn update(pool: &SqlitePool, id: i64, changes: UserChanges<'_>) -> AppResult<u64> {
        let (avatar_changed, avatar_value) = match changes.avatar_path {
            Some(value) => (true, value),
            None => (false, None),
        };

        let result = sqlx::query(
            r#"
            UPDATE users SET
                username = ?2,
                email = ?3,
                phone = ?4,
                name = ?5,
                nickname = ?6,
                role = COALESCE(?7, role),
                password_hash = COALESCE(?8, password_hash),
                avatar_path = CASE WHEN ?9 THEN ?10 ELSE avatar_path END
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(changes.username)
        .bind(changes.email)
        .bind(changes.phone)
        .bind(changes.name)
        .bind(changes.nickname)
        .bind(changes.role)
        .bind(changes.password_hash)
        .bind(avatar_changed)
        .bind(avatar_value)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Set or clear the avatar path only
    pub async fn update_avatar(
        pool: &SqlitePool,
        id: i64,
        avatar_path: Option<&str>,
    ) -> AppResult<u64> {
        let result = sqlx::query(r#"UPDATE users SET avatar_path = ?2 WHERE id = ?1"#)
            .bind(id)
            .bind(avatar_path)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Delete user by ID; returns the changed-row count
    pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<u64> {
        let result = sqlx::query(r#"DELETE FROM users WHERE id = ?1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
