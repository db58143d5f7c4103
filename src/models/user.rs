//! User model and session projection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User role, stored as lowercase text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Parse a submitted role value; anything but "admin" falls back to user
    pub fn parse_or_user(value: &str) -> Self {
        if value == "admin" { Role::Admin } else { Role::User }
    }
}

/// User database model
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub avatar_path: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The minimal projection mirrored into the session
    ///
    /// The stored row stays authoritative; callers must refresh this copy
    /// whenever a profile edit changes one of the mirrored fields.
    pub fn session_projection(&self) -> SessionUser {
        SessionUser {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role,
            name: self.name.clone(),
            nickname: self.nickname.clone(),
            avatar_path: self.avatar_path.clone(),
        }
    }
}

/// Immutable per-request snapshot of the logged-in user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub avatar_path: Option<String>,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
