//! Authentication form DTOs

use serde::Deserialize;

/// Registration form submission
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub name: String,
    pub nickname: String,
    pub password: String,
    pub confirm: String,
}

/// Login form submission; the identifier may be a username or an email
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub identifier: String,
    pub password: String,
}
