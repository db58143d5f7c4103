//! Input validation utilities
//!
//! Field-level checks shared by registration, account self-service, and the
//! admin panel. Callers collect the failures into one aggregated
//! [`crate::error::AppError::Validation`] message.

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidateEmail;

use crate::constants::{MAX_NAME_LENGTH, MAX_NICKNAME_LENGTH, MIN_PASSWORD_LENGTH};

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]{3,20}$").expect("valid username pattern"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d{7,15}$").expect("valid phone pattern"));

/// Symbols accepted by the password strength check
const PASSWORD_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>_-";

/// Validate username format (3-20 word characters)
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if USERNAME_RE.is_match(username) {
        Ok(())
    } else {
        Err("Invalid username.")
    }
}

/// Check whether an identifier has the shape of a username
pub fn looks_like_username(identifier: &str) -> bool {
    USERNAME_RE.is_match(identifier)
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.validate_email() {
        Ok(())
    } else {
        Err("Invalid email.")
    }
}

/// Validate phone number format (7-15 digits, optional leading +)
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err("Invalid phone number.")
    }
}

/// Validate optional display name length
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.len() > MAX_NAME_LENGTH {
        Err("Name must be 60 characters or fewer.")
    } else {
        Ok(())
    }
}

/// Validate optional nickname length
pub fn validate_nickname(nickname: &str) -> Result<(), &'static str> {
    if nickname.len() > MAX_NICKNAME_LENGTH {
        Err("Nickname must be 30 characters or fewer.")
    } else {
        Ok(())
    }
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err("Password must be at least 8 characters.");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("Password needs an uppercase letter.");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err("Password needs a lowercase letter.");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password needs a number.");
    }
    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        return Err("Password needs a symbol.");
    }
    Ok(())
}

/// Parse an optional select value ("" means none)
pub fn parse_optional_id(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("Alice_123").is_ok());
        assert!(validate_username("ab").is_err()); // too short
        assert!(validate_username("user@name").is_err());
        assert!(validate_username(&"x".repeat(21)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+15551234567").is_ok());
        assert!(validate_phone("5551234").is_ok());
        assert!(validate_phone("123").is_err());
        assert!(validate_phone("555-123-4567").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("Str0ng!pass").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password("nouppercase1!").is_err());
        assert!(validate_password("NOLOWERCASE1!").is_err());
        assert!(validate_password("NoNumbers!").is_err());
        assert!(validate_password("NoSymbols123").is_err());
    }

    #[test]
    fn test_parse_optional_id() {
        assert_eq!(parse_optional_id("7"), Some(7));
        assert_eq!(parse_optional_id(""), None);
        assert_eq!(parse_optional_id("abc"), None);
    }
}
