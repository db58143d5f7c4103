//! One-shot flash messages
//!
//! A flash is stored in the session and consumed on the next render. Failing
//! to record one never fails the request that triggered it.

use axum::response::Redirect;
use tower_sessions::Session;

use crate::error::AppError;

const SUCCESS_KEY: &str = "flash.success";
const ERROR_KEY: &str = "flash.error";

/// Record a success notice for the next render
pub async fn success(session: &Session, message: impl Into<String>) {
    set(session, SUCCESS_KEY, message.into()).await;
}

/// Record an error notice for the next render
pub async fn error(session: &Session, message: impl Into<String>) {
    set(session, ERROR_KEY, message.into()).await;
}

async fn set(session: &Session, key: &str, message: String) {
    if let Err(e) = session.insert(key, message).await {
        tracing::debug!("Failed to record flash message: {e}");
    }
}

/// Consume and clear both flash slots
pub async fn take(session: &Session) -> (Option<String>, Option<String>) {
    let success = session.remove::<String>(SUCCESS_KEY).await.unwrap_or_default();
    let error = session.remove::<String>(ERROR_KEY).await.unwrap_or_default();
    (success, error)
}

/// Recover a failed mutation: log it, record the flash, redirect to safety
pub async fn fail(session: &Session, err: AppError, to: &str) -> Redirect {
    err.log();
    error(session, err.flash_message()).await;
    Redirect::to(to)
}
