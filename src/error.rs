//! Custom error types and handling
//!
//! This module defines the application's error types. Every error raised while
//! handling a form submission is recovered at the request boundary and surfaced
//! to the user as a redirect with a one-shot flash message; the `IntoResponse`
//! implementation only exists as a fallback for failures during page rendering.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials.")]
    InvalidCredentials,

    #[error("Please login first.")]
    Unauthenticated,

    #[error("Already logged in.")]
    AlreadyAuthenticated,

    #[error("{0}")]
    Forbidden(String),

    // Validation errors, aggregated into one user-facing message list
    #[error("{0}")]
    Validation(String),

    // Resource errors
    #[error("{0} not found.")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    // Upload errors
    #[error("{0}")]
    UploadRejected(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Aggregate field-level validation messages into a single error
    pub fn validation<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let joined = messages
            .into_iter()
            .map(Into::into)
            .collect::<Vec<_>>()
            .join(" ");
        Self::Validation(joined)
    }

    /// User-facing flash message for this error
    ///
    /// Storage and internal failures surface a generic message; the underlying
    /// cause is logged separately for operators.
    pub fn flash_message(&self) -> String {
        match self {
            Self::Database(_) | Self::Internal(_) => {
                "Something went wrong. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Log operator-facing detail for errors that hide their cause from users
    pub fn log(&self) {
        match self {
            Self::Database(e) => tracing::error!("Database error: {e}"),
            Self::Internal(e) => tracing::error!("Internal error: {e:?}"),
            Self::Forbidden(reason) => tracing::warn!("Denied: {reason}"),
            _ => {}
        }
    }

    /// HTTP status for the fallback response path
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::AlreadyAuthenticated => StatusCode::SEE_OTHER,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Validation(_) | Self::UploadRejected(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyExists(_) => StatusCode::CONFLICT,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        (self.status_code(), self.flash_message()).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource".to_string()),
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    AppError::AlreadyExists("Already exists.".to_string())
                } else {
                    AppError::Database(db_err.to_string())
                }
            }
            _ => AppError::Database(err.to_string()),
        }
    }
}

impl From<tera::Error> for AppError {
    fn from(err: tera::Error) -> Self {
        AppError::Internal(anyhow::Error::new(err))
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        tracing::debug!("Multipart parse failure: {err}");
        AppError::UploadRejected("Upload failed.".to_string())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_aggregates_messages() {
        let err = AppError::validation(["Invalid username.", "Invalid email."]);
        assert_eq!(err.flash_message(), "Invalid username. Invalid email.");
    }

    #[test]
    fn test_storage_errors_stay_generic() {
        let err = AppError::Database("disk I/O error".to_string());
        assert_eq!(err.flash_message(), "Something went wrong. Please try again.");
    }
}
