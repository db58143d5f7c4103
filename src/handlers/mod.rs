//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod account;
pub mod admin;
pub mod auth;
pub mod pages;
pub mod tasks;

use axum::Router;

use crate::state::AppState;

/// Create all application routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(pages::routes())
        .nest("/auth", auth::routes())
        .nest("/tasks", tasks::routes())
        .nest("/account", account::routes())
        .nest("/admin", admin::routes())
}
