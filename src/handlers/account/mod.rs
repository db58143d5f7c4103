//! Account self-service handlers

mod handler;

pub use handler::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Account routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::show).post(handler::update))
        .route("/avatar/delete", post(handler::delete_avatar))
}
