//! Task handlers

mod handler;
pub mod request;

pub use handler::*;
pub use request::*;

use axum::{routing::post, Router};

use crate::state::AppState;

/// Task routes; all mutations are POST forms
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/primary", post(handler::create_primary))
        .route("/{id}", post(handler::update))
        .route("/{id}/delete", post(handler::remove))
}
