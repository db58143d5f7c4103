//! Admin panel handlers
//!
//! Every route requires an administrator; the guard redirects everyone else
//! to the landing page. Workshop and team forms may name the page they came
//! from; the target is checked against a small allow-list before any
//! redirect.

mod categories;
mod team;
mod users;
mod workshops;
pub mod request;

use axum::{
    http::{header, HeaderMap},
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Admin routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list).post(users::create))
        .route("/users/{id}/update", post(users::update))
        .route("/users/{id}/delete", post(users::remove))
        .route("/workshops", get(workshops::list).post(workshops::create))
        .route("/workshops/{id}/update", post(workshops::update))
        .route("/workshops/{id}/delete", post(workshops::remove))
        .route("/team", get(team::list).post(team::create))
        .route("/team/{id}/update", post(team::update))
        .route("/team/{id}/delete", post(team::remove))
        .route("/categories", get(categories::list).post(categories::create))
        .route("/categories/{id}/update", post(categories::update))
        .route("/categories/{id}/delete", post(categories::remove))
}

/// Resolve where a management form should bounce back to.
///
/// The submitted `redirect_to` wins when it is on the allow-list; otherwise
/// the referer is matched against the same list, and finally the fallback
/// applies. Free-form redirect targets are never followed.
pub(crate) fn resolve_redirect(
    requested: Option<&str>,
    headers: &HeaderMap,
    targets: &[&str],
    fallback: &str,
) -> String {
    if let Some(requested) = requested {
        let requested = requested.trim();
        if targets.contains(&requested) {
            return requested.to_string();
        }
    }

    if let Some(referer) = headers.get(header::REFERER).and_then(|v| v.to_str().ok()) {
        for target in targets {
            if referer.contains(target) {
                return target.to_string();
            }
        }
    }

    fallback.to_string()
}
