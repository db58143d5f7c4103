//! Authorization guards
//!
//! Three extractors evaluated before any handler body runs. They only inspect
//! the session and redirect; no guard mutates application state.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::{constants::SESSION_USER_KEY, middleware::flash, models::SessionUser};

async fn session_user(session: &Session) -> Option<SessionUser> {
    match session.get::<SessionUser>(SESSION_USER_KEY).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Session read failed: {e}");
            None
        }
    }
}

async fn extract_session<S: Send + Sync>(
    parts: &mut Parts,
    state: &S,
) -> Result<Session, Response> {
    Session::from_request_parts(parts, state)
        .await
        .map_err(IntoResponse::into_response)
}

/// Requires a logged-in user; otherwise flashes and redirects to the login page
pub struct CurrentUser(pub SessionUser);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = extract_session(parts, state).await?;
        match session_user(&session).await {
            Some(user) => Ok(CurrentUser(user)),
            None => {
                flash::error(&session, "Please login first.").await;
                Err(Redirect::to("/login").into_response())
            }
        }
    }
}

/// Requires an administrator; otherwise flashes and redirects to the landing page
pub struct AdminUser(pub SessionUser);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = extract_session(parts, state).await?;
        match session_user(&session).await {
            Some(user) if user.is_admin() => Ok(AdminUser(user)),
            _ => {
                flash::error(&session, "Admins only.").await;
                Err(Redirect::to("/").into_response())
            }
        }
    }
}

/// Requires no logged-in user; logged-in visitors bounce back to the app
pub struct Guest;

impl<S> FromRequestParts<S> for Guest
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = extract_session(parts, state).await?;
        match session_user(&session).await {
            Some(_) => Err(Redirect::to("/").into_response()),
            None => Ok(Guest),
        }
    }
}
