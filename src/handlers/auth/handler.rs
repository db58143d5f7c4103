//! Authentication handler implementations

use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::{
    constants::SESSION_USER_KEY,
    middleware::{auth::Guest, flash},
    services::AuthService,
    state::AppState,
};

use super::request::{LoginForm, RegisterForm};

/// Handle the register form
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    _guest: Guest,
    Form(form): Form<RegisterForm>,
) -> Response {
    match AuthService::register(state.db(), &form).await {
        Ok(user) => {
            tracing::info!(username = %user.username, "Registered new account");
            flash::success(&session, "Registered. Please login.").await;
            Redirect::to("/login").into_response()
        }
        Err(err) => flash::fail(&session, err, "/register").await.into_response(),
    }
}

/// Handle the login form; stores the user projection in the session
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    _guest: Guest,
    Form(form): Form<LoginForm>,
) -> Response {
    match AuthService::login(state.db(), &form.identifier, &form.password).await {
        Ok(user) => {
            if let Err(e) = session
                .insert(SESSION_USER_KEY, user.session_projection())
                .await
            {
                tracing::error!("Failed to store session user: {e}");
                flash::error(&session, "Something went wrong. Please try again.").await;
                return Redirect::to("/login").into_response();
            }
            tracing::info!(username = %user.username, "Logged in");
            Redirect::to("/").into_response()
        }
        Err(err) => flash::fail(&session, err, "/login").await.into_response(),
    }
}

/// Destroy the session and return to the login page
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to destroy session: {e}");
    }
    Redirect::to("/login")
}
