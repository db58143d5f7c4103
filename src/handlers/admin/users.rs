//! Admin user management handlers

use axum::{
    extract::{Form, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tera::Context;
use tower_sessions::Session;

use crate::{
    constants::SESSION_USER_KEY,
    error::AppResult,
    middleware::{auth::AdminUser, flash},
    render::render_page,
    services::AdminService,
    state::AppState,
};

use super::request::AdminUserForm;

/// List every account
pub async fn list(
    State(state): State<AppState>,
    session: Session,
    AdminUser(_admin): AdminUser,
) -> AppResult<Html<String>> {
    let users = AdminService::list_users(state.db()).await?;

    let mut context = Context::new();
    context.insert("title", "Users List");
    context.insert("users", &users);
    render_page(&state, &session, "admin_users.html", context).await
}

/// Create an account with an explicit role
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    AdminUser(_admin): AdminUser,
    Form(form): Form<AdminUserForm>,
) -> Response {
    match AdminService::create_user(state.db(), form.into()).await {
        Ok(user) => {
            flash::success(&session, format!("Created user {}.", user.username)).await;
            Redirect::to("/admin/users").into_response()
        }
        Err(err) => flash::fail(&session, err, "/admin/users").await.into_response(),
    }
}

/// Update an account; a self-edit refreshes the admin's own session copy
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
    Form(form): Form<AdminUserForm>,
) -> Response {
    match AdminService::update_user(state.db(), &admin, id, form.into()).await {
        Ok(refreshed) => {
            if let Some(session_user) = refreshed {
                if let Err(e) = session.insert(SESSION_USER_KEY, &session_user).await {
                    tracing::error!("Failed to refresh session user: {e}");
                }
            }
            flash::success(&session, "User updated.").await;
            Redirect::to("/admin/users").into_response()
        }
        Err(err) => flash::fail(&session, err, "/admin/users").await.into_response(),
    }
}

/// Delete an account other than the acting admin's own
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    AdminUser(admin): AdminUser,
    Path(id): Path<i64>,
) -> Response {
    match AdminService::delete_user(state.db(), &admin, id).await {
        Ok(()) => {
            flash::success(&session, "User deleted.").await;
            Redirect::to("/admin/users").into_response()
        }
        Err(err) => flash::fail(&session, err, "/admin/users").await.into_response(),
    }
}
