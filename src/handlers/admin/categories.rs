//! Admin category handlers
//!
//! Category management is admin-gated; see DESIGN.md for the policy choice.

use axum::{
    extract::{Form, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tera::Context;
use tower_sessions::Session;

use crate::{
    error::AppResult,
    middleware::{auth::AdminUser, flash},
    render::render_page,
    services::CategoryService,
    state::AppState,
};

use super::request::CategoryForm;

/// List every category
pub async fn list(
    State(state): State<AppState>,
    session: Session,
    AdminUser(_admin): AdminUser,
) -> AppResult<Html<String>> {
    let categories = CategoryService::list(state.db()).await?;

    let mut context = Context::new();
    context.insert("title", "Manage Categories");
    context.insert("categories", &categories);
    render_page(&state, &session, "admin_categories.html", context).await
}

/// Create a category
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    AdminUser(_admin): AdminUser,
    Form(form): Form<CategoryForm>,
) -> Response {
    match CategoryService::create(state.db(), &form.name).await {
        Ok(()) => {
            flash::success(&session, "Category created.").await;
            Redirect::to("/admin/categories").into_response()
        }
        Err(err) => flash::fail(&session, err, "/admin/categories").await.into_response(),
    }
}

/// Rename a category
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i64>,
    Form(form): Form<CategoryForm>,
) -> Response {
    match CategoryService::rename(state.db(), id, &form.name).await {
        Ok(()) => {
            flash::success(&session, "Category updated.").await;
            Redirect::to("/admin/categories").into_response()
        }
        Err(err) => flash::fail(&session, err, "/admin/categories").await.into_response(),
    }
}

/// Delete a category; tasks that used it keep no category
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i64>,
) -> Response {
    match CategoryService::delete(state.db(), id).await {
        Ok(()) => {
            flash::success(&session, "Category deleted.").await;
            Redirect::to("/admin/categories").into_response()
        }
        Err(err) => flash::fail(&session, err, "/admin/categories").await.into_response(),
    }
}
