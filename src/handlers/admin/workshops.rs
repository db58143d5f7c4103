//! Admin workshop management handlers

use axum::{
    extract::{Form, Path, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
};
use tera::Context;
use tower_sessions::Session;

use crate::{
    constants::WORKSHOP_REDIRECT_TARGETS,
    db::repositories::WorkshopRepository,
    error::AppResult,
    middleware::{auth::AdminUser, flash},
    render::render_page,
    services::WorkshopService,
    state::AppState,
};

use super::{
    request::{RedirectForm, WorkshopForm},
    resolve_redirect,
};

fn bounce(requested: Option<&str>, headers: &HeaderMap) -> String {
    resolve_redirect(requested, headers, WORKSHOP_REDIRECT_TARGETS, "/admin/workshops")
}

/// List every catalog entry
pub async fn list(
    State(state): State<AppState>,
    session: Session,
    AdminUser(_admin): AdminUser,
) -> AppResult<Html<String>> {
    let workshops = WorkshopRepository::list_all(state.db()).await?;

    let mut context = Context::new();
    context.insert("title", "Manage Workshops");
    context.insert("workshops", &workshops);
    render_page(&state, &session, "admin_workshops.html", context).await
}

/// Create a catalog entry
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    AdminUser(_admin): AdminUser,
    headers: HeaderMap,
    Form(form): Form<WorkshopForm>,
) -> Response {
    let target = bounce(form.redirect_to.as_deref(), &headers);
    match WorkshopService::create(state.db(), form.into()).await {
        Ok(()) => {
            flash::success(&session, "Workshop created.").await;
            Redirect::to(&target).into_response()
        }
        Err(err) => flash::fail(&session, err, &target).await.into_response(),
    }
}

/// Update a catalog entry
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Form(form): Form<WorkshopForm>,
) -> Response {
    let target = bounce(form.redirect_to.as_deref(), &headers);
    match WorkshopService::update(state.db(), id, form.into()).await {
        Ok(()) => {
            flash::success(&session, "Workshop updated.").await;
            Redirect::to(&target).into_response()
        }
        Err(err) => flash::fail(&session, err, &target).await.into_response(),
    }
}

/// Delete a catalog entry
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Form(form): Form<RedirectForm>,
) -> Response {
    let target = bounce(form.redirect_to.as_deref(), &headers);
    match WorkshopService::delete(state.db(), id).await {
        Ok(()) => {
            flash::success(&session, "Workshop deleted.").await;
            Redirect::to(&target).into_response()
        }
        Err(err) => flash::fail(&session, err, &target).await.into_response(),
    }
}
