//! Task handler implementations
//!
//! Every mutation recovers its errors as a flash message plus a redirect to
//! the dashboard; ownership is decided in the service layer.

use axum::{
    extract::{Form, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::{
    middleware::{
        auth::{AdminUser, CurrentUser},
        flash,
    },
    services::TaskService,
    state::AppState,
    utils::validation::parse_optional_id,
};

use super::request::{TaskForm, UpdateTaskForm};

/// Create a personal task owned by the acting user
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    CurrentUser(user): CurrentUser,
    Form(form): Form<TaskForm>,
) -> Response {
    let category_id = parse_optional_id(&form.category_id);
    match TaskService::create_personal(state.db(), &user, &form.title, &form.description, category_id)
        .await
    {
        Ok(()) => Redirect::to("/").into_response(),
        Err(err) => flash::fail(&session, err, "/").await.into_response(),
    }
}

/// Create a broadcast task visible to every user; admin only
pub async fn create_primary(
    State(state): State<AppState>,
    session: Session,
    AdminUser(admin): AdminUser,
    Form(form): Form<TaskForm>,
) -> Response {
    let category_id = parse_optional_id(&form.category_id);
    match TaskService::create_primary(state.db(), &admin, &form.title, &form.description, category_id)
        .await
    {
        Ok(()) => Redirect::to("/").into_response(),
        Err(err) => flash::fail(&session, err, "/").await.into_response(),
    }
}

/// Update a task the actor owns, or a broadcast task as admin
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Form(form): Form<UpdateTaskForm>,
) -> Response {
    let category_id = parse_optional_id(&form.category_id);
    let completed = form.completed.is_some();
    match TaskService::update(
        state.db(),
        &user,
        id,
        &form.title,
        &form.description,
        completed,
        category_id,
    )
    .await
    {
        Ok(()) => Redirect::to("/").into_response(),
        Err(err) => flash::fail(&session, err, "/").await.into_response(),
    }
}

/// Delete a task the actor owns, or a broadcast task as admin
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Response {
    match TaskService::delete(state.db(), &user, id).await {
        Ok(()) => Redirect::to("/").into_response(),
        Err(err) => flash::fail(&session, err, "/").await.into_response(),
    }
}
