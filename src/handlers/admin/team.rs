//! Admin team roster handlers
//!
//! Roster forms are multipart because they can carry an avatar image. The
//! image lands on disk before the row is touched; every later failure path
//! deletes the fresh file again so no orphan survives.

use axum::{
    body::Bytes,
    extract::{Form, Multipart, Path, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
};
use tera::Context;
use tower_sessions::Session;

use crate::{
    constants::{TEAM_AVATAR_MAX_BYTES, TEAM_REDIRECT_TARGETS, TEAM_UPLOAD_DIR},
    db::repositories::TeamRepository,
    error::AppResult,
    middleware::{auth::AdminUser, flash},
    render::render_page,
    services::{team_service::TeamMemberInput, TeamService},
    state::AppState,
    utils::uploads,
};

use super::{request::RedirectForm, resolve_redirect};

fn bounce(requested: Option<&str>, headers: &HeaderMap) -> String {
    resolve_redirect(requested, headers, TEAM_REDIRECT_TARGETS, "/admin/team")
}

/// List every roster entry
pub async fn list(
    State(state): State<AppState>,
    session: Session,
    AdminUser(_admin): AdminUser,
) -> AppResult<Html<String>> {
    let members = TeamRepository::list_all(state.db()).await?;

    let mut context = Context::new();
    context.insert("title", "Manage Team");
    context.insert("members", &members);
    render_page(&state, &session, "admin_team.html", context).await
}

#[derive(Default)]
struct TeamForm {
    name: String,
    role: String,
    bio: String,
    remove_avatar: bool,
    redirect_to: Option<String>,
    avatar: Option<(String, Bytes)>,
}

async fn parse_form(mut multipart: Multipart) -> AppResult<TeamForm> {
    let mut form = TeamForm::default();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "avatar" => {
                let file_name = field.file_name().map(str::to_string);
                let data = field.bytes().await?;
                if let Some(file_name) = file_name {
                    if !file_name.is_empty() && !data.is_empty() {
                        form.avatar = Some((file_name, data));
                    }
                }
            }
            "name" => form.name = field.text().await?,
            "role" => form.role = field.text().await?,
            "bio" => form.bio = field.text().await?,
            "remove_avatar" => form.remove_avatar = field.text().await? == "1",
            "redirect_to" => form.redirect_to = Some(field.text().await?),
            _ => {}
        }
    }

    Ok(form)
}

async fn store_avatar(
    state: &AppState,
    form: &TeamForm,
) -> AppResult<Option<uploads::StoredUpload>> {
    match &form.avatar {
        Some((file_name, data)) => {
            let stored = uploads::store_upload(
                &state.config().storage.public_root,
                TEAM_UPLOAD_DIR,
                file_name,
                data,
                TEAM_AVATAR_MAX_BYTES,
            )
            .await?;
            Ok(Some(stored))
        }
        None => Ok(None),
    }
}

/// Add a roster entry
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    AdminUser(_admin): AdminUser,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let form = match parse_form(multipart).await {
        Ok(form) => form,
        Err(err) => {
            let target = bounce(None, &headers);
            return flash::fail(&session, err, &target).await.into_response();
        }
    };
    let target = bounce(form.redirect_to.as_deref(), &headers);

    let stored = match store_avatar(&state, &form).await {
        Ok(stored) => stored,
        Err(err) => return flash::fail(&session, err, &target).await.into_response(),
    };

    let input = TeamMemberInput {
        name: form.name,
        role: form.role,
        bio: form.bio,
        remove_avatar: form.remove_avatar,
        new_avatar_path: stored.as_ref().map(|s| s.relative_path.clone()),
    };

    match TeamService::create(state.db(), input).await {
        Ok(()) => {
            flash::success(&session, "Team member added.").await;
            Redirect::to(&target).into_response()
        }
        Err(err) => {
            if let Some(stored) = stored {
                uploads::remove_public_file(&state.config().storage.public_root, &stored.relative_path)
                    .await;
            }
            flash::fail(&session, err, &target).await.into_response()
        }
    }
}

/// Update a roster entry
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i64>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let form = match parse_form(multipart).await {
        Ok(form) => form,
        Err(err) => {
            let target = bounce(None, &headers);
            return flash::fail(&session, err, &target).await.into_response();
        }
    };
    let target = bounce(form.redirect_to.as_deref(), &headers);

    let stored = match store_avatar(&state, &form).await {
        Ok(stored) => stored,
        Err(err) => return flash::fail(&session, err, &target).await.into_response(),
    };

    let input = TeamMemberInput {
        name: form.name,
        role: form.role,
        bio: form.bio,
        remove_avatar: form.remove_avatar,
        new_avatar_path: stored.as_ref().map(|s| s.relative_path.clone()),
    };

    match TeamService::update(state.db(), id, input).await {
        Ok(removed) => {
            for old in &removed {
                uploads::remove_public_file(&state.config().storage.public_root, old).await;
            }
            flash::success(&session, "Team member updated.").await;
            Redirect::to(&target).into_response()
        }
        Err(err) => {
            if let Some(stored) = stored {
                uploads::remove_public_file(&state.config().storage.public_root, &stored.relative_path)
                    .await;
            }
            flash::fail(&session, err, &target).await.into_response()
        }
    }
}

/// Remove a roster entry and its avatar file
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Form(form): Form<RedirectForm>,
) -> Response {
    let target = bounce(form.redirect_to.as_deref(), &headers);
    match TeamService::delete(state.db(), id).await {
        Ok(removed) => {
            if let Some(old) = removed {
                uploads::remove_public_file(&state.config().storage.public_root, &old).await;
            }
            flash::success(&session, "Team member removed.").await;
            Redirect::to(&target).into_response()
        }
        Err(err) => flash::fail(&session, err, &target).await.into_response(),
    }
}
