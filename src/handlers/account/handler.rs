//! Account handler implementations
//!
//! The profile form arrives as multipart because it can carry an avatar
//! image. The image is written to disk before the row update; if anything
//! later fails, the freshly stored file is deleted again.

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    response::{IntoResponse, Redirect, Response},
};
use tera::Context;
use tower_sessions::Session;

use crate::{
    constants::{AVATAR_MAX_BYTES, AVATAR_UPLOAD_DIR, SESSION_USER_KEY},
    error::AppResult,
    middleware::{auth::CurrentUser, flash},
    render::render_page,
    services::{
        account_service::{ProfileOutcome, ProfileUpdate},
        AccountService,
    },
    state::AppState,
    utils::uploads,
};

/// Render the account settings page with the current profile row
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    CurrentUser(user): CurrentUser,
) -> AppResult<Response> {
    match AccountService::get_profile(state.db(), user.id).await {
        Ok(profile) => {
            let mut context = Context::new();
            context.insert("title", "Account Settings");
            context.insert("profile", &profile);
            Ok(render_page(&state, &session, "account.html", context)
                .await?
                .into_response())
        }
        Err(err) => Ok(flash::fail(&session, err, "/login").await.into_response()),
    }
}

#[derive(Default)]
struct AccountForm {
    username: String,
    email: String,
    phone: String,
    name: String,
    nickname: String,
    password: String,
    confirm: String,
    remove_avatar: bool,
    avatar: Option<(String, Bytes)>,
}

async fn parse_form(mut multipart: Multipart) -> AppResult<AccountForm> {
    let mut form = AccountForm::default();

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
            "username" => form.username = field.text().await?,
            "email" => form.email = field.text().await?,
            "phone" => form.phone = field.text().await?,
            "name" => form.name = field.text().await?,
            "nickname" => form.nickname = field.text().await?,
            "password" => form.password = field.text().await?,
            "confirm" => form.confirm = field.text().await?,
            "remove_avatar" => form.remove_avatar = field.text().await? == "1",
            _ => {}
        }
    }

    Ok(form)
}

/// Persist profile updates including optional avatar and password changes
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    CurrentUser(user): CurrentUser,
    multipart: Multipart,
) -> Response {
    let form = match parse_form(multipart).await {
        Ok(form) => form,
        Err(err) => return flash::fail(&session, err, "/account").await.into_response(),
    };

    let public_root = state.config().storage.public_root.clone();

    // the upload is written first; every failure path below removes it again
    let mut stored_avatar = None;
    if let Some((file_name, data)) = &form.avatar {
        match uploads::store_upload(&public_root, AVATAR_UPLOAD_DIR, file_name, data, AVATAR_MAX_BYTES)
            .await
        {
            Ok(stored) => stored_avatar = Some(stored),
            Err(err) => return flash::fail(&session, err, "/account").await.into_response(),
        }
    }

    let update = ProfileUpdate {
        username: form.username,
        email: form.email,
        phone: form.phone,
        name: form.name,
        nickname: form.nickname,
        password: form.password,
        confirm: form.confirm,
        remove_avatar: form.remove_avatar,
        new_avatar_path: stored_avatar.as_ref().map(|s| s.relative_path.clone()),
    };

    match AccountService::update_profile(state.db(), user.id, update).await {
        Ok(ProfileOutcome {
            session_user,
            removed_avatars,
        }) => {
            for old in &removed_avatars {
                uploads::remove_public_file(&public_root, old).await;
            }
            if let Err(e) = session.insert(SESSION_USER_KEY, &session_user).await {
                tracing::error!("Failed to refresh session user: {e}");
            }
            flash::success(&session, "Account updated.").await;
            Redirect::to("/account").into_response()
        }
        Err(err) => {
            if let Some(stored) = stored_avatar {
                uploads::remove_public_file(&public_root, &stored.relative_path).await;
            }
            flash::fail(&session, err, "/account").await.into_response()
        }
    }
}

/// Remove the stored avatar, if any
pub async fn delete_avatar(
    State(state): State<AppState>,
    session: Session,
    CurrentUser(user): CurrentUser,
) -> Response {
    match AccountService::remove_avatar(state.db(), user.id).await {
        Ok((session_user, removed)) => {
            match removed {
                Some(path) => {
                    uploads::remove_public_file(&state.config().storage.public_root, &path).await;
                    flash::success(&session, "Avatar removed.").await;
                }
                None => flash::success(&session, "No avatar to remove.").await,
            }
            if let Err(e) = session.insert(SESSION_USER_KEY, &session_user).await {
                tracing::error!("Failed to refresh session user: {e}");
            }
            Redirect::to("/account").into_response()
        }
        Err(err) => flash::fail(&session, err, "/login").await.into_response(),
    }
}
