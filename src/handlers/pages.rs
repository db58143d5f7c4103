//! Server-rendered pages
//!
//! The home dashboard, the auth entry pages, and the protected content pages.
//! Listings share the same pagination routine with per-listing page sizes.

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tera::Context;
use tower_sessions::Session;

use crate::{
    constants::{TASKS_PER_PAGE, TEAM_PER_PAGE, WORKSHOPS_PER_PAGE, WORKSHOP_SUGGESTIONS},
    db::repositories::{CategoryRepository, TaskRepository, TeamRepository, WorkshopRepository},
    error::AppResult,
    middleware::{
        auth::{CurrentUser, Guest},
        flash,
    },
    render::render_page,
    state::AppState,
    utils::pagination::paginate,
};

/// Page routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/login", get(login_page))
        .route("/register", get(register_page))
        .route("/contact", get(contact))
        .route("/about", get(about))
        .route("/list", get(workshop_list))
        .route("/list/{slug}", get(workshop_detail))
}

#[derive(Debug, Deserialize)]
struct HomeQuery {
    p: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct AboutQuery {
    #[serde(rename = "teamPage")]
    team_page: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct CatalogQuery {
    page: Option<i64>,
}

/// Dashboard: broadcast tasks plus the user's own tasks, paginated
async fn home(
    State(state): State<AppState>,
    session: Session,
    CurrentUser(user): CurrentUser,
    Query(query): Query<HomeQuery>,
) -> AppResult<Html<String>> {
    let primary = TaskRepository::list_primary(state.db()).await?;
    let total = TaskRepository::count_for_owner(state.db(), user.id).await?;
    let page = paginate(query.p.unwrap_or(1), total, TASKS_PER_PAGE);
    let mine =
        TaskRepository::list_for_owner(state.db(), user.id, page.per_page, page.offset).await?;
    let categories = CategoryRepository::list_all(state.db()).await?;

    let mut context = Context::new();
    context.insert("title", "Home");
    context.insert("primary", &primary);
    context.insert("mine", &mine);
    context.insert("categories", &categories);
    context.insert("pagination", &page);
    render_page(&state, &session, "home.html", context).await
}

async fn login_page(
    State(state): State<AppState>,
    session: Session,
    _guest: Guest,
) -> AppResult<Html<String>> {
    let mut context = Context::new();
    context.insert("title", "Login");
    render_page(&state, &session, "login.html", context).await
}

async fn register_page(
    State(state): State<AppState>,
    session: Session,
    _guest: Guest,
) -> AppResult<Html<String>> {
    let mut context = Context::new();
    context.insert("title", "Register");
    render_page(&state, &session, "register.html", context).await
}

async fn contact(
    State(state): State<AppState>,
    session: Session,
    _user: CurrentUser,
) -> AppResult<Html<String>> {
    let mut context = Context::new();
    context.insert("title", "Contact");
    render_page(&state, &session, "contact.html", context).await
}

/// About page: catalog metrics plus the paginated team roster
async fn about(
    State(state): State<AppState>,
    session: Session,
    _user: CurrentUser,
    Query(query): Query<AboutQuery>,
) -> AppResult<Html<String>> {
    let total_workshops = WorkshopRepository::count(state.db()).await?;
    let total_members = TeamRepository::count(state.db()).await?;

    let page = paginate(query.team_page.unwrap_or(1), total_members, TEAM_PER_PAGE);
    let team = TeamRepository::list_page(state.db(), page.per_page, page.offset).await?;

    let mut context = Context::new();
    context.insert("title", "About");
    context.insert("team", &team);
    context.insert(
        "metrics",
        &serde_json::json!({ "workshops": total_workshops, "members": total_members }),
    );
    context.insert("team_pagination", &page);
    render_page(&state, &session, "about.html", context).await
}

/// Workshop catalog, paginated
async fn workshop_list(
    State(state): State<AppState>,
    session: Session,
    _user: CurrentUser,
    Query(query): Query<CatalogQuery>,
) -> AppResult<Html<String>> {
    let total = WorkshopRepository::count(state.db()).await?;
    let page = paginate(query.page.unwrap_or(1), total, WORKSHOPS_PER_PAGE);
    let workshops = WorkshopRepository::list_page(state.db(), page.per_page, page.offset).await?;

    let mut context = Context::new();
    context.insert("title", "Workshops");
    context.insert("workshops", &workshops);
    context.insert("pagination", &page);
    render_page(&state, &session, "list.html", context).await
}

/// Workshop detail with a short suggestions list
async fn workshop_detail(
    State(state): State<AppState>,
    session: Session,
    _user: CurrentUser,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    let Some(workshop) = WorkshopRepository::find_by_slug(state.db(), &slug).await? else {
        flash::error(&session, "Workshop not found.").await;
        return Ok(Redirect::to("/list").into_response());
    };

    let suggestions =
        WorkshopRepository::suggestions(state.db(), &slug, WORKSHOP_SUGGESTIONS).await?;

    let mut context = Context::new();
    context.insert("title", &workshop.title);
    context.insert("workshop", &workshop);
    context.insert("suggestions", &suggestions);
    Ok(render_page(&state, &session, "list_detail.html", context)
        .await?
        .into_response())
}
