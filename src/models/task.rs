//! Task model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Task database model
///
/// A primary task is a broadcast entry: `user_id` is NULL and only
/// administrators may change it. A non-primary task has exactly one owner.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: i64,
    pub user_id: Option<i64>,
    pub category_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub is_primary: bool,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Task row joined with display context for listings
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskWithContext {
    pub id: i64,
    pub user_id: Option<i64>,
    pub category_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub is_primary: bool,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category_name: Option<String>,
    pub creator_email: Option<String>,
}
