//! Team member model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Team roster entry shown on the about page
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeamMember {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub bio: String,
    pub avatar_path: Option<String>,
    pub created_at: DateTime<Utc>,
}
