//! Workshop model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Workshop catalog entry
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Workshop {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub description: String,
    pub start_date: String,
    pub location: String,
    pub capacity: i64,
    pub created_at: DateTime<Utc>,
}

/// Abbreviated workshop row for suggestion lists
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkshopSummary {
    pub slug: String,
    pub title: String,
    pub summary: String,
}
