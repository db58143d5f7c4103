//! Category model

use serde::Serialize;
use sqlx::FromRow;

/// Task category, unique by name
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}
