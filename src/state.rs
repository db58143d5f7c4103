//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use sqlx::SqlitePool;
use tera::Tera;

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Database connection pool
    pub db: SqlitePool,

    /// Template environment loaded at startup
    pub templates: Tera,

    /// Application configuration
    pub config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(db: SqlitePool, templates: Tera, config: Config) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                db,
                templates,
                config,
            }),
        }
    }

    /// Get a reference to the database pool
    pub fn db(&self) -> &SqlitePool {
        &self.inner.db
    }

    /// Get a reference to the template environment
    pub fn templates(&self) -> &Tera {
        &self.inner.templates
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
