//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default SQLite database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite://db/app.sqlite";

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

// =============================================================================
// SESSION DEFAULTS
// =============================================================================

/// Session cookie name
pub const SESSION_COOKIE_NAME: &str = "atelier.sid";

/// Default session expiry in hours of inactivity
pub const DEFAULT_SESSION_EXPIRY_HOURS: i64 = 8;

/// Session key holding the logged-in user projection
pub const SESSION_USER_KEY: &str = "user";

// =============================================================================
// SEED DEFAULTS
// =============================================================================

/// Default admin username created at boot
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Default admin email created at boot
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@admin.com";

/// Default admin password; override with SEED_ADMIN_PASSWORD in production
pub const DEFAULT_ADMIN_PASSWORD: &str = "wdf#2025";

// =============================================================================
// PAGINATION
// =============================================================================

/// Personal tasks shown per home page
pub const TASKS_PER_PAGE: i64 = 3;

/// Workshops shown per catalog page
pub const WORKSHOPS_PER_PAGE: i64 = 4;

/// Team members shown per about page
pub const TEAM_PER_PAGE: i64 = 4;

/// Related workshops shown on a detail page
pub const WORKSHOP_SUGGESTIONS: i64 = 3;

// =============================================================================
// SLUGS
// =============================================================================

/// Maximum slug length, suffix included
pub const SLUG_MAX_LENGTH: usize = 60;

/// Base used when a title slugifies to nothing
pub const SLUG_FALLBACK_BASE: &str = "workshop";

// =============================================================================
// UPLOADS
// =============================================================================

/// Allowed image extensions for avatar uploads
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg"];

/// Maximum account avatar size in bytes (12 MB)
pub const AVATAR_MAX_BYTES: usize = 12 * 1024 * 1024;

/// Maximum team member avatar size in bytes (4 MB)
pub const TEAM_AVATAR_MAX_BYTES: usize = 4 * 1024 * 1024;

/// Account avatars directory, relative to the public root
pub const AVATAR_UPLOAD_DIR: &str = "uploads/avatars";

/// Team avatars directory, relative to the public root
pub const TEAM_UPLOAD_DIR: &str = "uploads/team";

/// Request body cap; individual upload caps are enforced per destination
pub const MAX_REQUEST_BODY_BYTES: usize = 16 * 1024 * 1024;

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum display name length
pub const MAX_NAME_LENGTH: usize = 60;

/// Maximum nickname length
pub const MAX_NICKNAME_LENGTH: usize = 30;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Minimum workshop title length
pub const MIN_WORKSHOP_TITLE_LENGTH: usize = 3;

/// Minimum workshop summary length
pub const MIN_WORKSHOP_SUMMARY_LENGTH: usize = 10;

/// Minimum workshop description length
pub const MIN_WORKSHOP_DESCRIPTION_LENGTH: usize = 20;

/// Minimum team member name length
pub const MIN_TEAM_NAME_LENGTH: usize = 3;

/// Minimum team member role length
pub const MIN_TEAM_ROLE_LENGTH: usize = 2;

/// Minimum team member bio length
pub const MIN_TEAM_BIO_LENGTH: usize = 10;

// =============================================================================
// REDIRECTS
// =============================================================================

/// Allowed redirect targets for team management forms
pub const TEAM_REDIRECT_TARGETS: &[&str] = &["/admin/team", "/about"];

/// Allowed redirect targets for workshop management forms
pub const WORKSHOP_REDIRECT_TARGETS: &[&str] = &["/admin/workshops", "/list"];
