//! Workshop catalog management
//!
//! Admin-managed catalog entries with auto-assigned, collision-resolved
//! slugs.

use sqlx::SqlitePool;

use crate::{
    constants::{
        MIN_WORKSHOP_DESCRIPTION_LENGTH, MIN_WORKSHOP_SUMMARY_LENGTH, MIN_WORKSHOP_TITLE_LENGTH,
        SLUG_FALLBACK_BASE,
    },
    db::repositories::WorkshopRepository,
    error::{AppError, AppResult},
    utils::slug,
};

/// Workshop fields submitted from the admin panel; `capacity` arrives as the
/// raw form value and is parsed during validation
#[derive(Debug, Default)]
pub struct WorkshopInput {
    pub title: String,
    pub summary: String,
    pub description: String,
    pub start_date: String,
    pub location: String,
    pub capacity: String,
    pub slug: String,
}

struct ValidWorkshop {
    title: String,
    summary: String,
    description: String,
    start_date: String,
    location: String,
    capacity: i64,
    slug_base: String,
}

/// Workshop service for catalog management
pub struct WorkshopService;

impl WorkshopService {
    /// Create a catalog entry with a unique slug derived from the title
    pub async fn create(pool: &SqlitePool, input: WorkshopInput) -> AppResult<()> {
        let valid = validate(input)?;
        let slug = Self::unique_slug(pool, &valid.slug_base, None).await?;

        WorkshopRepository::create(
            pool,
            &slug,
            &valid.title,
            &valid.summary,
            &valid.description,
            &valid.start_date,
            &valid.location,
            valid.capacity,
        )
        .await
    }

    /// Update a catalog entry, re-deriving the slug while ignoring the
    /// entry's own id during collision checks
    pub async fn update(pool: &SqlitePool, id: i64, input: WorkshopInput) -> AppResult<()> {
        let valid = validate(input)?;
        let slug = Self::unique_slug(pool, &valid.slug_base, Some(id)).await?;

        let changed = WorkshopRepository::update(
            pool,
            id,
            &slug,
            &valid.title,
            &valid.summary,
            &valid.description,
            &valid.start_date,
            &valid.location,
            valid.capacity,
        )
        .await?;

        if changed == 0 {
            return Err(AppError::NotFound("Workshop".to_string()));
        }
        Ok(())
    }

    /// Delete a catalog entry
    pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<()> {
        let changed = WorkshopRepository::delete(pool, id).await?;
        if changed == 0 {
            return Err(AppError::NotFound("Workshop".to_string()));
        }
        Ok(())
    }

    /// Find a free slug by appending `-2`, `-3`, … to the base on collision.
    ///
    /// The base is truncated so the suffixed result stays within the length
    /// cap. Terminates because the numeric suffix grows without bound while
    /// the set of taken slugs is finite.
    pub async fn unique_slug(
        pool: &SqlitePool,
        base: &str,
        exclude_id: Option<i64>,
    ) -> AppResult<String> {
        let base = if base.is_empty() { SLUG_FALLBACK_BASE } else { base };

        let mut candidate = base.to_string();
        let mut attempt = 1u32;
        loop {
            if !WorkshopRepository::slug_exists(pool, &candidate, exclude_id).await? {
                return Ok(candidate);
            }
            attempt += 1;
            candidate = slug::with_suffix(base, attempt);
        }
    }
}

fn validate(input: WorkshopInput) -> AppResult<ValidWorkshop> {
    let title = input.title.trim().to_string();
    let summary = input.summary.trim().to_string();
    let description = input.description.trim().to_string();
    let start_date = input.start_date.trim().to_string();
    let location = input.location.trim().to_string();
    let capacity = input.capacity.trim().parse::<i64>().unwrap_or(0);
    let slug_input = input.slug.trim();

    let mut errors: Vec<&str> = Vec::new();
    if title.len() < MIN_WORKSHOP_TITLE_LENGTH {
        errors.push("Title must be at least 3 characters.");
    }
    if summary.len() < MIN_WORKSHOP_SUMMARY_LENGTH {
        errors.push("Summary must be at least 10 characters.");
    }
    if description.len() < MIN_WORKSHOP_DESCRIPTION_LENGTH {
        errors.push("Description must be at least 20 characters.");
    }
    if start_date.is_empty() {
        errors.push("Start date is required.");
    }
    if location.is_empty() {
        errors.push("Location is required.");
    }
    if capacity <= 0 {
        errors.push("Capacity must be a positive number.");
    }
    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }

    // prefer an explicit slug, fall back to the title
    let mut slug_base = slug::slugify(slug_input);
    if slug_base.is_empty() {
        slug_base = slug::slugify(&title);
    }

    Ok(ValidWorkshop {
        title,
        summary,
        description,
        start_date,
        location,
        capacity,
        slug_base,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::memory_pool;

    fn input(title: &str, slug: &str) -> WorkshopInput {
        WorkshopInput {
            title: title.to_string(),
            summary: "A ten character summary.".to_string(),
            description: "A description long enough to pass validation easily.".to_string(),
            start_date: "May 5, 2025".to_string(),
            location: "Lab 1".to_string(),
            capacity: "25".to_string(),
            slug: slug.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_derives_slug_from_title() {
        let pool = memory_pool().await;
        WorkshopService::create(&pool, input("Intro to HTML", "")).await.unwrap();

        let found = WorkshopRepository::find_by_slug(&pool, "intro-to-html")
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_collision_resolution_is_deterministic() {
        let pool = memory_pool().await;
        WorkshopService::create(&pool, input("HTML", "")).await.unwrap();
        WorkshopService::create(&pool, input("HTML", "")).await.unwrap();
        WorkshopService::create(&pool, input("HTML", "")).await.unwrap();

        // existing {"html", "html-2"} and the title "HTML" yield "html-3"
        assert!(WorkshopRepository::find_by_slug(&pool, "html").await.unwrap().is_some());
        assert!(WorkshopRepository::find_by_slug(&pool, "html-2").await.unwrap().is_some());
        assert!(WorkshopRepository::find_by_slug(&pool, "html-3").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_with_unchanged_title_keeps_slug() {
        let pool = memory_pool().await;
        WorkshopService::create(&pool, input("HTML", "")).await.unwrap();
        let existing = WorkshopRepository::find_by_slug(&pool, "html")
            .await
            .unwrap()
            .unwrap();

        // resubmitting the same title must not bump the suffix
        WorkshopService::update(&pool, existing.id, input("HTML", "")).await.unwrap();
        let after = WorkshopRepository::find_by_slug(&pool, "html").await.unwrap().unwrap();
        assert_eq!(after.id, existing.id);
    }

    #[tokio::test]
    async fn test_validation_failures_are_aggregated() {
        let pool = memory_pool().await;
        let bad = WorkshopInput {
            title: "ab".to_string(),
            summary: "short".to_string(),
            description: "short".to_string(),
            start_date: String::new(),
            location: String::new(),
            capacity: "-3".to_string(),
            slug: String::new(),
        };
        let err = WorkshopService::create(&pool, bad).await.unwrap_err();
        let message = err.flash_message();
        assert!(message.contains("Title must be at least 3 characters."));
        assert!(message.contains("Capacity must be a positive number."));
        assert_eq!(WorkshopRepository::count(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_empty_slug_base_falls_back() {
        let pool = memory_pool().await;
        // a title of pure punctuation slugifies to nothing, so the fallback base is used
        let titled_symbols = input("!!!!", "");
        WorkshopService::create(&pool, titled_symbols).await.unwrap();
        assert!(WorkshopRepository::find_by_slug(&pool, "workshop").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_missing_workshop_reports_not_found() {
        let pool = memory_pool().await;
        let err = WorkshopService::update(&pool, 404, input("HTML", "")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
