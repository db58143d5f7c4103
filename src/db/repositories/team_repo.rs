//! Team roster repository

use sqlx::SqlitePool;

use crate::{error::AppResult, models::TeamMember};

/// Repository for team member database operations
pub struct TeamRepository;

impl TeamRepository {
    /// List one roster page, alphabetically
    pub async fn list_page(
        pool: &SqlitePool,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<TeamMember>> {
        let members = sqlx::query_as::<_, TeamMember>(
            r#"SELECT * FROM team_members ORDER BY name ASC LIMIT ?1 OFFSET ?2"#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(members)
    }

    /// List every member for the admin panel, newest first
    pub async fn list_all(pool: &SqlitePool) -> AppResult<Vec<TeamMember>> {
        let members = sqlx::query_as::<_, TeamMember>(
            r#"SELECT * FROM team_members ORDER BY created_at DESC"#,
        )
        .fetch_all(pool)
        .await?;

        Ok(members)
    }

    /// Count all members
    pub async fn count(pool: &SqlitePool) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM team_members"#)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Find member by ID
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<TeamMember>> {
        let member = sqlx::query_as::<_, TeamMember>(r#"SELECT * FROM team_members WHERE id = ?1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(member)
    }

    /// Create a member
    pub async fn create(
        pool: &SqlitePool,
        name: &str,
        role: &str,
        bio: &str,
        avatar_path: Option<&str>,
    ) -> AppResult<()> {
        sqlx::query(
            r#"INSERT INTO team_members (name, role, bio, avatar_path) VALUES (?1, ?2, ?3, ?4)"#,
        )
        .bind(name)
        .bind(role)
        .bind(bio)
        .bind(avatar_path)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Update a member; returns the changed-row count
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        name: &str,
        role: &str,
        bio: &str,
        avatar_path: Option<&str>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"UPDATE team_members SET name = ?2, role = ?3, bio = ?4, avatar_path = ?5 WHERE id = ?1"#,
        )
        .bind(id)
        .bind(name)
        .bind(role)
        .bind(bio)
        .bind(avatar_path)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete a member; returns the changed-row count
    pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<u64> {
        let result = sqlx::query(r#"DELETE FROM team_members WHERE id = ?1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
