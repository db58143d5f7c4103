//! Boot-time schema seeding
//!
//! Ensures the default admin account, the starter categories, and the sample
//! catalog content exist before the listener accepts traffic. The workshop
//! and team lists are synced to the seed data: missing rows are inserted,
//! existing rows refreshed, and rows that fell out of the list removed.

use sqlx::SqlitePool;

use crate::{
    config::SeedConfig,
    error::AppResult,
    models::Role,
    services::auth_service,
};

const CATEGORY_SEEDS: &[&str] = &[
    "General", "School", "Work", "Personal", "Urgent", "Health", "Finance", "Shopping", "Travel",
    "Learning", "Family",
];

struct WorkshopSeed {
    slug: &'static str,
    title: &'static str,
    summary: &'static str,
    description: &'static str,
    start_date: &'static str,
    location: &'static str,
    capacity: i64,
}

const WORKSHOP_SEEDS: &[WorkshopSeed] = &[
    WorkshopSeed {
        slug: "html",
        title: "HTML",
        summary: "Build your first web page.",
        description: "Learn the building blocks of the web including tags, images, and links.",
        start_date: "February 17, 2025",
        location: "Lab 1",
        capacity: 28,
    },
    WorkshopSeed {
        slug: "css",
        title: "CSS",
        summary: "Flexbox and Grid.",
        description: "Understand how Flexbox and CSS Grid help you build layouts.",
        start_date: "February 24, 2025",
        location: "Lab 1",
        capacity: 26,
    },
    WorkshopSeed {
        slug: "js",
        title: "JavaScript",
        summary: "Make pages interactive.",
        description: "Covers variables, functions, arrays, and DOM events.",
        start_date: "March 3, 2025",
        location: "Room 3",
        capacity: 30,
    },
    WorkshopSeed {
        slug: "http-basics",
        title: "HTTP Basics",
        summary: "Requests and responses.",
        description: "Methods, status codes, headers, and how forms travel over the wire.",
        start_date: "March 10, 2025",
        location: "Room 4",
        capacity: 27,
    },
    WorkshopSeed {
        slug: "routing",
        title: "Routing",
        summary: "Structure a web service.",
        description: "Route groups, path parameters, and redirect flows in practice.",
        start_date: "March 17, 2025",
        location: "Room 4",
        capacity: 25,
    },
    WorkshopSeed {
        slug: "templating",
        title: "Templating",
        summary: "Server-rendered views.",
        description: "Link server data to dynamic templates with layouts and partials.",
        start_date: "March 24, 2025",
        location: "Studio 2",
        capacity: 29,
    },
    WorkshopSeed {
        slug: "sqlite",
        title: "SQLite",
        summary: "Store web data.",
        description: "Create tables, run joins, and connect SQLite to a web application.",
        start_date: "March 31, 2025",
        location: "Lab 2",
        capacity: 30,
    },
    WorkshopSeed {
        slug: "auth",
        title: "Authentication",
        summary: "Sessions and hashing.",
        description: "Implement secure logins with salted password hashing step by step.",
        start_date: "April 7, 2025",
        location: "Lab 2",
        capacity: 28,
    },
    WorkshopSeed {
        slug: "ui-design",
        title: "UI Design",
        summary: "Responsive UI.",
        description: "Use modern CSS to make layouts that work on every screen size.",
        start_date: "April 14, 2025",
        location: "Design Lab",
        capacity: 27,
    },
    WorkshopSeed {
        slug: "deploy",
        title: "Deploy",
        summary: "Ready to publish.",
        description: "Review configuration, error handling, and backups before you publish.",
        start_date: "April 21, 2025",
        location: "Online",
        capacity: 30,
    },
];

struct TeamSeed {
    name: &'static str,
    role: &'static str,
    bio: &'static str,
}

const TEAM_SEEDS: &[TeamSeed] = &[
    TeamSeed {
        name: "Alma Reyes",
        role: "Full Stack Developer",
        bio: "Builds features end-to-end, from schema to stylesheet.",
    },
    TeamSeed {
        name: "Dario Kovac",
        role: "Frontend",
        bio: "Creates interfaces with modern CSS and careful markup.",
    },
    TeamSeed {
        name: "Imani Walker",
        role: "Backend",
        bio: "Designs APIs and data models for the team.",
    },
    TeamSeed {
        name: "Sofia Lindqvist",
        role: "Database",
        bio: "Writes the queries and keeps the schemas honest.",
    },
    TeamSeed {
        name: "Mateo Fontaine",
        role: "DevOps Engineer",
        bio: "Keeps the pipelines green and the deploys boring.",
    },
    TeamSeed {
        name: "Noor Haddad",
        role: "Full Stack Developer",
        bio: "Works with designers and engineers to ship complete features.",
    },
    TeamSeed {
        name: "Petra Novak",
        role: "Frontend",
        bio: "Makes the UI responsive on every device.",
    },
    TeamSeed {
        name: "Yusuf Demir",
        role: "Backend",
        bio: "Adds secure endpoints and sensible defaults.",
    },
    TeamSeed {
        name: "Greta Olsen",
        role: "Database",
        bio: "Tunes indexes and untangles joins.",
    },
    TeamSeed {
        name: "Ravi Menon",
        role: "DevOps Engineer",
        bio: "Automates everything worth automating.",
    },
];

/// Ensure the admin account, starter categories, and sample content exist
pub async fn ensure_seed_data(pool: &SqlitePool, seed: &SeedConfig) -> AppResult<()> {
    ensure_admin(pool, seed).await?;
    ensure_categories(pool).await?;
    sync_workshops(pool).await?;
    sync_team(pool).await?;
    Ok(())
}

async fn ensure_admin(pool: &SqlitePool, seed: &SeedConfig) -> AppResult<()> {
    let existing: Option<i64> =
        sqlx::query_scalar(r#"SELECT id FROM users WHERE username = ?1 OR email = ?2"#)
            .bind(&seed.admin_username)
            .bind(&seed.admin_email)
            .fetch_optional(pool)
            .await?;

    let password_hash = auth_service::hash_password(&seed.admin_password)?;

    match existing {
        None => {
            sqlx::query(
                r#"
                INSERT INTO users (username, email, phone, name, nickname, password_hash, role)
                VALUES (?1, ?2, '0000000000', 'Administrator', ?3, ?4, ?5)
                "#,
            )
            .bind(&seed.admin_username)
            .bind(&seed.admin_email)
            .bind(&seed.admin_username)
            .bind(&password_hash)
            .bind(Role::Admin)
            .execute(pool)
            .await?;
            tracing::info!(username = %seed.admin_username, "Seeded admin account");
        }
        Some(id) => {
            // Refresh a stale admin row in place so the seeded credentials keep working
            sqlx::query(
                r#"
                UPDATE users
                SET username = ?2, email = ?3,
                    name = COALESCE(name, 'Administrator'),
                    nickname = COALESCE(nickname, ?2),
                    password_hash = ?4, role = ?5
                WHERE id = ?1
                "#,
            )
            .bind(id)
            .bind(&seed.admin_username)
            .bind(&seed.admin_email)
            .bind(&password_hash)
            .bind(Role::Admin)
            .execute(pool)
            .await?;
            tracing::info!("Ensured admin credentials are up to date");
        }
    }

    Ok(())
}

async fn ensure_categories(pool: &SqlitePool) -> AppResult<()> {
    let existing: Vec<String> = sqlx::query_scalar(r#"SELECT name FROM categories"#)
        .fetch_all(pool)
        .await?;

    let mut inserted = 0;
    for name in CATEGORY_SEEDS {
        if !existing.iter().any(|n| n == name) {
            sqlx::query(r#"INSERT INTO categories (name) VALUES (?1)"#)
                .bind(name)
                .execute(pool)
                .await?;
            inserted += 1;
        }
    }
    if inserted > 0 {
        tracing::info!(inserted, "Seeded categories");
    }

    Ok(())
}

async fn sync_workshops(pool: &SqlitePool) -> AppResult<()> {
    let mut inserted = 0;
    let mut refreshed = 0;

    for w in WORKSHOP_SEEDS {
        let existing: Option<i64> =
            sqlx::query_scalar(r#"SELECT id FROM workshops WHERE slug = ?1"#)
                .bind(w.slug)
                .fetch_optional(pool)
                .await?;

        match existing {
            Some(id) => {
                sqlx::query(
                    r#"
                    UPDATE workshops
                    SET title = ?2, summary = ?3, description = ?4,
                        start_date = ?5, location = ?6, capacity = ?7
                    WHERE id = ?1
                    "#,
                )
                .bind(id)
                .bind(w.title)
                .bind(w.summary)
                .bind(w.description)
                .bind(w.start_date)
                .bind(w.location)
                .bind(w.capacity)
                .execute(pool)
                .await?;
                refreshed += 1;
            }
            None => {
                sqlx::query(
                    r#"
                    INSERT INTO workshops (slug, title, summary, description, start_date, location, capacity)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                    "#,
                )
                .bind(w.slug)
                .bind(w.title)
                .bind(w.summary)
                .bind(w.description)
                .bind(w.start_date)
                .bind(w.location)
                .bind(w.capacity)
                .execute(pool)
                .await?;
                inserted += 1;
            }
        }
    }

    let placeholders = WORKSHOP_SEEDS
        .iter()
        .map(|_| "?")
        .collect::<Vec<_>>()
        .join(", ");
    let removal_sql = format!("DELETE FROM workshops WHERE slug NOT IN ({placeholders})");
    let mut removal = sqlx::query(&removal_sql);
    for w in WORKSHOP_SEEDS {
        removal = removal.bind(w.slug);
    }
    removal.execute(pool).await?;

    if inserted > 0 {
        tracing::info!(inserted, "Seeded sample workshops");
    }
    if refreshed > 0 {
        tracing::info!(refreshed, "Refreshed workshops from seed data");
    }

    Ok(())
}

async fn sync_team(pool: &SqlitePool) -> AppResult<()> {
    let mut inserted = 0;
    let mut refreshed = 0;

    for member in TEAM_SEEDS {
        let existing: Option<i64> =
            sqlx::query_scalar(r#"SELECT id FROM team_members WHERE name = ?1"#)
                .bind(member.name)
                .fetch_optional(pool)
                .await?;

        match existing {
            Some(id) => {
                sqlx::query(r#"UPDATE team_members SET role = ?2, bio = ?3 WHERE id = ?1"#)
                    .bind(id)
                    .bind(member.role)
                    .bind(member.bio)
                    .execute(pool)
                    .await?;
                refreshed += 1;
            }
            None => {
                sqlx::query(r#"INSERT INTO team_members (name, role, bio) VALUES (?1, ?2, ?3)"#)
                    .bind(member.name)
                    .bind(member.role)
                    .bind(member.bio)
                    .execute(pool)
                    .await?;
                inserted += 1;
            }
        }
    }

    let placeholders = TEAM_SEEDS.iter().map(|_| "?").collect::<Vec<_>>().join(", ");
    let removal_sql = format!("DELETE FROM team_members WHERE name NOT IN ({placeholders})");
    let mut removal = sqlx::query(&removal_sql);
    for member in TEAM_SEEDS {
        removal = removal.bind(member.name);
    }
    removal.execute(pool).await?;

    if inserted > 0 {
        tracing::info!(inserted, "Seeded team members");
    }
    if refreshed > 0 {
        tracing::info!(refreshed, "Refreshed team members from seed data");
    }

    Ok(())
}
