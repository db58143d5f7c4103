//! Admin panel form DTOs

use serde::Deserialize;

use crate::{
    models::Role,
    services::{admin_service::AdminUserInput, workshop_service::WorkshopInput},
};

/// Account form used by both create and update in the panel
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AdminUserForm {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub name: String,
    pub nickname: String,
    pub role: String,
    pub password: String,
}

impl From<AdminUserForm> for AdminUserInput {
    fn from(form: AdminUserForm) -> Self {
        AdminUserInput {
            username: form.username,
            email: form.email,
            phone: form.phone,
            name: form.name,
            nickname: form.nickname,
            role: Role::parse_or_user(&form.role),
            password: form.password,
        }
    }
}

/// Workshop form; `capacity` stays raw until service-side validation
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WorkshopForm {
    pub title: String,
    pub summary: String,
    pub description: String,
    pub start_date: String,
    pub location: String,
    pub capacity: String,
    pub slug: String,
    pub redirect_to: Option<String>,
}

impl From<WorkshopForm> for WorkshopInput {
    fn from(form: WorkshopForm) -> Self {
        WorkshopInput {
            title: form.title,
            summary: form.summary,
            description: form.description,
            start_date: form.start_date,
            location: form.location,
            capacity: form.capacity,
            slug: form.slug,
        }
    }
}

/// Category form
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CategoryForm {
    pub name: String,
}

/// Bare form for delete buttons that carry only a bounce-back target
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RedirectForm {
    pub redirect_to: Option<String>,
}
