//! Task form DTOs

use serde::Deserialize;

/// Create-task form; `category_id` is the raw select value ("" means none)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub category_id: String,
}

/// Update-task form; `completed` is a checkbox and absent when unchecked
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateTaskForm {
    pub title: String,
    pub description: String,
    pub completed: Option<String>,
    pub category_id: String,
}
