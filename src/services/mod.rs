//! Business logic services

pub mod access;
pub mod account_service;
pub mod admin_service;
pub mod auth_service;
pub mod category_service;
pub mod task_service;
pub mod team_service;
pub mod workshop_service;

pub use account_service::AccountService;
pub use admin_service::AdminService;
pub use auth_service::AuthService;
pub use category_service::CategoryService;
pub use task_service::TaskService;
pub use team_service::TeamService;
pub use workshop_service::WorkshopService;
