//! Database repositories
//!
//! One repository per table; every statement is parameterized and atomic at
//! the single-statement level.

pub mod category_repo;
pub mod task_repo;
pub mod team_repo;
pub mod user_repo;
pub mod workshop_repo;

pub use category_repo::CategoryRepository;
pub use task_repo::TaskRepository;
pub use team_repo::TeamRepository;
pub use user_repo::{UserChanges, UserRepository};
pub use workshop_repo::WorkshopRepository;
