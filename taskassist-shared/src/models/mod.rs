/// Database models for TaskAssist
///
/// This module contains all database models and their query operations.
///
/// # Models
///
/// - `user`: User accounts and the sanitized `UserView` projection
/// - `project`: Projects with ownership and team visibility rules
/// - `task`: Tasks with filter predicates and partial updates
/// - `team`: Symmetric teammate pairs between two users

pub mod project;
pub mod task;
pub mod team;
pub mod user;
