/// API route handlers
///
/// - `health`: Health check
/// - `auth`: Registration, login, current user
/// - `users`: User search
/// - `projects`: Project CRUD and visibility queries
/// - `tasks`: Task CRUD, filters, and summary counts
/// - `team_members`: Teammate pair management

pub mod auth;
pub mod health;
pub mod projects;
pub mod tasks;
pub mod team_members;
pub mod users;
