//! # TaskAssist Shared Library
//!
//! This crate contains the database layer, domain models, and authentication
//! primitives shared by the TaskAssist API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their query operations
//! - `auth`: Password hashing and JWT tokens
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the TaskAssist shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
