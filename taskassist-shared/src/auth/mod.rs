/// Authentication primitives for TaskAssist
///
/// This module contains:
///
/// - `jwt`: Token creation and validation (HS256)
/// - `password`: Argon2id password hashing and verification

pub mod jwt;
pub mod password;
