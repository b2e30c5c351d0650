/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /api/auth/register` - Register a new user
/// - `POST /api/auth/login` - Login and get a bearer token
/// - `GET  /api/auth/me` - Current authenticated user

use crate::{
    app::{AppState, AuthContext},
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use taskassist_shared::{
    auth::{jwt, password},
    models::user::{CreateUser, User, UserView},
};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Login name
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    pub username: String,

    /// Password
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    /// Optional email address
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    /// Optional first name
    pub first_name: Option<String>,

    /// Optional last name
    pub last_name: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response for register and login: the sanitized user plus a bearer token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserView,

    /// Bearer token (24h)
    pub token: String,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/register
/// Content-Type: application/json
///
/// {
///   "username": "sarah",
///   "password": "hunter22",
///   "email": "sarah@example.com"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed, or username already exists
/// - `500 Internal Server Error`: Server error
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate()?;

    // Check first for the common case; the unique constraint still catches
    // a race between two identical registrations.
    if User::find_by_username(&state.db, &req.username)
        .await?
        .is_some()
    {
        return Err(ApiError::BadRequest("Username already exists".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            password_hash,
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            profile_image_url: None,
        },
    )
    .await?;

    let claims = jwt::Claims::new(user.id);
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(Json(AuthResponse {
        user: user.into(),
        token,
    }))
}

/// Login with username and password
///
/// Failures never reveal whether the username or the password was wrong.
///
/// # Errors
///
/// - `400 Bad Request`: Invalid username or password
/// - `500 Internal Server Error`: Server error
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let user = User::find_by_username(&state.db, &req.username)
        .await?
        .ok_or_else(|| ApiError::BadRequest("Invalid username or password".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::BadRequest(
            "Invalid username or password".to_string(),
        ));
    }

    User::update_last_login(&state.db, user.id).await?;

    let claims = jwt::Claims::new(user.id);
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(Json(AuthResponse {
        user: user.into(),
        token,
    }))
}

/// Current authenticated user
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: Token refers to a deleted user
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<UserView>> {
    let user = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let req = RegisterRequest {
            username: "ab".to_string(),
            password: "short".to_string(),
            email: Some("not-an-email".to_string()),
            first_name: None,
            last_name: None,
        };

        let err = req.validate().unwrap_err();
        let fields = err.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn test_register_request_valid() {
        let req = RegisterRequest {
            username: "sarah".to_string(),
            password: "hunter22".to_string(),
            email: None,
            first_name: Some("Sarah".to_string()),
            last_name: None,
        };

        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_password_exactly_six_characters_is_valid() {
        let req = RegisterRequest {
            username: "sarah".to_string(),
            password: "sixsix".to_string(),
            email: None,
            first_name: None,
            last_name: None,
        };

        assert!(req.validate().is_ok());
    }
}
