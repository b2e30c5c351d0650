/// User search endpoint
///
/// # Endpoints
///
/// - `GET /api/users/search?q=` - Search users by username, email, or name

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use taskassist_shared::models::user::{User, UserView};

/// Matches are capped regardless of what the database would return
const SEARCH_LIMIT: i64 = 10;

/// Search query parameters
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search term (substring, case-insensitive)
    #[serde(default)]
    pub q: String,
}

/// Search users
///
/// Case-insensitive substring match across username, email, first name, and
/// last name. Returns at most 10 sanitized users; an empty query matches
/// everyone (still capped).
pub async fn search_users(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<UserView>>> {
    let users = User::search(&state.db, &params.q, SEARCH_LIMIT).await?;

    Ok(Json(users.into_iter().map(UserView::from).collect()))
}
