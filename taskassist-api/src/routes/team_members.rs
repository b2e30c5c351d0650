/// Teammate pair endpoints
///
/// A team membership is a symmetric pair: adding (A, B) makes A a teammate
/// of B and B a teammate of A. Adding an existing pair in either order
/// returns the existing relationship instead of creating a duplicate.
///
/// # Endpoints
///
/// - `GET    /api/team-members/user/:user_id` - Teammates of a user
/// - `POST   /api/team-members` - Add a pair (201)
/// - `DELETE /api/team-members/:id` - Remove a pair (by relationship ID, 204)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use taskassist_shared::models::{
    team::Team,
    user::{User, UserView},
};
use uuid::Uuid;

/// Add pair request
#[derive(Debug, Deserialize)]
pub struct AddTeamMemberRequest {
    pub user_id_1: Uuid,
    pub user_id_2: Uuid,
}

/// Teammates of a user
pub async fn list_team_members(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<Vec<UserView>>> {
    let members = Team::members_of(&state.db, user_id).await?;

    Ok(Json(members.into_iter().map(UserView::from).collect()))
}

/// Add a teammate pair
///
/// Idempotent: posting the same pair twice (in either order) returns the
/// existing relationship.
///
/// # Errors
///
/// - `400 Bad Request`: The two user IDs are the same
/// - `404 Not Found`: Either user doesn't exist
pub async fn add_team_member(
    State(state): State<AppState>,
    Json(req): Json<AddTeamMemberRequest>,
) -> ApiResult<(StatusCode, Json<Team>)> {
    if req.user_id_1 == req.user_id_2 {
        return Err(ApiError::BadRequest(
            "Cannot add yourself as a team member".to_string(),
        ));
    }

    for user_id in [req.user_id_1, req.user_id_2] {
        if User::find_by_id(&state.db, user_id).await?.is_none() {
            return Err(ApiError::NotFound("User not found".to_string()));
        }
    }

    let team = Team::add_pair(&state.db, req.user_id_1, req.user_id_2).await?;

    Ok((StatusCode::CREATED, Json(team)))
}

/// Remove a teammate pair by relationship ID
///
/// # Errors
///
/// - `404 Not Found`: No relationship with that ID exists
pub async fn remove_team_member(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = Team::delete(&state.db, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Team member not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
