/// Project endpoints
///
/// # Endpoints
///
/// - `GET    /api/projects` - List all projects
/// - `GET    /api/projects/:id` - Get a project
/// - `GET    /api/projects/user/:user_id` - Projects owned by a user
/// - `GET    /api/projects/accessible/:user_id` - Owned plus public team projects
/// - `POST   /api/projects` - Create a project (201)
/// - `PATCH  /api/projects/:id` - Partial update
/// - `DELETE /api/projects/:id` - Delete (204)

use crate::{
    app::{AppState, AuthContext},
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use taskassist_shared::models::project::{CreateProject, Project, UpdateProject};
use uuid::Uuid;
use validator::Validate;

/// Create project request
///
/// `user_id` defaults to the authenticated caller when omitted; supplying a
/// different owner is accepted as given.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, message = "Project name must not be empty"))]
    pub name: String,

    #[validate(length(min = 1, message = "Color must not be empty"))]
    pub color: String,

    pub user_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
    pub is_public: Option<bool>,
}

/// List all projects
pub async fn list_projects(State(state): State<AppState>) -> ApiResult<Json<Vec<Project>>> {
    let projects = Project::list_all(&state.db).await?;
    Ok(Json(projects))
}

/// Get a project by ID
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Project>> {
    let project = Project::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(project))
}

/// List projects owned by a user
pub async fn list_user_projects(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Project>>> {
    let projects = Project::list_by_owner(&state.db, user_id).await?;
    Ok(Json(projects))
}

/// List projects accessible to a user
///
/// Union of owned projects and public projects on teams the user belongs
/// to. Private team projects are excluded.
pub async fn list_accessible_projects(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Project>>> {
    let projects = Project::list_accessible(&state.db, user_id).await?;
    Ok(Json(projects))
}

/// Create a project
pub async fn create_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    req.validate()?;

    let project = Project::create(
        &state.db,
        CreateProject {
            name: req.name,
            color: req.color,
            user_id: req.user_id.unwrap_or(auth.user_id),
            team_id: req.team_id,
            is_public: req.is_public,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(project)))
}

/// Partially update a project
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProject>,
) -> ApiResult<Json<Project>> {
    let project = Project::update(&state.db, id, req)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(project))
}

/// Delete a project
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = Project::delete(&state.db, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_project_request_rejects_empty_name() {
        let req = CreateProjectRequest {
            name: "".to_string(),
            color: "#ff6b6b".to_string(),
            user_id: None,
            team_id: None,
            is_public: None,
        };

        let err = req.validate().unwrap_err();
        assert!(err.field_errors().contains_key("name"));
    }

    #[test]
    fn test_create_project_request_valid() {
        let req = CreateProjectRequest {
            name: "Website redesign".to_string(),
            color: "#ff6b6b".to_string(),
            user_id: None,
            team_id: Some(Uuid::new_v4()),
            is_public: Some(true),
        };

        assert!(req.validate().is_ok());
    }
}
