/// Task endpoints
///
/// # Endpoints
///
/// - `GET    /api/tasks?filter=&user_id=` - List tasks (all, or by owner)
/// - `GET    /api/tasks/summary` - Global task counts
/// - `GET    /api/tasks/:id` - Get a task
/// - `GET    /api/tasks/user/:user_id?filter=` - Tasks owned by a user
/// - `GET    /api/tasks/assigned/:user_id?filter=` - Tasks assigned to a user
/// - `POST   /api/tasks` - Create a task (201)
/// - `PATCH  /api/tasks/:id` - Partial update
/// - `DELETE /api/tasks/:id` - Delete (204)
///
/// The `filter` parameter accepts `completed`, `pending`, or `starred`;
/// anything else (including absence) means all tasks.

use crate::{
    app::{AppState, AuthContext},
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use taskassist_shared::models::task::{
    CreateTask, Task, TaskFilter, TaskPriority, TaskSummary, UpdateTask,
};
use uuid::Uuid;
use validator::Validate;

/// List query parameters
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// "completed", "pending", or "starred"; anything else means all
    pub filter: Option<String>,

    /// Scope the list to this owner
    pub user_id: Option<Uuid>,
}

/// Filter-only query parameters
#[derive(Debug, Deserialize)]
pub struct FilterParams {
    pub filter: Option<String>,
}

/// Create task request
///
/// `user_id` defaults to the authenticated caller when omitted. Flags and
/// priority left out get their creation-time defaults (false, false,
/// medium).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,

    pub description: Option<String>,
    pub completed: Option<bool>,
    pub starred: Option<bool>,
    pub priority: Option<TaskPriority>,
    pub project_id: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
    pub assigned_to: Option<Uuid>,
    pub assigned_by: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
}

/// List tasks
///
/// With `user_id` the list is scoped to that owner; without it all tasks
/// are returned. `filter` applies either way.
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Task>>> {
    let filter = TaskFilter::parse(params.filter.as_deref());

    let tasks = match params.user_id {
        Some(user_id) => Task::list_by_owner(&state.db, user_id, filter).await?,
        None => Task::list(&state.db, filter).await?,
    };

    Ok(Json(tasks))
}

/// Global task counts
///
/// Three counts computed at request time: total, completed, and pending.
pub async fn task_summary(State(state): State<AppState>) -> ApiResult<Json<TaskSummary>> {
    let summary = Task::summary(&state.db).await?;
    Ok(Json(summary))
}

/// Get a task by ID
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// List tasks owned by a user
pub async fn list_user_tasks(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<FilterParams>,
) -> ApiResult<Json<Vec<Task>>> {
    let filter = TaskFilter::parse(params.filter.as_deref());
    let tasks = Task::list_by_owner(&state.db, user_id, filter).await?;

    Ok(Json(tasks))
}

/// List tasks assigned to a user
pub async fn list_assigned_tasks(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<FilterParams>,
) -> ApiResult<Json<Vec<Task>>> {
    let filter = TaskFilter::parse(params.filter.as_deref());
    let tasks = Task::list_assigned_to(&state.db, user_id, filter).await?;

    Ok(Json(tasks))
}

/// Create a task
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate()?;

    let task = Task::create(
        &state.db,
        CreateTask {
            title: req.title,
            description: req.description,
            completed: req.completed,
            starred: req.starred,
            priority: req.priority,
            project_id: req.project_id,
            due_date: req.due_date,
            assigned_to: req.assigned_to,
            assigned_by: req.assigned_by,
            user_id: req.user_id.unwrap_or(auth.user_id),
            team_id: req.team_id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Partially update a task
///
/// Absent fields are left unchanged; present fields overwrite.
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTask>,
) -> ApiResult<Json<Task>> {
    let task = Task::update(&state.db, id, req)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// Delete a task
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = Task::delete(&state.db, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_task_request_rejects_empty_title() {
        let req: CreateTaskRequest = serde_json::from_value(json!({
            "title": "",
        }))
        .unwrap();

        let err = req.validate().unwrap_err();
        assert!(err.field_errors().contains_key("title"));
    }

    #[test]
    fn test_create_task_request_minimal() {
        let req: CreateTaskRequest = serde_json::from_value(json!({
            "title": "Ship v1",
        }))
        .unwrap();

        assert!(req.validate().is_ok());
        assert!(req.user_id.is_none());
        assert!(req.priority.is_none());
    }

    #[test]
    fn test_list_params_tolerate_unknown_filter() {
        let params: ListParams = serde_json::from_value(json!({
            "filter": "everything",
        }))
        .unwrap();

        assert_eq!(TaskFilter::parse(params.filter.as_deref()), None);
    }
}
