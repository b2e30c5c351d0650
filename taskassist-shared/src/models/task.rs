/// Task model and database operations
///
/// Tasks are the core entity of TaskAssist. Each task belongs to an owning
/// user, may reference a project, and may be assigned between users. Boolean
/// flags and priority are never null after creation: defaults are applied
/// exactly once when the row is inserted.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_priority AS ENUM ('low', 'medium', 'high');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     starred BOOLEAN NOT NULL DEFAULT FALSE,
///     priority task_priority NOT NULL DEFAULT 'medium',
///     project_id UUID,
///     due_date TIMESTAMPTZ,
///     assigned_to UUID,
///     assigned_by UUID,
///     user_id UUID NOT NULL,
///     team_id UUID,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

const TASK_COLUMNS: &str = "id, title, description, completed, starred, priority, project_id, \
     due_date, assigned_to, assigned_by, user_id, team_id, created_at, updated_at";

/// Task priority level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,

    /// Default priority for new tasks
    #[default]
    Medium,

    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

/// Filter selecting which tasks a list query returns
///
/// `completed` and `pending` partition tasks by the completion flag;
/// `starred` selects starred tasks regardless of completion. Absent or
/// unrecognized filter values mean "all tasks".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    Completed,
    Pending,
    Starred,
}

impl TaskFilter {
    /// Parses a filter from an optional query string value
    ///
    /// `None` and unrecognized values both map to `None` (no filtering),
    /// matching the lenient behavior of the HTTP surface.
    pub fn parse(value: Option<&str>) -> Option<Self> {
        match value {
            Some("completed") => Some(TaskFilter::Completed),
            Some("pending") => Some(TaskFilter::Pending),
            Some("starred") => Some(TaskFilter::Starred),
            _ => None,
        }
    }

    /// SQL predicate implementing this filter
    pub fn predicate(&self) -> &'static str {
        match self {
            TaskFilter::Completed => "completed = TRUE",
            TaskFilter::Pending => "completed = FALSE",
            TaskFilter::Starred => "starred = TRUE",
        }
    }
}

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Task title
    pub title: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Completion flag (never null; defaults to false at creation)
    pub completed: bool,

    /// Starred flag (never null; defaults to false at creation)
    pub starred: bool,

    /// Priority (never null; defaults to medium at creation)
    pub priority: TaskPriority,

    /// Project this task belongs to, if any
    pub project_id: Option<Uuid>,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// User the task is assigned to, if any
    pub assigned_to: Option<Uuid>,

    /// User who made the assignment, if any
    pub assigned_by: Option<Uuid>,

    /// Owning user
    pub user_id: Uuid,

    /// Team context, if any
    pub team_id: Option<Uuid>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
///
/// `completed`, `starred`, and `priority` may be omitted; defaults are
/// applied once at insertion and the stored row never carries nulls for
/// these fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub starred: Option<bool>,
    pub priority: Option<TaskPriority>,
    pub project_id: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
    pub assigned_to: Option<Uuid>,
    pub assigned_by: Option<Uuid>,
    pub user_id: Uuid,
    pub team_id: Option<Uuid>,
}

/// Partial update for a task
///
/// Every field is an explicit present/absent option: `None` means "leave
/// unchanged". Clearing a field to null via update is not supported.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub project_id: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<TaskPriority>,
    pub starred: Option<bool>,
    pub assigned_to: Option<Uuid>,
    pub assigned_by: Option<Uuid>,
    pub team_id: Option<Uuid>,
}

/// Global aggregate task counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub total: i64,
    pub completed: i64,
    pub pending: i64,
}

impl Task {
    /// Creates a new task, applying creation-time defaults
    ///
    /// `completed` defaults to false, `starred` to false, and `priority` to
    /// medium when absent from the input. Timestamps are set by the
    /// database.
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            INSERT INTO tasks (title, description, completed, starred, priority,
                               project_id, due_date, assigned_to, assigned_by, user_id, team_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {TASK_COLUMNS}
            "#,
        ))
        .bind(data.title)
        .bind(data.description)
        .bind(data.completed.unwrap_or(false))
        .bind(data.starred.unwrap_or(false))
        .bind(data.priority.unwrap_or_default())
        .bind(data.project_id)
        .bind(data.due_date)
        .bind(data.assigned_to)
        .bind(data.assigned_by)
        .bind(data.user_id)
        .bind(data.team_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks, optionally filtered
    pub async fn list(pool: &PgPool, filter: Option<TaskFilter>) -> Result<Vec<Self>, sqlx::Error> {
        let mut query = format!("SELECT {TASK_COLUMNS} FROM tasks");
        if let Some(filter) = filter {
            query.push_str(" WHERE ");
            query.push_str(filter.predicate());
        }
        query.push_str(" ORDER BY created_at DESC");

        sqlx::query_as::<_, Task>(&query).fetch_all(pool).await
    }

    /// Lists tasks owned by a user, optionally filtered
    pub async fn list_by_owner(
        pool: &PgPool,
        user_id: Uuid,
        filter: Option<TaskFilter>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let mut query = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = $1");
        if let Some(filter) = filter {
            query.push_str(" AND ");
            query.push_str(filter.predicate());
        }
        query.push_str(" ORDER BY created_at DESC");

        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Lists tasks assigned to a user, optionally filtered
    pub async fn list_assigned_to(
        pool: &PgPool,
        user_id: Uuid,
        filter: Option<TaskFilter>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let mut query = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE assigned_to = $1");
        if let Some(filter) = filter {
            query.push_str(" AND ");
            query.push_str(filter.predicate());
        }
        query.push_str(" ORDER BY created_at DESC");

        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Applies a partial update to a task
    ///
    /// Only fields present in `data` overwrite existing values; omitted
    /// fields are left untouched. `updated_at` is refreshed on every
    /// successful update. Returns `None` if the task doesn't exist.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build the update statement from whichever fields are present
        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.completed.is_some() {
            bind_count += 1;
            query.push_str(&format!(", completed = ${}", bind_count));
        }
        if data.project_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(", project_id = ${}", bind_count));
        }
        if data.due_date.is_some() {
            bind_count += 1;
            query.push_str(&format!(", due_date = ${}", bind_count));
        }
        if data.priority.is_some() {
            bind_count += 1;
            query.push_str(&format!(", priority = ${}", bind_count));
        }
        if data.starred.is_some() {
            bind_count += 1;
            query.push_str(&format!(", starred = ${}", bind_count));
        }
        if data.assigned_to.is_some() {
            bind_count += 1;
            query.push_str(&format!(", assigned_to = ${}", bind_count));
        }
        if data.assigned_by.is_some() {
            bind_count += 1;
            query.push_str(&format!(", assigned_by = ${}", bind_count));
        }
        if data.team_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(", team_id = ${}", bind_count));
        }

        query.push_str(&format!(" WHERE id = $1 RETURNING {TASK_COLUMNS}"));

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(completed) = data.completed {
            q = q.bind(completed);
        }
        if let Some(project_id) = data.project_id {
            q = q.bind(project_id);
        }
        if let Some(due_date) = data.due_date {
            q = q.bind(due_date);
        }
        if let Some(priority) = data.priority {
            q = q.bind(priority);
        }
        if let Some(starred) = data.starred {
            q = q.bind(starred);
        }
        if let Some(assigned_to) = data.assigned_to {
            q = q.bind(assigned_to);
        }
        if let Some(assigned_by) = data.assigned_by {
            q = q.bind(assigned_by);
        }
        if let Some(team_id) = data.team_id {
            q = q.bind(team_id);
        }

        q.fetch_optional(pool).await
    }

    /// Deletes a task, returning whether it existed
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Computes global task counts
    ///
    /// Three independent aggregate queries at call time; nothing is cached.
    pub async fn summary(pool: &PgPool) -> Result<TaskSummary, sqlx::Error> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(pool)
            .await?;

        let (completed,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE completed = TRUE")
                .fetch_one(pool)
                .await?;

        let (pending,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE completed = FALSE")
                .fetch_one(pool)
                .await?;

        Ok(TaskSummary {
            total,
            completed,
            pending,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_parse_known_values() {
        assert_eq!(
            TaskFilter::parse(Some("completed")),
            Some(TaskFilter::Completed)
        );
        assert_eq!(TaskFilter::parse(Some("pending")), Some(TaskFilter::Pending));
        assert_eq!(TaskFilter::parse(Some("starred")), Some(TaskFilter::Starred));
    }

    #[test]
    fn test_filter_parse_absent_or_unrecognized_means_all() {
        assert_eq!(TaskFilter::parse(None), None);
        assert_eq!(TaskFilter::parse(Some("all")), None);
        assert_eq!(TaskFilter::parse(Some("")), None);
        assert_eq!(TaskFilter::parse(Some("COMPLETED")), None);
        assert_eq!(TaskFilter::parse(Some("bogus")), None);
    }

    #[test]
    fn test_filter_predicates_partition_on_completed() {
        assert_eq!(TaskFilter::Completed.predicate(), "completed = TRUE");
        assert_eq!(TaskFilter::Pending.predicate(), "completed = FALSE");
        assert_eq!(TaskFilter::Starred.predicate(), "starred = TRUE");
    }

    #[test]
    fn test_priority_default_is_medium() {
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
        assert_eq!(TaskPriority::default().as_str(), "medium");
    }

    #[test]
    fn test_priority_as_str() {
        assert_eq!(TaskPriority::Low.as_str(), "low");
        assert_eq!(TaskPriority::Medium.as_str(), "medium");
        assert_eq!(TaskPriority::High.as_str(), "high");
    }

    #[test]
    fn test_create_task_omitted_flags_deserialize_absent() {
        // A minimal create request leaves the defaultable fields as None;
        // create() resolves them exactly once at insert.
        let create: CreateTask = serde_json::from_value(json!({
            "title": "Ship v1",
            "user_id": Uuid::new_v4(),
        }))
        .unwrap();

        assert!(create.completed.is_none());
        assert!(create.starred.is_none());
        assert!(create.priority.is_none());
        assert_eq!(create.completed.unwrap_or(false), false);
        assert_eq!(create.starred.unwrap_or(false), false);
        assert_eq!(create.priority.unwrap_or_default(), TaskPriority::Medium);
    }

    #[test]
    fn test_create_task_supplied_flags_survive() {
        let create: CreateTask = serde_json::from_value(json!({
            "title": "Prepare presentation",
            "user_id": Uuid::new_v4(),
            "completed": true,
            "starred": true,
            "priority": "high",
        }))
        .unwrap();

        assert_eq!(create.completed, Some(true));
        assert_eq!(create.starred, Some(true));
        assert_eq!(create.priority, Some(TaskPriority::High));
    }

    #[test]
    fn test_update_task_default_is_fully_absent() {
        let update = UpdateTask::default();
        assert!(update.title.is_none());
        assert!(update.description.is_none());
        assert!(update.completed.is_none());
        assert!(update.project_id.is_none());
        assert!(update.due_date.is_none());
        assert!(update.priority.is_none());
        assert!(update.starred.is_none());
        assert!(update.assigned_to.is_none());
        assert!(update.assigned_by.is_none());
        assert!(update.team_id.is_none());
    }

    #[test]
    fn test_update_task_omitted_fields_stay_absent() {
        // A patch that only flips `completed` must not touch anything else.
        let update: UpdateTask = serde_json::from_value(json!({
            "completed": true,
        }))
        .unwrap();

        assert_eq!(update.completed, Some(true));
        assert!(update.title.is_none());
        assert!(update.starred.is_none());
        assert!(update.priority.is_none());
    }

    #[test]
    fn test_priority_serde_lowercase() {
        assert_eq!(serde_json::to_value(TaskPriority::High).unwrap(), json!("high"));
        let p: TaskPriority = serde_json::from_value(json!("low")).unwrap();
        assert_eq!(p, TaskPriority::Low);
    }
}
