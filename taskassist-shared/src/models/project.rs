/// Project model and database operations
///
/// Projects group tasks under a name and color. A project is owned by a
/// single user and may additionally be attached to a team; a public team
/// project is visible to the teammates of its owner.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     color VARCHAR(32) NOT NULL,
///     user_id UUID NOT NULL,
///     team_id UUID,
///     is_public BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

const PROJECT_COLUMNS: &str =
    "id, name, color, user_id, team_id, is_public, created_at, updated_at";

/// Project model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Display color (e.g. "#ff6b6b")
    pub color: String,

    /// Owning user
    pub user_id: Uuid,

    /// Team the project is attached to, if any
    pub team_id: Option<Uuid>,

    /// Whether teammates can see this project
    pub is_public: bool,

    /// When the project was created
    pub created_at: DateTime<Utc>,

    /// When the project was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub color: String,
    pub user_id: Uuid,
    pub team_id: Option<Uuid>,
    pub is_public: Option<bool>,
}

/// Partial update for a project
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub color: Option<String>,
    pub team_id: Option<Uuid>,
    pub is_public: Option<bool>,
}

impl Project {
    /// Creates a new project
    ///
    /// Ownership and team references are stored as given; a project may
    /// point at a team the owner does not belong to.
    pub async fn create(pool: &PgPool, data: CreateProject) -> Result<Self, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(&format!(
            r#"
            INSERT INTO projects (name, color, user_id, team_id, is_public)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PROJECT_COLUMNS}
            "#,
        ))
        .bind(data.name)
        .bind(data.color)
        .bind(data.user_id)
        .bind(data.team_id)
        .bind(data.is_public.unwrap_or(false))
        .fetch_one(pool)
        .await?;

        Ok(project)
    }

    /// Finds a project by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Lists all projects
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC",
        ))
        .fetch_all(pool)
        .await
    }

    /// Lists projects owned by a user
    pub async fn list_by_owner(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE user_id = $1 ORDER BY created_at DESC",
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Lists projects accessible to a user
    ///
    /// The accessible set is the union of projects the user owns and public
    /// projects attached to a team the user belongs to. Private team
    /// projects stay invisible to teammates.
    pub async fn list_accessible(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>(&format!(
            r#"
            SELECT {PROJECT_COLUMNS}
            FROM projects
            WHERE user_id = $1
               OR (is_public = TRUE AND team_id IN (
                      SELECT id FROM teams WHERE user_id_1 = $1 OR user_id_2 = $1
                  ))
            ORDER BY created_at DESC
            "#,
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Applies a partial update to a project
    ///
    /// Only present fields are written; `updated_at` is refreshed. Returns
    /// `None` if the project doesn't exist.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateProject,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE projects SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", name = ${}", bind_count));
        }
        if data.color.is_some() {
            bind_count += 1;
            query.push_str(&format!(", color = ${}", bind_count));
        }
        if data.team_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(", team_id = ${}", bind_count));
        }
        if data.is_public.is_some() {
            bind_count += 1;
            query.push_str(&format!(", is_public = ${}", bind_count));
        }

        query.push_str(&format!(" WHERE id = $1 RETURNING {PROJECT_COLUMNS}"));

        let mut q = sqlx::query_as::<_, Project>(&query).bind(id);

        if let Some(name) = data.name {
            q = q.bind(name);
        }
        if let Some(color) = data.color {
            q = q.bind(color);
        }
        if let Some(team_id) = data.team_id {
            q = q.bind(team_id);
        }
        if let Some(is_public) = data.is_public {
            q = q.bind(is_public);
        }

        q.fetch_optional(pool).await
    }

    /// Deletes a project, returning whether it existed
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_project_is_public_defaults_absent() {
        let create: CreateProject = serde_json::from_value(json!({
            "name": "Website redesign",
            "color": "#ff6b6b",
            "user_id": Uuid::new_v4(),
        }))
        .unwrap();

        assert!(create.team_id.is_none());
        assert!(create.is_public.is_none());
        assert_eq!(create.is_public.unwrap_or(false), false);
    }

    #[test]
    fn test_update_project_partial_deserialization() {
        let update: UpdateProject = serde_json::from_value(json!({
            "color": "#00aa55",
        }))
        .unwrap();

        assert_eq!(update.color.as_deref(), Some("#00aa55"));
        assert!(update.name.is_none());
        assert!(update.team_id.is_none());
        assert!(update.is_public.is_none());
    }

    #[test]
    fn test_update_project_default_is_fully_absent() {
        let update = UpdateProject::default();
        assert!(update.name.is_none());
        assert!(update.color.is_none());
        assert!(update.team_id.is_none());
        assert!(update.is_public.is_none());
    }
}
