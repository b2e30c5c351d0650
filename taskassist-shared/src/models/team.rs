/// Team model and database operations
///
/// A team row is an unordered pair of users: (A, B) and (B, A) are the same
/// relationship. Uniqueness of the pair is enforced by a database expression
/// index over `(LEAST(user_id_1, user_id_2), GREATEST(user_id_1, user_id_2))`,
/// so concurrent attempts to create the same pair converge on one row.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE teams (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id_1 UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     user_id_2 UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CHECK (user_id_1 <> user_id_2)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::user::User;

const TEAM_COLUMNS: &str = "id, user_id_1, user_id_2, created_at";

/// Team pair model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Team {
    /// Unique team row ID
    pub id: Uuid,

    /// First user of the pair (insertion order, not significant)
    pub user_id_1: Uuid,

    /// Second user of the pair
    pub user_id_2: Uuid,

    /// When the pair was created
    pub created_at: DateTime<Utc>,
}

impl Team {
    /// Adds a teammate pair, idempotently
    ///
    /// Inserts the pair if it doesn't exist in either orientation and
    /// returns the surviving row either way. The unique index on the
    /// canonicalized pair turns a concurrent duplicate insert into a
    /// no-op, after which the existing row is fetched.
    pub async fn add_pair(
        pool: &PgPool,
        user_id_1: Uuid,
        user_id_2: Uuid,
    ) -> Result<Self, sqlx::Error> {
        let inserted = sqlx::query_as::<_, Team>(&format!(
            r#"
            INSERT INTO teams (user_id_1, user_id_2)
            VALUES ($1, $2)
            ON CONFLICT (LEAST(user_id_1, user_id_2), GREATEST(user_id_1, user_id_2))
            DO NOTHING
            RETURNING {TEAM_COLUMNS}
            "#,
        ))
        .bind(user_id_1)
        .bind(user_id_2)
        .fetch_optional(pool)
        .await?;

        if let Some(team) = inserted {
            return Ok(team);
        }

        // Conflict path: the pair already exists in some orientation.
        match Self::find_pair(pool, user_id_1, user_id_2).await? {
            Some(team) => Ok(team),
            None => Err(sqlx::Error::RowNotFound),
        }
    }

    /// Finds the team row for a pair of users, in either orientation
    pub async fn find_pair(
        pool: &PgPool,
        user_id_1: Uuid,
        user_id_2: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let team = sqlx::query_as::<_, Team>(&format!(
            r#"
            SELECT {TEAM_COLUMNS}
            FROM teams
            WHERE (user_id_1 = $1 AND user_id_2 = $2)
               OR (user_id_1 = $2 AND user_id_2 = $1)
            "#,
        ))
        .bind(user_id_1)
        .bind(user_id_2)
        .fetch_optional(pool)
        .await?;

        Ok(team)
    }

    /// Lists the teammates of a user
    ///
    /// Returns the users on the other side of every pair containing
    /// `user_id`, regardless of which column holds them.
    pub async fn members_of(pool: &PgPool, user_id: Uuid) -> Result<Vec<User>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.username, u.password_hash, u.email, u.first_name, u.last_name,
                   u.role, u.profile_image_url, u.is_active, u.created_at, u.updated_at,
                   u.last_login_at
            FROM users u
            WHERE u.id IN (
                SELECT user_id_2 FROM teams WHERE user_id_1 = $1
                UNION
                SELECT user_id_1 FROM teams WHERE user_id_2 = $1
            )
            ORDER BY u.username
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Removes a teammate pair by its row ID
    ///
    /// Returns whether a row was deleted.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
