//! MySQL user repository implementation.

use crate::{traits::UserRepository, with_timeout, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use stride_core::{StrideError, StrideResult, User, UserId, UserUpdate};
use tracing::debug;

const USER_COLUMNS: &str = "id, first_name, last_name, email, password_hash, points, \
     timetable, token, refresh_token, created_at, updated_at";

/// MySQL user repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = UserRepository)]
pub struct MySqlUserRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlUserRepository {
    /// Creates a new MySQL user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }

    async fn fetch_by_id(&self, id: &UserId) -> Result<Option<User>, sqlx::Error> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = ?",
            USER_COLUMNS
        ))
        .bind(id.as_str())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(User::from))
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    points: i64,
    timetable: Option<String>,
    token: Option<String>,
    refresh_token: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            password_hash: row.password_hash,
            points: row.points,
            timetable: row.timetable,
            token: row.token,
            refresh_token: row.refresh_token,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: &UserId) -> StrideResult<Option<User>> {
        debug!("Finding user by id: {}", id);
        with_timeout(self.pool.query_timeout(), self.fetch_by_id(id)).await
    }

    async fn find_by_email(&self, email: &str) -> StrideResult<Option<User>> {
        debug!("Finding user by email: {}", email);

        let row = with_timeout(
            self.pool.query_timeout(),
            sqlx::query_as::<_, UserRow>(&format!(
                "SELECT {} FROM users WHERE email = ?",
                USER_COLUMNS
            ))
            .bind(email)
            .fetch_optional(self.pool.inner()),
        )
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_ranked(&self) -> StrideResult<Vec<User>> {
        debug!("Finding all users ranked by points");

        let rows = with_timeout(
            self.pool.query_timeout(),
            sqlx::query_as::<_, UserRow>(&format!(
                "SELECT {} FROM users ORDER BY points DESC, id ASC",
                USER_COLUMNS
            ))
            .fetch_all(self.pool.inner()),
        )
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn insert(&self, user: &User) -> StrideResult<User> {
        debug!("Inserting user: {}", user.id);

        with_timeout(self.pool.query_timeout(), async {
            sqlx::query(
                r#"
                INSERT INTO users (id, first_name, last_name, email, password_hash, points,
                                   timetable, token, refresh_token, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(user.id.as_str())
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.points)
            .bind(&user.timetable)
            .bind(&user.token)
            .bind(&user.refresh_token)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(self.pool.inner())
            .await?;

            // MySQL doesn't support RETURNING, so insert then select
            self.fetch_by_id(&user.id)
                .await?
                .ok_or_else(|| StrideError::internal("Failed to fetch inserted user"))
        })
        .await
    }

    async fn apply(&self, id: &UserId, update: &UserUpdate) -> StrideResult<Option<User>> {
        debug!("Applying update to user: {}", id);
        let now = Utc::now();

        with_timeout(self.pool.query_timeout(), async {
            let query = match update {
                UserUpdate::AddPoints(delta) => {
                    sqlx::query("UPDATE users SET points = points + ?, updated_at = ? WHERE id = ?")
                        .bind(*delta)
                }
                UserUpdate::Particulars(particulars) => sqlx::query(
                    r#"
                    UPDATE users
                    SET first_name = COALESCE(?, first_name),
                        last_name = COALESCE(?, last_name),
                        email = COALESCE(?, email),
                        password_hash = COALESCE(?, password_hash),
                        updated_at = ?
                    WHERE id = ?
                    "#,
                )
                .bind(&particulars.first_name)
                .bind(&particulars.last_name)
                .bind(&particulars.email)
                .bind(&particulars.password_hash),
                UserUpdate::Timetable(link) => {
                    sqlx::query("UPDATE users SET timetable = ?, updated_at = ? WHERE id = ?")
                        .bind(link)
                }
                UserUpdate::Tokens {
                    token,
                    refresh_token,
                } => sqlx::query(
                    "UPDATE users SET token = ?, refresh_token = ?, updated_at = ? WHERE id = ?",
                )
                .bind(token)
                .bind(refresh_token),
            };

            query
                .bind(now)
                .bind(id.as_str())
                .execute(self.pool.inner())
                .await?;

            // MySQL reports only changed rows as affected, so re-read to
            // tell "no such user" apart from "no-op update".
            self.fetch_by_id(id).await
        })
        .await
    }

    async fn delete(&self, id: &UserId) -> StrideResult<bool> {
        debug!("Deleting user: {}", id);

        let result = with_timeout(
            self.pool.query_timeout(),
            sqlx::query("DELETE FROM users WHERE id = ?")
                .bind(id.as_str())
                .execute(self.pool.inner()),
        )
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
