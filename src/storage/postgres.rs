//! Postgres storage

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::notes::Note;
use crate::users::User;

use super::CreateNoteValues;
use super::CreateUserValues;
use super::Error;
use super::Result;
use super::Storage;

/// Migrator to run migrations on startup
static MIGRATOR: Migrator = sqlx::migrate!();

/// Postgres storage
#[derive(Clone)]
pub struct Postgres {
    /// Pool of connections
    connection_pool: PgPool,
}

impl Postgres {
    /// Create Postgres storage
    ///
    /// Migrations will be run
    pub async fn new(database_url: &str) -> Self {
        let connection_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await
            .expect("Valid connection");

        let migration_result = MIGRATOR.run(&connection_pool).await;

        if let Err(err) = migration_result {
            panic!("Migrations could not run: {err}");
        }

        Self { connection_pool }
    }
}

#[async_trait]
impl Storage for Postgres {
    async fn find_any_single_user(&self) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r"
            SELECT *
            FROM users
            WHERE deleted_at IS NULL
            LIMIT 1
            ",
        )
        .fetch_optional(&self.connection_pool)
        .await
        .map_err(connection_error)
    }

    async fn find_single_user_by_username(&self, username: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r"
            SELECT *
            FROM users
            WHERE deleted_at IS NULL
                AND username = $1
            LIMIT 1
            ",
        )
        .bind(username)
        .fetch_optional(&self.connection_pool)
        .await
        .map_err(connection_error)
    }

    async fn find_single_user_by_id(&self, id: &Uuid) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r"
            SELECT *
            FROM users
            WHERE deleted_at IS NULL
                AND id = $1
            LIMIT 1
            ",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
        .map_err(connection_error)
    }

    async fn create_user(&self, values: &CreateUserValues) -> Result<User> {
        sqlx::query_as::<_, User>(
            r"
            INSERT INTO users (id, session_id, username, hashed_password)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            ",
        )
        .bind(Uuid::new_v4())
        .bind(values.session_id)
        .bind(values.username)
        .bind(values.hashed_password)
        .fetch_one(&self.connection_pool)
        .await
        .map_err(connection_error)
    }

    async fn rotate_session(&self, user: &User, session_id: &Uuid) -> Result<User> {
        sqlx::query_as::<_, User>(
            r"
            UPDATE users
            SET session_id = $1, updated_at = CURRENT_TIMESTAMP
            WHERE id = $2
            RETURNING *
            ",
        )
        .bind(session_id)
        .bind(user.id)
        .fetch_one(&self.connection_pool)
        .await
        .map_err(connection_error)
    }

    async fn find_all_notes_by_user(&self, user_id: &Uuid) -> Result<Vec<Note>> {
        sqlx::query_as::<_, Note>(
            r"
            SELECT *
            FROM notes
            WHERE deleted_at IS NULL AND user_id = $1
            ORDER BY created_at ASC, serial ASC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.connection_pool)
        .await
        .map_err(connection_error)
    }

    async fn create_note(&self, values: &CreateNoteValues) -> Result<Note> {
        sqlx::query_as::<_, Note>(
            r"
            INSERT INTO notes (id, user_id, name, description, image)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            ",
        )
        .bind(Uuid::new_v4())
        .bind(values.user_id)
        .bind(values.name)
        .bind(values.description)
        .bind(values.image)
        .fetch_one(&self.connection_pool)
        .await
        .map_err(connection_error)
    }

    async fn delete_note(&self, user_id: &Uuid, note_id: &Uuid) -> Result<bool> {
        let result = sqlx::query(
            r"
            UPDATE notes
            SET deleted_at = CURRENT_TIMESTAMP
            WHERE deleted_at IS NULL AND id = $1 AND user_id = $2
            ",
        )
        .bind(note_id)
        .bind(user_id)
        .execute(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(result.rows_affected() > 0)
    }
}

/// Map any error to a connection error
#[allow(clippy::needless_pass_by_value)]
fn connection_error(err: sqlx::Error) -> Error {
    Error::Connection(err.to_string())
}
