//! All things related to the storage of users and notes

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::notes::Note;
use crate::users::User;

pub use memory::Memory;
pub use postgres::Postgres;

mod memory;
mod postgres;

/// Storage backend to run on
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Backend {
    /// Keep everything in memory, gone on shutdown
    Memory,

    /// Connect to Postgres, migrations run on startup
    Postgres { database_url: String },
}

/// Storage errors
#[derive(Debug, Error)]
pub enum Error {
    /// A connection error with the storage
    #[error("Connection error: {0}")]
    Connection(String),
}

/// Result type for all storage interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Values to create a User
pub struct CreateUserValues<'a> {
    /// The initial session ID for the user
    pub session_id: &'a Uuid,

    /// The username
    pub username: &'a str,

    /// The hashed password
    pub hashed_password: &'a str,
}

/// Values to create a Note
pub struct CreateNoteValues<'a> {
    /// Owner of the note
    pub user_id: &'a Uuid,

    /// Label of the note
    pub name: &'a str,

    /// Free text of the note
    pub description: &'a str,

    /// Storage key of an already uploaded image
    pub image: Option<&'a str>,
}

/// Storage with all supported operations
#[async_trait]
pub trait Storage: Clone + Send + Sync + 'static {
    /// Find any single user
    ///
    /// Respects the soft-delete
    async fn find_any_single_user(&self) -> Result<Option<User>>;

    /// Finds a single user by its username
    ///
    /// Respects the soft-delete
    async fn find_single_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Finds a single user by its ID
    ///
    /// Respects the soft-delete
    async fn find_single_user_by_id(&self, id: &Uuid) -> Result<Option<User>>;

    /// Create a single user
    async fn create_user(&self, values: &CreateUserValues) -> Result<User>;

    /// Replace the session ID of a user, invalidating all tokens of the old session
    async fn rotate_session(&self, user: &User, session_id: &Uuid) -> Result<User>;

    /// Find all notes of a user, oldest first
    ///
    /// Respects the soft-delete
    async fn find_all_notes_by_user(&self, user_id: &Uuid) -> Result<Vec<Note>>;

    /// Create a note
    async fn create_note(&self, values: &CreateNoteValues) -> Result<Note>;

    /// Soft-delete a note of a user
    ///
    /// Returns `false` when there was nothing to delete
    async fn delete_note(&self, user_id: &Uuid, note_id: &Uuid) -> Result<bool>;
}
