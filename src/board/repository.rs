//! Note repository: the remote Note collection as seen by one session

use async_trait::async_trait;
use uuid::Uuid;

use crate::notes::Note;
use crate::storage::CreateNoteValues;
use crate::storage::Result;
use crate::storage::Storage;

/// The three remote operations on the Note collection
///
/// Every call is a single round trip, nothing is retried
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// All notes visible to the session, in store order
    async fn list(&self) -> Result<Vec<Note>>;

    /// Create a note, the store assigns the ID
    ///
    /// Does not validate, callers check the draft first
    async fn create(&self, name: &str, description: &str, image: Option<&str>) -> Result<Note>;

    /// Remove a note, unknown IDs are fine
    async fn delete(&self, id: &Uuid) -> Result<()>;
}

/// Notes of a single user
#[derive(Clone)]
pub struct UserNotes<S: Storage> {
    storage: S,
    user_id: Uuid,
}

impl<S: Storage> UserNotes<S> {
    pub fn new(storage: S, user_id: Uuid) -> Self {
        Self { storage, user_id }
    }
}

#[async_trait]
impl<S: Storage> NoteRepository for UserNotes<S> {
    async fn list(&self) -> Result<Vec<Note>> {
        self.storage.find_all_notes_by_user(&self.user_id).await
    }

    async fn create(&self, name: &str, description: &str, image: Option<&str>) -> Result<Note> {
        let values = CreateNoteValues {
            user_id: &self.user_id,
            name,
            description,
            image,
        };

        self.storage.create_note(&values).await
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        self.storage.delete_note(&self.user_id, id).await.map(|_| ())
    }
}
