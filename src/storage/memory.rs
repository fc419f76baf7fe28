//! Memory storage
//!
//! Will be destroyed on system shutdown

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::notes::Note;
use crate::users::User;

use super::CreateNoteValues;
use super::CreateUserValues;
use super::Error;
use super::Result;
use super::Storage;

/// An in-memory storage
///
/// Will be destroyed on system shutdown
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// All users in storage
    users: Arc<Mutex<HashMap<Uuid, User>>>,

    /// All notes in storage, in insertion order
    notes: Arc<Mutex<Vec<Note>>>,
}

impl Memory {
    /// Create a new empty Memory storage
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for Memory {
    async fn find_any_single_user(&self) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .await
            .values()
            .find(|user| user.deleted_at.is_none())
            .cloned())
    }

    async fn find_single_user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .await
            .values()
            .find(|user| user.username == username && user.deleted_at.is_none())
            .cloned())
    }

    async fn find_single_user_by_id(&self, id: &Uuid) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .await
            .values()
            .find(|user| &user.id == id && user.deleted_at.is_none())
            .cloned())
    }

    async fn create_user(&self, values: &CreateUserValues) -> Result<User> {
        let now = Utc::now().naive_utc();

        let user = User {
            id: Uuid::new_v4(),
            session_id: *values.session_id,
            username: values.username.to_string(),
            hashed_password: values.hashed_password.to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        self.users.lock().await.insert(user.id, user.clone());

        Ok(user)
    }

    async fn rotate_session(&self, user: &User, session_id: &Uuid) -> Result<User> {
        self.users
            .lock()
            .await
            .get_mut(&user.id)
            .map(|user| {
                user.session_id = *session_id;
                user.updated_at = Utc::now().naive_utc();

                user.clone()
            })
            .ok_or_else(|| Error::Connection(format!("User {} vanished", user.id)))
    }

    async fn find_all_notes_by_user(&self, user_id: &Uuid) -> Result<Vec<Note>> {
        Ok(self
            .notes
            .lock()
            .await
            .iter()
            .filter(|note| &note.user_id == user_id && note.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn create_note(&self, values: &CreateNoteValues) -> Result<Note> {
        let now = Utc::now().naive_utc();

        let note = Note {
            id: Uuid::new_v4(),
            user_id: *values.user_id,
            name: values.name.to_string(),
            description: values.description.to_string(),
            image: values.image.map(ToString::to_string),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        self.notes.lock().await.push(note.clone());

        Ok(note)
    }

    async fn delete_note(&self, user_id: &Uuid, note_id: &Uuid) -> Result<bool> {
        let mut notes = self.notes.lock().await;

        let note = notes.iter_mut().find(|note| {
            &note.id == note_id && &note.user_id == user_id && note.deleted_at.is_none()
        });

        Ok(note.is_some_and(|note| {
            note.deleted_at = Some(Utc::now().naive_utc());
            true
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn create(storage: &Memory, user_id: &Uuid, name: &str) -> Note {
        let values = CreateNoteValues {
            user_id,
            name,
            description: "description",
            image: None,
        };

        storage.create_note(&values).await.unwrap()
    }

    #[tokio::test]
    async fn test_notes_keep_insertion_order() {
        let storage = Memory::new();
        let user_id = Uuid::new_v4();

        for name in ["one", "two", "three"] {
            create(&storage, &user_id, name).await;
        }

        let names = storage
            .find_all_notes_by_user(&user_id)
            .await
            .unwrap()
            .into_iter()
            .map(|note| note.name)
            .collect::<Vec<_>>();

        assert_eq!(vec!["one", "two", "three"], names);
    }

    #[tokio::test]
    async fn test_notes_are_scoped_to_their_owner() {
        let storage = Memory::new();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        let note = create(&storage, &owner, "mine").await;

        assert!(
            storage
                .find_all_notes_by_user(&stranger)
                .await
                .unwrap()
                .is_empty()
        );
        assert!(!storage.delete_note(&stranger, &note.id).await.unwrap());
        assert_eq!(1, storage.find_all_notes_by_user(&owner).await.unwrap().len());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let storage = Memory::new();
        let user_id = Uuid::new_v4();

        let note = create(&storage, &user_id, "gone").await;

        assert!(storage.delete_note(&user_id, &note.id).await.unwrap());
        assert!(!storage.delete_note(&user_id, &note.id).await.unwrap());
        assert!(!storage.delete_note(&user_id, &Uuid::new_v4()).await.unwrap());
        assert!(
            storage
                .find_all_notes_by_user(&user_id)
                .await
                .unwrap()
                .is_empty()
        );
    }
}
