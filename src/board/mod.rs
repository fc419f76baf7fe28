//! The note board
//!
//! Keeps the displayed notes in sync with the remote collection. Every mutation is followed by a
//! full [`NoteBoard::resynchronize`], the displayed list is never patched locally.

use futures::future::try_join_all;
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::media;
use crate::notes::Note;
use crate::storage;

pub use form::Draft;
pub use form::LocalFile;
pub use form::NoteForm;
pub use form::ValidationError;
pub use repository::NoteRepository;
pub use repository::UserNotes;
pub use resolver::BlobResolver;
pub use session::Session;
pub use session::SessionGate;

mod form;
mod repository;
mod resolver;
mod session;

/// A remote operation failed
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Notes(#[from] storage::Error),

    #[error(transparent)]
    Media(#[from] media::Error),
}

/// Result type for all board interactions
pub type Result<T> = core::result::Result<T, Error>;

/// A note as displayed
#[derive(Clone, Debug)]
pub struct NoteView {
    pub note: Note,

    /// Retrieval URL of the image, only for notes with an image
    pub image_url: Option<Url>,
}

/// Outcome of submitting the form
#[derive(Debug)]
pub enum Submission {
    /// The note was created, the board is resynchronized
    Created(Note),

    /// The draft is incomplete, nothing was sent
    Skipped(ValidationError),
}

/// The list of notes of a session
pub struct NoteBoard<R, B> {
    repository: R,
    resolver: B,
    notes: Vec<NoteView>,
}

impl<R: NoteRepository, B: BlobResolver> NoteBoard<R, B> {
    /// An empty board, call [`NoteBoard::resynchronize`] to fill it
    pub fn new(repository: R, resolver: B) -> Self {
        Self {
            repository,
            resolver,
            notes: Vec::new(),
        }
    }

    /// The snapshot of the last resynchronization
    pub fn notes(&self) -> &[NoteView] {
        &self.notes
    }

    pub fn into_notes(self) -> Vec<NoteView> {
        self.notes
    }

    /// Replace the snapshot with the current remote state
    ///
    /// The image URLs are resolved concurrently once the list is in. One failing resolution fails
    /// the whole refresh and keeps the previous snapshot.
    pub async fn resynchronize(&mut self) -> Result<&[NoteView]> {
        let notes = self.repository.list().await?;

        let resolver = &self.resolver;
        let views = try_join_all(notes.into_iter().map(move |note| async move {
            let image_url = match &note.image {
                Some(key) => Some(resolver.resolve_url(key).await?),
                None => None,
            };

            Ok::<_, Error>(NoteView { note, image_url })
        }))
        .await?;

        self.notes = views;

        Ok(&self.notes)
    }

    /// Create a note from the form
    ///
    /// The image goes up first, the note refers to its key. The draft is reset only after the note
    /// exists.
    pub async fn submit(&mut self, form: &mut NoteForm) -> Result<Submission> {
        let draft = form.draft();

        if let Err(err) = draft.validate() {
            return Ok(Submission::Skipped(err));
        }

        let image = match &draft.image {
            Some(file) => Some(self.resolver.upload(file).await?),
            None => None,
        };

        let note = self
            .repository
            .create(&draft.name, &draft.description, image.as_deref())
            .await?;

        form.reset();

        self.resynchronize().await?;

        Ok(Submission::Created(note))
    }

    /// Delete a note, then resynchronize
    pub async fn delete(&mut self, id: &Uuid) -> Result<()> {
        self.repository.delete(id).await?;

        self.resynchronize().await?;

        Ok(())
    }
}
