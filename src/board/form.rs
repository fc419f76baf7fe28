//! The note form and its draft

use bytes::Bytes;
use thiserror::Error;

/// A file picked for upload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalFile {
    /// Name of the file as picked, might include a path
    pub name: String,

    /// The full content
    pub bytes: Bytes,
}

impl LocalFile {
    pub fn new(name: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Unsaved note as composed in the form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub description: String,
    pub image: Option<LocalFile>,
}

/// A required field of the draft is missing
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required")]
    MissingName,

    #[error("Description is required")]
    MissingDescription,
}

impl Draft {
    /// Check all required fields are filled in
    ///
    /// Whitespace counts as filled in
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            Err(ValidationError::MissingName)
        } else if self.description.is_empty() {
            Err(ValidationError::MissingDescription)
        } else {
            Ok(())
        }
    }
}

/// Holds the draft between edits, cleared after every successful submission
#[derive(Debug, Default)]
pub struct NoteForm {
    draft: Draft,
}

impl NoteForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    pub fn set_image(&mut self, image: Option<LocalFile>) {
        self.draft.image = image;
    }

    /// Back to the empty draft
    pub fn reset(&mut self) {
        self.draft = Draft::default();
    }
}
