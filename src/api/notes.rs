//! Notes API
//!
//! Every response carries the full list of notes as it is after the request

use axum::Extension;
use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

use crate::board::NoteBoard;
use crate::board::NoteView;
use crate::board::Session;
use crate::board::Submission;
use crate::media::Media;
use crate::storage::Storage;

use super::Error;
use super::NoteSubmission;
use super::PathParameters;
use super::Success;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl NoteResponse {
    fn from_view(view: NoteView) -> Self {
        Self {
            id: view.note.id,
            name: view.note.name,
            description: view.note.description,
            image: view.note.image,
            image_url: view.image_url.map(String::from),
            created_at: view.note.created_at,
            updated_at: view.note.updated_at,
        }
    }

    fn from_view_multiple(views: Vec<NoteView>) -> Vec<Self> {
        views.into_iter().map(Self::from_view).collect::<Vec<Self>>()
    }
}

/// A freshly created note and the list it ended up in
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub note: NoteResponse,
    pub notes: Vec<NoteResponse>,
}

/// List all notes of the session, images come with a fresh link
///
/// Request:
/// ```sh
/// curl -v -H 'Authorization: Bearer tokentokentoken' \
///     http://localhost:6000/api/notes
/// ```
///
/// Response:
/// ```json
/// {
///   "data": [
///     { "id": "<uuid>", "name": "Trip", "image": "media/1-photo.jpg", "imageUrl": "http://..." }
///   ]
/// }
/// ```
pub async fn list<S: Storage>(
    Extension(media): Extension<Media>,
    session: Session<S>,
) -> Result<Success<Vec<NoteResponse>>, Error> {
    let mut board = NoteBoard::new(session.notes(), media);

    board.resynchronize().await?;

    Ok(Success::ok(NoteResponse::from_view_multiple(
        board.into_notes(),
    )))
}

/// Create a note, with an optional image
///
/// Request:
/// ```sh
/// curl -v -H 'Authorization: Bearer tokentokentoken' \
///     -F name=Trip -F 'description=Beach day' -F image=@photo.jpg \
///     http://localhost:6000/api/notes
/// ```
///
/// Response:
/// ```json
/// { "data": { "note": { "id": "<uuid>", "name": "Trip", ... }, "notes": [ ... ] } }
/// ```
pub async fn create<S: Storage>(
    Extension(media): Extension<Media>,
    session: Session<S>,
    NoteSubmission(mut form): NoteSubmission,
) -> Result<Success<CreatedResponse>, Error> {
    let mut board = NoteBoard::new(session.notes(), media);

    let note = match board.submit(&mut form).await? {
        Submission::Created(note) => note,
        Submission::Skipped(err) => return Err(Error::bad_request(err)),
    };

    let views = board.into_notes();

    // the fresh list holds the note with its image link, unless it is already gone again
    let view = views
        .iter()
        .find(|view| view.note.id == note.id)
        .cloned()
        .unwrap_or(NoteView {
            note,
            image_url: None,
        });

    Ok(Success::created(CreatedResponse {
        note: NoteResponse::from_view(view),
        notes: NoteResponse::from_view_multiple(views),
    }))
}

/// Delete a note
///
/// Unknown notes are no error, the response holds the remaining notes
///
/// Request:
/// ```sh
/// curl -v -XDELETE \
///     -H 'Authorization: Bearer tokentokentoken' \
///     http://localhost:6000/api/notes/<uuid>
/// ```
pub async fn delete<S: Storage>(
    Extension(media): Extension<Media>,
    session: Session<S>,
    PathParameters(note_id): PathParameters<Uuid>,
) -> Result<Success<Vec<NoteResponse>>, Error> {
    let mut board = NoteBoard::new(session.notes(), media);

    board.delete(&note_id).await?;

    Ok(Success::ok(NoteResponse::from_view_multiple(
        board.into_notes(),
    )))
}
