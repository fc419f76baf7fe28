//! All API endpoint setup

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;

pub use media::download;
pub use request::Form;
pub use request::NoteSubmission;
pub use request::PathParameters;
pub use response::Error;
pub use response::Success;

use crate::storage::Storage;

mod media;
mod notes;
mod request;
mod response;
mod session;
mod users;

/// Get the Axum router for all API routes
///
/// Note submissions may carry an image, their body limit is `max_upload_bytes`
pub fn router<S: Storage>(max_upload_bytes: usize) -> Router {
    let session = Router::new()
        .route("/", post(users::sign_in::<S>).get(users::me::<S>))
        .route("/sign-out", post(users::sign_out::<S>));

    let notes = Router::new()
        .route(
            "/",
            get(notes::list::<S>)
                .post(notes::create::<S>)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/{note}", delete(notes::delete::<S>));

    Router::new()
        .nest("/session", session)
        .nest("/notes", notes)
}
