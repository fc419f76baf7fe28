//! Signed media links

use std::sync::LazyLock;

use axum::Extension;
use axum::extract::Query;
use axum::http::HeaderValue;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use bytes::Bytes;
use mime::Mime;
use serde::Deserialize;

use crate::media;
use crate::media::Media;

use super::Error;
use super::PathParameters;

/// Not among the `mime` constants
static IMAGE_WEBP: LazyLock<Mime> = LazyLock::new(|| {
    "image/webp"
        .parse::<Mime>()
        .unwrap_or(mime::APPLICATION_OCTET_STREAM)
});

#[derive(Debug, Deserialize)]
pub struct LinkQuery {
    #[serde(default)]
    token: String,
}

/// Serve a stored file to whoever holds a valid link
///
/// Links come from the notes API as `imageUrl`, no session is needed
pub async fn download(
    Extension(media): Extension<Media>,
    PathParameters(key): PathParameters<String>,
    Query(query): Query<LinkQuery>,
) -> Result<impl IntoResponse, Error> {
    let bytes: Bytes = media
        .fetch(&key, &query.token)
        .await
        .map_err(|err| match err {
            media::Error::Signing(_) | media::Error::KeyMismatch(_) => {
                tracing::debug!("Rejected link to {key}: {err}");
                Error::forbidden("Invalid or expired link")
            }
            media::Error::NotFound(_) | media::Error::InvalidKey(_) => {
                Error::not_found("File not found")
            }
            media::Error::Io(_) => Error::internal_server_error(err),
        })?;

    let content_type =
        HeaderValue::from_str(content_type(&key).as_ref()).map_err(Error::internal_server_error)?;

    Ok((
        [
            (CONTENT_TYPE, content_type),
            (CACHE_CONTROL, HeaderValue::from_static("private, no-store")),
        ],
        bytes,
    ))
}

/// Guess the content type from the extension of the key
fn content_type(key: &str) -> Mime {
    let extension = key
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => mime::IMAGE_PNG,
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "gif" => mime::IMAGE_GIF,
        "bmp" => mime::IMAGE_BMP,
        "svg" => mime::IMAGE_SVG,
        "webp" => IMAGE_WEBP.clone(),
        "txt" => mime::TEXT_PLAIN_UTF_8,
        "pdf" => mime::APPLICATION_PDF,
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}
