use axum::http::StatusCode;

use crate::tests::helper;
use crate::tests::helper::Image;

async fn image_url(app: &mut axum::Router) -> String {
    let access_token = helper::login(app).await;

    let note = helper::create_note(
        app,
        &access_token,
        "Trip",
        "Beach",
        Some(Image {
            file_name: "photo.jpg",
            bytes: b"jpeg",
        }),
    )
    .await;

    note.image_url.unwrap()
}

#[tokio::test]
async fn test_tampered_link() {
    let mut app = helper::setup_test_app().await;

    let url = image_url(&mut app).await;

    let (status_code, _, _) = helper::download(&mut app, &format!("{url}x")).await;
    assert_eq!(StatusCode::FORBIDDEN, status_code);
}

#[tokio::test]
async fn test_link_is_bound_to_its_file() {
    let mut app = helper::setup_test_app().await;

    let url = image_url(&mut app).await;
    let (_, query) = url.split_once('?').unwrap();

    let (status_code, _, _) = helper::download(
        &mut app,
        &format!("http://localhost:6000/files/media/1-other.jpg?{query}"),
    )
    .await;
    assert_eq!(StatusCode::FORBIDDEN, status_code);
}

#[tokio::test]
async fn test_link_without_token() {
    let mut app = helper::setup_test_app().await;

    let url = image_url(&mut app).await;
    let (path, _) = url.split_once('?').unwrap();

    let (status_code, _, _) = helper::download(&mut app, path).await;
    assert_eq!(StatusCode::FORBIDDEN, status_code);
}

#[tokio::test]
async fn test_image_outlives_its_note() {
    let mut app = helper::setup_test_app().await;

    let access_token = helper::login(&mut app).await;

    let note = helper::create_note(
        &mut app,
        &access_token,
        "Trip",
        "Beach",
        Some(Image {
            file_name: "photo.jpg",
            bytes: b"jpeg",
        }),
    )
    .await;
    let url = note.image_url.unwrap();

    let (status_code, notes, _) =
        helper::maybe_delete_note(&mut app, &access_token, &note.id.to_string()).await;
    assert_eq!(StatusCode::OK, status_code);
    assert!(notes.unwrap().is_empty());

    // blobs are never deleted, the link stays valid until it expires
    let (status_code, _, body) = helper::download(&mut app, &url).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(&b"jpeg"[..], &body[..]);
}
