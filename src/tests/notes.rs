use axum::http::StatusCode;

use crate::tests::helper;
use crate::tests::helper::Image;

#[tokio::test]
async fn test_empty_board() {
    let mut app = helper::setup_test_app().await;

    let access_token = helper::login(&mut app).await;

    let (status_code, notes, _) = helper::list_notes(&mut app, &access_token).await;
    assert_eq!(StatusCode::OK, status_code);
    assert!(notes.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_note() {
    let mut app = helper::setup_test_app().await;

    let access_token = helper::login(&mut app).await;

    let (status_code, created, _) =
        helper::maybe_create_note(&mut app, &access_token, "Groceries", "Milk, eggs", None).await;
    assert_eq!(StatusCode::CREATED, status_code);

    let (note, notes) = created.unwrap();
    assert_eq!("Groceries", note.name);
    assert_eq!("Milk, eggs", note.description);
    assert!(note.image.is_none());
    assert!(note.image_url.is_none());
    assert_eq!(vec![note], notes);

    let (_, listed, _) = helper::list_notes(&mut app, &access_token).await;
    assert_eq!(notes, listed.unwrap());
}

#[tokio::test]
async fn test_notes_keep_creation_order() {
    let mut app = helper::setup_test_app().await;

    let access_token = helper::login(&mut app).await;

    let first = helper::create_note(&mut app, &access_token, "First", "1", None).await;
    let second = helper::create_note(&mut app, &access_token, "Second", "2", None).await;
    let third = helper::create_note(&mut app, &access_token, "Third", "3", None).await;

    let (_, notes, _) = helper::list_notes(&mut app, &access_token).await;
    assert_eq!(vec![first, second, third], notes.unwrap());
}

#[tokio::test]
async fn test_incomplete_note_is_rejected() {
    let mut app = helper::setup_test_app().await;

    let access_token = helper::login(&mut app).await;

    let (status_code, created, error) =
        helper::maybe_create_note(&mut app, &access_token, "", "No name", None).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert!(created.is_none());
    assert_eq!(Some("Name is required".to_string()), error);

    let (status_code, _, error) =
        helper::maybe_create_note(&mut app, &access_token, "No description", "", None).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(Some("Description is required".to_string()), error);

    // nothing reached the store
    let (_, notes, _) = helper::list_notes(&mut app, &access_token).await;
    assert!(notes.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_note_with_image() {
    let mut app = helper::setup_test_app().await;

    let access_token = helper::login(&mut app).await;

    let (status_code, created, _) = helper::maybe_create_note(
        &mut app,
        &access_token,
        "Trip",
        "Beach",
        Some(Image {
            file_name: "photo.jpg",
            bytes: b"not really a jpeg",
        }),
    )
    .await;
    assert_eq!(StatusCode::CREATED, status_code);

    let (note, notes) = created.unwrap();
    let key = note.image.clone().unwrap();
    assert!(helper::is_media_key_for(&key, "photo.jpg"));

    let image_url = note.image_url.clone().unwrap();
    assert!(image_url.starts_with(&format!("http://localhost:6000/files/{key}?token=")));
    assert_eq!(vec![note], notes);

    // the link works without a session
    let (status_code, content_type, body) = helper::download(&mut app, &image_url).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(Some("image/jpeg".to_string()), content_type);
    assert_eq!(&b"not really a jpeg"[..], &body[..]);
}

#[tokio::test]
async fn test_only_notes_with_image_get_a_link() {
    let mut app = helper::setup_test_app().await;

    let access_token = helper::login(&mut app).await;

    helper::create_note(&mut app, &access_token, "Plain", "Text only", None).await;
    helper::create_note(
        &mut app,
        &access_token,
        "Picture",
        "With image",
        Some(Image {
            file_name: "a.png",
            bytes: b"png",
        }),
    )
    .await;

    let (_, notes, _) = helper::list_notes(&mut app, &access_token).await;
    let notes = notes.unwrap();

    assert_eq!(2, notes.len());
    assert!(notes[0].image.is_none());
    assert!(notes[0].image_url.is_none());
    assert!(notes[1].image.is_some());
    assert!(notes[1].image_url.is_some());
}

#[tokio::test]
async fn test_upload_too_large() {
    let mut app = helper::setup_test_app().await;

    let access_token = helper::login(&mut app).await;

    let bytes = vec![0_u8; helper::MAX_UPLOAD_BYTES * 2];

    let (status_code, _, error) = helper::maybe_create_note(
        &mut app,
        &access_token,
        "Huge",
        "Too big",
        Some(Image {
            file_name: "huge.png",
            bytes: &bytes,
        }),
    )
    .await;
    assert_eq!(StatusCode::PAYLOAD_TOO_LARGE, status_code);
    assert_eq!(Some("Upload too large".to_string()), error);

    let (_, notes, _) = helper::list_notes(&mut app, &access_token).await;
    assert!(notes.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_note() {
    let mut app = helper::setup_test_app().await;

    let access_token = helper::login(&mut app).await;

    let keep = helper::create_note(&mut app, &access_token, "Keep", "Stays", None).await;
    let remove = helper::create_note(&mut app, &access_token, "Remove", "Goes", None).await;

    let (status_code, notes, _) =
        helper::maybe_delete_note(&mut app, &access_token, &remove.id.to_string()).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(vec![keep], notes.unwrap());

    // deleting again is no error
    let (status_code, notes, _) =
        helper::maybe_delete_note(&mut app, &access_token, &remove.id.to_string()).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(1, notes.unwrap().len());
}

#[tokio::test]
async fn test_delete_unknown_note() {
    let mut app = helper::setup_test_app().await;

    let access_token = helper::login(&mut app).await;

    let note = helper::create_note(&mut app, &access_token, "Only", "One", None).await;

    let (status_code, notes, _) = helper::maybe_delete_note(
        &mut app,
        &access_token,
        "00000000-0000-0000-0000-000000000000",
    )
    .await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(vec![note], notes.unwrap());

    let (status_code, notes, error) =
        helper::maybe_delete_note(&mut app, &access_token, "42").await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert!(notes.is_none());
    assert_eq!(Some("Invalid path parameter".to_string()), error);
}
