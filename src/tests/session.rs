use axum::http::StatusCode;

use crate::tests::helper;

#[tokio::test]
async fn test_no_session_shows_sign_in_prompt() {
    let mut app = helper::setup_test_app().await;

    let (status_code, notes, error) = helper::list_notes(&mut app, "").await;
    assert_eq!(StatusCode::UNAUTHORIZED, status_code);
    assert!(notes.is_none());
    assert_eq!(Some("Sign in to continue".to_string()), error);

    let (status_code, _, error) = helper::current_user(&mut app, "Bearer garbage").await;
    assert_eq!(StatusCode::UNAUTHORIZED, status_code);
    assert_eq!(Some("Sign in to continue".to_string()), error);

    let (status_code, _, error) =
        helper::maybe_create_note(&mut app, "Bearer garbage", "Trip", "Beach", None).await;
    assert_eq!(StatusCode::UNAUTHORIZED, status_code);
    assert_eq!(Some("Sign in to continue".to_string()), error);
}

#[tokio::test]
async fn test_sign_out_ends_session() {
    let mut app = helper::setup_test_app().await;

    let access_token = helper::login(&mut app).await;

    let (status_code, _, _) = helper::list_notes(&mut app, &access_token).await;
    assert_eq!(StatusCode::OK, status_code);

    let status_code = helper::sign_out(&mut app, &access_token).await;
    assert_eq!(StatusCode::NO_CONTENT, status_code);

    // token of the ended session no longer works
    let (status_code, _, error) = helper::list_notes(&mut app, &access_token).await;
    assert_eq!(StatusCode::UNAUTHORIZED, status_code);
    assert_eq!(Some("Sign in to continue".to_string()), error);

    let status_code = helper::sign_out(&mut app, &access_token).await;
    assert_eq!(StatusCode::UNAUTHORIZED, status_code);

    // a new sign in starts a new session
    let access_token = helper::login(&mut app).await;

    let (status_code, user, _) = helper::current_user(&mut app, &access_token).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!("admin", user.unwrap().username);
}
