use axum::http::StatusCode;

use crate::tests::helper;

#[tokio::test]
async fn test_login() {
    let mut app = helper::setup_test_app().await;

    let access_token = helper::login(&mut app).await;
    assert!(access_token.len() > 10);

    let (status_code, user, _) = helper::current_user(&mut app, &access_token).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!("admin", user.unwrap().username);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let mut app = helper::setup_test_app().await;

    let (status_code, access_token, error) =
        helper::login_with_password(&mut app, "not the password").await;

    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert!(access_token.is_none());
    assert_eq!("Invalid credentials".to_string(), error.unwrap().error);
}
