//! Session API: sign in, who am I, sign out

use axum::Extension;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::board::Session;
use crate::keys::JwtKeys;
use crate::password::verify;
use crate::storage::Storage;

use super::Error;
use super::Form;
use super::Success;
use super::session::Token;
use super::session::generate_token;

/// The user response information
///
/// A subset of all the information, ready to be serialized for the outside world
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// The user ID
    pub id: Uuid,

    /// The username
    pub username: String,
}

/// Sign in form
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInForm {
    /// Username of the user
    username: String,
    /// Password of the user
    password: String,
}

/// Start a session
///
/// The token can then be used to access the rest of the API routes by using it in the
/// `Authorization` header
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -d '{ "username": "admin", "password": "verysecret" }' \
///     http://localhost:6000/api/session
/// ```
///
/// Response
/// ```json
/// { "data": { "token_type": "Bearer", "expires_in": 3600, "access_token": "some token" } }
/// ```
pub async fn sign_in<S: Storage>(
    Extension(jwt_keys): Extension<JwtKeys>,
    Extension(storage): Extension<S>,
    Form(form): Form<SignInForm>,
) -> Result<Success<Token>, Error> {
    let user = storage
        .find_single_user_by_username(&form.username)
        .await
        .map_err(Error::internal_server_error)?;

    match user {
        Some(user) if verify(&user.hashed_password, &form.password) => {
            tracing::info!("User {} signed in", user.username);

            generate_token(&jwt_keys, &user).map(Success::ok)
        }
        _ => Err(Error::bad_request("Invalid credentials")),
    }
}

/// The user of the current session
///
/// Request:
/// ```sh
/// curl -v -H 'Authorization: Bearer tokentokentoken' \
///     http://localhost:6000/api/session
/// ```
///
/// Response:
/// ```json
/// { "data": { "id": "<uuid>", "username": "admin" } }
/// ```
pub async fn me<S: Storage>(session: Session<S>) -> Success<UserResponse> {
    Success::ok(UserResponse {
        id: session.id,
        username: session.username.clone(),
    })
}

/// End the current session
///
/// Every token of the session stops working, sign in again for a new one
///
/// Request:
/// ```sh
/// curl -v -XPOST -H 'Authorization: Bearer tokentokentoken' \
///     http://localhost:6000/api/session/sign-out
/// ```
pub async fn sign_out<S: Storage>(session: Session<S>) -> Result<Success<&'static str>, Error> {
    session
        .sign_out()
        .await
        .map_err(Error::internal_server_error)?;

    Ok(Success::<&'static str>::no_content())
}
