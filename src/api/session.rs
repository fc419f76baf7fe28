//! Session service
//!
//! Get the session from the request based on the Authorization header

use axum::Extension;
use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use jsonwebtoken::Validation;
use jsonwebtoken::decode;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::api::Error;
use crate::board::Session;
use crate::board::SessionGate;
use crate::keys::JwtKeys;
use crate::storage;
use crate::storage::Storage;
use crate::users::User;

/// Access tokens are valid for an hour
const TOKEN_LIFETIME: i64 = 3600;

/// The JWT claims to identifies a user
#[derive(Debug, Deserialize, Serialize)]
struct Claims {
    /// The user ID
    sub: Uuid,

    /// Expiration as UNIX timestamp
    exp: i64,

    /// A sessions ID, used to expire/invalidate tokens before the expiration date
    jti: Uuid,
}

/// Token information served to the user
#[derive(Debug, Serialize)]
pub struct Token {
    /// Type of the token: Bearer
    #[allow(clippy::struct_field_names)] // `type` is a reserved keyword
    token_type: String,

    /// In how many seconds does the token expire
    expires_in: i64,

    /// The access token to provide to follow up requests in the Authorization header
    #[allow(clippy::struct_field_names)] // `access_token` is the name of the field
    access_token: String,
}

impl Token {
    /// Create a new token response
    fn new(access_token: String, expires_in: i64) -> Self {
        Self {
            token_type: "Bearer".to_string(),
            expires_in,
            access_token,
        }
    }
}

/// Generate a token for the outside world for a given user
pub fn generate_token(jwt_keys: &JwtKeys, user: &User) -> Result<Token, Error> {
    use jsonwebtoken::Header;
    use jsonwebtoken::encode;

    let claims = Claims {
        sub: user.id,
        exp: chrono::Utc::now().timestamp() + TOKEN_LIFETIME,
        jti: user.session_id,
    };

    let access_token = encode(&Header::default(), &claims, &jwt_keys.encoding)
        .map_err(Error::internal_server_error)?;

    Ok(Token::new(access_token, TOKEN_LIFETIME))
}

/// Find the user a token belongs to
///
/// `None` for anything that does not make a session: bad signature, expired, signed out, unknown
/// or deleted user
async fn authenticate<S: Storage>(
    storage: &S,
    jwt_keys: &JwtKeys,
    token: &str,
) -> storage::Result<Option<User>> {
    let claims = match decode::<Claims>(token, &jwt_keys.decoding, &Validation::default()) {
        Ok(token_data) => token_data.claims,
        Err(err) => {
            tracing::debug!("Rejected token: {err}");
            return Ok(None);
        }
    };

    let user = storage.find_single_user_by_id(&claims.sub).await?;

    // mechanism to invalidate JWT tokens
    Ok(user.filter(|user| user.session_id == claims.jti))
}

impl<S, St> FromRequestParts<St> for SessionGate<S>
where
    S: Storage,
    St: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &St) -> Result<Self, Self::Rejection> {
        let Extension(jwt_keys) = parts
            .extract::<Extension<JwtKeys>>()
            .await
            .map_err(|_| Error::internal_server_error("Could not get JWT keys"))?;

        let Extension(storage) = parts
            .extract::<Extension<S>>()
            .await
            .map_err(|_| Error::internal_server_error("Could not get the storage"))?;

        let Ok(TypedHeader(Authorization(bearer))) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await
        else {
            return Ok(SessionGate::Unauthenticated);
        };

        let user = authenticate(&storage, &jwt_keys, bearer.token())
            .await
            .map_err(Error::internal_server_error)?;

        Ok(user.map_or(SessionGate::Unauthenticated, |user| {
            SessionGate::Authenticated(Session::new(storage, user))
        }))
    }
}

impl<S, St> FromRequestParts<St> for Session<S>
where
    S: Storage,
    St: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &St) -> Result<Self, Self::Rejection> {
        SessionGate::<S>::from_request_parts(parts, state)
            .await?
            .render(|| Err(Error::unauthorized("Sign in to continue")), Ok)
    }
}
