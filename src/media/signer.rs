//! Signed, time-limited media links

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;
use percent_encoding::utf8_percent_encode;
use serde::Deserialize;
use serde::Serialize;
use url::Url;

use crate::keys::JwtKeys;

use super::Error;
use super::Result;

/// Audience of media tokens, keeps them apart from access tokens
const AUDIENCE: &str = "media";

/// Path under which signed links are served
pub const FILES_PATH: &str = "files";

/// Characters left alone within a single path segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// The claims of a media token
#[derive(Debug, Deserialize, Serialize)]
struct MediaClaims {
    /// The storage key
    sub: String,

    /// Always [`AUDIENCE`]
    aud: String,

    /// Expiration as UNIX timestamp
    exp: i64,
}

/// Signs and verifies links to stored media
#[derive(Clone)]
pub struct UrlSigner {
    keys: JwtKeys,
    public_url: Url,
    ttl: Duration,
}

impl UrlSigner {
    pub fn new(keys: JwtKeys, public_url: Url, ttl: Duration) -> Self {
        Self {
            keys,
            public_url,
            ttl,
        }
    }

    /// Sign a link to the key, valid for the configured TTL from now
    pub fn sign(&self, key: &str) -> Result<Url> {
        self.sign_at(key, Utc::now().timestamp())
    }

    /// Sign a link as if it is `now`
    pub(crate) fn sign_at(&self, key: &str, now: i64) -> Result<Url> {
        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);

        let claims = MediaClaims {
            sub: key.to_string(),
            aud: AUDIENCE.to_string(),
            exp: now.saturating_add(ttl),
        };

        let token = encode(&Header::default(), &claims, &self.keys.encoding)?;

        let encoded_key = key
            .split('/')
            .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/");

        let mut url = self.public_url.clone();
        let base_path = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{base_path}/{FILES_PATH}/{encoded_key}"));
        url.query_pairs_mut().clear().append_pair("token", &token);

        Ok(url)
    }

    /// Verify the token of a link is valid for the key
    pub fn verify(&self, key: &str, token: &str) -> Result<()> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        validation.set_audience(&[AUDIENCE]);

        let token_data = decode::<MediaClaims>(token, &self.keys.decoding, &validation)?;

        if token_data.claims.sub == key {
            Ok(())
        } else {
            Err(Error::KeyMismatch(key.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer(public_url: &str) -> UrlSigner {
        UrlSigner::new(
            JwtKeys::new(b"verysecret"),
            Url::parse(public_url).unwrap(),
            Duration::from_secs(900),
        )
    }

    fn token(url: &Url) -> String {
        url.query_pairs()
            .find(|(name, _)| name == "token")
            .map(|(_, value)| value.to_string())
            .unwrap()
    }

    #[test]
    fn test_sign_builds_file_link() {
        let url = signer("http://localhost:6000")
            .sign("media/1-my photo.jpg")
            .unwrap();

        assert_eq!("/files/media/1-my%20photo.jpg", url.path());
        assert!(!token(&url).is_empty());
    }

    #[test]
    fn test_sign_keeps_base_path() {
        let url = signer("https://notes.example.com/board/")
            .sign("media/1-a.png")
            .unwrap();

        assert_eq!("/board/files/media/1-a.png", url.path());
    }

    #[test]
    fn test_verify_round_trip() {
        let signer = signer("http://localhost:6000");
        let url = signer.sign("media/1-a.png").unwrap();

        assert!(signer.verify("media/1-a.png", &token(&url)).is_ok());
    }

    #[test]
    fn test_verify_rejects_other_key() {
        let signer = signer("http://localhost:6000");
        let url = signer.sign("media/1-a.png").unwrap();

        assert!(matches!(
            signer.verify("media/1-b.png", &token(&url)),
            Err(Error::KeyMismatch(_))
        ));
    }

    #[test]
    fn test_verify_rejects_expired_link() {
        let signer = signer("http://localhost:6000");
        let an_hour_ago = Utc::now().timestamp() - 3600;
        let url = signer.sign_at("media/1-a.png", an_hour_ago).unwrap();

        assert!(matches!(
            signer.verify("media/1-a.png", &token(&url)),
            Err(Error::Signing(_))
        ));
    }

    #[test]
    fn test_verify_rejects_other_secret() {
        let url = signer("http://localhost:6000").sign("media/1-a.png").unwrap();

        let other = UrlSigner::new(
            JwtKeys::new(b"othersecret"),
            Url::parse("http://localhost:6000").unwrap(),
            Duration::from_secs(900),
        );

        assert!(other.verify("media/1-a.png", &token(&url)).is_err());
    }
}
