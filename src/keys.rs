//! Signing keys shared by access tokens and media links

use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;

/// The keys used for encoding/decoding JWT tokens
#[derive(Clone)]
pub struct JwtKeys {
    /// The encoding key
    pub encoding: EncodingKey,

    /// The decoding key
    pub decoding: DecodingKey,
}

impl JwtKeys {
    /// Create new encoding/decoding keys, derived from a secret
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}
