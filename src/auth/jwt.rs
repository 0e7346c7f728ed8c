//! Unverified id-token claim extraction.
//!
//! The signature is not checked: the id token only supplies the advisory
//! account `uuid`, the session itself rests on the opaque access token.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

use crate::error::{Result, ToyotaError};

/// Audience the vendor issues id tokens for.
pub const EXPECTED_AUDIENCE: &str = "oneappsdkclient";

#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    uuid: Option<String>,
    aud: Option<Audience>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Audience {
    One(String),
    Many(Vec<String>),
}

impl Audience {
    fn contains(&self, expected: &str) -> bool {
        match self {
            Self::One(aud) => aud == expected,
            Self::Many(auds) => auds.iter().any(|aud| aud == expected),
        }
    }
}

/// Read the `uuid` claim from an id token.
///
/// An `aud` claim, when present, must name [`EXPECTED_AUDIENCE`].
pub fn uuid_claim(id_token: &str) -> Result<String> {
    let mut parts = id_token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ToyotaError::login("id_token is not a JWT"));
    };
    let decoded = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|_| ToyotaError::login("id_token payload is not base64url"))?;
    let claims: IdTokenClaims = serde_json::from_slice(&decoded)
        .map_err(|e| ToyotaError::login(format!("id_token payload is not JSON: {e}")))?;

    if let Some(aud) = &claims.aud {
        if !aud.contains(EXPECTED_AUDIENCE) {
            return Err(ToyotaError::login("id_token audience mismatch"));
        }
    }

    claims
        .uuid
        .filter(|uuid| !uuid.is_empty())
        .ok_or_else(|| ToyotaError::login("id_token has no uuid claim"))
}
