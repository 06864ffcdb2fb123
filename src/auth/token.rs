//! Creation and verification of the signed tokens issued at log in.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{Error, user::User};

/// How long an issued token stays valid.
pub const TOKEN_DURATION: Duration = Duration::hours(1);

/// The contents of a signed authentication token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The ID of the authenticated user.
    pub sub: i64,
    /// The email address of the authenticated user.
    pub email: String,
    /// The time the token was issued as a unix timestamp.
    pub iat: usize,
    /// The expiry time of the token as a unix timestamp.
    pub exp: usize,
}

/// Create a signed token for `user`.
///
/// # Errors
///
/// Returns an [Error::TokenCreation] if the token could not be signed. The
/// error string should only be logged on the server, not shown to the client.
pub fn encode_token(user: &User, encoding_key: &EncodingKey) -> Result<String, Error> {
    let now = OffsetDateTime::now_utc();
    let claims = Claims {
        sub: user.id.as_i64(),
        email: user.email.to_string(),
        iat: now.unix_timestamp() as usize,
        exp: (now + TOKEN_DURATION).unix_timestamp() as usize,
    };

    encode(&Header::default(), &claims, encoding_key)
        .map_err(|error| Error::TokenCreation(error.to_string()))
}

/// Verify a presented token and return its claims.
///
/// # Errors
///
/// Returns an [Error::InvalidToken] if the token is malformed, was signed
/// with a different secret, or has expired.
pub fn decode_token(token: &str, decoding_key: &DecodingKey) -> Result<TokenData<Claims>, Error> {
    decode::<Claims>(token, decoding_key, &Validation::default()).map_err(|_| Error::InvalidToken)
}
