//! Extraction of the authenticated actor at the request boundary.
//!
//! Protected route handlers take an [Actor] argument instead of reading the
//! security context themselves, so the identity used for ownership checks is
//! resolved exactly once per request.

use axum::{
    RequestPartsExt,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use email_address::EmailAddress;
use jsonwebtoken::DecodingKey;

use crate::{AppState, Error, auth::decode_token, user::UserID};

/// The state needed to verify bearer tokens.
#[derive(Clone)]
pub struct AuthState {
    /// The key for verifying presented tokens.
    pub decoding_key: DecodingKey,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            decoding_key: state.jwt_keys.decoding_key.clone(),
        }
    }
}

/// The authenticated caller of a request.
///
/// Extracted from the `Authorization: Bearer` header. Handlers receive this
/// as a plain argument; it is the only source of identity for ownership
/// checks and owner assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    /// The ID of the authenticated user.
    pub user_id: UserID,
    /// The email address of the authenticated user.
    pub email: EmailAddress,
}

impl<S> FromRequestParts<S> for Actor
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| Error::InvalidToken)?;

        let auth_state = AuthState::from_ref(state);
        let claims = decode_token(bearer.token(), &auth_state.decoding_key)?.claims;

        let email = claims.email.parse().map_err(|_| Error::InvalidToken)?;

        Ok(Actor {
            user_id: UserID::new(claims.sub),
            email,
        })
    }
}
