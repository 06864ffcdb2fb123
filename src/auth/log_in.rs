//! Handler for exchanging an email and password for a signed token.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use email_address::EmailAddress;
use jsonwebtoken::EncodingKey;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, auth::encode_token, user::get_user_by_email};

/// The state needed for the log in endpoint.
#[derive(Clone)]
pub struct LogInState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The key for signing new tokens.
    pub encoding_key: EncodingKey,
}

impl FromRef<AppState> for LogInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            encoding_key: state.jwt_keys.encoding_key.clone(),
        }
    }
}

/// The credentials presented at log in.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    /// Email entered during log-in.
    pub email: EmailAddress,
    /// Password entered during log-in.
    pub password: String,
}

/// The response body for a successful log in.
#[derive(Debug, Serialize, Deserialize)]
pub struct LogInResponse {
    /// A human readable confirmation message.
    pub message: String,
    /// The signed token to present on protected routes.
    pub token: String,
    /// The ID of the authenticated user.
    pub user_id: i64,
    /// The email address of the authenticated user.
    pub email: String,
}

/// Handler for log-in requests.
///
/// Returns the same error for an unknown email and a wrong password so the
/// response does not reveal which emails are registered.
///
/// # Errors
///
/// This function will return an error in a few situations.
/// - The email does not belong to a registered user.
/// - The password is not correct.
/// - An internal error occurred when verifying the password.
pub async fn post_login_check(
    State(state): State<LogInState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<LogInResponse>, Error> {
    let user = {
        let connection = state
            .db_connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        get_user_by_email(&credentials.email, &connection).map_err(|error| match error {
            Error::NotFound => Error::InvalidCredentials,
            error => {
                tracing::error!("Error matching user: {error:?}");
                error
            }
        })?
    };

    let password_is_correct = user
        .password_hash
        .verify(&credentials.password)
        .map_err(|error| {
            tracing::error!("Error verifying password: {}", error);
            Error::HashingError(error.to_string())
        })?;

    if !password_is_correct {
        return Err(Error::InvalidCredentials);
    }

    let token = encode_token(&user, &state.encoding_key)?;

    Ok(Json(LogInResponse {
        message: "Authentication successful!".to_owned(),
        token,
        user_id: user.id.as_i64(),
        email: user.email.to_string(),
    }))
}
