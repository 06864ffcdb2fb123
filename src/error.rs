//! Defines the app level error type and its mapping onto JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::validation::ValidationErrors;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user provided an email/password combination that does not match a
    /// registered user.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The bearer token was missing from the request, could not be decoded,
    /// or has expired.
    #[error("invalid or missing authentication token")]
    InvalidToken,

    /// The signed token could not be created.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("could not create authentication token: {0}")]
    TokenCreation(String),

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The request payload failed validation.
    ///
    /// Holds a map from field name to a message describing what is wrong with
    /// that field, so the client can highlight the offending input.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// An empty string was used to create a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// A string longer than the allowed maximum was used to create a category name.
    #[error("Category name must be at most 100 characters")]
    CategoryNameTooLong,

    /// An empty string was used as a transaction description.
    #[error("Description cannot be empty")]
    EmptyDescription,

    /// A string longer than the allowed maximum was used as a transaction description.
    #[error("Description must be at most 255 characters")]
    DescriptionTooLong,

    /// An empty string was used as a transaction type.
    #[error("Transaction type cannot be empty")]
    EmptyTransactionType,

    /// A string longer than the allowed maximum was used as a transaction type.
    #[error("Transaction type must be at most 50 characters")]
    TransactionTypeTooLong,

    /// A date string could not be parsed.
    ///
    /// Dates must be calendar dates in the form `YYYY-MM-DD`.
    #[error("\"{0}\" is not a valid date, expected the form YYYY-MM-DD")]
    InvalidDate(String),

    /// The category ID on a transaction write did not refer to a category
    /// owned by the actor.
    ///
    /// A category belonging to another user produces this same error as a
    /// nonexistent category, so the response does not reveal whether the
    /// category exists.
    #[error("the category ID does not refer to a valid category")]
    InvalidCategory,

    /// Tried to delete a category that is still referenced by at least one
    /// transaction.
    #[error("the category is still referenced by one or more transactions")]
    CategoryInUse,

    /// The requested resource was not found.
    ///
    /// Also returned when the resource exists but belongs to another user, so
    /// that non-owners cannot tell whether another user's resource exists.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            Error::InvalidCategory => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "errors": {
                        "category": "Category not found or does not belong to the current user."
                    }
                })),
            )
                .into_response(),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "The requested resource could not be found." })),
            )
                .into_response(),
            Error::CategoryInUse => (
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "The category is still referenced by one or more transactions."
                })),
            )
                .into_response(),
            Error::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid credentials." })),
            )
                .into_response(),
            Error::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid or missing authentication token." })),
            )
                .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error." })),
                )
                    .into_response()
            }
        }
    }
}
