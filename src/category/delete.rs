//! Category deletion endpoint.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    auth::Actor,
    category::{CategoryEndpointState, CategoryId, delete_category, get_category},
    ownership::authorize_owner,
};

/// Delete a category.
///
/// Fails with a conflict while any transaction still references the category;
/// transactions are never cascade-deleted.
pub async fn delete_category_endpoint(
    State(state): State<CategoryEndpointState>,
    actor: Actor,
    Path(category_id): Path<CategoryId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let category = authorize_owner(get_category(category_id, &connection)?, actor.user_id)?;

    delete_category(category.id, &connection)?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
