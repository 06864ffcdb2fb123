//! Single category read endpoint.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    auth::Actor,
    category::{CategoryEndpointState, CategoryId, CategoryView, get_category},
    ownership::authorize_owner,
};

/// Get a single category by ID.
///
/// A category that does not exist and a category owned by another user both
/// produce a 404 response.
pub async fn get_category_endpoint(
    State(state): State<CategoryEndpointState>,
    actor: Actor,
    Path(category_id): Path<CategoryId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let category = authorize_owner(get_category(category_id, &connection)?, actor.user_id)?;

    Ok(Json(CategoryView::top_level(&category)).into_response())
}
