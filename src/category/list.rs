//! Category listing endpoint.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    auth::Actor,
    category::{CategoryEndpointState, CategoryView, get_categories_by_owner},
};

/// List the actor's categories.
///
/// The listing is filtered to the actor at the query level; no request
/// parameter can widen it to another user's rows.
pub async fn list_categories_endpoint(
    State(state): State<CategoryEndpointState>,
    actor: Actor,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_categories_by_owner(actor.user_id, &connection)?;
    let views: Vec<CategoryView> = categories.iter().map(CategoryView::top_level).collect();

    Ok(Json(views).into_response())
}
