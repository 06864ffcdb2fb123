//! Single transaction read endpoint.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    auth::Actor,
    ownership::authorize_owner,
    transaction::{TransactionEndpointState, TransactionId, TransactionView, get_transaction},
};

/// Get a single transaction by ID.
///
/// A transaction that does not exist and a transaction owned by another user
/// both produce a 404 response.
pub async fn get_transaction_endpoint(
    State(state): State<TransactionEndpointState>,
    actor: Actor,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let (transaction, category) = get_transaction(transaction_id, &connection)?;
    let transaction = authorize_owner(transaction, actor.user_id)?;

    Ok(Json(TransactionView::from_parts(&transaction, &category)).into_response())
}
