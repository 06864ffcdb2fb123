//! Transaction deletion endpoint.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    auth::Actor,
    ownership::authorize_owner,
    transaction::{TransactionEndpointState, TransactionId, delete_transaction, get_transaction},
};

/// Delete a transaction. Unlike categories, nothing references a transaction,
/// so the delete is unconditional once the ownership check passes.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionEndpointState>,
    actor: Actor,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let (transaction, _) = get_transaction(transaction_id, &connection)?;
    let transaction = authorize_owner(transaction, actor.user_id)?;

    delete_transaction(transaction.id, &connection)?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
