//! Transaction update endpoint.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    auth::Actor,
    ownership::authorize_owner,
    transaction::{
        Transaction, TransactionData, TransactionEndpointState, TransactionId, TransactionView,
        domain::{parse_date, validate_description, validate_kind},
        get_transaction, update_transaction,
    },
    validation::ValidationErrors,
};

/// Update a transaction.
///
/// Only fields present in the payload are applied; absent fields keep their
/// stored values. The merged record is validated under the same rules as
/// creation, including ownership of a newly referenced category. The owner
/// can never be changed.
pub async fn update_transaction_endpoint(
    State(state): State<TransactionEndpointState>,
    actor: Actor,
    Path(transaction_id): Path<TransactionId>,
    Json(data): Json<TransactionData>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let (transaction, _) = get_transaction(transaction_id, &connection)?;
    let transaction = authorize_owner(transaction, actor.user_id)?;

    let merged = merge_payload(&transaction, data)?;

    let category = update_transaction(&merged, &connection)?;

    Ok(Json(TransactionView::from_parts(&merged, &category)).into_response())
}

/// Apply the fields present in `data` on top of `transaction`, validating
/// each supplied value and collecting all failures into one field map.
fn merge_payload(transaction: &Transaction, data: TransactionData) -> Result<Transaction, Error> {
    let mut errors = ValidationErrors::new();

    let amount = data.amount.unwrap_or(transaction.amount);

    let description = match data.description.as_deref() {
        None => transaction.description.clone(),
        Some(raw) => match validate_description(raw) {
            Ok(description) => description,
            Err(error) => {
                errors.add("description", error);
                transaction.description.clone()
            }
        },
    };

    let date = match data.date.as_deref() {
        None => transaction.date,
        Some(raw) => match parse_date(raw) {
            Ok(date) => date,
            Err(error) => {
                errors.add("date", error);
                transaction.date
            }
        },
    };

    let kind = match data.kind.as_deref() {
        None => transaction.kind.clone(),
        Some(raw) => match validate_kind(raw) {
            Ok(kind) => kind,
            Err(error) => {
                errors.add("type", error);
                transaction.kind.clone()
            }
        },
    };

    let category_id = data
        .category
        .map(|category| category.id())
        .unwrap_or(transaction.category_id);

    errors.into_result()?;

    Ok(Transaction {
        id: transaction.id,
        amount,
        description,
        date,
        kind,
        category_id,
        owner: transaction.owner,
    })
}
