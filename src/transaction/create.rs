//! Transaction creation endpoint.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    auth::Actor,
    transaction::{
        NewTransaction, TransactionData, TransactionEndpointState, TransactionView,
        create_transaction,
        domain::{parse_date, validate_description, validate_kind},
    },
    user::UserID,
    validation::ValidationErrors,
};

/// Handle transaction creation.
///
/// All fields are required. The referenced category must exist and be owned
/// by the actor; that check and the insert commit together. The owner is
/// always the authenticated actor regardless of the payload.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionEndpointState>,
    actor: Actor,
    Json(data): Json<TransactionData>,
) -> Result<Response, Error> {
    let new_transaction = validate_create_payload(data, actor.user_id)?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let (transaction, category) = create_transaction(new_transaction, &connection)?;

    Ok((
        StatusCode::CREATED,
        Json(TransactionView::from_parts(&transaction, &category)),
    )
        .into_response())
}

/// Check every required field is present and well formed, collecting all
/// failures into one field map.
fn validate_create_payload(data: TransactionData, owner: UserID) -> Result<NewTransaction, Error> {
    let mut errors = ValidationErrors::new();

    let amount = data.amount.or_else(|| {
        errors.add("amount", "Amount is required.");
        None
    });

    let description = match data.description.as_deref() {
        None => {
            errors.add("description", "Description is required.");
            None
        }
        Some(raw) => match validate_description(raw) {
            Ok(description) => Some(description),
            Err(error) => {
                errors.add("description", error);
                None
            }
        },
    };

    let date = match data.date.as_deref() {
        None => {
            errors.add("date", "Date is required.");
            None
        }
        Some(raw) => match parse_date(raw) {
            Ok(date) => Some(date),
            Err(error) => {
                errors.add("date", error);
                None
            }
        },
    };

    let kind = match data.kind.as_deref() {
        None => {
            errors.add("type", "Type is required.");
            None
        }
        Some(raw) => match validate_kind(raw) {
            Ok(kind) => Some(kind),
            Err(error) => {
                errors.add("type", error);
                None
            }
        },
    };

    let category_id = data.category.map(|category| category.id()).or_else(|| {
        errors.add("category", "Category is required.");
        None
    });

    match (amount, description, date, kind, category_id) {
        (Some(amount), Some(description), Some(date), Some(kind), Some(category_id))
            if errors.is_empty() =>
        {
            Ok(NewTransaction {
                amount,
                description,
                date,
                kind,
                category_id,
                owner,
            })
        }
        _ => Err(Error::Validation(errors)),
    }
}
