//! Transaction listing endpoint.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    auth::Actor,
    transaction::{TransactionEndpointState, TransactionView, get_transactions_by_owner},
};

/// List the actor's transactions.
///
/// The listing is filtered to the actor at the query level; no request
/// parameter can widen it to another user's rows.
pub async fn list_transactions_endpoint(
    State(state): State<TransactionEndpointState>,
    actor: Actor,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = get_transactions_by_owner(actor.user_id, &connection)?;
    let views: Vec<TransactionView> = transactions
        .iter()
        .map(|(transaction, category)| TransactionView::from_parts(transaction, category))
        .collect();

    Ok(Json(views).into_response())
}

#[cfg(test)]
mod list_transactions_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode, response::IntoResponse};
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        PasswordHash,
        auth::Actor,
        category::{CategoryName, create_category},
        db::initialize,
        transaction::{
            NewTransaction, TransactionEndpointState, TransactionView, create_transaction,
        },
        user::{User, create_user},
    };

    use super::list_transactions_endpoint;

    fn get_state_with_two_users() -> (TransactionEndpointState, User, User) {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        let user = create_user(
            "foo@bar.baz".parse().unwrap(),
            PasswordHash::new_unchecked("hunter2"),
            &[],
            &connection,
        )
        .unwrap();
        let other_user = create_user(
            "bar@baz.qux".parse().unwrap(),
            PasswordHash::new_unchecked("hunter3"),
            &[],
            &connection,
        )
        .unwrap();

        (
            TransactionEndpointState {
                db_connection: Arc::new(Mutex::new(connection)),
            },
            user,
            other_user,
        )
    }

    async fn get_listed_views(
        state: TransactionEndpointState,
        user: &User,
    ) -> Vec<TransactionView> {
        let actor = Actor {
            user_id: user.id,
            email: user.email.clone(),
        };

        let response = list_transactions_endpoint(State(state), actor)
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn list_is_empty_for_new_user() {
        let (state, user, _other_user) = get_state_with_two_users();

        let views = get_listed_views(state, &user).await;

        assert!(views.is_empty());
    }

    #[tokio::test]
    async fn list_only_contains_own_transactions() {
        let (state, user, other_user) = get_state_with_two_users();
        {
            let connection = state.db_connection.lock().unwrap();
            let category =
                create_category(CategoryName::new_unchecked("Food"), user.id, &connection)
                    .unwrap();
            let other_category = create_category(
                CategoryName::new_unchecked("Rent"),
                other_user.id,
                &connection,
            )
            .unwrap();

            create_transaction(
                NewTransaction {
                    amount: 1.5,
                    description: "Mine".to_string(),
                    date: date!(2025 - 01 - 01),
                    kind: "expense".to_string(),
                    category_id: category.id,
                    owner: user.id,
                },
                &connection,
            )
            .unwrap();
            create_transaction(
                NewTransaction {
                    amount: 1200.0,
                    description: "Theirs".to_string(),
                    date: date!(2025 - 01 - 02),
                    kind: "expense".to_string(),
                    category_id: other_category.id,
                    owner: other_user.id,
                },
                &connection,
            )
            .unwrap();
        }

        let views = get_listed_views(state, &user).await;

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].description, "Mine");
        assert_eq!(views[0].owner, user.id.as_i64());
    }
}
