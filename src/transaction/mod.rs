//! Transactions: the monetary events recorded against a category, scoped to
//! their owning user.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

mod create;
mod db;
mod delete;
mod domain;
mod get;
mod list;
mod update;
mod view;

pub use create::create_transaction_endpoint;
pub use db::{
    NewTransaction, create_transaction, create_transaction_table, delete_transaction,
    get_transaction, get_transactions_by_owner, update_transaction,
};
pub use delete::delete_transaction_endpoint;
pub use domain::{CategoryRef, Transaction, TransactionData, TransactionId};
pub use get::get_transaction_endpoint;
pub use list::list_transactions_endpoint;
pub use update::update_transaction_endpoint;
pub use view::TransactionView;

/// The state needed for the transaction endpoints.
#[derive(Debug, Clone)]
pub struct TransactionEndpointState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
