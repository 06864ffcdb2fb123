//! JSON projection of a transaction.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    category::{Category, CategoryView},
    transaction::{Transaction, TransactionId, domain::date_format},
};

/// The fields of a transaction exposed to the client.
///
/// The nested category carries only its ID and name; the category owner is
/// never re-expanded through the relation. The transaction owner itself is
/// readable but never client-writable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionView {
    /// The transaction's ID.
    pub id: TransactionId,
    /// The amount of money spent or earned.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction happened, as a `YYYY-MM-DD` string.
    #[serde(with = "date_format")]
    pub date: Date,
    /// A free-form label such as "income" or "expense".
    #[serde(rename = "type")]
    pub kind: String,
    /// The category the transaction belongs to, nested without its owner.
    pub category: CategoryView,
    /// The ID of the owning user.
    pub owner: i64,
}

impl TransactionView {
    /// Project a transaction and its category for a read response.
    pub fn from_parts(transaction: &Transaction, category: &Category) -> Self {
        Self {
            id: transaction.id,
            amount: transaction.amount,
            description: transaction.description.clone(),
            date: transaction.date,
            kind: transaction.kind.clone(),
            category: CategoryView::nested(category),
            owner: transaction.owner.as_i64(),
        }
    }
}
