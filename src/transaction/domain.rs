//! Core transaction domain types and payload validation helpers.

use serde::Deserialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{Error, category::CategoryId, ownership::Owned, user::UserID};

/// Database identifier for a transaction.
pub type TransactionId = i64;

const MAX_DESCRIPTION_CHARS: usize = 255;
const MAX_TYPE_CHARS: usize = 50;

/// Date format for transaction dates, e.g. "2025-01-01".
pub(crate) const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

pub(crate) mod date_format {
    //! Serializes a [time::Date] as a `YYYY-MM-DD` string, matching the form
    //! clients submit dates in.
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    use super::DATE_FORMAT;

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = date.format(DATE_FORMAT).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Date::parse(&s, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The transaction's ID in the application database.
    pub id: TransactionId,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction happened.
    pub date: Date,
    /// A free-form label such as "income" or "expense".
    pub kind: String,
    /// The ID of the category the transaction belongs to.
    ///
    /// The referenced category always has the same owner as the transaction.
    pub category_id: CategoryId,
    /// The ID of the user that owns this transaction.
    pub owner: UserID,
}

impl Owned for Transaction {
    fn owner(&self) -> UserID {
        self.owner
    }
}

/// A reference to a category in a transaction payload.
///
/// Clients may send either a bare ID (`3`) or an object (`{"id": 3}`); both
/// forms resolve to the same category.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    /// A bare category ID.
    Id(CategoryId),
    /// An object wrapping the category ID.
    Object {
        /// The category ID.
        id: CategoryId,
    },
}

impl CategoryRef {
    /// The referenced category ID.
    pub fn id(self) -> CategoryId {
        match self {
            CategoryRef::Id(id) => id,
            CategoryRef::Object { id } => id,
        }
    }
}

/// The JSON payload for creating or updating a transaction.
///
/// Every field is optional so the same payload type serves partial updates;
/// creation checks that the required fields are present. There is
/// intentionally no owner field: the owner is always derived from the
/// authenticated actor.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionData {
    /// The amount of money spent or earned.
    pub amount: Option<f64>,
    /// A text description of what the transaction was for.
    pub description: Option<String>,
    /// When the transaction happened, as a `YYYY-MM-DD` string.
    pub date: Option<String>,
    /// A free-form label such as "income" or "expense".
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// The category the transaction belongs to.
    pub category: Option<CategoryRef>,
}

/// Validate a transaction description.
pub(crate) fn validate_description(raw: &str) -> Result<String, Error> {
    if raw.trim().is_empty() {
        Err(Error::EmptyDescription)
    } else if raw.chars().count() > MAX_DESCRIPTION_CHARS {
        Err(Error::DescriptionTooLong)
    } else {
        Ok(raw.to_string())
    }
}

/// Validate a transaction type label.
pub(crate) fn validate_kind(raw: &str) -> Result<String, Error> {
    if raw.trim().is_empty() {
        Err(Error::EmptyTransactionType)
    } else if raw.chars().count() > MAX_TYPE_CHARS {
        Err(Error::TransactionTypeTooLong)
    } else {
        Ok(raw.to_string())
    }
}

/// Parse a `YYYY-MM-DD` date string.
pub(crate) fn parse_date(raw: &str) -> Result<Date, Error> {
    Date::parse(raw, DATE_FORMAT).map_err(|_| Error::InvalidDate(raw.to_string()))
}
