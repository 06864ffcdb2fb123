//! Core category domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, ownership::Owned, user::UserID};

/// Database identifier for a category.
pub type CategoryId = i64;

const MAX_NAME_CHARS: usize = 100;

/// A validated category name: non-empty after trimming and at most 100
/// characters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// Returns an [Error::EmptyCategoryName] if `name` is empty or just
    /// whitespace, or an [Error::CategoryNameTooLong] if it exceeds 100
    /// characters.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else if name.chars().count() > MAX_NAME_CHARS {
            Err(Error::CategoryNameTooLong)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the non-empty invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A category for expenses and income, e.g., 'Groceries', 'Eating Out', 'Wages'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    /// The category's ID in the application database.
    pub id: CategoryId,
    /// The name of the category.
    pub name: CategoryName,
    /// The ID of the user that owns the category.
    pub owner: UserID,
}

impl Owned for Category {
    fn owner(&self) -> UserID {
        self.owner
    }
}

/// The JSON payload for creating or updating a category.
///
/// There is intentionally no owner field: the owner is always derived from
/// the authenticated actor, and any owner value a client smuggles into the
/// payload is ignored by deserialization.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryData {
    /// The category name. Required on create; absent on update means the
    /// stored name is kept.
    pub name: Option<String>,
}
