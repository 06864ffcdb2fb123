//! JSON projections of a category.
//!
//! Field visibility depends on where the category appears: the owner is only
//! exposed when the category is the top-level resource, never when it is
//! nested inside a transaction payload.

use serde::{Deserialize, Serialize};

use crate::category::{Category, CategoryId};

/// The fields of a category exposed to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryView {
    /// The category's ID.
    pub id: CategoryId,
    /// The name of the category.
    pub name: String,
    /// The ID of the owning user. Omitted when the category is nested inside
    /// another resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<i64>,
}

impl CategoryView {
    /// Project a category read as a top-level resource.
    pub fn top_level(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.to_string(),
            owner: Some(category.owner.as_i64()),
        }
    }

    /// Project a category nested inside another resource.
    pub fn nested(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.to_string(),
            owner: None,
        }
    }
}
