//! Categories for grouping transactions, scoped to their owning user.

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

pub use create::create_category_endpoint;
pub use db::{
    create_category, create_category_table, delete_category, get_categories_by_owner, get_category,
    update_category,
};
pub use delete::delete_category_endpoint;
pub use domain::{Category, CategoryData, CategoryId, CategoryName};
pub use get::get_category_endpoint;
pub use list::list_categories_endpoint;
pub use update::update_category_endpoint;
pub use view::CategoryView;

/// The state needed for the category endpoints.
#[derive(Debug, Clone)]
pub struct CategoryEndpointState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
