//! Category update endpoint.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    auth::Actor,
    category::{
        Category, CategoryData, CategoryEndpointState, CategoryId, CategoryName, CategoryView,
        get_category, update_category,
    },
    ownership::authorize_owner,
    validation::ValidationErrors,
};

/// Update a category.
///
/// Only fields present in the payload are applied; an absent name keeps the
/// stored value. The merged record is validated under the same rules as
/// creation. The owner can never be changed.
pub async fn update_category_endpoint(
    State(state): State<CategoryEndpointState>,
    actor: Actor,
    Path(category_id): Path<CategoryId>,
    Json(data): Json<CategoryData>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let category = authorize_owner(get_category(category_id, &connection)?, actor.user_id)?;

    let name = match data.name.as_deref() {
        Some(raw_name) => CategoryName::new(raw_name)
            .map_err(|error| ValidationErrors::single("name", error))?,
        None => category.name.clone(),
    };

    update_category(category.id, &name, &connection)?;

    let updated_category = Category {
        id: category.id,
        name,
        owner: category.owner,
    };

    Ok(Json(CategoryView::top_level(&updated_category)).into_response())
}
