//! Category creation endpoint.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    auth::Actor,
    category::{CategoryData, CategoryEndpointState, CategoryName, CategoryView, create_category},
    validation::ValidationErrors,
};

/// Handle category creation.
///
/// The owner is always the authenticated actor; the payload carries no owner
/// field and any extra fields a client sends are ignored.
pub async fn create_category_endpoint(
    State(state): State<CategoryEndpointState>,
    actor: Actor,
    Json(data): Json<CategoryData>,
) -> Result<Response, Error> {
    let name = match data.name.as_deref() {
        Some(raw_name) => CategoryName::new(raw_name)
            .map_err(|error| ValidationErrors::single("name", error))?,
        None => return Err(ValidationErrors::single("name", "Name is required.")),
    };

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let category = create_category(name, actor.user_id, &connection)?;

    Ok((StatusCode::CREATED, Json(CategoryView::top_level(&category))).into_response())
}

#[cfg(test)]
mod create_category_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
    use rusqlite::Connection;

    use crate::{
        PasswordHash,
        auth::Actor,
        category::{CategoryData, CategoryEndpointState, get_categories_by_owner},
        db::initialize,
        user::{User, create_user},
    };

    use super::create_category_endpoint;

    fn get_category_state() -> (CategoryEndpointState, User) {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        let user = create_user(
            "foo@bar.baz".parse().unwrap(),
            PasswordHash::new_unchecked("hunter2"),
            &[],
            &connection,
        )
        .expect("Could not create test user");

        (
            CategoryEndpointState {
                db_connection: Arc::new(Mutex::new(connection)),
            },
            user,
        )
    }

    fn actor_for(user: &User) -> Actor {
        Actor {
            user_id: user.id,
            email: user.email.clone(),
        }
    }

    #[tokio::test]
    async fn can_create_category() {
        let (state, user) = get_category_state();
        let data = CategoryData {
            name: Some("Groceries".to_string()),
        };

        let response =
            create_category_endpoint(State(state.clone()), actor_for(&user), Json(data))
                .await
                .into_response();

        assert_eq!(response.status(), StatusCode::CREATED);

        let connection = state.db_connection.lock().unwrap();
        let categories = get_categories_by_owner(user.id, &connection).unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name.as_ref(), "Groceries");
        assert_eq!(categories[0].owner, user.id);
    }

    #[tokio::test]
    async fn create_category_fails_on_missing_name() {
        let (state, user) = get_category_state();
        let data = CategoryData { name: None };

        let response = create_category_endpoint(State(state.clone()), actor_for(&user), Json(data))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let connection = state.db_connection.lock().unwrap();
        assert!(get_categories_by_owner(user.id, &connection).unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_category_fails_on_empty_name() {
        let (state, user) = get_category_state();
        let data = CategoryData {
            name: Some("".to_string()),
        };

        let response = create_category_endpoint(State(state), actor_for(&user), Json(data))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_category_fails_on_name_over_100_chars() {
        let (state, user) = get_category_state();
        let data = CategoryData {
            name: Some("a".repeat(101)),
        };

        let response = create_category_endpoint(State(state), actor_for(&user), Json(data))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
