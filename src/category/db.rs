//! Database operations for categories.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{Category, CategoryId, CategoryName},
    user::UserID,
};

/// Create a category owned by `owner` and return it with its generated ID.
pub fn create_category(
    name: CategoryName,
    owner: UserID,
    connection: &Connection,
) -> Result<Category, Error> {
    connection.execute(
        "INSERT INTO category (name, owner_id) VALUES (?1, ?2)",
        (name.as_ref(), owner.as_i64()),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Category { id, name, owner })
}

/// Retrieve a single category by ID.
pub fn get_category(category_id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name, owner_id FROM category WHERE id = :id")?
        .query_row(&[(":id", &category_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all categories owned by `owner`.
///
/// The filter is applied in the query itself so a listing can never contain
/// another user's categories.
pub fn get_categories_by_owner(
    owner: UserID,
    connection: &Connection,
) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name, owner_id FROM category WHERE owner_id = :owner_id ORDER BY id ASC")?
        .query_map(&[(":owner_id", &owner.as_i64())], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Update a category's name.
///
/// # Errors
///
/// Returns an [Error::NotFound] if `category_id` does not refer to an
/// existing category.
pub fn update_category(
    category_id: CategoryId,
    name: &CategoryName,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE category SET name = ?1 WHERE id = ?2",
        (name.as_ref(), category_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Delete a category by ID.
///
/// # Errors
///
/// Returns an [Error::CategoryInUse] if any transaction still references the
/// category (the foreign key carries no cascade action, so the storage layer
/// rejects the delete), or an [Error::NotFound] if the category does not
/// exist.
pub fn delete_category(category_id: CategoryId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection
        .execute("DELETE FROM category WHERE id = ?1", [category_id])
        .map_err(|error| match error {
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(_))
                if sql_error.extended_code == 787 =>
            {
                Error::CategoryInUse
            }
            error => error.into(),
        })?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Initialize the category table and indexes.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            owner_id INTEGER NOT NULL,
            FOREIGN KEY(owner_id) REFERENCES user(id)
        );

        CREATE INDEX IF NOT EXISTS idx_category_owner ON category(owner_id);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;

    let raw_name: String = row.get(1)?;
    let name = CategoryName::new_unchecked(&raw_name);

    let owner = UserID::new(row.get(2)?);

    Ok(Category { id, name, owner })
}

#[cfg(test)]
mod category_query_tests {
    use rusqlite::Connection;

    use crate::{
        Error, PasswordHash,
        category::CategoryName,
        db::initialize,
        user::{User, create_user},
    };

    use super::{
        create_category, delete_category, get_categories_by_owner, get_category, update_category,
    };

    fn get_test_db_connection() -> (Connection, User) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database");

        let user = create_user(
            "foo@bar.baz".parse().unwrap(),
            PasswordHash::new_unchecked("hunter2"),
            &[],
            &connection,
        )
        .expect("Could not create test user");

        (connection, user)
    }

    #[test]
    fn create_category_succeeds() {
        let (connection, user) = get_test_db_connection();
        let name = CategoryName::new("Categorically a category").unwrap();

        let category = create_category(name.clone(), user.id, &connection);

        let got_category = category.expect("Could not create category");
        assert!(got_category.id > 0);
        assert_eq!(got_category.name, name);
        assert_eq!(got_category.owner, user.id);
    }

    #[test]
    fn create_category_fails_with_invalid_owner() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database");

        let result = create_category(
            CategoryName::new_unchecked("Foo"),
            crate::user::UserID::new(42),
            &connection,
        );

        assert!(matches!(result, Err(Error::SqlError(_))));
    }

    #[test]
    fn get_category_succeeds() {
        let (connection, user) = get_test_db_connection();
        let inserted_category =
            create_category(CategoryName::new_unchecked("Foo"), user.id, &connection)
                .expect("Could not create test category");

        let selected_category = get_category(inserted_category.id, &connection);

        assert_eq!(Ok(inserted_category), selected_category);
    }

    #[test]
    fn get_category_with_invalid_id_returns_not_found() {
        let (connection, user) = get_test_db_connection();
        let inserted_category =
            create_category(CategoryName::new_unchecked("Foo"), user.id, &connection)
                .expect("Could not create test category");

        let selected_category = get_category(inserted_category.id + 123, &connection);

        assert_eq!(selected_category, Err(Error::NotFound));
    }

    #[test]
    fn get_categories_by_owner_only_returns_owned_rows() {
        let (connection, user) = get_test_db_connection();
        let other_user = create_user(
            "bar@baz.qux".parse().unwrap(),
            PasswordHash::new_unchecked("hunter3"),
            &[],
            &connection,
        )
        .unwrap();

        let owned = vec![
            create_category(CategoryName::new_unchecked("Foo"), user.id, &connection).unwrap(),
            create_category(CategoryName::new_unchecked("Bar"), user.id, &connection).unwrap(),
        ];
        create_category(
            CategoryName::new_unchecked("Baz"),
            other_user.id,
            &connection,
        )
        .unwrap();

        let selected = get_categories_by_owner(user.id, &connection).unwrap();

        assert_eq!(selected, owned);
    }

    #[test]
    fn update_category_succeeds() {
        let (connection, user) = get_test_db_connection();
        let category = create_category(
            CategoryName::new_unchecked("Original"),
            user.id,
            &connection,
        )
        .expect("Could not create test category");

        let new_name = CategoryName::new_unchecked("Updated");
        let result = update_category(category.id, &new_name, &connection);

        assert!(result.is_ok());

        let updated_category = get_category(category.id, &connection).unwrap();
        assert_eq!(updated_category.name, new_name);
        assert_eq!(updated_category.owner, user.id);
    }

    #[test]
    fn update_category_with_invalid_id_returns_not_found() {
        let (connection, _user) = get_test_db_connection();

        let result = update_category(999999, &CategoryName::new_unchecked("Updated"), &connection);

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn delete_category_succeeds() {
        let (connection, user) = get_test_db_connection();
        let category = create_category(
            CategoryName::new_unchecked("ToDelete"),
            user.id,
            &connection,
        )
        .expect("Could not create test category");

        let result = delete_category(category.id, &connection);

        assert!(result.is_ok());
        assert_eq!(get_category(category.id, &connection), Err(Error::NotFound));
    }

    #[test]
    fn delete_category_with_invalid_id_returns_not_found() {
        let (connection, _user) = get_test_db_connection();

        let result = delete_category(999999, &connection);

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn delete_referenced_category_returns_conflict() {
        let (connection, user) = get_test_db_connection();
        let category = create_category(CategoryName::new_unchecked("Food"), user.id, &connection)
            .expect("Could not create test category");

        crate::transaction::create_transaction(
            crate::transaction::NewTransaction {
                amount: 12.5,
                description: "Lunch".to_string(),
                date: time::macros::date!(2025 - 01 - 01),
                kind: "expense".to_string(),
                category_id: category.id,
                owner: user.id,
            },
            &connection,
        )
        .expect("Could not create test transaction");

        let result = delete_category(category.id, &connection);

        assert_eq!(result, Err(Error::CategoryInUse));
        // The category must remain queryable and unchanged after the failed delete.
        assert_eq!(get_category(category.id, &connection), Ok(category));
    }
}
