//! Code for creating the user table and fetching users from the database.

use std::fmt::Display;

use email_address::EmailAddress;
use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{Error, PasswordHash};

/// The role every registered user holds.
pub const ROLE_USER: &str = "ROLE_USER";

/// The role for administrator accounts.
///
/// Roles are stored on the user record but carry no authorization weight in
/// the API: ownership checks apply to every account equally.
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A user of the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The email address the user logs in with.
    pub email: EmailAddress,
    /// The user's password hash.
    pub password_hash: PasswordHash,
    /// The role tags assigned to the user.
    pub roles: Vec<String>,
}

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub(crate) fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                password TEXT NOT NULL,
                roles TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Create and insert a new user into the database.
///
/// `roles` should contain [ROLE_USER] and any extra role tags. An empty slice
/// defaults to just [ROLE_USER].
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred, including
/// when `email` is already registered.
pub fn create_user(
    email: EmailAddress,
    password_hash: PasswordHash,
    roles: &[&str],
    connection: &Connection,
) -> Result<User, Error> {
    let roles: Vec<String> = if roles.is_empty() {
        vec![ROLE_USER.to_string()]
    } else {
        roles.iter().map(|role| role.to_string()).collect()
    };

    let raw_roles = serde_json::to_string(&roles)
        .map_err(|error| Error::SqlError(rusqlite::Error::ToSqlConversionFailure(Box::new(error))))?;

    connection.execute(
        "INSERT INTO user (email, password, roles) VALUES (?1, ?2, ?3)",
        (email.as_str(), password_hash.as_ref(), &raw_roles),
    )?;

    let id = UserID::new(connection.last_insert_rowid());

    Ok(User {
        id,
        email,
        password_hash,
        roles,
    })
}

/// Get the user from the database with an ID equal to `user_id`.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not belong to a registered user.
/// - there was an error trying to access the store.
pub fn get_user_by_id(user_id: UserID, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare("SELECT id, email, password, roles FROM user WHERE id = :id")?
        .query_row(&[(":id", &user_id.as_i64())], map_row)
        .map_err(|error| error.into())
}

/// Get the user from the database that has the specified `email` address.
///
/// # Errors
///
/// This function will return an error if:
/// - `email` does not belong to a registered user.
/// - there was an error trying to access the store.
pub fn get_user_by_email(email: &EmailAddress, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare("SELECT id, email, password, roles FROM user WHERE email = :email")?
        .query_row(&[(":email", &email.as_str())], map_row)
        .map_err(|error| error.into())
}

fn map_row(row: &Row) -> Result<User, rusqlite::Error> {
    let raw_id = row.get(0)?;
    let raw_email: String = row.get(1)?;
    let raw_password_hash: String = row.get(2)?;
    let raw_roles: String = row.get(3)?;

    let roles: Vec<String> = serde_json::from_str(&raw_roles).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(error))
    })?;

    Ok(User {
        id: UserID::new(raw_id),
        email: EmailAddress::new_unchecked(raw_email),
        password_hash: PasswordHash::new_unchecked(&raw_password_hash),
        roles,
    })
}

#[cfg(test)]
mod user_tests {
    use std::str::FromStr;

    use email_address::EmailAddress;
    use rusqlite::Connection;

    use crate::{Error, PasswordHash};

    use super::{ROLE_ADMIN, ROLE_USER, UserID, create_user, create_user_table, get_user_by_email, get_user_by_id};

    fn get_db_connection() -> Connection {
        let conn =
            Connection::open_in_memory().expect("Could not create in-memory SQLite database");
        create_user_table(&conn).expect("Could not create user table");

        conn
    }

    #[test]
    fn insert_user_succeeds() {
        let conn = get_db_connection();
        let email = EmailAddress::from_str("hello@world.com").unwrap();
        let password_hash = PasswordHash::new_unchecked("hunter2");

        let inserted_user = create_user(email.clone(), password_hash.clone(), &[], &conn).unwrap();

        assert!(inserted_user.id.as_i64() > 0);
        assert_eq!(inserted_user.email, email);
        assert_eq!(inserted_user.password_hash, password_hash);
        assert_eq!(inserted_user.roles, vec![ROLE_USER.to_string()]);
    }

    #[test]
    fn insert_user_fails_on_duplicate_email() {
        let conn = get_db_connection();
        let email = EmailAddress::from_str("hello@world.com").unwrap();

        create_user(email.clone(), PasswordHash::new_unchecked("hunter2"), &[], &conn).unwrap();
        let result = create_user(email, PasswordHash::new_unchecked("hunter3"), &[], &conn);

        assert!(matches!(result, Err(Error::SqlError(_))));
    }

    #[test]
    fn insert_user_stores_extra_roles() {
        let conn = get_db_connection();
        let email = EmailAddress::from_str("admin@example.com").unwrap();

        let user = create_user(
            email,
            PasswordHash::new_unchecked("hunter2"),
            &[ROLE_USER, ROLE_ADMIN],
            &conn,
        )
        .unwrap();

        let retrieved_user = get_user_by_id(user.id, &conn).unwrap();

        assert_eq!(
            retrieved_user.roles,
            vec![ROLE_USER.to_string(), ROLE_ADMIN.to_string()]
        );
    }

    #[test]
    fn get_user_fails_with_non_existent_id() {
        let conn = get_db_connection();

        let result = get_user_by_id(UserID::new(42), &conn);

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn get_user_by_email_succeeds_with_existing_email() {
        let conn = get_db_connection();
        let test_user = create_user(
            EmailAddress::from_str("foo@bar.baz").unwrap(),
            PasswordHash::new_unchecked("hunter2"),
            &[],
            &conn,
        )
        .unwrap();

        let retrieved_user = get_user_by_email(&test_user.email, &conn).unwrap();

        assert_eq!(retrieved_user, test_user);
    }

    #[test]
    fn get_user_by_email_fails_with_non_existent_email() {
        let conn = get_db_connection();
        let email = EmailAddress::from_str("notavalidemail@foo.bar").unwrap();

        assert_eq!(get_user_by_email(&email, &conn), Err(Error::NotFound));
    }
}
