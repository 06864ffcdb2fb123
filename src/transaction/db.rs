//! Database operations for transactions.
//!
//! Every write runs inside a SQL transaction so the category ownership check
//! and the mutation commit or roll back together.

use rusqlite::{Connection, Row, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error,
    category::{Category, CategoryId, CategoryName, get_category},
    transaction::{Transaction, TransactionId},
    user::UserID,
};

/// The fields needed to create a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The amount of money spent or earned.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction happened.
    pub date: time::Date,
    /// A free-form label such as "income" or "expense".
    pub kind: String,
    /// The category the transaction belongs to.
    pub category_id: CategoryId,
    /// The ID of the user that owns the transaction.
    pub owner: UserID,
}

/// Fetch `category_id` and check it is owned by `owner`.
///
/// A missing category and another user's category produce the same error so
/// the response does not reveal whether the category exists.
fn get_owned_category(
    category_id: CategoryId,
    owner: UserID,
    connection: &Connection,
) -> Result<Category, Error> {
    let category = get_category(category_id, connection).map_err(|error| match error {
        Error::NotFound => Error::InvalidCategory,
        error => error,
    })?;

    if category.owner != owner {
        return Err(Error::InvalidCategory);
    }

    Ok(category)
}

/// Create a transaction and return it with its generated ID, along with the
/// category it references.
///
/// # Errors
///
/// Returns an [Error::InvalidCategory] if the referenced category does not
/// exist or is not owned by the new transaction's owner. Nothing is persisted
/// in that case.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<(Transaction, Category), Error> {
    let sql_transaction =
        SqlTransaction::new_unchecked(connection, TransactionBehavior::Deferred)?;

    let category = get_owned_category(
        new_transaction.category_id,
        new_transaction.owner,
        &sql_transaction,
    )?;

    sql_transaction.execute(
        "INSERT INTO \"transaction\" (amount, description, date, type, category_id, owner_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        (
            new_transaction.amount,
            &new_transaction.description,
            &new_transaction.date,
            &new_transaction.kind,
            new_transaction.category_id,
            new_transaction.owner.as_i64(),
        ),
    )?;

    let id = sql_transaction.last_insert_rowid();

    sql_transaction.commit()?;

    Ok((
        Transaction {
            id,
            amount: new_transaction.amount,
            description: new_transaction.description,
            date: new_transaction.date,
            kind: new_transaction.kind,
            category_id: new_transaction.category_id,
            owner: new_transaction.owner,
        },
        category,
    ))
}

/// Retrieve a single transaction and the category it references.
pub fn get_transaction(
    transaction_id: TransactionId,
    connection: &Connection,
) -> Result<(Transaction, Category), Error> {
    connection
        .prepare(
            "SELECT t.id, t.amount, t.description, t.date, t.type, t.category_id, t.owner_id,
                    c.id, c.name, c.owner_id
             FROM \"transaction\" t
             INNER JOIN category c ON t.category_id = c.id
             WHERE t.id = :id",
        )?
        .query_row(&[(":id", &transaction_id)], map_joined_row)
        .map_err(|error| error.into())
}

/// Retrieve all transactions owned by `owner`, each with its category.
///
/// The filter is applied in the query itself so a listing can never contain
/// another user's transactions.
pub fn get_transactions_by_owner(
    owner: UserID,
    connection: &Connection,
) -> Result<Vec<(Transaction, Category)>, Error> {
    connection
        .prepare(
            "SELECT t.id, t.amount, t.description, t.date, t.type, t.category_id, t.owner_id,
                    c.id, c.name, c.owner_id
             FROM \"transaction\" t
             INNER JOIN category c ON t.category_id = c.id
             WHERE t.owner_id = :owner_id
             ORDER BY t.id ASC",
        )?
        .query_map(&[(":owner_id", &owner.as_i64())], map_joined_row)?
        .map(|maybe_row| maybe_row.map_err(|error| error.into()))
        .collect()
}

/// Persist `transaction`, which must already exist in the database.
///
/// Re-checks that the referenced category is owned by the transaction's owner
/// before writing, within the same SQL transaction, and returns the category.
///
/// # Errors
///
/// Returns an [Error::InvalidCategory] if the referenced category does not
/// exist or belongs to another user, or an [Error::NotFound] if the
/// transaction itself no longer exists. The stored row is unchanged in either
/// case.
pub fn update_transaction(
    transaction: &Transaction,
    connection: &Connection,
) -> Result<Category, Error> {
    let sql_transaction =
        SqlTransaction::new_unchecked(connection, TransactionBehavior::Deferred)?;

    let category =
        get_owned_category(transaction.category_id, transaction.owner, &sql_transaction)?;

    let rows_affected = sql_transaction.execute(
        "UPDATE \"transaction\"
         SET amount = ?1, description = ?2, date = ?3, type = ?4, category_id = ?5
         WHERE id = ?6",
        (
            transaction.amount,
            &transaction.description,
            &transaction.date,
            &transaction.kind,
            transaction.category_id,
            transaction.id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    sql_transaction.commit()?;

    Ok(category)
}

/// Delete a transaction by ID.
///
/// # Errors
///
/// Returns an [Error::NotFound] if the transaction does not exist.
pub fn delete_transaction(
    transaction_id: TransactionId,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM \"transaction\" WHERE id = ?1",
        [transaction_id],
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Initialize the transaction table and indexes.
///
/// The category foreign key carries no cascade action: deleting a category
/// that still has transactions must fail at this layer.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            amount REAL NOT NULL,
            description TEXT NOT NULL,
            date TEXT NOT NULL,
            type TEXT NOT NULL,
            category_id INTEGER NOT NULL,
            owner_id INTEGER NOT NULL,
            FOREIGN KEY(category_id) REFERENCES category(id),
            FOREIGN KEY(owner_id) REFERENCES user(id)
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_owner ON \"transaction\"(owner_id);
        CREATE INDEX IF NOT EXISTS idx_transaction_category ON \"transaction\"(category_id);",
    )?;

    Ok(())
}

fn map_joined_row(row: &Row) -> Result<(Transaction, Category), rusqlite::Error> {
    let transaction = Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        description: row.get(2)?,
        date: row.get(3)?,
        kind: row.get(4)?,
        category_id: row.get(5)?,
        owner: UserID::new(row.get(6)?),
    };

    let raw_name: String = row.get(8)?;
    let category = Category {
        id: row.get(7)?,
        name: CategoryName::new_unchecked(&raw_name),
        owner: UserID::new(row.get(9)?),
    };

    Ok((transaction, category))
}
