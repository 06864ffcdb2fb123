use std::{
    error::Error,
    io::{self},
};

use clap::Parser;
use email_address::EmailAddress;
use rusqlite::Connection;

use fintrack_rs::{PasswordHash, ValidatedPassword, create_user, initialize_db};

/// A utility for registering a user in the application database.
///
/// Registration is not exposed over the API, so this tool is how accounts
/// (including the first one) get created.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The email address the new user will log in with.
    #[arg(long)]
    email: EmailAddress,

    /// Also give the new user the admin role tag.
    ///
    /// Roles are stored on the user record but grant no extra access over the
    /// API.
    #[arg(long, default_value_t = false)]
    admin: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let connection = Connection::open(&args.db_path)
        .unwrap_or_else(|_| panic!("Could not open the database at {}", args.db_path));
    initialize_db(&connection)?;

    let password_hash = match get_password_hash() {
        Some(password_hash) => password_hash,
        None => return Ok(()),
    };

    let roles: &[&str] = if args.admin {
        &["ROLE_USER", "ROLE_ADMIN"]
    } else {
        &[]
    };

    let user = create_user(args.email, password_hash, roles, &connection)?;

    println!("Created user {} with ID {}.", user.email, user.id);

    Ok(())
}

fn get_password_hash() -> Option<PasswordHash> {
    loop {
        println!();

        let first_password = match rpassword::prompt_password("Enter a password: ") {
            Ok(string) => string,
            Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => {
                return None;
            }
            Err(error) => {
                print_error(format!("Could not read password from stdin: {error}"));
                return None;
            }
        };

        if let Err(error) = ValidatedPassword::new(&first_password) {
            print_error(error);
            continue;
        }

        let second_password = match rpassword::prompt_password("Enter the same password again: ") {
            Ok(string) => string,
            Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => {
                return None;
            }
            Err(error) => {
                print_error(format!("Could not read password from stdin: {error}"));
                return None;
            }
        };

        if first_password != second_password {
            print_error("Passwords must match, try again.");
            continue;
        }

        let password_hash =
            match PasswordHash::from_raw_password(&first_password, PasswordHash::DEFAULT_COST) {
                Ok(password_hash) => password_hash,
                Err(error) => {
                    print_error(format!("Could not hash password: {error}. Try again."));
                    continue;
                }
            };

        return Some(password_hash);
    }
}

fn print_error(error: impl ToString) {
    eprintln!("\x1b[31;1m{}\x1b[0m", error.to_string());
}
