//! Authentication: exchanging credentials for a signed token and extracting
//! the authenticated actor from bearer tokens on protected routes.

mod actor;
mod log_in;
mod token;

pub use actor::{Actor, AuthState};
pub use log_in::{Credentials, LogInResponse, LogInState, post_login_check};
pub use token::{Claims, TOKEN_DURATION, decode_token, encode_token};
