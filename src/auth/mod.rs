//! Password hashing and bearer-token primitives.

pub mod password;
pub mod token;

pub use password::{check_strength, hash_password, verify_password, PasswordError, MIN_PASSWORD_LENGTH};
pub use token::{Claims, IssuedToken, TokenError, TokenService};
