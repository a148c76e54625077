//! Authentication utilities

mod error;
mod gate;
mod jwt;
mod password;

pub use error::AuthError;
pub use gate::{bearer_token, AuthGate};
pub use jwt::{Claims, TokenCodec};
pub use password::{
    hash_password, validate_password_strength, verify_password, PasswordService,
};
