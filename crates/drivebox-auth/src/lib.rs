//! # drivebox-auth
//!
//! Authentication primitives for DriveBox.
//!
//! ## Modules
//!
//! - `jwt` — JWT access token creation and validation
//! - `password` — Argon2id password hashing

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
