//! # filevault-auth
//!
//! Authentication primitives and authorization policy for FileVault:
//! Argon2id password hashing, JWT access/refresh tokens, and the pure
//! workspace role-authorization engine consulted by the service layer
//! before every workspace mutation.

pub mod jwt;
pub mod password;
pub mod rbac;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair, TokenType};
pub use password::PasswordHasher;
pub use rbac::WorkspacePolicy;
