//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access-token generation and validation.

pub mod jwt;
pub mod password;

/// Name of the cookie carrying the access token for browser sessions.
pub const TOKEN_COOKIE: &str = "merch_token";
