//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT (header or cookie).
//! - [`auth::MaybeAuthUser`] -- Like `AuthUser`, but anonymous visitors pass through.
//! - [`rbac::RequireStaff`] -- Requires the staff override.
//! - [`rbac::RequireBrandUser`] -- Requires the `brand_user` role.

pub mod auth;
pub mod rbac;
