//! Merchandising API server library.
//!
//! Exposes the building blocks (config, state, error handling, extractors,
//! routes) so integration tests, the server binary, and the seeder can all
//! share them.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod seed;
pub mod state;
