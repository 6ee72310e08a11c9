pub mod admin;
pub mod auth;
pub mod notes;
pub mod pages;
pub mod skus;
