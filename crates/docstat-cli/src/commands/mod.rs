//! Command handlers.

pub mod auth;
pub mod documents;
pub mod users;
