//! Business logic services sitting between handlers and repositories.

pub mod user_service;
