//! Central module for organizing the application's main API endpoints.
//!
//! Authentication routes are handled separately in `auth`.

pub mod common;
pub mod user;
