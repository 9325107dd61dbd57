//! Authentication module for managing user accounts and access control.
//!
//! This module provides the public interface for user authentication-related functionalities
//! such as registration, login, token checks and the authorization middleware.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
