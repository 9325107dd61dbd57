//! Credential and token primitives used by the authentication layer.

pub mod jwt;
pub mod password;
