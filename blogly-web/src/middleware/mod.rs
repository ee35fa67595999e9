//! Middleware for the web server
//!
//! - `security`: Browser hardening headers on every response

pub mod security;
