//! # Blogly Shared Library
//!
//! Data layer for Blogly: PostgreSQL connection pooling, embedded schema
//! migrations, and the `User`, `Post`, `Tag` and `PostTag` models.
//!
//! ## Module Organization
//!
//! - `db`: Connection pool and migration runner
//! - `models`: Database models and their CRUD operations

pub mod db;
pub mod models;

/// Current version of the Blogly shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
