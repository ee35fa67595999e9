//! Database models for Blogly
//!
//! Each model is a `sqlx::FromRow` struct with associated async functions
//! that take the pool (or, for join-table writes, a connection inside a
//! transaction).
//!
//! # Models
//!
//! - `user`: Blog authors
//! - `post`: Posts, each owned by one user
//! - `tag`: Uniquely named labels
//! - `post_tag`: Many-to-many links between posts and tags

pub mod post;
pub mod post_tag;
pub mod tag;
pub mod user;
