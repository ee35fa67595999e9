//! # Blogly Web Server Library
//!
//! Server-rendered CRUD pages for blog users, their posts, and tags.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Integer id path extractor
//! - `middleware`: Security headers
//! - `render`: Askama template responses
//! - `routes`: Route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod render;
pub mod routes;
