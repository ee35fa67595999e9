//! Health check endpoint
//!
//! ```text
//! GET /health
//! ```
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "version": "0.1.0",
//!   "database": "connected",
//!   "active_connections": 1,
//!   "idle_connections": 3
//! }
//! ```

use crate::app::AppState;
use axum::{extract::State, Json};
use blogly_shared::db::pool::{health_check as ping_database, pool_stats};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,

    /// Application version
    pub version: String,

    /// "connected" or "disconnected"
    pub database: String,

    pub active_connections: u32,

    pub idle_connections: u32,
}

/// Reports whether the database answers, plus pool connection counts
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = ping_database(&state.db).await.is_ok();
    let stats = pool_stats(&state.db);

    Json(HealthResponse {
        status: if connected { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
        active_connections: stats.active_connections,
        idle_connections: stats.idle_connections,
    })
}
