//! Shared types for the milkshake ordering service
//!
//! Error codes, the API response envelope, domain models and small
//! utilities used by the server and by any client.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
