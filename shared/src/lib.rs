//! Shared types for the hotel front-desk system
//!
//! Domain models, API DTOs and response structures used by both the
//! server and API consumers.

pub mod auth;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
