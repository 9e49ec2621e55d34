//! Data models
//!
//! Shared between the server and the dashboard frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod client;
pub mod reservation;
pub mod room;
pub mod settings;
pub mod user;

// Re-exports
pub use client::*;
pub use reservation::*;
pub use room::*;
pub use settings::*;
pub use user::*;
