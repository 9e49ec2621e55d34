//! Hotel Server - front-desk management backend
//!
//! # Module structure
//!
//! ```text
//! hotel-server/src/
//! ├── core/          # Config, state, HTTP server
//! ├── auth/          # JWT authentication, access policy
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # SQLite pool and repositories
//! ├── reservations/  # Reservation lifecycle rules
//! ├── invoice/       # Invoice rendering
//! └── utils/         # Errors, logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod invoice;
pub mod reservations;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger;

/// Load .env and initialize logging
pub fn setup_environment() {
    dotenv::dotenv().ok();
    init_logger();
}
