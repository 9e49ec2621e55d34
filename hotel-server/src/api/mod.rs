//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health checks
//! - [`auth`] - login, logout, current user
//! - [`rooms`] - room inventory
//! - [`clients`] - client records
//! - [`reservations`] - reservation lifecycle and invoices
//! - [`users`] - staff accounts (admin-only)
//! - [`settings`] - hotel settings
//! - [`dashboard`] - aggregated dashboard data

pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod health;
pub mod reservations;
pub mod rooms;
pub mod settings;
pub mod users;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
