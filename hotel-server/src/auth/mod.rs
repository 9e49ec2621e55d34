//! Authentication and authorization
//!
//! JWT token handling, the auth middleware and the role-based access
//! policy for API operations.

pub mod jwt;
pub mod middleware;
pub mod policy;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_operation};
pub use policy::operations;
