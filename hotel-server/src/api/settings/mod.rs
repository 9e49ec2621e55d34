//! Settings API module

mod handler;

use axum::{middleware, routing::get, routing::put, Router};

use crate::auth::{operations, require_operation};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/settings", routes())
}

fn routes() -> Router<ServerState> {
    // Reads are open to any authenticated user; writes are admin-only
    let read_routes = Router::new().route("/", get(handler::get));

    let write_routes = Router::new()
        .route("/", put(handler::update))
        .layer(middleware::from_fn(require_operation(
            operations::SETTINGS_WRITE,
        )));

    read_routes.merge(write_routes)
}
