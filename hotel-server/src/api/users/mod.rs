//! User API module
//!
//! Account management is restricted to administrators.

mod handler;

use axum::{middleware, routing::get, Router};

use crate::auth::{operations, require_operation};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .layer(middleware::from_fn(require_operation(
            operations::USERS_MANAGE,
        )))
}
