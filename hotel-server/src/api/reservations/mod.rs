//! Reservation API module

mod handler;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reservations", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .patch(handler::transition)
                .delete(handler::delete),
        )
        .route("/{id}/method", patch(handler::set_payment_method))
        .route("/{id}/invoice", get(handler::invoice))
}
