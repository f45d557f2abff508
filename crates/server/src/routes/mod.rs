use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::{middleware::request_id_middleware, AppState};

pub mod command;
pub mod health;
pub mod lights;
pub mod status;
pub mod todo;

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health::health_check))
        .route("/command", post(command::handle_command))
        .route("/status", get(status::get_status))
        .merge(todo::router())
        .merge(lights::router());

    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
