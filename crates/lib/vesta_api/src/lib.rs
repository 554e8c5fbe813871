//! # vesta_api
//!
//! HTTP API library for Vesta chat.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{chat, root};

/// Route of the chat endpoint.
pub const CHAT_ROUTE: &str = "/chat";

/// Builds the Axum router with all routes.
///
/// The router holds no state: every request is handled independently.
pub fn router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        .route("/", get(root::banner_handler))
        .route(
            CHAT_ROUTE,
            get(chat::liveness_handler).post(chat::chat_handler),
        )
        .fallback(root::not_found_handler);

    with_layers(routes, cors)
}

/// Panics become JSON 500 responses. Relies on the unwinding panic strategy,
/// which the release profile keeps.
fn with_layers(routes: Router, cors: CorsLayer) -> Router {
    routes
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Serves the router on an already-bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown)
        .await
}
