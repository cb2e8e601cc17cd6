pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use switchboard_core::dispatcher::Dispatcher;

/// Build the axum Router with all routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(dispatcher: Dispatcher) -> Router {
    let app_state = state::AppState::new(dispatcher);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::index::index))
        .route("/health", get(routes::health::health))
        .route("/actions/execute", post(routes::actions::execute_action))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the router server.
pub async fn serve(dispatcher: Dispatcher, port: u16) -> anyhow::Result<()> {
    let action_count = dispatcher.registry().len();
    let app = build_router(dispatcher);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("switchboard listening on http://localhost:{port} ({action_count} actions)");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Start the router server on a pre-bound listener.
///
/// Unlike `serve`, this accepts a `TcpListener` that was already bound so the
/// caller can read the actual port before starting (useful when `port = 0`
/// and the OS picks a free port).
pub async fn serve_on(
    dispatcher: Dispatcher,
    listener: tokio::net::TcpListener,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app = build_router(dispatcher);

    tracing::info!("switchboard listening on http://localhost:{actual_port}");

    axum::serve(listener, app).await?;
    Ok(())
}
