use axum::{extract::Request, middleware::Next, response::Response, Router};
use std::sync::Arc;
use tracing::debug;

use crate::handlers;
use crate::models::AppState;
use crate::services::Fetcher;

// sets up all the routes for the web server
pub fn create_router<F: Fetcher + 'static>(state: Arc<AppState<F>>) -> Router {
    Router::new()
        .route("/", axum::routing::get(handlers::index))
        .route("/metar", axum::routing::get(handlers::fetch_metar_handler::<F>))
        .route("/api/metar", axum::routing::get(handlers::api_metar_handler::<F>))
        .layer(axum::middleware::from_fn(log_request))
        .with_state(state)
}

// logs every request with its status
async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;
    debug!(%method, %uri, status = %response.status(), "handled request");
    response
}
