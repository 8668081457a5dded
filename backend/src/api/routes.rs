use axum::{
    http::{header, HeaderName, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::api::handlers::{
    health::get_health,
    tournaments::{get_tournament_detail, get_tournaments},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/tournaments", get(get_tournaments))
        .route("/api/tournaments/:number", get(get_tournament_detail))
        .route("/api/health", get(get_health))
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    let allowed_headers: [HeaderName; 2] = [header::CONTENT_TYPE, header::IF_NONE_MATCH];

    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(allowed_headers)
        .expose_headers([header::ETAG, header::CACHE_CONTROL])
}
