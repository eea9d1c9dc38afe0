pub mod db;
pub mod documents;
pub mod handlers;
pub mod models;
pub mod names;
pub mod rejections;
pub mod utils;

use axum::{http::HeaderValue, Router};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

#[derive(Clone)]
pub struct AppState {
    pub db: db::Db,
    pub documents: documents::DocumentStore,
    pub cors_origins: Vec<String>,
}

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origins);

    Router::new()
        .merge(handlers::homepage::routes())
        .merge(handlers::quiz::routes())
        .merge(handlers::upload::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Credentials are allowed, so methods and headers are mirrored from the
/// preflight request instead of answered with a wildcard.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins = origins.iter().filter_map(|origin| match origin.parse::<HeaderValue>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("ignoring invalid CORS origin: {origin}");
            None
        }
    });

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
