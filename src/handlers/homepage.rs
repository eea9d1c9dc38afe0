use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{names, utils, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(homepage))
        .route(names::HEALTH_URL, get(health))
}

#[derive(Serialize)]
struct Banner {
    message: &'static str,
    status: &'static str,
    version: &'static str,
    features: &'static [&'static str],
}

async fn homepage() -> Json<Banner> {
    Json(Banner {
        message: names::SERVICE_NAME,
        status: "OK",
        version: utils::VERSION,
        features: names::FEATURES,
    })
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    database: &'static str,
    timestamp: DateTime<Utc>,
}

async fn health(State(state): State<AppState>) -> Json<Health> {
    let database = match state.db.ping().await {
        Ok(()) => "healthy",
        Err(e) => {
            tracing::warn!("database health check failed: {e}");
            "unhealthy"
        }
    };

    Json(Health {
        status: "healthy",
        database,
        timestamp: Utc::now(),
    })
}
