use axum::{
    response::IntoResponse,
    routing::{get, on, post},
    Json, Router,
};
use model::{import::ImportStatistics, post::PostMarker};
use serde_json::json;

mod latlong;
mod posts;

use crate::{
    common::{route_not_found, schema, METHOD_FILTER_ALL},
    WebState,
};

pub fn routes(state: WebState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/posts", get(posts::posts))
        .route("/posts/schema", get(schema::<PostMarker>))
        .route("/import_latlong", post(latlong::import_latlong))
        .route("/import_latlong/schema", get(schema::<ImportStatistics>))
        .route("/latlongdata", get(latlong::latlong_data))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn ping() -> impl IntoResponse {
    Json(json!({
        "message": "pong!"
    }))
}
