use axum::{extract::State, Json};
use model::{import::ImportStatistics, latlong::NormalizedCoordinates};

use crate::{common::RouteResult, WebState};

pub(crate) async fn import_latlong(
    State(WebState { client, .. }): State<WebState>,
) -> RouteResult<Json<ImportStatistics>> {
    let statistics = client.import_latlong().await.map_err(|why| {
        log::error!("import from latlongdata failed: {}", why);
        why
    })?;
    Ok(Json(statistics))
}

pub(crate) async fn latlong_data(
    State(WebState { client, .. }): State<WebState>,
) -> RouteResult<Json<Vec<NormalizedCoordinates>>> {
    let rows = client.latlong_data().await.map_err(|why| {
        log::error!("reading latlongdata failed: {}", why);
        why
    })?;
    Ok(Json(rows))
}
