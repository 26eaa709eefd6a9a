pub use crate::common::RouteResult;

use std::{path::Path, sync::Arc};

use axum::{extract::FromRef, routing::get_service, Router};
use config::WebConfig;
use database::SqlDatabase;
use geoposts::client::Client;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub mod api;
pub mod common;
pub mod config;

#[derive(Clone, FromRef)]
pub struct WebState {
    pub client: Client<SqlDatabase>,
    pub config: Arc<WebConfig>,
}

pub fn router(state: WebState) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        .nest_service("/api", api::routes(state))
        .fallback_service(static_content_router(&static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn start_web_server(state: WebState) -> std::io::Result<()> {
    let address = state.config.address;
    let routes = router(state);

    let listener = TcpListener::bind(address).await?;
    log::info!("listening on http://{}", address);
    axum::serve(listener, routes.into_make_service()).await?;

    Ok(())
}

fn static_content_router(static_dir: &Path) -> Router {
    Router::new().nest_service(
        "/",
        get_service(
            ServeDir::new(static_dir)
                .not_found_service(ServeFile::new(static_dir.join("error404.html"))),
        ),
    )
}
