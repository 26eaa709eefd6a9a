use std::sync::Arc;

use database::{DatabaseConnectionInfo, SqlDatabase};
use geoposts::client::Client;
use web::{config::WebConfig, start_web_server, WebState};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    env_logger::init();

    // database
    let database_connection_info = DatabaseConnectionInfo::from_env();
    log::info!("using database {:?}", database_connection_info);
    let database = SqlDatabase::connect(database_connection_info)
        .await
        .expect("could not connect to database.");

    // web server
    let config = WebConfig::from_env().expect("invalid web configuration in env.");
    let web_future = start_web_server(WebState {
        client: Client::new("REST API", database),
        config: Arc::new(config),
    });

    if let Err(why) = web_future.await {
        log::error!("web server stopped: {}", why);
    }
}
