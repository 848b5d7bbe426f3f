mod cors;

use std::sync::Arc;

use actix_web::{
    App, HttpServer,
    web::{self},
};
use api_keys::{DashboardState, dashboard::Dashboard};
use common::env_config::Config;
use db::store::PgKeyStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();
    let config_data = config.clone();
    let origin = config.cors_allowed_origin.clone();

    // init logger
    if config.console_logging_enabled {
        let level = if config.is_production() {
            log::LevelFilter::Info
        } else {
            log::LevelFilter::Debug
        };
        logger::setup(&config.log_file, level).expect("Failed to set up logger");
    }

    // init db connection
    let pool = db::setup(&config.database_url, config.is_production())
        .await
        .expect("Failed to set up database");

    // load the key list once; a failure leaves it empty until the client reloads
    let mut dashboard = Dashboard::new(Arc::new(PgKeyStore::new(pool)), config.page_size);
    if let Err(err) = dashboard.load().await {
        log::warn!("Initial key load failed: {}", err);
    }
    let dashboard = web::Data::new(DashboardState::new(dashboard));

    log::info!(
        "Listening on {}:{}",
        config.server_host,
        config.server_port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(dashboard.clone())
            .app_data(web::Data::new(config_data.clone()))
            .wrap(logger::middleware()) // 2nd
            .wrap(cors::middleware(&origin)) // 1st
            .service(web::scope("/api").service(api_keys::mount_keys()))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
