use common::error::{AppError, Res};
use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgSslMode},
};
use std::{str::FromStr, sync::Arc};

pub mod key;
pub mod store;

pub mod models {
    pub mod key;
}

pub mod dtos {
    pub mod key;
}

/// Connects to the database, creating it first when it does not exist,
/// and runs the pending migrations.
pub async fn setup(database_url: &str, require_ssl: bool) -> Res<Arc<PgPool>> {
    let url = url::Url::parse(database_url)
        .map_err(|e| AppError::Internal(format!("Invalid DATABASE_URL: {}", e)))?;
    let db_name = url.path().trim_start_matches('/').to_string();

    let mut admin_url = url.clone();
    admin_url.set_path("/postgres");

    let admin_pool = PgPool::connect_with(connect_options(admin_url.as_str(), require_ssl)?).await?;

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&admin_pool)
            .await?;

    if !exists {
        log::info!("Creating database {}", db_name);
        sqlx::query(&format!("CREATE DATABASE \"{}\"", db_name))
            .execute(&admin_pool)
            .await?;
    }

    admin_pool.close().await;

    let pool = PgPool::connect_with(connect_options(database_url, require_ssl)?).await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| AppError::Internal(format!("Migration failed: {}", e)))?;

    Ok(Arc::new(pool))
}

fn connect_options(url: &str, require_ssl: bool) -> Res<PgConnectOptions> {
    let mut options = PgConnectOptions::from_str(url)?;
    if require_ssl {
        options = options.ssl_mode(PgSslMode::Require);
    }
    Ok(options)
}
