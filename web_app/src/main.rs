//! # Petmate Web Application
//!
//! Main entry point of the petmate json api: pet registry, medical records
//! and the breeding match flow. Configures logging, the database, CORS and
//! TLS before starting the server.
#![recursion_limit = "256"]

pub mod api;
pub mod config;
pub mod consts;
pub mod logger;
pub mod metric;
pub mod models;
pub mod repo;
pub mod rest;
pub mod utils;

use logfire::config::MetricsOptions;
use ntex::web;
use ntex_cors::Cors;
use openssl::ssl::{SslAcceptor, SslFiletype, SslMethod};

#[ntex::main]
async fn main() -> anyhow::Result<()> {
    let app_config = &*config::APP_CONFIG;

    // Initialize logging and metrics, logfire only when a token is configured
    let shutdown_handler = if app_config.has_logfire_token() {
        Some(
            logfire::configure()
                .install_panic_handler()
                .with_metrics(Some(MetricsOptions::default()))
                .send_to_logfire(logfire::config::SendToLogfire::Yes)
                .with_token(&app_config.logfire_token)
                .finish()?,
        )
    } else {
        logger::setup_simple_logger()?;
        None
    };

    // Initialize database connection pool
    let sqlite_repo = repo::sqlite::SqlxSqliteRepo {
        db_pool: utils::setup_sqlite_db_pool(app_config.is_prod()).await?,
    };
    utils::run_migrations(&sqlite_repo.db_pool).await?;

    configure_and_run_server(sqlite_repo).await?;

    if let Some(shutdown_handler) = shutdown_handler {
        shutdown_handler.shutdown()?;
    }

    Ok(())
}

/// Configures SSL acceptor for production environments
fn setup_ssl_acceptor() -> anyhow::Result<openssl::ssl::SslAcceptorBuilder> {
    let mut ssl_acceptor = SslAcceptor::mozilla_intermediate(SslMethod::tls_server())
        .map_err(|e| anyhow::anyhow!("Failed to create SSL acceptor: {}", e))?;

    let app_config = &*config::APP_CONFIG;
    ssl_acceptor
        .set_private_key_file(&app_config.private_key_path, SslFiletype::PEM)
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to load private key from {}: {}",
                app_config.private_key_path,
                e
            )
        })?;

    ssl_acceptor
        .set_certificate_file(&app_config.certificate_path, SslFiletype::PEM)
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to load certificate from {}: {}",
                app_config.certificate_path,
                e
            )
        })?;

    Ok(ssl_acceptor)
}

/// Configures and starts the web server with appropriate SSL settings
async fn configure_and_run_server(sqlite_repo: repo::sqlite::SqlxSqliteRepo) -> anyhow::Result<()> {
    let app_config = &*config::APP_CONFIG;
    let server_addr = app_config.server_addr();

    let server = web::server(move || {
        web::App::new()
            .wrap(
                Cors::new()
                    .allowed_methods(vec![
                        "GET", "HEAD", "POST", "OPTIONS", "PUT", "PATCH", "DELETE",
                    ])
                    .allowed_origin(&app_config.cors_allowed_origin)
                    .max_age(consts::MAX_AGE_CORS_SECS)
                    .finish(),
            )
            .wrap(web::middleware::Logger::default())
            .wrap(web::middleware::Compress::default())
            .state(rest::AppState {
                repo: Box::new(sqlite_repo.clone()),
            })
            .configure(rest::routes::petmate)
            .configure(rest::routes::users)
            .configure(rest::routes::pets)
            .default_service(web::route().to(rest::server::serve_not_found))
    });

    let bound_server = if app_config.is_prod() {
        let ssl_acceptor = setup_ssl_acceptor()?;
        server.bind_openssl(server_addr, ssl_acceptor)?
    } else {
        server.bind(server_addr)?
    };

    log::info!("petmate listening on {}:{}", app_config.web_server_host, app_config.web_server_port);

    bound_server
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
