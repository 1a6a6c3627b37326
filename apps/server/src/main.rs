#![warn(clippy::all, clippy::pedantic)]

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpServer, web};
use clap::Parser;
use serde_json::json;
use tracing::{debug, info};

mod config;
mod error;
mod models;
mod probe;
mod routes;
mod storage;
mod validation;

use config::Config;
use error::AppError;
use logger::init_tracing;
use probe::ProbeExecutor;
use storage::{JsonStore, SiteStore};

/// Shared application state handed to every route.
pub struct AppState {
    pub executor: ProbeExecutor,
    pub store: Arc<dyn SiteStore>,
}

#[derive(Debug, Parser)]
#[command(name = "downboy-server", about = "URL watchdog service", version)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address overriding the configured one, e.g. 127.0.0.1:3000.
    #[arg(long)]
    listen: Option<SocketAddr>,
}

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    init_tracing();

    let cli = Cli::parse();
    let cfg = Config::from_config(cli.config.as_ref())?;
    debug!("{cfg}");

    let addr = match cli.listen {
        Some(addr) => addr,
        None => SocketAddr::new(cfg.server.bind.parse::<IpAddr>()?, cfg.server.port),
    };

    let state = AppState {
        executor: ProbeExecutor::new(
            Duration::from_millis(cfg.probe.timeout_ms),
            cfg.probe.accept_invalid_certs,
        )?,
        store: Arc::new(JsonStore::new(&cfg.storage.data_dir)?),
    };

    info!("watchdog listening on {addr}");
    run_server(addr, state).await
}

async fn run_server(addr: SocketAddr, state: AppState) -> Result<(), AppError> {
    let state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(json_payload_config())
            .configure(routes::routes)
    })
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}

/// Malformed JSON bodies come back as `400 { "error": ... }` instead of
/// the framework's plain-text default.
fn json_payload_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let detail = err.to_string();
        actix_web::error::InternalError::from_response(
            err,
            actix_web::HttpResponse::BadRequest().json(json!({ "error": detail })),
        )
        .into()
    })
}

#[cfg(test)]
fn test_state() -> (web::Data<AppState>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState {
        executor: ProbeExecutor::new(Duration::from_millis(800), true).unwrap(),
        store: Arc::new(JsonStore::new(dir.path()).unwrap()),
    };
    (web::Data::new(state), dir)
}
