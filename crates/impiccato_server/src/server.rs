//! HTTP server setup.

use crate::config::ServerConfig;
use crate::routes::router;
use crate::service::HangmanService;
use crate::store::SessionStore;
use anyhow::Result;
use axum::body::Body;
use axum::http::Request;
use impiccato::SystemClock;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tracing::{debug, info, instrument};

/// Builds the service described by `config`.
#[instrument(skip(config))]
pub fn build_service(config: &ServerConfig) -> Result<HangmanService> {
    let dictionary = config.load_dictionary()?;
    Ok(HangmanService::new(
        SessionStore::new(),
        Arc::new(SystemClock),
        Arc::new(dictionary),
    ))
}

/// Periodically drops sessions that have been idle past the configured TTL.
#[instrument(skip(service))]
pub fn spawn_session_reaper(
    service: HangmanService,
    ttl_secs: u64,
    interval_secs: u64,
) -> tokio::task::JoinHandle<()> {
    info!("Starting session reaper");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
        loop {
            ticker.tick().await;
            let purged = service.purge_expired(ttl_secs as f64);
            debug!(purged, "Session sweep finished");
        }
    })
}

/// Runs the HTTP game server until it is shut down.
#[instrument(skip(config), fields(host = %config.host(), port = config.port()))]
pub async fn serve(config: ServerConfig) -> Result<()> {
    let service = build_service(&config)?;
    let reaper = spawn_session_reaper(
        service.clone(),
        *config.session_ttl_secs(),
        *config.purge_interval_secs(),
    );

    let app = router(service).layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
        info!(
            method = %req.method(),
            uri = %req.uri(),
            "Incoming HTTP request"
        );
        req
    }));

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!("Server ready at http://{}:{}/", config.host(), config.port());

    let result = axum::serve(listener, app).await;
    reaper.abort();
    result?;
    Ok(())
}
