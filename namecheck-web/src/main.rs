use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};
use anyhow::Context;
use namecheck_web::config::AppConfig;
use namecheck_web::upstream::HttpUpstream;
use namecheck_web::{AppState, configure, logging};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let _log_guard = logging::init(&config.log)?;

    let upstream = HttpUpstream::new(&config.upstream.root, config.upstream.timeout())
        .context("failed to build upstream HTTP client")?;
    let state = web::Data::new(AppState::new(Arc::new(upstream)));

    let (host, port) = config.bind_address();
    tracing::info!(
        %host,
        port,
        workers = config.server.workers,
        upstream = %config.upstream.root,
        "starting namecheck-web"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .workers(config.server.workers.max(1))
    .bind((host.as_str(), port))
    .with_context(|| format!("failed to bind {host}:{port}"))?
    .run()
    .await?;

    tracing::info!("namecheck-web stopped");
    Ok(())
}
