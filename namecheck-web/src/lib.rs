//! Same-origin relay for username lookups.
//!
//! One route, `GET /api/lookup/{platform}/{username}`, maps the platform to a
//! fixed upstream base URL and forwards the lookup. Handlers share nothing
//! but the upstream client's connection pool.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod upstream;

use std::sync::Arc;

use actix_web::web;

use crate::upstream::UpstreamLookup;

/// State shared by all workers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<dyn UpstreamLookup>,
}

impl AppState {
    pub fn new(upstream: Arc<dyn UpstreamLookup>) -> Self {
        Self { upstream }
    }
}

/// Register every route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::lookup)
        .service(handlers::platforms)
        .service(handlers::health);
}
