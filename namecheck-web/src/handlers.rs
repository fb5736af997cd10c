//! HTTP handlers.

use actix_web::{HttpResponse, get, web};
use namecheck_core::Platform;
use serde_json::json;

use crate::AppState;
use crate::error::ProxyError;

/// `GET /api/lookup/{platform}/{username}`
///
/// Relays the upstream body verbatim on success. Unknown platforms are
/// rejected before any upstream call.
#[get("/api/lookup/{platform}/{username}")]
pub async fn lookup(
    path: web::Path<(String, String)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ProxyError> {
    let (platform_key, username) = path.into_inner();

    let Ok(platform) = platform_key.parse::<Platform>() else {
        tracing::warn!(platform = %platform_key, "rejected lookup for unknown platform");
        return Err(ProxyError::InvalidPlatform(platform_key));
    };

    match state.upstream.fetch(platform, &username).await {
        Ok(body) => {
            tracing::debug!(%platform, %username, "lookup relayed");
            Ok(HttpResponse::Ok().json(body))
        }
        Err(e) => {
            if e.is_expected() {
                tracing::warn!(%platform, %username, error = %e, "lookup failed");
            } else {
                tracing::error!(%platform, %username, error = %e, "lookup failed");
            }
            Err(e)
        }
    }
}

/// `GET /api/platforms`: descriptors of every platform the proxy serves.
#[get("/api/platforms")]
pub async fn platforms() -> HttpResponse {
    let infos: Vec<_> = Platform::ALL.into_iter().map(Platform::info).collect();
    HttpResponse::Ok().json(infos)
}

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
