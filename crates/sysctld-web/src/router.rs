//! Route table: one prefix per sysctl kind, each behind the CORS layer.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use sysctld_core::resolver::Resolver;

use crate::handlers;
use crate::middleware::{AccessLogLayer, AllowedOrigins, CorsLayer};
use crate::state::Endpoints;

/// Builds the application router.
///
/// Only `/sysctl/string/` and `/sysctl/integer/` are bound; anything else gets
/// axum's default 404.
pub(crate) fn build_router(endpoints: &Endpoints, allowed: Arc<AllowedOrigins>) -> Router {
    Router::new()
        .merge(sysctl_routes(endpoints.string.clone(), allowed.clone()))
        .merge(sysctl_routes(endpoints.integer.clone(), allowed))
        .layer(AccessLogLayer)
}

fn sysctl_routes(resolver: Arc<Resolver>, allowed: Arc<AllowedOrigins>) -> Router {
    let prefix = format!("/sysctl/{}/", resolver.kind());
    Router::new()
        .route(&prefix, get(handlers::handle_sysctl_root))
        .route(&format!("{prefix}{{*path}}"), get(handlers::handle_sysctl))
        .with_state(resolver)
        .layer(CorsLayer::new(allowed))
}
