//! HTTP request handlers: sysctl lookup and JSON response building.

use std::io;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::Response;
use tracing::{debug, error, warn};

use sysctld_core::collector::SysctlError;
use sysctld_core::models::{Kind, SysctlResult, SysctlValue};
use sysctld_core::resolver::{Resolver, translate};
use sysctld_core::util::now_rfc1123;

use crate::state::SysctlState;

// ============================================================
// Sysctl endpoints
// ============================================================

/// `GET /sysctl/<kind>/{*path}`
pub(crate) async fn handle_sysctl(State(resolver): SysctlState, Path(path): Path<String>) -> Response {
    serve_sysctl(resolver, &path).await
}

/// `GET /sysctl/<kind>/`: stripping the prefix leaves the empty name.
pub(crate) async fn handle_sysctl_root(State(resolver): SysctlState) -> Response {
    serve_sysctl(resolver, "").await
}

async fn serve_sysctl(resolver: Arc<Resolver>, path: &str) -> Response {
    let name = translate(path);
    let timestamp = now_rfc1123();
    let kind = resolver.kind();

    // Sysctl reads are blocking file reads. A join error only surfaces when
    // panics unwind; release builds abort on panic.
    let outcome = {
        let name = name.clone();
        tokio::task::spawn_blocking(move || resolver.resolve(&name))
            .await
            .unwrap_or_else(|e| Err(SysctlError::Io(io::Error::other(e))))
    };

    let (result, status) = build_response(name, timestamp, outcome, kind);
    render_json(&result, status)
}

// ============================================================
// Response building
// ============================================================

/// Turns a resolution outcome into the response document and its status.
///
/// Failures are logged here, once per request.
pub(crate) fn build_response(
    name: String,
    timestamp: String,
    outcome: Result<SysctlValue, SysctlError>,
    kind: Kind,
) -> (SysctlResult, StatusCode) {
    match outcome {
        Ok(value) => {
            debug!(name = %name, kind = %kind, "sysctl resolved");
            (SysctlResult::found(name, value, timestamp), StatusCode::OK)
        }
        Err(e) => {
            let message = format!("Could not get sysctl {}: {}", name, e);
            warn!("{message}");
            (
                SysctlResult::not_found(name, kind, timestamp, message),
                StatusCode::NOT_FOUND,
            )
        }
    }
}

/// Serializes `result` as a newline-terminated JSON body.
///
/// A serialization failure is logged and leaves the body empty; the status is
/// kept as is.
pub(crate) fn render_json(result: &SysctlResult, status: StatusCode) -> Response {
    let body = match serde_json::to_string(result) {
        Ok(mut json) => {
            json.push('\n');
            Body::from(json)
        }
        Err(e) => {
            error!(name = %result.name, error = %e, "failed to serialize sysctl result");
            Body::empty()
        }
    };

    let mut response = Response::new(body);
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}
