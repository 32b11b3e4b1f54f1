//! Cross-origin and access logging middleware.

use std::collections::HashSet;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::extract::{ConnectInfo, Request};
use axum::http::{HeaderName, HeaderValue, header};
use tracing::{debug, info};

// ============================================================
// CORS
// ============================================================

/// Non-standard singular header the browser clients of this API expect.
static ACCESS_CONTROL_ALLOW_METHOD: HeaderName =
    HeaderName::from_static("access-control-allow-method");

/// Origins whose requests get CORS headers.
#[derive(Debug)]
pub(crate) enum AllowedOrigins {
    /// Echo whatever origin the caller sends.
    Any,
    List(HashSet<String>),
}

impl AllowedOrigins {
    /// An empty list means any origin.
    pub(crate) fn from_list(origins: Vec<String>) -> Self {
        let origins: HashSet<String> = origins
            .into_iter()
            .map(|o| o.trim().to_owned())
            .filter(|o| !o.is_empty())
            .collect();
        if origins.is_empty() {
            AllowedOrigins::Any
        } else {
            AllowedOrigins::List(origins)
        }
    }

    fn permits(&self, origin: &HeaderValue) -> bool {
        match self {
            AllowedOrigins::Any => true,
            AllowedOrigins::List(set) => origin.to_str().is_ok_and(|o| set.contains(o)),
        }
    }
}

/// Adds CORS headers to responses of requests carrying a non-empty `Origin`.
///
/// The origin is echoed back verbatim; requests without one pass through
/// untouched. The wrapped service is always called.
#[derive(Clone)]
pub(crate) struct CorsLayer {
    allowed: Arc<AllowedOrigins>,
}

impl CorsLayer {
    pub(crate) fn new(allowed: Arc<AllowedOrigins>) -> Self {
        Self { allowed }
    }
}

impl<S> tower::Layer<S> for CorsLayer {
    type Service = CorsService<S>;
    fn layer(&self, inner: S) -> Self::Service {
        CorsService {
            inner,
            allowed: self.allowed.clone(),
        }
    }
}

#[derive(Clone)]
pub(crate) struct CorsService<S> {
    inner: S,
    allowed: Arc<AllowedOrigins>,
}

impl<S> tower::Service<Request> for CorsService<S>
where
    S: tower::Service<Request, Response = axum::response::Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let origin = req
            .headers()
            .get(header::ORIGIN)
            .filter(|o| !o.is_empty())
            .cloned();
        let origin = match origin {
            Some(o) if self.allowed.permits(&o) => Some(o),
            Some(o) => {
                debug!(origin = ?o, "CORS: origin not allowed");
                None
            }
            None => None,
        };

        let mut inner = self.inner.clone();
        Box::pin(async move {
            let mut response = inner.call(req).await?;
            if let Some(origin) = origin {
                let headers = response.headers_mut();
                headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
                headers.insert(
                    header::ACCESS_CONTROL_ALLOW_HEADERS,
                    HeaderValue::from_static("content-type"),
                );
                headers.insert(&ACCESS_CONTROL_ALLOW_METHOD, HeaderValue::from_static("GET"));
            }
            Ok(response)
        })
    }
}

// ============================================================
// Access log layer (tower Layer + Service)
// ============================================================

#[derive(Clone)]
pub(crate) struct AccessLogLayer;

impl<S> tower::Layer<S> for AccessLogLayer {
    type Service = AccessLogService<S>;
    fn layer(&self, inner: S) -> Self::Service {
        AccessLogService { inner }
    }
}

#[derive(Clone)]
pub(crate) struct AccessLogService<S> {
    inner: S,
}

impl<S> tower::Service<Request> for AccessLogService<S>
where
    S: tower::Service<Request, Response = axum::response::Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let method = req.method().clone();
        let path = req.uri().path().to_owned();
        let client = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ci| ci.0.ip().to_string())
            .unwrap_or_else(|| "-".to_owned());
        let t0 = Instant::now();

        let mut inner = self.inner.clone();
        Box::pin(async move {
            let response = inner.call(req).await?;
            let latency_ms = t0.elapsed().as_millis() as u64;
            let status = response.status().as_u16();
            info!(client, status, latency_ms, "{method} {path}");
            Ok(response)
        })
    }
}
