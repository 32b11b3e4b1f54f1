//! Shared application state and the global allocator.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::sync::Arc;

use axum::extract::State;

use sysctld_core::collector::SysctlReader;
use sysctld_core::models::Kind;
use sysctld_core::resolver::Resolver;

/// The two kind-bound resolvers, built once at startup over one shared reader.
#[derive(Clone, Debug)]
pub(crate) struct Endpoints {
    pub(crate) string: Arc<Resolver>,
    pub(crate) integer: Arc<Resolver>,
}

impl Endpoints {
    pub(crate) fn new(reader: Arc<dyn SysctlReader>) -> Self {
        Self {
            string: Arc::new(Resolver::new(Kind::String, reader.clone())),
            integer: Arc::new(Resolver::new(Kind::Integer, reader)),
        }
    }
}

/// Per-route state: the resolver of the endpoint's kind.
pub(crate) type SysctlState = State<Arc<Resolver>>;
