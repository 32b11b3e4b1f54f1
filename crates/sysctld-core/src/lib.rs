//! sysctld-core - sysctl access and value resolution for sysctld.
//!
//! Provides:
//! - `collector` - sysctl readers (`/proc/sys` backed) and the filesystem seam
//! - `models` - value kinds, values and the per-request result document
//! - `resolver` - URL path translation and kind-bound value resolution
//! - `util` - helper utilities (RFC 1123 timestamps)

pub mod collector;
pub mod models;
pub mod resolver;
pub mod util;

/// Crate version, reported by the server at startup and by `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
