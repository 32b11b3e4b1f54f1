//! Helper utilities.

pub mod http_date;

pub use http_date::{format_rfc1123, now_rfc1123, parse_rfc1123};
