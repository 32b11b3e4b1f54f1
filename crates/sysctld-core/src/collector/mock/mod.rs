//! In-memory sysctl trees for tests.

mod filesystem;
mod scenarios;

pub use filesystem::MockFs;
