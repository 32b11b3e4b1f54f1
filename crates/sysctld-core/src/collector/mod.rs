//! Sysctl access for the local host.
//!
//! This module provides the `SysctlReader` abstraction consumed by the value
//! resolver, and its Linux implementation reading the `/proc/sys` tree through
//! a mockable filesystem.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              SysctlReader (trait)            │
//! │   read_string(name)      read_int64(name)    │
//! └──────────────────────┬───────────────────────┘
//!                        │
//!                 ┌──────▼──────┐
//!                 │ ProcSysctl  │  kernel.hostname → <root>/kernel/hostname
//!                 └──────┬──────┘
//!                        │
//!                 ┌──────▼──────┐
//!                 │  FileSystem │ (trait)
//!                 └──────┬──────┘
//!              ┌─────────┴─────────┐
//!       ┌──────▼──────┐     ┌──────▼──────┐
//!       │   RealFs    │     │   MockFs    │
//!       │  (Linux)    │     │ (Testing)   │
//!       └─────────────┘     └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use sysctld_core::collector::{MockFs, ProcSysctl, SysctlReader};
//!
//! let sysctl = ProcSysctl::new(MockFs::typical_host(), "/proc/sys");
//! assert_eq!(sysctl.read_string("kernel.ostype").unwrap(), "Linux");
//! assert!(sysctl.read_int64("kernel.pid_max").unwrap() > 0);
//! ```

pub mod mock;
pub mod sysctl;
pub mod traits;

pub use mock::MockFs;
pub use sysctl::{ProcSysctl, SysctlError};
pub use traits::{FileSystem, RealFs, SysctlReader};
