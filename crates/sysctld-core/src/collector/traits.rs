//! Abstractions for sysctl and filesystem access to enable testing and mocking.
//!
//! The `FileSystem` trait lets `ProcSysctl` read from the real `/proc/sys`
//! tree on Linux and from an in-memory tree in tests.

use std::io;
use std::path::Path;

use super::sysctl::SysctlError;

/// Read access to the host's scalar sysctls.
///
/// Implementations must be safe to call concurrently: every request reads
/// through a shared reader without any coordination.
pub trait SysctlReader: Send + Sync {
    /// Reads the sysctl `name` as text.
    fn read_string(&self, name: &str) -> Result<String, SysctlError>;

    /// Reads the sysctl `name` as a signed 64-bit integer.
    fn read_int64(&self, name: &str) -> Result<i64, SysctlError>;
}

/// Abstraction for filesystem operations.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a string.
    ///
    /// # Returns
    /// The file contents, or an I/O error if the file cannot be read.
    /// Reading a directory fails with `io::ErrorKind::IsADirectory`.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Real filesystem implementation that delegates to `std::fs`.
///
/// Use this in production to read from the actual `/proc/sys` tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    /// Creates a new `RealFs` instance.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_real_fs_read_to_string() {
        let fs = RealFs::new();
        // Cargo runs unit tests from the crate root
        let cargo_toml = env::current_dir().unwrap().join("Cargo.toml");
        let content = fs.read_to_string(&cargo_toml).unwrap();
        assert!(content.contains("[package]"));
    }

    #[test]
    fn test_real_fs_missing_file() {
        let fs = RealFs::new();
        let err = fs
            .read_to_string(Path::new("/nonexistent/path/12345"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
