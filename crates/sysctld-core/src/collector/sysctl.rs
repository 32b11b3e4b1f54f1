//! Linux sysctl reader backed by the `/proc/sys` tree.
//!
//! A dotted sysctl name maps one component per path segment below the root:
//! `net.core.somaxconn` is read from `<root>/net/core/somaxconn`. Only scalar
//! leaves are served; vector values (tab separated, e.g. `kernel.printk`) are
//! rejected for both kinds.

use std::io;
use std::path::PathBuf;

use tracing::trace;

use crate::collector::traits::{FileSystem, SysctlReader};

/// Error type for sysctl read failures.
///
/// The `Display` text is what clients see after `Could not get sysctl <name>: `.
#[derive(Debug)]
pub enum SysctlError {
    /// No sysctl with this name exists.
    UnknownName,
    /// The name addresses an interior node of the tree, not a value.
    NotALeaf,
    /// The value holds several fields and cannot be served as a scalar.
    NotScalar,
    /// The value exists but is not a signed 64-bit integer.
    NotAnInteger(String),
    /// I/O error reading the value (e.g. permission denied).
    Io(io::Error),
}

impl std::fmt::Display for SysctlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SysctlError::UnknownName => write!(f, "unknown sysctl name"),
            SysctlError::NotALeaf => write!(f, "sysctl is a node, not a value"),
            SysctlError::NotScalar => write!(f, "table-valued sysctls are not supported"),
            SysctlError::NotAnInteger(raw) => {
                write!(f, "value {:?} is not a 64-bit integer", raw)
            }
            SysctlError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for SysctlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SysctlError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SysctlError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => SysctlError::UnknownName,
            io::ErrorKind::IsADirectory => SysctlError::NotALeaf,
            _ => SysctlError::Io(e),
        }
    }
}

/// Reads sysctls from a `/proc/sys`-shaped tree.
pub struct ProcSysctl<F: FileSystem> {
    fs: F,
    root: PathBuf,
}

impl<F: FileSystem> ProcSysctl<F> {
    /// Creates a new reader.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `root` - Base path of the sysctl tree (usually "/proc/sys")
    pub fn new(fs: F, root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            root: root.into(),
        }
    }

    /// Maps a dotted name to its file below the root.
    ///
    /// Empty components and components carrying a path separator never name
    /// a sysctl, so they are rejected before any filesystem access.
    fn path_for(&self, name: &str) -> Result<PathBuf, SysctlError> {
        let mut path = self.root.clone();
        for component in name.split('.') {
            if component.is_empty() || component.contains(['/', '\0']) {
                return Err(SysctlError::UnknownName);
            }
            path.push(component);
        }
        Ok(path)
    }

    fn read_scalar(&self, name: &str) -> Result<String, SysctlError> {
        let path = self.path_for(name)?;
        let raw = self.fs.read_to_string(&path)?;
        let value = raw.strip_suffix('\n').unwrap_or(&raw);
        if value.contains(['\t', '\n']) {
            return Err(SysctlError::NotScalar);
        }
        trace!(name, path = %path.display(), "read sysctl");
        Ok(value.to_string())
    }
}

impl<F: FileSystem> SysctlReader for ProcSysctl<F> {
    fn read_string(&self, name: &str) -> Result<String, SysctlError> {
        self.read_scalar(name)
    }

    fn read_int64(&self, name: &str) -> Result<i64, SysctlError> {
        let value = self.read_scalar(name)?;
        value
            .trim()
            .parse::<i64>()
            .map_err(|_| SysctlError::NotAnInteger(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;

    fn typical() -> ProcSysctl<MockFs> {
        ProcSysctl::new(MockFs::typical_host(), "/proc/sys")
    }

    #[test]
    fn test_read_string() {
        let sysctl = typical();
        assert_eq!(sysctl.read_string("kernel.hostname").unwrap(), "web-01");
        assert_eq!(
            sysctl.read_string("kernel.version").unwrap(),
            "#45-Ubuntu SMP PREEMPT_DYNAMIC Fri Aug 30 12:02:04 UTC 2024"
        );
    }

    #[test]
    fn test_read_string_of_integer_leaf() {
        // /proc/sys is untyped text: integer leaves read fine as strings
        let sysctl = typical();
        assert_eq!(sysctl.read_string("vm.swappiness").unwrap(), "60");
    }

    #[test]
    fn test_read_int64() {
        let sysctl = typical();
        assert_eq!(sysctl.read_int64("kernel.pid_max").unwrap(), 4194304);
        assert_eq!(sysctl.read_int64("fs.file-max").unwrap(), i64::MAX);
        assert_eq!(sysctl.read_int64("net.ipv4.ip_forward").unwrap(), 0);
    }

    #[test]
    fn test_read_negative_int64() {
        let mut fs = MockFs::new();
        fs.add_sysctl("/proc/sys", "kernel.perf_event_paranoid", "-1\n");
        let sysctl = ProcSysctl::new(fs, "/proc/sys");
        assert_eq!(sysctl.read_int64("kernel.perf_event_paranoid").unwrap(), -1);
    }

    #[test]
    fn test_read_int64_of_string_leaf() {
        let sysctl = typical();
        let err = sysctl.read_int64("kernel.hostname").unwrap_err();
        assert!(matches!(err, SysctlError::NotAnInteger(ref raw) if raw == "web-01"));
        assert_eq!(err.to_string(), "value \"web-01\" is not a 64-bit integer");
    }

    #[test]
    fn test_read_int64_out_of_range() {
        let mut fs = MockFs::new();
        fs.add_sysctl("/proc/sys", "vm.big", "18446744073709551615\n");
        let sysctl = ProcSysctl::new(fs, "/proc/sys");
        assert!(matches!(
            sysctl.read_int64("vm.big"),
            Err(SysctlError::NotAnInteger(_))
        ));
    }

    #[test]
    fn test_unknown_name() {
        let sysctl = typical();
        assert!(matches!(
            sysctl.read_string("non.existent"),
            Err(SysctlError::UnknownName)
        ));
        assert!(matches!(
            sysctl.read_int64("non.existent"),
            Err(SysctlError::UnknownName)
        ));
    }

    #[test]
    fn test_node_is_not_a_value() {
        let sysctl = typical();
        let err = sysctl.read_string("net.ipv4").unwrap_err();
        assert!(matches!(err, SysctlError::NotALeaf));
    }

    #[test]
    fn test_vector_values_rejected() {
        let sysctl = typical();
        assert!(matches!(
            sysctl.read_string("kernel.printk"),
            Err(SysctlError::NotScalar)
        ));
        assert!(matches!(
            sysctl.read_int64("fs.file-nr"),
            Err(SysctlError::NotScalar)
        ));
    }

    #[test]
    fn test_malformed_names_never_reach_filesystem() {
        let sysctl = typical();
        for name in ["", ".", "kernel.", ".kernel", "kernel..hostname", "kernel./etc"] {
            assert!(
                matches!(sysctl.read_string(name), Err(SysctlError::UnknownName)),
                "{name:?}"
            );
        }
    }

    #[test]
    fn test_custom_root() {
        let mut fs = MockFs::new();
        fs.add_sysctl("/host/proc/sys", "kernel.hostname", "node-7\n");
        let sysctl = ProcSysctl::new(fs, "/host/proc/sys");
        assert!(sysctl.read_string("kernel.ostype").is_err());
        assert_eq!(sysctl.read_string("kernel.hostname").unwrap(), "node-7");
    }

    #[test]
    fn test_io_error_passthrough() {
        let err = SysctlError::from(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "permission denied",
        ));
        assert!(matches!(err, SysctlError::Io(_)));
        assert_eq!(err.to_string(), "I/O error: permission denied");
    }
}
