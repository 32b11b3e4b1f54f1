//! In-memory mock filesystem for testing sysctl reads without a real `/proc/sys`.
//!
//! `MockFs` keeps files and directories in memory so tests run on macOS and in
//! CI environments without Linux.

use crate::collector::traits::FileSystem;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

/// In-memory filesystem for testing.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    /// Map from path to file contents.
    files: HashMap<PathBuf, String>,
    /// Set of directories, so reads of sysctl nodes fail the way they do on `/proc/sys`.
    directories: HashSet<PathBuf>,
}

impl MockFs {
    /// Creates a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with the given content.
    ///
    /// Parent directories are automatically created.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref().to_path_buf();
        self.add_parents(&path);
        self.files.insert(path, content.into());
    }

    /// Adds an empty directory.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        self.add_parents(&path);
        self.directories.insert(path);
    }

    /// Adds a sysctl leaf under `root`, mapping the dotted `name` to its path.
    ///
    /// `add_sysctl("/proc/sys", "vm.swappiness", "60\n")` creates
    /// `/proc/sys/vm/swappiness`.
    pub fn add_sysctl(&mut self, root: impl AsRef<Path>, name: &str, content: impl Into<String>) {
        let mut path = root.as_ref().to_path_buf();
        path.extend(name.split('.'));
        self.add_file(path, content);
    }

    fn add_parents(&mut self, path: &Path) {
        let mut parent = path.parent();
        while let Some(p) = parent {
            if !p.as_os_str().is_empty() {
                self.directories.insert(p.to_path_buf());
            }
            parent = p.parent();
        }
    }
}

impl FileSystem for MockFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        if let Some(content) = self.files.get(path) {
            return Ok(content.clone());
        }
        if self.directories.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("is a directory: {:?}", path),
            ));
        }
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("file not found: {:?}", path),
        ))
    }
}
