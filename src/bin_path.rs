use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

pub const DEFAULT_BIN_DIR: &str = "/bin";

/// Ordered list of directories searched for bare command names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinPath {
    dirs: Vec<PathBuf>,
}

impl Default for BinPath {
    fn default() -> Self {
        Self::new(vec![PathBuf::from(DEFAULT_BIN_DIR)])
    }
}

impl BinPath {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Swaps in a whole new search list. An empty list disables bare-name lookup.
    pub fn replace(&mut self, dirs: Vec<PathBuf>) {
        tracing::debug!(?dirs, "search path replaced");
        self.dirs = dirs;
    }

    /// Resolves `bin` to an executable. Names containing `/` are taken literally,
    /// relative ones (and relative search directories) against `cwd`.
    pub fn lookup(&self, bin: &str, cwd: &Path) -> Option<PathBuf> {
        if bin.is_empty() {
            return None;
        }

        if bin.contains('/') {
            let path = cwd.join(bin);
            return is_executable(&path).then_some(path);
        }

        for dir in &self.dirs {
            let path = cwd.join(dir).join(bin);
            if is_executable(&path) {
                tracing::trace!(bin, path = %path.display(), "resolved");
                return Some(path);
            }
        }

        tracing::trace!(bin, "not found in search path");
        None
    }
}

fn is_executable(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(attr) => attr.is_file() && attr.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}
