//! Path management for daemon files.

use crate::error::{CoreError, CoreResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name under the user's home.
const BASE_DIR_NAME: &str = ".commandpost";
/// Config file name.
const CONFIG_FILE: &str = "config.json";
/// Unix socket file name.
const SOCKET_FILE: &str = "daemon.sock";
/// PID file name.
const PID_FILE: &str = "daemon.pid";

/// Well-known file locations for the daemon.
#[derive(Debug, Clone)]
pub struct Paths {
    base_dir: PathBuf,
}

impl Paths {
    /// Create paths rooted at `~/.commandpost`.
    pub fn new() -> CoreResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| CoreError::Path("Could not determine home directory".to_string()))?;
        Ok(Self {
            base_dir: home.join(BASE_DIR_NAME),
        })
    }

    /// Create paths rooted at a custom base directory.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Base directory for all daemon files.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Daemon configuration file.
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join(CONFIG_FILE)
    }

    /// Unix socket the daemon listens on.
    pub fn socket_file(&self) -> PathBuf {
        self.base_dir.join(SOCKET_FILE)
    }

    /// PID file for the running daemon.
    pub fn pid_file(&self) -> PathBuf {
        self.base_dir.join(PID_FILE)
    }

    /// Create the base directory if it does not exist.
    pub fn ensure_dirs(&self) -> CoreResult<()> {
        fs::create_dir_all(&self.base_dir)?;
        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().expect("Failed to determine home directory")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_with_base_dir_layout() {
        let paths = Paths::with_base_dir("/tmp/commandpost-test");

        assert_eq!(paths.base_dir(), Path::new("/tmp/commandpost-test"));
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/commandpost-test/config.json"));
        assert_eq!(paths.socket_file(), PathBuf::from("/tmp/commandpost-test/daemon.sock"));
        assert_eq!(paths.pid_file(), PathBuf::from("/tmp/commandpost-test/daemon.pid"));
    }

    #[test]
    fn test_ensure_dirs_creates_base_dir() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().join("nested").join("base"));

        paths.ensure_dirs().unwrap();
        assert!(paths.base_dir().exists());
    }
}
