//! Package directory layout
//!
//! The package directory is the single location that owns the resolved
//! validator binary (`bin/dotenvcrab`) and the persisted resolution state
//! (`state.json`). It is constructed once during setup and passed by
//! reference into every component; nothing reads ambient path state after
//! that point.

use std::path::{Path, PathBuf};

#[cfg(not(windows))]
use crate::config::consts::crab;
use crate::config::consts::package;
use crate::error::{DotenvlabError, Result};

/// File name of the validator binary inside `bin/`
pub fn binary_file_name() -> &'static str {
    #[cfg(windows)]
    return "dotenvcrab.exe";

    #[cfg(not(windows))]
    return crab::BINARY_NAME;
}

/// The package-private directory owning the resolved binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDir {
    root: PathBuf,
}

impl PackageDir {
    /// Package directory rooted at an explicit path
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the package directory for this user.
    ///
    /// The `DOTENVLAB_DIR` environment variable wins; otherwise the
    /// per-user local data directory is used.
    pub fn resolve() -> Result<Self> {
        if let Ok(dir) = std::env::var(package::PACKAGE_DIR_ENV) {
            if !dir.is_empty() {
                return Ok(Self::new(dir));
            }
        }

        let base = dirs::data_local_dir().ok_or_else(|| {
            DotenvlabError::PackageDirUnavailable(
                "could not determine user data directory".to_string(),
            )
        })?;

        Ok(Self::new(base.join("dotenvlab")))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.root.join(package::BIN_DIR)
    }

    /// Path of the private binary slot (`bin/dotenvcrab`, `.exe` on Windows)
    pub fn binary_path(&self) -> PathBuf {
        self.bin_dir().join(binary_file_name())
    }

    pub fn state_path(&self) -> PathBuf {
        self.root.join(package::STATE_FILE)
    }

    /// Create `bin/` if missing and return its path
    pub fn ensure_bin_dir(&self) -> Result<PathBuf> {
        let bin = self.bin_dir();
        std::fs::create_dir_all(&bin)?;
        Ok(bin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotenvlab_testkit::with_isolated_package_env;

    #[test]
    fn test_binary_path_shape() {
        let package = PackageDir::new("/opt/pkg");

        let path = package.binary_path();
        let path_str = path.to_string_lossy();

        #[cfg(not(windows))]
        assert!(path_str.ends_with("bin/dotenvcrab"), "got: {}", path_str);

        #[cfg(windows)]
        assert!(path_str.ends_with("dotenvcrab.exe"), "got: {}", path_str);
    }

    #[test]
    fn test_state_path_is_in_root() {
        let package = PackageDir::new("/opt/pkg");
        assert_eq!(package.state_path(), PathBuf::from("/opt/pkg/state.json"));
    }

    #[test]
    fn test_resolve_honours_env_override() {
        with_isolated_package_env(None, |package_dir| {
            let package = PackageDir::resolve().unwrap();
            assert_eq!(package.root(), package_dir);
        });
    }

    #[test]
    fn test_ensure_bin_dir_creates_directory() {
        with_isolated_package_env(None, |_package_dir| {
            let package = PackageDir::resolve().unwrap();
            assert!(!package.bin_dir().exists());

            let bin = package.ensure_bin_dir().unwrap();
            assert!(bin.is_dir());

            // Idempotent
            let again = package.ensure_bin_dir().unwrap();
            assert_eq!(bin, again);
        });
    }

    #[test]
    #[cfg(not(windows))]
    fn test_binary_file_name_unix() {
        assert_eq!(binary_file_name(), "dotenvcrab");
    }

    #[test]
    #[cfg(windows)]
    fn test_binary_file_name_windows() {
        assert_eq!(binary_file_name(), "dotenvcrab.exe");
    }
}
