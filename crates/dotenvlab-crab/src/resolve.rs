//! Binary resolution with the ordered fallback chain
//!
//! Resolution tries, in order: a locally built artifact (development of
//! this repository), an existing install in the package slot, and a fixed
//! list of well-known system paths. The first hit wins and later
//! strategies are never consulted. No network access happens here; the
//! downloader only runs when every strategy missed.

use std::fs;
use std::path::{Path, PathBuf};

use dotenvlab_core::config::consts::crab;
use dotenvlab_core::{PackageDir, Result};

use crate::info::{CrabInfo, CrabSource};

/// Result of binary resolution
#[derive(Debug, Clone)]
pub enum ResolveResult {
    /// A usable binary sits in the package slot
    Resolved(CrabInfo),
    /// No strategy produced a binary
    NotFound { searched: Vec<String> },
}

/// Ordered locate strategies over a package directory.
///
/// Steps 1 and 3 mutate the filesystem (copy or link into the package
/// slot) before returning; step 2 uses the slot as-is.
#[derive(Debug, Clone)]
pub struct Locator {
    package: PackageDir,
    dev_artifact: PathBuf,
    system_paths: Vec<PathBuf>,
}

impl Locator {
    /// Locator with the standard development artifact and system paths
    pub fn new(package: PackageDir) -> Result<Self> {
        let dev_artifact = std::env::current_dir()?
            .join("target")
            .join("release")
            .join(crab::BINARY_NAME);

        Ok(Self {
            package,
            dev_artifact,
            system_paths: default_system_paths(),
        })
    }

    /// Locator with explicit search locations (used by tests)
    pub fn with_locations(
        package: PackageDir,
        dev_artifact: PathBuf,
        system_paths: Vec<PathBuf>,
    ) -> Self {
        Self {
            package,
            dev_artifact,
            system_paths,
        }
    }

    /// Run the fallback chain: local build artifact, existing install,
    /// well-known system paths.
    pub fn locate(&self) -> Result<ResolveResult> {
        if let Some(info) = self.resolve_dev_artifact()? {
            return Ok(ResolveResult::Resolved(info));
        }

        if let Some(info) = self.resolve_existing()? {
            return Ok(ResolveResult::Resolved(info));
        }

        if let Some(info) = self.resolve_system()? {
            return Ok(ResolveResult::Resolved(info));
        }

        Ok(ResolveResult::NotFound {
            searched: self.searched_locations(),
        })
    }

    /// Locations reported when nothing matched
    fn searched_locations(&self) -> Vec<String> {
        let mut searched = vec![
            self.dev_artifact.display().to_string(),
            self.package.binary_path().display().to_string(),
        ];
        searched.extend(self.system_paths.iter().map(|p| p.display().to_string()));
        searched
    }

    /// Step 1: a freshly built artifact from this repository's own build
    /// output is copied into the package slot.
    fn resolve_dev_artifact(&self) -> Result<Option<CrabInfo>> {
        if !self.dev_artifact.is_file() {
            return Ok(None);
        }

        let slot = self.install_slot()?;
        fs::copy(&self.dev_artifact, &slot)?;

        Ok(Some(CrabInfo {
            source: CrabSource::LocalArtifact,
            path: slot,
        }))
    }

    /// Step 2: a binary already sitting in the package slot is used as-is.
    fn resolve_existing(&self) -> Result<Option<CrabInfo>> {
        let slot = self.package.binary_path();
        if slot.exists() {
            Ok(Some(CrabInfo {
                source: CrabSource::ExistingInstall,
                path: slot,
            }))
        } else {
            Ok(None)
        }
    }

    /// Step 3: the first well-known system install is linked (not copied)
    /// into the package slot.
    fn resolve_system(&self) -> Result<Option<CrabInfo>> {
        for candidate in &self.system_paths {
            if candidate.exists() {
                let slot = self.install_slot()?;
                link_into_slot(candidate, &slot)?;

                return Ok(Some(CrabInfo {
                    source: CrabSource::SystemPath,
                    path: slot,
                }));
            }
        }

        Ok(None)
    }

    fn install_slot(&self) -> Result<PathBuf> {
        self.package.ensure_bin_dir()?;
        Ok(self.package.binary_path())
    }
}

/// Well-known system installation paths, probed in order
pub fn default_system_paths() -> Vec<PathBuf> {
    #[cfg(unix)]
    {
        ["/usr/local/bin", "/usr/bin", "/opt/homebrew/bin"]
            .iter()
            .map(|dir| Path::new(dir).join(crab::BINARY_NAME))
            .collect()
    }

    #[cfg(not(unix))]
    {
        Vec::new()
    }
}

#[cfg(unix)]
fn link_into_slot(target: &Path, slot: &Path) -> Result<()> {
    // A stale slot entry (including a dangling symlink) must go first.
    if fs::symlink_metadata(slot).is_ok() {
        fs::remove_file(slot)?;
    }
    std::os::unix::fs::symlink(target, slot)?;
    Ok(())
}

#[cfg(not(unix))]
fn link_into_slot(target: &Path, slot: &Path) -> Result<()> {
    // Symlinks need elevated rights on Windows; fall back to a copy.
    fs::copy(target, slot)?;
    Ok(())
}
