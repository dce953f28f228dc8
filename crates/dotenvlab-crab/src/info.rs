use std::fmt;
use std::path::PathBuf;

use dotenvlab_core::state::ResolvedSource;

/// Which source satisfied binary resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrabSource {
    LocalArtifact,
    ExistingInstall,
    SystemPath,
    Downloaded,
}

impl fmt::Display for CrabSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrabSource::LocalArtifact => write!(f, "local build artifact"),
            CrabSource::ExistingInstall => write!(f, "existing install"),
            CrabSource::SystemPath => write!(f, "system path"),
            CrabSource::Downloaded => write!(f, "downloaded release"),
        }
    }
}

impl From<CrabSource> for ResolvedSource {
    fn from(source: CrabSource) -> Self {
        match source {
            CrabSource::LocalArtifact => ResolvedSource::LocalArtifact,
            CrabSource::ExistingInstall => ResolvedSource::ExistingInstall,
            CrabSource::SystemPath => ResolvedSource::SystemPath,
            CrabSource::Downloaded => ResolvedSource::Downloaded,
        }
    }
}

/// A resolved validator binary
#[derive(Debug, Clone)]
pub struct CrabInfo {
    pub source: CrabSource,
    pub path: PathBuf,
}
