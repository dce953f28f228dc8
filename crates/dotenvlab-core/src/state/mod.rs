//! Persisted resolution state
//!
//! `state.json` is a disposable record of the last successful resolution:
//! which source satisfied it, where the binary sits, and when. Invocation
//! never re-runs resolution; it reads the package slot directly, so losing
//! this file only degrades diagnostics. No file locking is used:
//! installation completes before any concurrent invocation begins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{DotenvlabError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct State {
    pub schema_version: String,
    pub machine: MachineInfo,
    #[serde(default)]
    pub crab: Option<CrabState>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineInfo {
    pub os: String,
    pub arch: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrabState {
    pub resolved_path: PathBuf,
    /// Release version, known only for downloaded binaries
    #[serde(default)]
    pub resolved_version: Option<String>,
    pub resolved_source: ResolvedSource,
    pub checked_at: DateTime<Utc>,
}

/// Which locate strategy (or the downloader) produced the binary
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ResolvedSource {
    LocalArtifact,
    ExistingInstall,
    SystemPath,
    Downloaded,
}

impl fmt::Display for ResolvedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedSource::LocalArtifact => write!(f, "local build artifact"),
            ResolvedSource::ExistingInstall => write!(f, "existing install"),
            ResolvedSource::SystemPath => write!(f, "system path"),
            ResolvedSource::Downloaded => write!(f, "downloaded release"),
        }
    }
}

impl State {
    /// Create an empty State for this machine
    pub fn empty() -> Self {
        Self {
            schema_version: "1.0".to_string(),
            machine: MachineInfo::detect(),
            crab: None,
        }
    }

    /// Load state.json
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|e| DotenvlabError::StateReadError(format!("Failed to read: {}", e)))?;

        let state: Self = serde_json::from_str(&content)
            .map_err(|e| DotenvlabError::StateReadError(format!("Failed to parse: {}", e)))?;

        // Schema evolution
        match state.schema_version.as_str() {
            "1.0" => Ok(state),
            version => Err(DotenvlabError::StateInvalidSchema(version.to_string())),
        }
    }

    /// Write state.json atomically
    ///
    /// The content goes to a temporary file in the same directory which is
    /// then persisted over the destination, so a crash mid-write never
    /// leaves a half-written state file behind.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let parent = ensure_parent_dir(path)?;
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| DotenvlabError::StateWriteError(format!("Failed to serialize: {}", e)))?;
        atomic_write_json(&content, path, parent)?;
        Ok(())
    }

    /// Load state.json if present, otherwise return an empty State
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|_| Self::empty())
    }
}

/// Ensure parent directory exists and return it
fn ensure_parent_dir(path: &Path) -> Result<&Path> {
    let parent = path.parent().ok_or_else(|| {
        DotenvlabError::StateWriteError("State path has no parent directory".to_string())
    })?;
    std::fs::create_dir_all(parent).map_err(|e| {
        DotenvlabError::StateWriteError(format!("Failed to create parent dir: {}", e))
    })?;
    Ok(parent)
}

/// Write JSON atomically using NamedTempFile + persist (Windows compatible)
fn atomic_write_json(content: &str, path: &Path, parent: &Path) -> Result<()> {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut temp_file = NamedTempFile::new_in(parent).map_err(|e| {
        DotenvlabError::StateWriteError(format!("Failed to create temp file: {}", e))
    })?;

    temp_file.write_all(content.as_bytes()).map_err(|e| {
        DotenvlabError::StateWriteError(format!("Failed to write temp file: {}", e))
    })?;

    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| DotenvlabError::StateWriteError(format!("Failed to sync temp file: {}", e)))?;

    temp_file.persist(path).map_err(|e| {
        DotenvlabError::StateWriteError(format!("Failed to persist temp file: {}", e))
    })?;

    Ok(())
}

impl MachineInfo {
    /// Detect the current machine
    pub fn detect() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }
}
