//! Test utilities for dotenvlab
//!
//! Shared across the workspace: workspace-local temporary directories,
//! environment isolation for package-directory resolution, and fake
//! validator binaries with scripted behaviour.

use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

pub mod fixtures;

pub use fixtures::{FakeCrab, fake_crab, fake_crab_echo_args};

/// Static mutex to serialize tests that modify environment variables
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Creates a temporary directory within `.tmp/` at the project root
///
/// This keeps all test temporary files in a single gitignored location
/// that is easy to clean up manually if needed.
///
/// # Panics
///
/// Panics if the current directory cannot be determined or `.tmp/` cannot
/// be created.
pub fn temp_dir_in_workspace() -> TempDir {
    let workspace_root = std::env::current_dir().expect("Failed to get current directory");

    let tmp_base = workspace_root.join(".tmp");

    std::fs::create_dir_all(&tmp_base).expect("Failed to create .tmp directory");

    TempDir::new_in(&tmp_base).expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let workspace_root = std::env::current_dir()?;
    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}

/// Run a test with an isolated package environment
///
/// Complete environment isolation for tests that exercise package-directory
/// resolution or release downloads:
///
/// 1. `HOME` points into a fresh temporary directory
/// 2. `DOTENVLAB_DIR` points to a package directory inside it
/// 3. `DOTENVLAB_RELEASE_BASE` is set to `release_base` or removed
/// 4. A static mutex prevents concurrent tests from interleaving env edits
///
/// The closure receives the isolated package directory. All variables are
/// restored before this function returns.
pub fn with_isolated_package_env<F, R>(release_base: Option<&str>, f: F) -> R
where
    F: FnOnce(&Path) -> R,
{
    let _guard = ENV_LOCK.lock().unwrap();

    // Save original environment (for restoration)
    let original_home = std::env::var("HOME").ok();
    let original_package_dir = std::env::var("DOTENVLAB_DIR").ok();
    let original_release_base = std::env::var("DOTENVLAB_RELEASE_BASE").ok();

    let fake_home = TempDir::new().unwrap();
    let package_dir = fake_home.path().join("dotenvlab");
    std::fs::create_dir_all(&package_dir).unwrap();

    // SAFETY: We hold ENV_LOCK, so no other test is modifying environment
    // variables concurrently.
    unsafe {
        std::env::set_var("HOME", fake_home.path());
        std::env::set_var("DOTENVLAB_DIR", &package_dir);

        match release_base {
            Some(base) => std::env::set_var("DOTENVLAB_RELEASE_BASE", base),
            None => std::env::remove_var("DOTENVLAB_RELEASE_BASE"),
        }
    }

    let result = f(package_dir.as_path());

    // Restore environment (important for test isolation)
    // SAFETY: We still hold ENV_LOCK.
    unsafe {
        restore_var("HOME", original_home);
        restore_var("DOTENVLAB_DIR", original_package_dir);
        restore_var("DOTENVLAB_RELEASE_BASE", original_release_base);
    }

    result
}

/// Set or remove a variable depending on whether it was originally present
///
/// # Safety
///
/// Callers must hold `ENV_LOCK`.
unsafe fn restore_var(name: &str, original: Option<String>) {
    unsafe {
        match original {
            Some(value) => std::env::set_var(name, value),
            None => std::env::remove_var(name),
        }
    }
}
