//! Fake validator binaries with scripted behaviour
//!
//! Tests exercise the invocation wrappers against small shell scripts (batch
//! files on Windows) standing in for the real dotenvcrab binary. On Windows
//! the fake is a `.bat` file and must be invoked by its returned path rather
//! than through the package slot.

use std::path::{Path, PathBuf};

/// Scripted behaviour for a fake dotenvcrab binary
#[derive(Debug, Clone, Default)]
pub struct FakeCrab {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl FakeCrab {
    /// Fake that exits 0 with the given stdout
    pub fn ok(stdout: &str) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    /// Fake that exits with `exit_code` and writes `stderr`
    pub fn failing(exit_code: i32, stderr: &str) -> Self {
        Self {
            exit_code,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }
}

/// Writes a fake `dotenvcrab` executable into `dir` and returns its path
///
/// # Panics
///
/// Panics if the script cannot be written or made executable.
#[cfg(unix)]
pub fn fake_crab(dir: &Path, behaviour: &FakeCrab) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("dotenvcrab");

    let mut script = String::from("#!/bin/sh\n");
    if !behaviour.stdout.is_empty() {
        script.push_str("cat <<'DOTENVLAB_OUT'\n");
        script.push_str(&behaviour.stdout);
        script.push_str("\nDOTENVLAB_OUT\n");
    }
    if !behaviour.stderr.is_empty() {
        script.push_str("cat >&2 <<'DOTENVLAB_ERR'\n");
        script.push_str(&behaviour.stderr);
        script.push_str("\nDOTENVLAB_ERR\n");
    }
    script.push_str(&format!("exit {}\n", behaviour.exit_code));

    std::fs::write(&path, script).expect("Failed to write fake dotenvcrab");

    let mut perms = std::fs::metadata(&path)
        .expect("Failed to stat fake dotenvcrab")
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("Failed to chmod fake dotenvcrab");

    path
}

#[cfg(windows)]
pub fn fake_crab(dir: &Path, behaviour: &FakeCrab) -> PathBuf {
    let path = dir.join("dotenvcrab.bat");

    let mut script = String::from("@echo off\r\n");
    if !behaviour.stdout.is_empty() {
        script.push_str(&format!("echo {}\r\n", behaviour.stdout));
    }
    if !behaviour.stderr.is_empty() {
        script.push_str(&format!("echo {} 1>&2\r\n", behaviour.stderr));
    }
    script.push_str(&format!("exit /b {}\r\n", behaviour.exit_code));

    std::fs::write(&path, script).expect("Failed to write fake dotenvcrab");

    path
}

/// Fake binary that echoes its arguments on one line and exits 0
///
/// # Panics
///
/// Panics if the script cannot be written or made executable.
#[cfg(unix)]
pub fn fake_crab_echo_args(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("dotenvcrab");
    std::fs::write(&path, "#!/bin/sh\necho \"$@\"\nexit 0\n")
        .expect("Failed to write fake dotenvcrab");

    let mut perms = std::fs::metadata(&path)
        .expect("Failed to stat fake dotenvcrab")
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("Failed to chmod fake dotenvcrab");

    path
}

#[cfg(windows)]
pub fn fake_crab_echo_args(dir: &Path) -> PathBuf {
    let path = dir.join("dotenvcrab.bat");
    std::fs::write(&path, "@echo off\r\necho %*\r\nexit /b 0\r\n")
        .expect("Failed to write fake dotenvcrab");
    path
}
