//! Validator invocation
//!
//! Three modes over an already-resolved binary: a structured `validate`
//! call that captures output, a transparent pass-through that inherits
//! the caller's streams, and a best-effort installation probe. None of
//! them re-run resolution.

use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use serde::Serialize;
use thiserror::Error;

use dotenvlab_core::config::consts::crab;

/// Sentinel exit code reported when the validator could not be spawned
pub const SPAWN_FAILURE_EXIT_CODE: i32 = -1;

/// Options for a structured validation run.
///
/// Every field carries a default; construct with
/// `ValidationOptions::default()` and override what differs. The value is
/// immutable once built and maps one-to-one onto the validator's CLI
/// flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    pub env_file: String,
    pub schema_file: String,
    pub strict: bool,
    pub json: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            env_file: crab::DEFAULT_ENV_FILE.to_string(),
            schema_file: crab::DEFAULT_SCHEMA_FILE.to_string(),
            strict: false,
            json: false,
        }
    }
}

impl ValidationOptions {
    /// Argument list handed to the validator: `--env` and `--schema`
    /// always, `--strict` and `--json` only when requested.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "--env".to_string(),
            self.env_file.clone(),
            "--schema".to_string(),
            self.schema_file.clone(),
        ];

        if self.strict {
            args.push("--strict".to_string());
        }

        if self.json {
            args.push("--json".to_string());
        }

        args
    }
}

/// Outcome of a validation run that exited 0
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub success: bool,
    pub exit_code: i32,
    /// Trimmed stdout of the validator
    pub output: String,
    /// Trimmed stderr of the validator
    pub error: String,
    /// Parsed JSON payload, present only when `json` was requested and the
    /// output parsed cleanly
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Parse failure message when `json` was requested but the output was
    /// not valid JSON; does not affect `success`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_parse_error: Option<String>,
}

/// Errors raised by an invocation
#[derive(Debug, Error)]
pub enum ExecError {
    /// The validator ran and reported validation failure (non-zero exit).
    /// An expected outcome, carrying the full captured output.
    #[error("dotenvcrab exited with code {exit_code}: {error}")]
    ValidationFailed {
        exit_code: i32,
        output: String,
        error: String,
    },

    /// The validator process could not be started at all
    #[error("{message}")]
    Spawn { message: String },
}

impl ExecError {
    /// Exit code associated with the failure (-1 for spawn failures)
    pub fn exit_code(&self) -> i32 {
        match self {
            ExecError::ValidationFailed { exit_code, .. } => *exit_code,
            ExecError::Spawn { .. } => SPAWN_FAILURE_EXIT_CODE,
        }
    }
}

fn spawn_error(cause: &dyn std::fmt::Display) -> ExecError {
    ExecError::Spawn {
        message: format!("Failed to execute {}: {}", crab::BINARY_NAME, cause),
    }
}

/// Runs the resolved validator and captures its full output.
///
/// Output is accumulated completely before the outcome is decided; no
/// streaming reaches the caller. Concurrent calls are independent: each
/// spawns its own child and owns its buffers.
pub fn validate(
    binary: &Path,
    options: &ValidationOptions,
) -> Result<ValidationResult, ExecError> {
    let output = Command::new(binary)
        .args(options.to_args())
        .output()
        .map_err(|e| spawn_error(&e))?;

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let exit_code = output.status.code().unwrap_or(SPAWN_FAILURE_EXIT_CODE);

    if !output.status.success() {
        // No JSON parsing is attempted on a failed run.
        return Err(ExecError::ValidationFailed {
            exit_code,
            output: stdout,
            error: stderr,
        });
    }

    let mut result = ValidationResult {
        success: true,
        exit_code,
        output: stdout,
        error: stderr,
        data: None,
        json_parse_error: None,
    };

    if options.json && !result.output.is_empty() {
        match serde_json::from_str(&result.output) {
            Ok(value) => result.data = Some(value),
            Err(e) => result.json_parse_error = Some(e.to_string()),
        }
    }

    Ok(result)
}

/// Best-effort health probe: does the resolved binary answer `--version`
/// with exit code 0? Never propagates an error.
pub fn check_installation(binary: &Path) -> bool {
    Command::new(binary)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Runs the validator with raw arguments and inherited stdio, returning
/// the child's exit code for the caller to mirror. No output is captured.
pub fn passthrough(binary: &Path, args: &[String]) -> Result<i32, ExecError> {
    let status = Command::new(binary)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| spawn_error(&e))?;

    Ok(exit_code_of(status))
}

fn exit_code_of(status: ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        status
            .code()
            .or_else(|| status.signal().map(|signal| 128 + signal))
            .unwrap_or(1)
    }

    #[cfg(not(unix))]
    {
        status.code().unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotenvlab_testkit::{FakeCrab, fake_crab, fake_crab_echo_args, temp_dir_in_workspace};
    use std::path::PathBuf;

    #[test]
    fn test_to_args_defaults() {
        let options = ValidationOptions::default();
        assert_eq!(
            options.to_args(),
            vec!["--env", ".env", "--schema", "env.schema.json"]
        );
    }

    #[test]
    fn test_to_args_strict_and_json() {
        let options = ValidationOptions {
            env_file: "custom.env".to_string(),
            schema_file: "custom.schema.json".to_string(),
            strict: true,
            json: true,
        };
        assert_eq!(
            options.to_args(),
            vec![
                "--env",
                "custom.env",
                "--schema",
                "custom.schema.json",
                "--strict",
                "--json"
            ]
        );
    }

    #[test]
    fn test_to_args_never_synthesizes_other_flags() {
        let options = ValidationOptions {
            strict: false,
            json: true,
            ..ValidationOptions::default()
        };
        let args = options.to_args();
        assert!(!args.contains(&"--strict".to_string()));
        assert_eq!(args.len(), 5);
    }

    #[test]
    #[cfg(unix)]
    fn test_validate_success_parses_json_data() {
        let temp = temp_dir_in_workspace();
        let binary = fake_crab(temp.path(), &FakeCrab::ok(r#"{"ok":true}"#));

        let options = ValidationOptions {
            json: true,
            ..ValidationOptions::default()
        };
        let result = validate(&binary, &options).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.data, Some(serde_json::json!({"ok": true})));
        assert!(result.json_parse_error.is_none());
    }

    #[test]
    #[cfg(unix)]
    fn test_validate_success_with_unparseable_json() {
        let temp = temp_dir_in_workspace();
        let binary = fake_crab(temp.path(), &FakeCrab::ok("not json"));

        let options = ValidationOptions {
            json: true,
            ..ValidationOptions::default()
        };
        let result = validate(&binary, &options).unwrap();

        assert!(result.success, "a parse failure must not flip success");
        assert!(result.data.is_none());
        assert!(
            result
                .json_parse_error
                .as_deref()
                .is_some_and(|msg| !msg.is_empty())
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_validate_without_json_mode_never_parses() {
        let temp = temp_dir_in_workspace();
        let binary = fake_crab(temp.path(), &FakeCrab::ok(r#"{"ok":true}"#));

        let result = validate(&binary, &ValidationOptions::default()).unwrap();

        assert!(result.data.is_none());
        assert!(result.json_parse_error.is_none());
        assert_eq!(result.output, r#"{"ok":true}"#);
    }

    #[test]
    #[cfg(unix)]
    fn test_validate_nonzero_exit_is_validation_failure() {
        let temp = temp_dir_in_workspace();
        let binary = fake_crab(temp.path(), &FakeCrab::failing(2, "missing key FOO"));

        let result = validate(&binary, &ValidationOptions::default());

        match result {
            Err(ExecError::ValidationFailed {
                exit_code,
                output,
                error,
            }) => {
                assert_eq!(exit_code, 2);
                assert!(output.is_empty());
                assert_eq!(error, "missing key FOO");
            }
            other => panic!("expected ValidationFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_missing_binary_is_spawn_failure() {
        let binary = PathBuf::from("/nonexistent/path/to/dotenvcrab");

        let result = validate(&binary, &ValidationOptions::default());

        match result {
            Err(err @ ExecError::Spawn { .. }) => {
                assert_eq!(err.exit_code(), SPAWN_FAILURE_EXIT_CODE);
                assert!(
                    err.to_string().starts_with("Failed to execute dotenvcrab:"),
                    "got: {}",
                    err
                );
            }
            other => panic!("expected Spawn, got {:?}", other),
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_check_installation_healthy_binary() {
        let temp = temp_dir_in_workspace();
        let binary = fake_crab(temp.path(), &FakeCrab::ok("dotenvcrab 0.1.0"));

        assert!(check_installation(&binary));
    }

    #[test]
    #[cfg(unix)]
    fn test_check_installation_failing_binary() {
        let temp = temp_dir_in_workspace();
        let binary = fake_crab(temp.path(), &FakeCrab::failing(1, "broken"));

        assert!(!check_installation(&binary));
    }

    #[test]
    fn test_check_installation_missing_binary_is_false() {
        let binary = PathBuf::from("/nonexistent/path/to/dotenvcrab");
        assert!(!check_installation(&binary));
    }

    #[test]
    #[cfg(unix)]
    fn test_passthrough_mirrors_exit_code() {
        let temp = temp_dir_in_workspace();
        let binary = fake_crab(temp.path(), &FakeCrab::failing(3, ""));

        let code = passthrough(&binary, &[]).unwrap();
        assert_eq!(code, 3);
    }

    #[test]
    #[cfg(unix)]
    fn test_passthrough_forwards_arguments_verbatim() {
        let temp = temp_dir_in_workspace();
        let binary = fake_crab_echo_args(temp.path());

        // Output is inherited, not captured; success is all we can assert
        // here. Argument forwarding itself is covered by the CLI tests.
        let code = passthrough(
            &binary,
            &["--env".to_string(), "custom.env".to_string()],
        )
        .unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn test_passthrough_missing_binary_is_spawn_failure() {
        let binary = PathBuf::from("/nonexistent/path/to/dotenvcrab");
        let result = passthrough(&binary, &[]);
        assert!(matches!(result, Err(ExecError::Spawn { .. })));
    }
}
