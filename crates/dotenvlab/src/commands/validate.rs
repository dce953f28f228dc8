//! Validate command - structured invocation of the resolved validator

use anyhow::Result;

use dotenvlab_core::{DotenvlabError, PackageDir};
use dotenvlab_crab::exec::{ExecError, ValidationOptions, validate};

/// Execute `dotenvlab validate`
///
/// Mirrors the validator's outcome: validation failure exits with the
/// child's own code so scripts can consume it unchanged.
pub fn run(env_file: String, schema_file: String, strict: bool, json: bool) -> Result<()> {
    let package = PackageDir::resolve()?;
    let binary = package.binary_path();

    if !binary.exists() {
        return Err(DotenvlabError::ExecFailed(
            "dotenvcrab is not installed. Run `dotenvlab install` first.".to_string(),
        )
        .into());
    }

    let options = ValidationOptions {
        env_file,
        schema_file,
        strict,
        json,
    };

    match validate(&binary, &options) {
        Ok(result) => {
            if !result.output.is_empty() {
                println!("{}", result.output);
            }
            if !result.error.is_empty() {
                eprintln!("{}", result.error);
            }
            if let Some(parse_error) = &result.json_parse_error {
                eprintln!("⚠ validator output was not valid JSON: {}", parse_error);
            }
            Ok(())
        }
        Err(ExecError::ValidationFailed {
            exit_code,
            output,
            error,
        }) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            if !error.is_empty() {
                eprintln!("{}", error);
            }
            std::process::exit(exit_code);
        }
        Err(err @ ExecError::Spawn { .. }) => {
            Err(DotenvlabError::ExecFailed(err.to_string()).into())
        }
    }
}
