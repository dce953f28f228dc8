//! Exec command - transparent pass-through to the resolved validator

use anyhow::Result;

use dotenvlab_core::{DotenvlabError, PackageDir};
use dotenvlab_crab::exec::passthrough;

/// Execute `dotenvlab exec -- <args>`
///
/// The child owns the terminal; its exit code is mirrored verbatim. This
/// function only returns on failure to launch.
pub fn run(args: Vec<String>) -> Result<()> {
    let package = PackageDir::resolve()?;
    let binary = package.binary_path();

    if !binary.exists() {
        return Err(DotenvlabError::ExecFailed(
            "dotenvcrab is not installed. Run `dotenvlab install` first.".to_string(),
        )
        .into());
    }

    let code =
        passthrough(&binary, &args).map_err(|e| DotenvlabError::ExecFailed(e.to_string()))?;

    std::process::exit(code);
}
