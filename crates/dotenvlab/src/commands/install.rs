//! Install command - resolve or download the validator binary

use anyhow::Result;
use chrono::Utc;

use dotenvlab_core::PackageDir;
use dotenvlab_core::state::{CrabState, State};
use dotenvlab_crab::install::{current_platform_tag, install_release};
use dotenvlab_crab::{CrabInfo, CrabSource, Locator, ResolveResult};

/// Release version installed when none is given: this package tracks the
/// validator's releases one-to-one.
const DEFAULT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Execute `dotenvlab install`
///
/// Runs the locate fallback chain first; the network is only touched when
/// every local strategy missed (or `--force` was given). Installation
/// failure is fatal: the process reports a non-zero exit through main.
pub fn run(version: Option<String>, force: bool, verbose: bool) -> Result<()> {
    let version = version.unwrap_or_else(|| DEFAULT_VERSION.to_string());
    let package = PackageDir::resolve()?;

    if verbose {
        println!("Package directory: {}", package.root().display());
    }

    let info = if force {
        download(&package, &version)?
    } else {
        match Locator::new(package.clone())?.locate()? {
            ResolveResult::Resolved(info) => {
                println!("✓ Using {}: {}", info.source, info.path.display());
                info
            }
            ResolveResult::NotFound { searched } => {
                if verbose {
                    println!("No existing binary found; searched:");
                    for location in &searched {
                        println!("  - {}", location);
                    }
                }
                download(&package, &version)?
            }
        }
    };

    record_state(&package, &info, &version)?;
    println!("✓ dotenvcrab ready at {}", info.path.display());

    Ok(())
}

fn download(package: &PackageDir, version: &str) -> Result<CrabInfo> {
    let tag = current_platform_tag()?;

    println!("Downloading dotenvcrab v{} for {}...", version, tag);

    let dest = package.binary_path();
    install_release(version, tag, &dest)?;

    println!("✓ Download completed");

    Ok(CrabInfo {
        source: CrabSource::Downloaded,
        path: dest,
    })
}

fn record_state(package: &PackageDir, info: &CrabInfo, version: &str) -> Result<()> {
    let state_path = package.state_path();
    let mut state = State::load_or_empty(&state_path);

    state.crab = Some(CrabState {
        resolved_path: info.path.clone(),
        resolved_version: (info.source == CrabSource::Downloaded).then(|| version.to_string()),
        resolved_source: info.source.into(),
        checked_at: Utc::now(),
    });

    state.save(&state_path)?;
    Ok(())
}
