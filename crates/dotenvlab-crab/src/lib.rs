//! Validator binary resolution, installation, and invocation for dotenvlab.
//!
//! This crate obtains a runnable dotenvcrab binary for the current platform
//! and wraps its invocation. The schema validation itself lives entirely
//! inside the wrapped binary; nothing here parses `.env` or schema files.
//!
//! # Architecture
//!
//! - [`info`]: types describing a resolved binary
//! - [`install`]: platform tags and the release downloader
//! - [`resolve`]: the ordered locate fallback chain
//! - [`exec`]: structured validation, pass-through, and the health probe
//!
//! # Binary Resolution Flow
//!
//! ```text
//! Locator::locate()
//!     ↓
//! 1. Local build artifact
//!     → target/release/dotenvcrab (copied into the package slot)
//!     ↓ (not found)
//! 2. Existing install
//!     → <package>/bin/dotenvcrab (used as-is)
//!     ↓ (not found)
//! 3. Well-known system paths
//!     → /usr/local/bin, /usr/bin, /opt/homebrew/bin (linked into the slot)
//!     ↓ (not found)
//! 4. NotFound → install::install_release downloads the release artifact
//! ```
//!
//! Resolution runs once per environment setup. Both invocation modes
//! consume the resolved path and never re-run resolution.
//!
//! # Examples
//!
//! ```no_run
//! use dotenvlab_core::PackageDir;
//! use dotenvlab_crab::exec::{ValidationOptions, validate};
//! use dotenvlab_crab::{Locator, ResolveResult};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let package = PackageDir::resolve()?;
//!
//! match Locator::new(package.clone())?.locate()? {
//!     ResolveResult::Resolved(info) => {
//!         println!("Found via {}: {}", info.source, info.path.display());
//!     }
//!     ResolveResult::NotFound { searched } => {
//!         println!("No binary found; searched {:?}", searched);
//!     }
//! }
//!
//! let result = validate(&package.binary_path(), &ValidationOptions::default())?;
//! println!("Exit code: {}", result.exit_code);
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod exec;
pub mod github;
pub mod info;
pub mod install;
pub mod resolve;

// Re-export commonly used types
pub use exec::{ExecError, ValidationOptions, ValidationResult, check_installation, validate};
pub use info::{CrabInfo, CrabSource};
pub use resolve::{Locator, ResolveResult};

// Type alias for convenience
pub type Result<T> = dotenvlab_core::Result<T>;
