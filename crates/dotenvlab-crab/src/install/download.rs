//! Release artifact download and installation
//!
//! Downloads a prebuilt dotenvcrab binary from GitHub Releases into the
//! package's private binary slot. The release endpoint answers with a
//! redirect to the CDN, so exactly one 301/302 hop is honoured; a second
//! redirect is refused. The body streams into a temporary file next to the
//! destination and is atomically persisted, so a failed transfer never
//! leaves a truncated binary behind. The executable bit is set only after
//! the write completes.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use thiserror::Error;
use url::Url;

use crate::github;
use crate::install::platform::PlatformTag;

/// Errors raised while downloading and installing a release binary
#[derive(Debug, Error)]
pub enum InstallError {
    /// The server answered with a status outside {200, 301, 302}
    #[error("download failed with status {status} for {url}")]
    Download { status: u16, url: Url },

    /// A redirect response carried no usable Location header
    #[error("redirect from {url} carried no usable Location header")]
    BadRedirect { url: Url },

    /// Transport-level failure
    #[error("request to {url} failed: {source}")]
    Request {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    /// The release URL could not be constructed
    #[error("invalid release URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Filesystem failure
    #[error("{operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },
}

/// Downloads the `version` release artifact for `tag` into `dest`
pub fn install_release(version: &str, tag: PlatformTag, dest: &Path) -> Result<(), InstallError> {
    let url = github::release_binary_url(version, tag)?;
    install_binary(&url, dest)
}

/// Downloads the release artifact at `url` into `dest`.
///
/// Follows at most one redirect hop. On success the destination contains
/// exactly the response body and, on Unix, carries the executable bit.
pub fn install_binary(url: &Url, dest: &Path) -> Result<(), InstallError> {
    let client = github::build_default_client().map_err(|e| InstallError::Request {
        url: url.clone(),
        source: e,
    })?;

    let response = get(&client, url)?;
    let response = match response.status() {
        StatusCode::OK => response,
        StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND => {
            let target = redirect_target(url, &response)?;
            let redirected = get(&client, &target)?;
            // A second redirect is not followed; anything but 200 fails.
            if redirected.status() != StatusCode::OK {
                return Err(InstallError::Download {
                    status: redirected.status().as_u16(),
                    url: target,
                });
            }
            redirected
        }
        status => {
            return Err(InstallError::Download {
                status: status.as_u16(),
                url: url.clone(),
            });
        }
    };

    write_to_slot(response, dest)?;

    #[cfg(unix)]
    set_executable_permissions(dest)?;

    Ok(())
}

fn get(client: &Client, url: &Url) -> Result<Response, InstallError> {
    client
        .get(url.as_str())
        .send()
        .map_err(|e| InstallError::Request {
            url: url.clone(),
            source: e,
        })
}

/// Resolves the Location header of a redirect response.
///
/// The target is taken as-is; host and scheme are not validated against
/// the original URL.
fn redirect_target(url: &Url, response: &Response) -> Result<Url, InstallError> {
    let location = response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| InstallError::BadRedirect { url: url.clone() })?;

    Url::parse(location)
        .or_else(|_| url.join(location))
        .map_err(|_| InstallError::BadRedirect { url: url.clone() })
}

/// Streams the response body into `dest` via a sibling temporary file.
///
/// Only a completely written body is persisted; an interrupted stream
/// leaves the destination untouched.
fn write_to_slot(mut response: Response, dest: &Path) -> Result<(), InstallError> {
    let dest_dir = dest.parent().ok_or_else(|| InstallError::Io {
        operation: format!("resolve parent directory of {}", dest.display()),
        source: io::Error::other("no parent directory"),
    })?;

    fs::create_dir_all(dest_dir).map_err(|e| InstallError::Io {
        operation: format!("create directory {}", dest_dir.display()),
        source: e,
    })?;

    let mut temp_file = tempfile::NamedTempFile::new_in(dest_dir).map_err(|e| InstallError::Io {
        operation: "create temporary file for download".to_string(),
        source: e,
    })?;

    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = response.read(&mut buffer).map_err(|e| InstallError::Io {
            operation: "read from HTTP response".to_string(),
            source: e,
        })?;

        if bytes_read == 0 {
            break;
        }

        temp_file
            .write_all(&buffer[..bytes_read])
            .map_err(|e| InstallError::Io {
                operation: "write to temporary file".to_string(),
                source: e,
            })?;
    }

    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| InstallError::Io {
            operation: "sync temporary file".to_string(),
            source: e,
        })?;

    temp_file.persist(dest).map_err(|e| InstallError::Io {
        operation: format!("persist download to {}", dest.display()),
        source: e.error,
    })?;

    Ok(())
}

/// Sets executable permissions on Unix, strictly after the write completes
#[cfg(unix)]
fn set_executable_permissions(path: &Path) -> Result<(), InstallError> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|e| InstallError::Io {
        operation: format!("get metadata for {}", path.display()),
        source: e,
    })?;

    let mut permissions = metadata.permissions();
    let mode = permissions.mode();

    // Add executable bit (owner, group, other)
    permissions.set_mode(mode | 0o111);

    fs::set_permissions(path, permissions).map_err(|e| InstallError::Io {
        operation: format!("set permissions for {}", path.display()),
        source: e,
    })?;

    Ok(())
}
