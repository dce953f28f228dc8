//! HTTP client construction and release URL building

use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use std::time::Duration;
use url::Url;

use dotenvlab_core::config::consts::{crab, release};

use crate::install::platform::PlatformTag;

/// Default timeout for release downloads (5 minutes for slow links)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// User agent for dotenvlab requests
pub const USER_AGENT: &str = "dotenvlab";

/// Builds the HTTP client used for release downloads
///
/// Automatic redirect following is disabled: the release contract allows
/// exactly one 301/302 hop, which the downloader handles itself.
///
/// # Errors
///
/// Returns error if client construction fails
pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .redirect(Policy::none())
        .build()
}

/// Builds HTTP client with default timeout
///
/// # Errors
///
/// Returns error if client construction fails
pub fn build_default_client() -> Result<Client, reqwest::Error> {
    build_client(DEFAULT_TIMEOUT)
}

/// Base URL for release downloads, honouring the mirror/test override
pub fn release_base_url() -> Result<Url, url::ParseError> {
    match std::env::var(release::BASE_URL_ENV) {
        Ok(base) if !base.is_empty() => Url::parse(&base),
        _ => Url::parse(release::DEFAULT_BASE_URL),
    }
}

/// Download URL for one release artifact:
/// `<base>/<owner>/<repo>/releases/download/v<version>/dotenvcrab-<tag>`
pub fn release_binary_url(version: &str, tag: PlatformTag) -> Result<Url, url::ParseError> {
    let base = release_base_url()?;
    Url::parse(&format!(
        "{}/{}/{}/releases/download/v{}/{}-{}",
        base.as_str().trim_end_matches('/'),
        release::OWNER,
        release::REPO,
        version,
        crab::BINARY_NAME,
        tag
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotenvlab_testkit::with_isolated_package_env;

    #[test]
    fn test_release_binary_url_shape() {
        with_isolated_package_env(None, |_package_dir| {
            let url = release_binary_url("0.1.0", PlatformTag::LinuxAmd64).unwrap();
            assert_eq!(
                url.as_str(),
                "https://github.com/Dali-Aissaoui/dotenvcrab/releases/download/v0.1.0/dotenvcrab-linux-amd64"
            );
        });
    }

    #[test]
    fn test_release_binary_url_honours_base_override() {
        with_isolated_package_env(Some("http://127.0.0.1:9999"), |_package_dir| {
            let url = release_binary_url("0.2.0", PlatformTag::MacosArm64).unwrap();
            assert_eq!(
                url.as_str(),
                "http://127.0.0.1:9999/Dali-Aissaoui/dotenvcrab/releases/download/v0.2.0/dotenvcrab-macos-arm64"
            );
        });
    }

    #[test]
    fn test_base_override_trailing_slash_is_ignored() {
        with_isolated_package_env(Some("http://127.0.0.1:9999/"), |_package_dir| {
            let url = release_binary_url("0.2.0", PlatformTag::WindowsAmd64).unwrap();
            assert!(
                url.as_str()
                    .starts_with("http://127.0.0.1:9999/Dali-Aissaoui/"),
                "got: {}",
                url
            );
        });
    }
}
