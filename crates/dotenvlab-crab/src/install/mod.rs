pub mod download;
pub mod platform;

// Re-export for convenience
pub use download::{InstallError, install_binary, install_release};
pub use platform::{Arch, Os, PlatformTag, current_platform_tag, detect_arch, detect_os, platform_tag};
