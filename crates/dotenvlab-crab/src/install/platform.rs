use crate::Result;
use std::fmt;
#[cfg(any(
    not(any(target_os = "macos", target_os = "linux", target_os = "windows")),
    not(any(
        target_arch = "x86_64",
        target_arch = "x86",
        target_arch = "aarch64",
        target_arch = "arm"
    ))
))]
use dotenvlab_core::error::DotenvlabError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    MacOS,
    Linux,
    Windows,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X86_64,
    X86,
    Aarch64,
    Arm,
}

pub fn detect_os() -> Result<Os> {
    #[cfg(target_os = "macos")]
    return Ok(Os::MacOS);

    #[cfg(target_os = "linux")]
    return Ok(Os::Linux);

    #[cfg(target_os = "windows")]
    return Ok(Os::Windows);

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    Err(DotenvlabError::PlatformUnsupported(format!(
        "Unsupported operating system: {}",
        std::env::consts::OS
    )))
}

pub fn detect_arch() -> Result<Arch> {
    #[cfg(target_arch = "x86_64")]
    return Ok(Arch::X86_64);

    #[cfg(target_arch = "x86")]
    return Ok(Arch::X86);

    #[cfg(target_arch = "aarch64")]
    return Ok(Arch::Aarch64);

    #[cfg(target_arch = "arm")]
    return Ok(Arch::Arm);

    #[cfg(not(any(
        target_arch = "x86_64",
        target_arch = "x86",
        target_arch = "aarch64",
        target_arch = "arm"
    )))]
    Err(DotenvlabError::PlatformUnsupported(format!(
        "Unsupported architecture: {}",
        std::env::consts::ARCH
    )))
}

/// Canonical platform tag naming one release artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformTag {
    WindowsAmd64,
    Windows386,
    MacosArm64,
    MacosAmd64,
    LinuxAmd64,
    LinuxArm64,
}

impl PlatformTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformTag::WindowsAmd64 => "windows-amd64",
            PlatformTag::Windows386 => "windows-386",
            PlatformTag::MacosArm64 => "macos-arm64",
            PlatformTag::MacosAmd64 => "macos-amd64",
            PlatformTag::LinuxAmd64 => "linux-amd64",
            PlatformTag::LinuxArm64 => "linux-arm64",
        }
    }
}

impl fmt::Display for PlatformTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps an (OS, architecture) pair onto its release tag.
///
/// Pure mapping, no side effects. Windows answers `windows-amd64` unless
/// the architecture is exactly 32-bit x86; macOS answers `macos-arm64`
/// only for aarch64; Linux folds both ARM flavours into `linux-arm64`.
pub fn platform_tag(os: Os, arch: Arch) -> PlatformTag {
    match os {
        Os::Windows => match arch {
            Arch::X86 => PlatformTag::Windows386,
            _ => PlatformTag::WindowsAmd64,
        },
        Os::MacOS => match arch {
            Arch::Aarch64 => PlatformTag::MacosArm64,
            _ => PlatformTag::MacosAmd64,
        },
        Os::Linux => match arch {
            Arch::Aarch64 | Arch::Arm => PlatformTag::LinuxArm64,
            _ => PlatformTag::LinuxAmd64,
        },
    }
}

/// Release tag for the platform this process runs on
pub fn current_platform_tag() -> Result<PlatformTag> {
    Ok(platform_tag(detect_os()?, detect_arch()?))
}
