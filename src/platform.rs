use anyhow::{anyhow, Result};
use std::fmt;
use std::str::FromStr;

/// CPU architectures air is released for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X86_64,
    Aarch64,
    I686,
    Arm,
}

impl Arch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::Aarch64 => "aarch64",
            Arch::I686 => "i686",
            Arch::Arm => "arm",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "x86_64" => Ok(Arch::X86_64),
            "aarch64" => Ok(Arch::Aarch64),
            "i686" => Ok(Arch::I686),
            "arm" => Ok(Arch::Arm),
            _ => Err(anyhow!(
                "Unsupported architecture '{}'. Supported: x86_64, aarch64, i686, arm",
                s
            )),
        }
    }
}

/// OS parts of the release target triples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    UnknownLinuxGnu,
    UnknownLinuxMusl,
    AppleDarwin,
    PcWindowsMsvc,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::UnknownLinuxGnu => "unknown-linux-gnu",
            Platform::UnknownLinuxMusl => "unknown-linux-musl",
            Platform::AppleDarwin => "apple-darwin",
            Platform::PcWindowsMsvc => "pc-windows-msvc",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "unknown-linux-gnu" => Ok(Platform::UnknownLinuxGnu),
            "unknown-linux-musl" => Ok(Platform::UnknownLinuxMusl),
            "apple-darwin" => Ok(Platform::AppleDarwin),
            "pc-windows-msvc" => Ok(Platform::PcWindowsMsvc),
            _ => Err(anyhow!(
                "Unsupported platform '{}'. Supported: unknown-linux-gnu, unknown-linux-musl, apple-darwin, pc-windows-msvc",
                s
            )),
        }
    }
}

/// Detect the (arch, platform) pair for the machine we are running on.
pub fn host_target() -> Result<(Arch, Platform)> {
    let arch = match std::env::consts::ARCH {
        "x86_64" => Arch::X86_64,
        "aarch64" => Arch::Aarch64,
        "x86" => Arch::I686,
        "arm" => Arch::Arm,
        other => return Err(anyhow!("Unsupported host architecture: {}", other)),
    };

    let platform = match std::env::consts::OS {
        "linux" => Platform::UnknownLinuxGnu,
        "macos" => Platform::AppleDarwin,
        "windows" => Platform::PcWindowsMsvc,
        other => return Err(anyhow!("Unsupported host OS: {}", other)),
    };

    Ok((arch, platform))
}

/// Release asset name for a target, without the archive extension.
pub fn artifact_name(arch: Arch, platform: Platform) -> String {
    format!("air-{}-{}", arch, platform)
}

/// Windows releases ship as zip, everything else as gzipped tar.
pub fn archive_ext(platform: Platform) -> &'static str {
    if platform == Platform::PcWindowsMsvc {
        ".zip"
    } else {
        ".tar.gz"
    }
}
