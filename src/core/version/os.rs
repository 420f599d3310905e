// ─── Platform Facts ───
// Operating system identity and the platform context that rules are
// evaluated against.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sysinfo::System;

/// Operating systems known to library descriptors.
///
/// Wire names follow the Mojang convention: `windows`, `osx`, `linux`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OperatingSystem {
    Windows,
    Osx,
    Linux,
    Unknown,
}

impl OperatingSystem {
    pub const SUPPORTED: [OperatingSystem; 3] = [
        OperatingSystem::Windows,
        OperatingSystem::Osx,
        OperatingSystem::Linux,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OperatingSystem::Windows => "windows",
            OperatingSystem::Osx => "osx",
            OperatingSystem::Linux => "linux",
            OperatingSystem::Unknown => "unknown",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            OperatingSystem::Windows => &["win"],
            OperatingSystem::Osx => &["mac"],
            OperatingSystem::Linux => &["linux", "unix"],
            OperatingSystem::Unknown => &[],
        }
    }

    pub fn is_supported(self) -> bool {
        self != OperatingSystem::Unknown
    }

    /// Resolve a wire name exactly (`"windows"`, `"osx"`, `"linux"`).
    pub fn from_wire_name(name: &str) -> Self {
        Self::SUPPORTED
            .into_iter()
            .find(|os| os.name().eq_ignore_ascii_case(name))
            .unwrap_or(OperatingSystem::Unknown)
    }

    /// Resolve a free-form OS name such as `"Windows 10"` or `"Mac OS X"`
    /// by alias containment.
    pub fn from_os_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        Self::SUPPORTED
            .into_iter()
            .find(|os| os.aliases().iter().any(|alias| lower.contains(alias)))
            .unwrap_or(OperatingSystem::Unknown)
    }

    /// The operating system this binary was built for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            OperatingSystem::Windows
        } else if cfg!(target_os = "macos") {
            OperatingSystem::Osx
        } else if cfg!(target_os = "linux") {
            OperatingSystem::Linux
        } else {
            OperatingSystem::from_os_name(std::env::consts::OS)
        }
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for OperatingSystem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for OperatingSystem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(OperatingSystem::from_wire_name(&raw))
    }
}

/// Address width of the running platform: `"64"` or `"32"`.
///
/// Substituted for `${arch}` in artifact filenames and native classifiers.
/// Resolved once per process.
pub fn arch_bits() -> &'static str {
    static ARCH_BITS: OnceLock<&'static str> = OnceLock::new();
    ARCH_BITS.get_or_init(|| bits_for_arch(std::env::consts::ARCH))
}

fn bits_for_arch(arch: &str) -> &'static str {
    if arch.contains("64") {
        "64"
    } else {
        "32"
    }
}

/// Facts about the platform that compatibility rules are matched against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformContext {
    pub os: OperatingSystem,
    pub os_version: String,
    pub arch: String,
}

impl PlatformContext {
    pub fn new(os: OperatingSystem, os_version: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os,
            os_version: os_version.into(),
            arch: arch.into(),
        }
    }

    /// The live platform context, captured once per process.
    pub fn current() -> &'static PlatformContext {
        static CURRENT: OnceLock<PlatformContext> = OnceLock::new();
        CURRENT.get_or_init(|| {
            PlatformContext::new(
                OperatingSystem::current(),
                System::os_version().unwrap_or_default(),
                std::env::consts::ARCH,
            )
        })
    }

    /// Address width of this context's arch: `"64"` or `"32"`.
    pub fn arch_bits(&self) -> &'static str {
        bits_for_arch(&self.arch)
    }
}
