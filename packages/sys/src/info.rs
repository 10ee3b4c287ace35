//! Host information snapshot.

use std::fmt;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// What `systeminfo` reports about the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    /// Owner of the server process.
    pub username: String,
    /// Kernel family, e.g. `Linux`, `Darwin`, `Windows_NT`.
    pub os_type: String,
    /// CPU architecture, e.g. `x64`, `arm64`.
    pub arch: String,
    /// Logical CPU count.
    pub cpu_cores: usize,
    pub free_memory_bytes: u64,
    pub uptime_secs: u64,
}

impl HostInfo {
    pub fn free_memory_mb(&self) -> f64 {
        self.free_memory_bytes as f64 / BYTES_PER_MB
    }

    pub fn uptime_minutes(&self) -> f64 {
        self.uptime_secs as f64 / 60.0
    }
}

impl fmt::Display for HostInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "System Info")?;
        writeln!(f, "User: {}", self.username)?;
        writeln!(f, "OS: {} {}", self.os_type, self.arch)?;
        writeln!(f, "CPU Cores: {}", self.cpu_cores)?;
        writeln!(f, "Free RAM: {:.2} MB", self.free_memory_mb())?;
        writeln!(f, "Uptime: {:.1} minutes", self.uptime_minutes())
    }
}

/// Conventional kernel name for a Rust target OS (`std::env::consts::OS`).
pub fn os_type(target_os: &str) -> String {
    match target_os {
        "linux" | "android" => "Linux".to_string(),
        "macos" | "ios" => "Darwin".to_string(),
        "windows" => "Windows_NT".to_string(),
        "freebsd" => "FreeBSD".to_string(),
        "openbsd" => "OpenBSD".to_string(),
        "netbsd" => "NetBSD".to_string(),
        "solaris" | "illumos" => "SunOS".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => "unknown".to_string(),
            }
        }
    }
}

/// Short architecture name for a Rust target arch (`std::env::consts::ARCH`).
pub fn arch_name(target_arch: &str) -> String {
    match target_arch {
        "x86_64" => "x64".to_string(),
        "x86" => "ia32".to_string(),
        "aarch64" => "arm64".to_string(),
        "powerpc64" => "ppc64".to_string(),
        other => other.to_lowercase(),
    }
}
