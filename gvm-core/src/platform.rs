use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Zip,
    TarGz,
}

impl ArchiveKind {
    pub fn extension(self) -> &'static str {
        match self {
            ArchiveKind::Zip => "zip",
            ArchiveKind::TarGz => "tar.gz",
        }
    }
}

/// Target the release archives are published for, in Go's naming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    pub fn current(arch: &str) -> Self {
        Platform {
            os: current_os().to_string(),
            arch: normalize_arch(arch),
        }
    }

    pub fn archive_kind(&self) -> ArchiveKind {
        if self.os == "windows" {
            ArchiveKind::Zip
        } else {
            ArchiveKind::TarGz
        }
    }

    /// `windows-amd64`, `linux-arm64`, ...
    pub fn label(&self) -> String {
        format!("{}-{}", self.os, self.arch)
    }
}

pub fn current_os() -> &'static str {
    match env::consts::OS {
        "macos" => "darwin",
        other => other,
    }
}

pub fn normalize_arch(value: &str) -> String {
    let lowered = value.trim().to_ascii_lowercase();
    match lowered.as_str() {
        "x86" | "i386" | "i686" => "386".to_string(),
        "x86_64" | "amd64" | "x64" => "amd64".to_string(),
        "aarch64" | "arm64" => "arm64".to_string(),
        _ => lowered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_processor_architecture_names() {
        assert_eq!(normalize_arch("x86"), "386");
        assert_eq!(normalize_arch("AMD64"), "amd64");
        assert_eq!(normalize_arch("x86_64"), "amd64");
        assert_eq!(normalize_arch("aarch64"), "arm64");
        assert_eq!(normalize_arch("riscv64"), "riscv64");
    }

    #[test]
    fn windows_uses_zip_archives() {
        let platform = Platform {
            os: "windows".to_string(),
            arch: "amd64".to_string(),
        };
        assert_eq!(platform.archive_kind(), ArchiveKind::Zip);
        assert_eq!(platform.label(), "windows-amd64");

        let platform = Platform {
            os: "linux".to_string(),
            arch: "arm64".to_string(),
        };
        assert_eq!(platform.archive_kind(), ArchiveKind::TarGz);
    }
}
