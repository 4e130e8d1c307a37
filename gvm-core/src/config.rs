use crate::platform;
use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_DOWNLOAD_URL: &str = "https://storage.googleapis.com/golang/go";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvBackend {
    Registry,
    File,
}

impl EnvBackend {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "registry" | "reg" | "windows" => Some(EnvBackend::Registry),
            "file" | "files" | "json" => Some(EnvBackend::File),
            _ => None,
        }
    }

    pub fn platform_default() -> Self {
        if cfg!(windows) {
            EnvBackend::Registry
        } else {
            EnvBackend::File
        }
    }
}

#[derive(Debug, Clone)]
pub struct GvmConfig {
    pub data_dir: PathBuf,
    pub download_base_url: String,
    pub env_backend: EnvBackend,
    pub arch: String,
}

impl GvmConfig {
    pub fn from_env() -> Self {
        let data_dir = if let Ok(home) = env::var("GVM_HOME") {
            PathBuf::from(home)
        } else {
            ProjectDirs::from("io", "gvm", "gvm")
                .map(|dirs| dirs.data_local_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".gvm"))
        };

        let download_base_url = env::var("GVM_DOWNLOAD_URL")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_DOWNLOAD_URL.to_string());

        let env_backend = env::var("GVM_ENV_BACKEND")
            .ok()
            .and_then(|value| EnvBackend::from_str(&value))
            .unwrap_or_else(EnvBackend::platform_default);

        GvmConfig {
            data_dir,
            download_base_url,
            env_backend,
            arch: read_arch_from_env(),
        }
    }

    pub fn env_dir(&self) -> PathBuf {
        self.data_dir.join("env")
    }
}

fn read_arch_from_env() -> String {
    let overridden = env::var("GVM_ARCH")
        .ok()
        .or_else(|| {
            if cfg!(windows) {
                env::var("PROCESSOR_ARCHITECTURE").ok()
            } else {
                None
            }
        })
        .filter(|value| !value.trim().is_empty());

    match overridden {
        Some(value) => platform::normalize_arch(&value),
        None => platform::normalize_arch(env::consts::ARCH),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_names() {
        assert_eq!(EnvBackend::from_str("registry"), Some(EnvBackend::Registry));
        assert_eq!(EnvBackend::from_str(" FILE "), Some(EnvBackend::File));
        assert_eq!(EnvBackend::from_str("json"), Some(EnvBackend::File));
        assert_eq!(EnvBackend::from_str("etcd"), None);
    }

    #[test]
    fn env_dir_lives_under_data_dir() {
        let config = GvmConfig {
            data_dir: PathBuf::from("/opt/gvm"),
            download_base_url: DEFAULT_DOWNLOAD_URL.to_string(),
            env_backend: EnvBackend::File,
            arch: "amd64".to_string(),
        };

        assert_eq!(config.env_dir(), PathBuf::from("/opt/gvm/env"));
    }
}
