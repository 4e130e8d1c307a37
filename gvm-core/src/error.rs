use crate::env::Scope;
use std::path::PathBuf;
use thiserror::Error;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_MISSING_ARGUMENT: u8 = 2;
pub const EXIT_UNCONFIGURED: u8 = 3;
pub const EXIT_NOT_FOUND: u8 = 4;

#[derive(Error, Debug)]
pub enum GvmError {
    #[error("No GOROOT set. Set a GOROOT for Go installations with gvm goroot <path>.")]
    NoActiveRoot,

    #[error("No Go installations to scan: cannot read {path:?}: {source}")]
    InstallRootUnreadable { path: PathBuf, source: std::io::Error },

    #[error("{what} must be specified.")]
    MissingArgument { what: &'static str },

    #[error("Couldn't {action} Go version {version}. Check Go versions with gvm list.")]
    VersionNotFound {
        action: &'static str,
        version: String,
    },

    #[error("Go version {version} is already installed at {path:?}")]
    AlreadyInstalled { version: String, path: PathBuf },

    #[error("Failed to read {path:?}: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },

    #[error("Failed to write {path:?}: {source}")]
    WriteFile { path: PathBuf, source: std::io::Error },

    #[error("Error while downloading {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Download failed for url {url}: HTTP {status}. You can check the url manually.")]
    DownloadStatus { url: String, status: u16 },

    #[error("Error while unpacking {path:?}: {reason}")]
    Extract { path: PathBuf, reason: String },

    #[error("Failed to read {key} from the {scope} environment: {reason}")]
    StoreRead {
        scope: Scope,
        key: String,
        reason: String,
    },

    #[error("Failed to write {key} to the {scope} environment: {reason}")]
    StoreWrite {
        scope: Scope,
        key: String,
        reason: String,
    },

    #[error("Failed to parse environment file {path:?}: {source}")]
    StoreParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl GvmError {
    pub fn exit_code(&self) -> u8 {
        match self {
            GvmError::NoActiveRoot | GvmError::InstallRootUnreadable { .. } => EXIT_UNCONFIGURED,
            GvmError::MissingArgument { .. } => EXIT_MISSING_ARGUMENT,
            GvmError::VersionNotFound { .. } => EXIT_NOT_FOUND,
            _ => EXIT_FAILURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_category() {
        assert_eq!(GvmError::NoActiveRoot.exit_code(), 3);
        assert_eq!(
            GvmError::MissingArgument { what: "Version" }.exit_code(),
            2
        );
        assert_eq!(
            GvmError::VersionNotFound {
                action: "use",
                version: "1.21.3".to_string()
            }
            .exit_code(),
            4
        );
        assert_eq!(
            GvmError::StoreWrite {
                scope: Scope::Machine,
                key: "GOROOT".to_string(),
                reason: "access denied".to_string()
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn store_write_names_the_failing_scope() {
        let error = GvmError::StoreWrite {
            scope: Scope::User,
            key: "PATH".to_string(),
            reason: "access denied".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Failed to write PATH to the user environment: access denied"
        );
    }
}
