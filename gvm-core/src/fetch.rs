//! Downloads a Go release archive and unpacks it as `<root>/go<version>`.

use crate::console;
use crate::fs::{flatten_nested, remove_dir};
use crate::platform::{ArchiveKind, Platform};
use crate::scanner::{MARKER_FILE, TOOLCHAIN_PREFIX};
use crate::{GvmError, Result};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tar::Archive;

/// Top-level directory every official archive wraps its payload in.
pub const NESTED_DIR: &str = "go";

pub fn download_url(base_url: &str, version: &str, platform: &Platform) -> String {
    format!(
        "{}{}.{}.{}",
        base_url,
        version,
        platform.label(),
        platform.archive_kind().extension()
    )
}

pub fn install_dir(install_root: &Path, version: &str) -> PathBuf {
    install_root.join(format!("{}{}", TOOLCHAIN_PREFIX, version))
}

pub struct Fetcher {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl Fetcher {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("gvm/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| GvmError::Http {
                url: base_url.to_string(),
                source,
            })?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::blocking::Client, base_url: &str) -> Self {
        Fetcher {
            client,
            base_url: base_url.to_string(),
        }
    }

    /// Installs `version` into `install_root` and returns the new directory.
    ///
    /// Steps run in order and stop at the first failure: download into a
    /// temporary archive inside `install_root`, extract into the target,
    /// flatten the nested `go/` directory, delete the archive. The temporary
    /// archive is removed on every path; a non-success status leaves nothing
    /// behind. A target without a `VERSION` marker is an earlier failed
    /// extraction and is replaced; a failed extraction removes its target.
    pub fn fetch(&self, version: &str, platform: &Platform, install_root: &Path) -> Result<PathBuf> {
        let target = install_dir(install_root, version);
        if target.exists() {
            if target.join(MARKER_FILE).is_file() {
                return Err(GvmError::AlreadyInstalled {
                    version: version.to_string(),
                    path: target,
                });
            }
            tracing::warn!("removing incomplete install at {}", target.display());
            remove_dir(&target)?;
        }

        let kind = platform.archive_kind();
        let url = download_url(&self.base_url, version, platform);
        tracing::debug!("download locator {}", url);

        let mut archive = tempfile::Builder::new()
            .prefix(&format!("{}{}-", TOOLCHAIN_PREFIX, version))
            .suffix(&format!(".{}", kind.extension()))
            .tempfile_in(install_root)
            .map_err(|source| GvmError::WriteFile {
                path: install_root.to_path_buf(),
                source,
            })?;

        console::step(&format!("Downloading Go v{}... Please wait...", version));

        let mut response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| GvmError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GvmError::DownloadStatus {
                url,
                status: status.as_u16(),
            });
        }

        let bytes = response
            .copy_to(archive.as_file_mut())
            .map_err(|source| GvmError::Http {
                url: url.clone(),
                source,
            })?;
        tracing::debug!("downloaded {} bytes to {}", bytes, archive.path().display());

        console::step("Unzipping files...");
        let archive_path = archive.path().to_path_buf();
        archive
            .as_file_mut()
            .seek(SeekFrom::Start(0))
            .map_err(|source| GvmError::ReadFile {
                path: archive_path,
                source,
            })?;
        if let Err(error) = unpack(archive.as_file_mut(), kind, &target) {
            if let Err(cleanup) = remove_dir(&target) {
                tracing::warn!("{}", cleanup);
            }
            return Err(error);
        }

        archive.close().map_err(|source| GvmError::WriteFile {
            path: install_root.to_path_buf(),
            source,
        })?;

        Ok(target)
    }
}

/// Extracts `archive` into `target` and lifts the nested toolchain directory.
pub fn unpack(archive: &mut File, kind: ArchiveKind, target: &Path) -> Result<()> {
    fs::create_dir_all(target).map_err(|source| GvmError::WriteFile {
        path: target.to_path_buf(),
        source,
    })?;

    match kind {
        ArchiveKind::Zip => extract_zip(archive, target)?,
        ArchiveKind::TarGz => extract_tarball(archive, target)?,
    }

    match nested_payload(target)? {
        Some(nested) => {
            tracing::debug!("flattening {}/{}", target.display(), nested);
            flatten_nested(target, &nested)
        }
        None => {
            tracing::warn!("no nested directory in archive for {}", target.display());
            Ok(())
        }
    }
}

/// `go` when present, otherwise the only directory in `target`.
fn nested_payload(target: &Path) -> Result<Option<String>> {
    if target.join(NESTED_DIR).is_dir() {
        return Ok(Some(NESTED_DIR.to_string()));
    }

    let entries: Vec<_> = fs::read_dir(target)
        .map_err(|source| GvmError::ReadFile {
            path: target.to_path_buf(),
            source,
        })?
        .filter_map(|entry| entry.ok())
        .collect();

    match entries.as_slice() {
        [only] if only.path().is_dir() => Ok(Some(only.file_name().to_string_lossy().into_owned())),
        _ => Ok(None),
    }
}

fn extract_zip<R: Read + Seek>(reader: R, destination: &Path) -> Result<()> {
    let extract_error = |reason: String| GvmError::Extract {
        path: destination.to_path_buf(),
        reason,
    };

    let mut archive = zip::ZipArchive::new(reader).map_err(|error| extract_error(error.to_string()))?;

    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|error| extract_error(error.to_string()))?;

        let Some(relative) = file.enclosed_name() else {
            return Err(extract_error(format!(
                "entry {} escapes the install directory",
                file.name()
            )));
        };
        let dest_path = destination.join(relative);

        if file.is_dir() {
            fs::create_dir_all(&dest_path).map_err(|source| GvmError::WriteFile {
                path: dest_path.clone(),
                source,
            })?;
            continue;
        }

        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent).map_err(|source| GvmError::WriteFile {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut dest_file = File::create(&dest_path).map_err(|source| GvmError::WriteFile {
            path: dest_path.clone(),
            source,
        })?;
        io::copy(&mut file, &mut dest_file).map_err(|source| GvmError::WriteFile {
            path: dest_path.clone(),
            source,
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = file.unix_mode() {
                fs::set_permissions(&dest_path, fs::Permissions::from_mode(mode)).map_err(
                    |source| GvmError::WriteFile {
                        path: dest_path.clone(),
                        source,
                    },
                )?;
            }
        }
    }

    Ok(())
}

fn extract_tarball<R: Read>(reader: R, destination: &Path) -> Result<()> {
    let decoder = GzDecoder::new(reader);
    let mut archive = Archive::new(decoder);
    archive.set_preserve_permissions(true);

    archive.unpack(destination).map_err(|error| GvmError::Extract {
        path: destination.to_path_buf(),
        reason: error.to_string(),
    })
}
