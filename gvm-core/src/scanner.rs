//! Enumerates the Go installations living next to each other in an install
//! root and resolves each one to the version recorded in its `VERSION` file.
//!
//! Directory names are not trusted: `go1.21.3/` and `go-old/` may hold the
//! same release. Consumers deduplicate on the canonical version with
//! [`unique_versions`] and keep the first directory in enumeration order.

use crate::{GvmError, Result};
use regex::Regex;
use std::collections::HashSet;
use std::fs::{self, ReadDir};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

pub const TOOLCHAIN_PREFIX: &str = "go";
pub const MARKER_FILE: &str = "VERSION";

static CANDIDATE_DIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^go(\d+\.\d+\.\d+)?").expect("static pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionMarker {
    Present(String),
    Absent,
    Unreadable,
}

impl VersionMarker {
    pub fn read(dir: &Path) -> Self {
        let path = dir.join(MARKER_FILE);
        match fs::read_to_string(&path) {
            Ok(contents) => VersionMarker::Present(contents),
            Err(error) if error.kind() == ErrorKind::NotFound => VersionMarker::Absent,
            Err(error) => {
                tracing::warn!("cannot read {}: {}", path.display(), error);
                VersionMarker::Unreadable
            }
        }
    }

    /// First line of the marker, e.g. `go1.21.3`. Releases since 1.21 append a
    /// `time ...` line after the version.
    pub fn canonical(&self) -> Option<&str> {
        match self {
            // Not the whole file: the trailing `time` line would make every
            // release unique. The raw contents stay in `Present`.
            VersionMarker::Present(contents) => Some(contents.lines().next().unwrap_or_default()),
            VersionMarker::Absent | VersionMarker::Unreadable => None,
        }
    }

    /// Key used for deduplication; absent and unreadable markers each form
    /// their own group.
    fn dedup_key(&self) -> VersionMarker {
        match self.canonical() {
            Some(version) => VersionMarker::Present(version.to_string()),
            None => self.clone(),
        }
    }

    pub fn matches(&self, requested: &str) -> bool {
        let wanted = requested.strip_prefix(TOOLCHAIN_PREFIX).unwrap_or(requested);
        self.canonical()
            .and_then(|version| version.strip_prefix(TOOLCHAIN_PREFIX))
            .is_some_and(|version| !wanted.is_empty() && version == wanted)
    }

    /// Version as shown to the user, without the `go` prefix.
    pub fn display(&self) -> String {
        match self {
            VersionMarker::Present(_) => {
                let version = self.canonical().unwrap_or_default();
                version
                    .strip_prefix(TOOLCHAIN_PREFIX)
                    .unwrap_or(version)
                    .to_string()
            }
            VersionMarker::Absent => "(unknown version)".to_string(),
            VersionMarker::Unreadable => "(error reading VERSION)".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Installation {
    pub dir_name: String,
    pub path: PathBuf,
    pub marker: VersionMarker,
    pub in_use: bool,
}

/// Lazy walk over the immediate subdirectories of an install root.
pub struct Scan {
    root: PathBuf,
    entries: ReadDir,
    active_root: Option<PathBuf>,
}

/// Starts scanning `root`. `active_root` marks the directory currently in
/// use; it is yielded even when its name does not look like a Go directory.
pub fn scan(root: &Path, active_root: Option<&Path>) -> Result<Scan> {
    let entries = fs::read_dir(root).map_err(|source| GvmError::InstallRootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;

    tracing::debug!("scanning {}", root.display());

    Ok(Scan {
        root: root.to_path_buf(),
        entries,
        active_root: active_root.map(Path::to_path_buf),
    })
}

impl Iterator for Scan {
    type Item = Installation;

    fn next(&mut self) -> Option<Installation> {
        for entry in self.entries.by_ref() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    tracing::warn!("skipping entry in {}: {}", self.root.display(), error);
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_dir() {
                continue;
            }

            let dir_name = entry.file_name().to_string_lossy().into_owned();
            let in_use = self.active_root.as_deref() == Some(path.as_path());

            if !in_use && !CANDIDATE_DIR.is_match(&dir_name) {
                continue;
            }

            let marker = VersionMarker::read(&path);
            tracing::debug!("found {} ({:?})", path.display(), marker.canonical());

            return Some(Installation {
                dir_name,
                path,
                marker,
                in_use,
            });
        }

        None
    }
}

/// Keeps the first installation of every canonical version. An in-use
/// duplicate that comes later still flags the kept entry as in use.
pub fn unique_versions(installations: impl IntoIterator<Item = Installation>) -> Vec<Installation> {
    let mut unique: Vec<Installation> = Vec::new();
    let mut seen = HashSet::new();

    for installation in installations {
        let key = installation.marker.dedup_key();
        if seen.insert(key.clone()) {
            unique.push(installation);
            continue;
        }

        if installation.in_use
            && let Some(kept) = unique
                .iter_mut()
                .find(|kept| kept.marker.dedup_key() == key)
        {
            kept.in_use = true;
        }
    }

    unique
}

/// First installation, in enumeration order, holding `version`.
pub fn find_version(
    installations: impl IntoIterator<Item = Installation>,
    version: &str,
) -> Option<Installation> {
    installations
        .into_iter()
        .find(|installation| installation.marker.matches(version))
}
