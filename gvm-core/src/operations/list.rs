use super::resolve_roots;
use crate::env::EnvironmentStore;
use crate::scanner::{self, VersionMarker};
use crate::Result;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub version: String,
    pub path: PathBuf,
    pub marker: VersionMarker,
    pub in_use: bool,
}

pub struct Listing {
    pub active: PathBuf,
    pub install_root: PathBuf,
    pub entries: Vec<ListEntry>,
}

/// Every installed version once, in directory order.
pub fn list(store: &dyn EnvironmentStore) -> Result<Listing> {
    let (active, install_root) = resolve_roots(store)?;
    let scan = scanner::scan(&install_root, Some(&active))?;

    let entries = scanner::unique_versions(scan)
        .into_iter()
        .map(|installation| ListEntry {
            version: installation.marker.display(),
            path: installation.path,
            marker: installation.marker,
            in_use: installation.in_use,
        })
        .collect();

    Ok(Listing {
        active,
        install_root,
        entries,
    })
}
