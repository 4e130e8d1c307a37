use crate::env::EnvironmentStore;
use crate::switch::{self, SwitchReport};
use crate::{GvmError, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GorootStatus {
    pub active: Option<PathBuf>,
    pub install_root: Option<PathBuf>,
}

pub fn query_goroot(store: &dyn EnvironmentStore) -> Result<GorootStatus> {
    let active = switch::active_root(store)?;
    let install_root = active.as_deref().and_then(switch::install_root);
    Ok(GorootStatus {
        active,
        install_root,
    })
}

/// Points the active root at `path`, made absolute first.
pub fn set_goroot(store: &dyn EnvironmentStore, path: &Path) -> Result<SwitchReport> {
    let root = std::path::absolute(path).map_err(|source| GvmError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    switch::set_active_root(store, &root)
}
