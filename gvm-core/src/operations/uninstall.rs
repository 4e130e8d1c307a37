use super::{required, resolve_roots};
use crate::env::EnvironmentStore;
use crate::scanner::{self, Installation};
use crate::{GvmError, Result, fs};

#[derive(Debug, Clone)]
pub struct Uninstalled {
    pub installation: Installation,
    /// The removed directory was the active root; the pointer is left as is.
    pub was_active: bool,
}

/// Removes the first directory holding `version`.
pub fn uninstall(store: &dyn EnvironmentStore, version: Option<&str>) -> Result<Uninstalled> {
    let version = required(version, "A version to uninstall")?;
    let (active, install_root) = resolve_roots(store)?;

    let scan = scanner::scan(&install_root, Some(&active))?;
    let installation =
        scanner::find_version(scan, version).ok_or_else(|| GvmError::VersionNotFound {
            action: "uninstall",
            version: version.to_string(),
        })?;

    tracing::debug!("removing {}", installation.path.display());
    fs::remove_dir(&installation.path)?;

    Ok(Uninstalled {
        was_active: installation.in_use,
        installation,
    })
}
