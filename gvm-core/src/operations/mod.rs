pub mod goroot;
pub mod install;
pub mod list;
pub mod uninstall;
pub mod use_version;

pub use goroot::{GorootStatus, query_goroot, set_goroot};
pub use install::install;
pub use list::{ListEntry, Listing, list};
pub use uninstall::{Uninstalled, uninstall};
pub use use_version::use_version;

use crate::env::EnvironmentStore;
use crate::{GvmError, Result, switch};
use std::path::PathBuf;

/// Configured root and the directory holding it and its siblings.
pub(crate) fn resolve_roots(store: &dyn EnvironmentStore) -> Result<(PathBuf, PathBuf)> {
    let active = switch::active_root(store)?.ok_or(GvmError::NoActiveRoot)?;
    let install_root = switch::install_root(&active).ok_or(GvmError::NoActiveRoot)?;
    Ok((active, install_root))
}

pub(crate) fn required<'a>(value: Option<&'a str>, what: &'static str) -> Result<&'a str> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(GvmError::MissingArgument { what })
}
