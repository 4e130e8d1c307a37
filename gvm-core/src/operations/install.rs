use super::{required, resolve_roots};
use crate::env::EnvironmentStore;
use crate::fetch::Fetcher;
use crate::{GvmConfig, Platform, Result};
use std::path::PathBuf;

/// Downloads `version` next to the active root. Never switches to it.
pub fn install(
    config: &GvmConfig,
    store: &dyn EnvironmentStore,
    version: Option<&str>,
) -> Result<PathBuf> {
    let (_, install_root) = resolve_roots(store)?;
    let version = required(version, "Version")?;

    let platform = Platform::current(&config.arch);
    tracing::debug!(
        "installing go{} for {} into {}",
        version,
        platform.label(),
        install_root.display()
    );

    let fetcher = Fetcher::new(&config.download_base_url)?;
    fetcher.fetch(version, &platform, &install_root)
}
