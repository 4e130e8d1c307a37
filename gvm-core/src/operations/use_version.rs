use super::{required, resolve_roots};
use crate::env::EnvironmentStore;
use crate::scanner::{self, Installation};
use crate::switch::{self, SwitchReport};
use crate::{GvmError, Result};

/// Switches to the first installation holding `version`. Nothing is written
/// when no installation matches.
pub fn use_version(
    store: &dyn EnvironmentStore,
    version: Option<&str>,
) -> Result<(Installation, SwitchReport)> {
    let (active, install_root) = resolve_roots(store)?;
    let version = required(version, "A new version")?;

    let scan = scanner::scan(&install_root, Some(&active))?;
    let installation =
        scanner::find_version(scan, version).ok_or_else(|| GvmError::VersionNotFound {
            action: "use",
            version: version.to_string(),
        })?;

    let report = switch::set_active_root(store, &installation.path)?;
    Ok((installation, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{MemoryStore, Scope};
    use crate::switch::{ACTIVE_ROOT_VAR, PATH_SEPARATOR, SEARCH_PATH_VAR, bin_segment};
    use std::fs;
    use std::path::{Path, PathBuf};

    fn install(root: &Path, dir: &str, version: &str) -> PathBuf {
        let path = root.join(dir);
        fs::create_dir_all(path.join("bin")).unwrap();
        fs::write(path.join("VERSION"), version).unwrap();
        path
    }

    #[test]
    fn switches_to_the_matching_directory() {
        let sdk = tempfile::tempdir().unwrap();
        let old = install(sdk.path(), "go1.21.3", "go1.21.3");
        let new = install(sdk.path(), "custom-name", "go1.22.0");
        let store = MemoryStore::new()
            .with(Scope::User, ACTIVE_ROOT_VAR, &old.to_string_lossy())
            .with(Scope::User, SEARCH_PATH_VAR, &bin_segment(&old));

        // custom-name does not look like a Go directory and is not active.
        let error = use_version(&store, Some("1.22.0")).unwrap_err();
        assert!(matches!(error, GvmError::VersionNotFound { .. }));

        fs::rename(&new, sdk.path().join("go1.22.0")).unwrap();
        let new = sdk.path().join("go1.22.0");
        let (installation, report) = use_version(&store, Some("1.22.0")).unwrap();

        assert_eq!(installation.path, new);
        assert_eq!(report.previous, Some(old));
        assert_eq!(
            store.value(Scope::User, SEARCH_PATH_VAR),
            Some(bin_segment(&new))
        );
        assert!(
            !store
                .value(Scope::Machine, SEARCH_PATH_VAR)
                .unwrap()
                .contains(PATH_SEPARATOR)
        );
    }

    #[test]
    fn unknown_version_writes_nothing() {
        let sdk = tempfile::tempdir().unwrap();
        let active = install(sdk.path(), "go1.20.0", "go1.20.0");
        let store = MemoryStore::new().with(Scope::User, ACTIVE_ROOT_VAR, &active.to_string_lossy());

        let error = use_version(&store, Some("1.21.3")).unwrap_err();

        assert!(matches!(error, GvmError::VersionNotFound { .. }));
        assert_eq!(error.exit_code(), 4);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn missing_version_is_an_argument_error() {
        let store = MemoryStore::new().with(Scope::User, ACTIVE_ROOT_VAR, "/sdk/go1.20.0");
        let error = use_version(&store, None).unwrap_err();
        assert!(matches!(error, GvmError::MissingArgument { .. }));
    }
}
