//! Points `GOROOT` at an installation and keeps `PATH` in step with it.
//!
//! Both the machine and the user scope receive the same values, since a new
//! prompt may resolve either. `PATH` never accumulates toolchain entries: the
//! previous root's `bin` directory is dropped before the new one is added.

use crate::env::{EnvironmentStore, Scope};
use crate::Result;
use std::path::{Path, PathBuf};

pub const ACTIVE_ROOT_VAR: &str = "GOROOT";
pub const SEARCH_PATH_VAR: &str = "PATH";
pub const BIN_DIR: &str = "bin";

#[cfg(windows)]
pub const PATH_SEPARATOR: char = ';';
#[cfg(not(windows))]
pub const PATH_SEPARATOR: char = ':';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchReport {
    pub previous: Option<PathBuf>,
    pub active: PathBuf,
    /// Scopes whose `PATH` was rewritten; the rest already held the entry.
    pub path_updated: Vec<Scope>,
}

/// Currently configured root, user scope first. Empty values are unset.
pub fn active_root(store: &dyn EnvironmentStore) -> Result<Option<PathBuf>> {
    for scope in [Scope::User, Scope::Machine] {
        if let Some(value) = non_empty(store.get(scope, ACTIVE_ROOT_VAR)?) {
            return Ok(Some(PathBuf::from(value)));
        }
    }

    Ok(None)
}

/// Directory holding every installation: the parent of the active root.
pub fn install_root(active_root: &Path) -> Option<PathBuf> {
    active_root
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

pub fn bin_segment(root: &Path) -> String {
    root.join(BIN_DIR).to_string_lossy().into_owned()
}

pub fn set_active_root(store: &dyn EnvironmentStore, new_root: &Path) -> Result<SwitchReport> {
    // Every previous value is captured before the first write so the stale
    // PATH entries are derived from the old roots, not the one being set.
    let previous = active_root(store)?;
    let mut previous_by_scope = Vec::with_capacity(Scope::ALL.len());
    for scope in Scope::ALL {
        let value = non_empty(store.get(scope, ACTIVE_ROOT_VAR)?);
        previous_by_scope.push((scope, value));
    }

    let root_value = new_root.to_string_lossy();
    for scope in Scope::ALL {
        store.set(scope, ACTIVE_ROOT_VAR, &root_value)?;
        tracing::debug!("{} {} = {}", scope, ACTIVE_ROOT_VAR, root_value);
    }

    let new_segment = bin_segment(new_root);
    let mut path_updated = Vec::new();

    for (scope, scope_previous) in previous_by_scope {
        let mut stale = Vec::new();
        if let Some(root) = scope_previous {
            stale.push(bin_segment(Path::new(&root)));
        }
        if let Some(root) = previous.as_deref() {
            stale.push(bin_segment(root));
        }

        let current = store.get(scope, SEARCH_PATH_VAR)?.unwrap_or_default();
        let stale: Vec<&str> = stale.iter().map(String::as_str).collect();

        match rewrite_search_path(&current, &stale, &new_segment, PATH_SEPARATOR) {
            Some(updated) => {
                store.set(scope, SEARCH_PATH_VAR, &updated)?;
                tracing::debug!("{} {} now ends with {}", scope, SEARCH_PATH_VAR, new_segment);
                path_updated.push(scope);
            }
            None => {
                tracing::debug!("{} {} already contains {}", scope, SEARCH_PATH_VAR, new_segment);
            }
        }
    }

    Ok(SwitchReport {
        previous,
        active: new_root.to_path_buf(),
        path_updated,
    })
}

/// Drops every `stale` segment and appends `new_segment` unless present.
/// Returns `None` when the value would not change.
pub fn rewrite_search_path(
    current: &str,
    stale: &[&str],
    new_segment: &str,
    separator: char,
) -> Option<String> {
    let segments: Vec<&str> = if current.is_empty() {
        Vec::new()
    } else {
        current.split(separator).collect()
    };

    let mut kept: Vec<&str> = segments
        .iter()
        .copied()
        .filter(|segment| *segment == new_segment || !stale.contains(segment))
        .collect();

    if !kept.contains(&new_segment) {
        kept.push(new_segment);
    }

    if kept == segments {
        return None;
    }

    let separator = separator.to_string();
    Some(kept.join(separator.as_str()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GvmError;
    use crate::env::MemoryStore;

    fn toolchain_segments(store: &MemoryStore, scope: Scope, roots: &[&Path]) -> Vec<String> {
        let path = store.value(scope, SEARCH_PATH_VAR).unwrap_or_default();
        let known: Vec<String> = roots.iter().map(|root| bin_segment(root)).collect();
        path.split(PATH_SEPARATOR)
            .filter(|segment| known.iter().any(|known| known == segment))
            .map(str::to_string)
            .collect()
    }

    fn joined(parts: &[String]) -> String {
        parts.join(PATH_SEPARATOR.to_string().as_str())
    }

    fn system_path() -> String {
        joined(&["/usr/local/bin".to_string(), "/usr/bin".to_string()])
    }

    #[test]
    fn rewrite_replaces_previous_segment() {
        let updated = rewrite_search_path(
            r"C:\Windows;C:\sdk\go1.21.3\bin;C:\tools",
            &[r"C:\sdk\go1.21.3\bin"],
            r"C:\sdk\go1.22.0\bin",
            ';',
        );

        assert_eq!(
            updated.as_deref(),
            Some(r"C:\Windows;C:\tools;C:\sdk\go1.22.0\bin")
        );
    }

    #[test]
    fn rewrite_is_noop_when_segment_present() {
        assert_eq!(
            rewrite_search_path(r"C:\Windows;C:\sdk\go\bin", &[], r"C:\sdk\go\bin", ';'),
            None
        );
        assert_eq!(
            rewrite_search_path(
                r"C:\Windows;C:\sdk\go\bin",
                &[r"C:\sdk\go\bin"],
                r"C:\sdk\go\bin",
                ';'
            ),
            None
        );
    }

    #[test]
    fn rewrite_of_empty_path_has_no_leading_separator() {
        assert_eq!(
            rewrite_search_path("", &[], "/sdk/go/bin", ':').as_deref(),
            Some("/sdk/go/bin")
        );
    }

    #[test]
    fn rewrite_removes_every_stale_copy() {
        assert_eq!(
            rewrite_search_path("/a/bin:/usr/bin:/a/bin", &["/a/bin"], "/b/bin", ':').as_deref(),
            Some("/usr/bin:/b/bin")
        );
    }

    #[test]
    fn switch_writes_both_scopes() {
        let store = MemoryStore::new()
            .with(Scope::Machine, SEARCH_PATH_VAR, &system_path())
            .with(Scope::User, SEARCH_PATH_VAR, "");
        let root = Path::new("/sdk/go1.21.3");

        let report = set_active_root(&store, root).unwrap();

        assert_eq!(report.previous, None);
        assert_eq!(report.path_updated, vec![Scope::Machine, Scope::User]);
        assert_eq!(active_root(&store).unwrap().as_deref(), Some(root));
        for scope in Scope::ALL {
            assert_eq!(
                store.value(scope, ACTIVE_ROOT_VAR).as_deref(),
                Some("/sdk/go1.21.3")
            );
            assert_eq!(toolchain_segments(&store, scope, &[root]), vec![bin_segment(root)]);
        }
        assert!(
            store
                .value(Scope::Machine, SEARCH_PATH_VAR)
                .unwrap()
                .starts_with(&system_path())
        );
    }

    #[test]
    fn switching_twice_to_the_same_root_is_idempotent() {
        let store = MemoryStore::new().with(Scope::User, SEARCH_PATH_VAR, &system_path());
        let root = Path::new("/sdk/go1.21.3");

        set_active_root(&store, root).unwrap();
        let after_first = store.value(Scope::User, SEARCH_PATH_VAR);
        let report = set_active_root(&store, root).unwrap();

        assert!(report.path_updated.is_empty());
        assert_eq!(store.value(Scope::User, SEARCH_PATH_VAR), after_first);
        assert_eq!(
            toolchain_segments(&store, Scope::User, &[root]),
            vec![bin_segment(root)]
        );
    }

    #[test]
    fn switching_back_and_forth_leaves_one_segment() {
        let store = MemoryStore::new()
            .with(Scope::Machine, SEARCH_PATH_VAR, &system_path())
            .with(Scope::User, SEARCH_PATH_VAR, &system_path());
        let a = Path::new("/sdk/go1.21.3");
        let b = Path::new("/sdk/go1.22.0");

        set_active_root(&store, a).unwrap();
        let report = set_active_root(&store, b).unwrap();
        assert_eq!(report.previous.as_deref(), Some(a));
        set_active_root(&store, a).unwrap();

        for scope in Scope::ALL {
            assert_eq!(toolchain_segments(&store, scope, &[a, b]), vec![bin_segment(a)]);
        }
        assert_eq!(active_root(&store).unwrap().as_deref(), Some(a));
    }

    #[test]
    fn stale_segments_come_from_the_value_before_the_call() {
        let old = Path::new("/sdk/go1.20.0");
        let new = Path::new("/sdk/go1.22.0");
        let path = joined(&[system_path(), bin_segment(old)]);
        let store = MemoryStore::new()
            .with(Scope::User, ACTIVE_ROOT_VAR, "/sdk/go1.20.0")
            .with(Scope::User, SEARCH_PATH_VAR, &path);

        set_active_root(&store, new).unwrap();

        let expected = joined(&[system_path(), bin_segment(new)]);
        assert_eq!(store.value(Scope::User, SEARCH_PATH_VAR), Some(expected));
    }

    #[test]
    fn machine_scope_failure_is_reported_and_stops() {
        let store = MemoryStore::new()
            .read_only(Scope::Machine)
            .with(Scope::User, ACTIVE_ROOT_VAR, "/sdk/go1.20.0");

        let error = set_active_root(&store, Path::new("/sdk/go1.22.0")).unwrap_err();

        match error {
            GvmError::StoreWrite { scope, key, .. } => {
                assert_eq!(scope, Scope::Machine);
                assert_eq!(key, ACTIVE_ROOT_VAR);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.write_count(), 0);
        assert_eq!(
            store.value(Scope::User, ACTIVE_ROOT_VAR).as_deref(),
            Some("/sdk/go1.20.0")
        );
    }

    #[test]
    fn unset_and_empty_roots_are_unconfigured() {
        let store = MemoryStore::new();
        assert_eq!(active_root(&store).unwrap(), None);

        let store = MemoryStore::new()
            .with(Scope::User, ACTIVE_ROOT_VAR, "")
            .with(Scope::Machine, ACTIVE_ROOT_VAR, "/sdk/go1.21.3");
        assert_eq!(
            active_root(&store).unwrap(),
            Some(PathBuf::from("/sdk/go1.21.3"))
        );
    }

    #[test]
    fn install_root_is_parent_of_active_root() {
        assert_eq!(
            install_root(Path::new("/sdk/go1.21.3")),
            Some(PathBuf::from("/sdk"))
        );
        assert_eq!(install_root(Path::new("go1.21.3")), None);
    }
}
