use super::{EnvironmentStore, Scope};
use crate::{GvmError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Contents of one scope file: variable name to value.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct ScopeFile {
    variables: BTreeMap<String, String>,
}

/// Keeps each scope as a flat JSON object in `<dir>/<scope>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn scope_path(&self, scope: Scope) -> PathBuf {
        self.dir.join(format!("{}.json", scope.as_str()))
    }

    fn load(&self, path: &Path) -> Result<ScopeFile> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(ScopeFile::default()),
            Err(source) => {
                return Err(GvmError::ReadFile {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        if data.trim().is_empty() {
            return Ok(ScopeFile::default());
        }

        serde_json::from_str(&data).map_err(|source| GvmError::StoreParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl EnvironmentStore for FileStore {
    fn get(&self, scope: Scope, key: &str) -> Result<Option<String>> {
        let values = self.load(&self.scope_path(scope))?;
        Ok(values.variables.get(key).cloned())
    }

    fn set(&self, scope: Scope, key: &str, value: &str) -> Result<()> {
        let path = self.scope_path(scope);
        let mut values = self.load(&path)?;
        values.variables.insert(key.to_string(), value.to_string());

        let write_error = |reason: String| GvmError::StoreWrite {
            scope,
            key: key.to_string(),
            reason,
        };

        fs::create_dir_all(&self.dir)
            .map_err(|error| write_error(format!("{}: {}", self.dir.display(), error)))?;

        let data = serde_json::to_string_pretty(&values)
            .map_err(|error| write_error(error.to_string()))?;

        fs::write(&path, data).map_err(|error| write_error(format!("{}: {}", path.display(), error)))?;

        tracing::debug!("wrote {} to {}", key, path.display());
        Ok(())
    }
}
