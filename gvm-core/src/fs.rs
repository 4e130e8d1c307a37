use crate::{GvmError, Result};
use std::fs;
use std::path::Path;

const STAGING_DIR: &str = ".gvm-unpack";

pub fn copy_dir(source: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest).map_err(|source_err| GvmError::WriteFile {
        path: dest.to_path_buf(),
        source: source_err,
    })?;

    for entry in fs::read_dir(source).map_err(|source_err| GvmError::ReadFile {
        path: source.to_path_buf(),
        source: source_err,
    })? {
        let entry = entry.map_err(|source_err| GvmError::ReadFile {
            path: source.to_path_buf(),
            source: source_err,
        })?;
        let file_type = entry
            .file_type()
            .map_err(|source_err| GvmError::ReadFile {
                path: entry.path(),
                source: source_err,
            })?;

        let from = entry.path();
        let to = dest.join(entry.file_name());

        if file_type.is_dir() {
            copy_dir(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(|source_err| GvmError::WriteFile {
                path: to,
                source: source_err,
            })?;
        }
    }

    Ok(())
}

/// Renames `from` to `to`, copying when a rename is not possible.
pub fn move_entry(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }

    if from.is_dir() {
        copy_dir(from, to)?;
        remove_dir(from)
    } else {
        fs::copy(from, to).map_err(|source| GvmError::WriteFile {
            path: to.to_path_buf(),
            source,
        })?;
        fs::remove_file(from).map_err(|source| GvmError::WriteFile {
            path: from.to_path_buf(),
            source,
        })
    }
}

pub fn remove_dir(path: &Path) -> Result<()> {
    fs::remove_dir_all(path).map_err(|source| GvmError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Lifts the contents of `target/<nested>` into `target`, then removes the
/// emptied nested directory.
///
/// The nested directory is first renamed to a staging name so a payload entry
/// sharing its name (`go/go`) can be moved up without a collision.
pub fn flatten_nested(target: &Path, nested: &str) -> Result<()> {
    let nested_dir = target.join(nested);
    let staging = target.join(STAGING_DIR);

    move_entry(&nested_dir, &staging)?;

    for entry in fs::read_dir(&staging).map_err(|source| GvmError::ReadFile {
        path: staging.clone(),
        source,
    })? {
        let entry = entry.map_err(|source| GvmError::ReadFile {
            path: staging.clone(),
            source,
        })?;
        move_entry(&entry.path(), &target.join(entry.file_name()))?;
    }

    remove_dir(&staging)
}
