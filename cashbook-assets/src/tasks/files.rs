//! Filesystem helpers shared by the tasks.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use cashbook_types::BuildError;
use tokio::fs;

/// Every file under `root`, sorted. A missing root yields no files.
pub async fn walk(root: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => continue,
            Err(e) => return Err(BuildError::io(&dir, &e)),
        };
        while let Some(entry) = entries.next_entry().await.map_err(|e| BuildError::io(&dir, &e))? {
            let path = entry.path();
            let kind = entry.file_type().await.map_err(|e| BuildError::io(&path, &e))?;
            if kind.is_dir() {
                pending.push(path);
            } else if kind.is_file() {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Removes `dir` and everything in it. Already missing is fine.
pub async fn clean_dir(dir: &Path) -> Result<(), BuildError> {
    match fs::remove_dir_all(dir).await {
        Ok(()) => {
            tracing::debug!("Removed {}", dir.display());
            Ok(())
        },
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(BuildError::io(dir, &e)),
    }
}

/// Copies `src` to `dest` unless `dest` is at least as new.
/// Returns whether a copy was made.
pub async fn copy_if_newer(src: &Path, dest: &Path) -> Result<bool, BuildError> {
    let src_modified =
        fs::metadata(src).await.and_then(|m| m.modified()).map_err(|e| BuildError::io(src, &e))?;
    if let Ok(dest_modified) = fs::metadata(dest).await.and_then(|m| m.modified()) {
        if dest_modified >= src_modified {
            return Ok(false);
        }
    }
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).await.map_err(|e| BuildError::io(parent, &e))?;
    }
    fs::copy(src, dest).await.map_err(|e| BuildError::io(dest, &e))?;
    Ok(true)
}

/// Mirrors the tree under `src` into `dest`. Returns the number of files copied.
pub async fn mirror(src: &Path, dest: &Path) -> Result<usize, BuildError> {
    let mut copied = 0;
    for file in walk(src).await? {
        let Ok(relative) = file.strip_prefix(src) else {
            continue;
        };
        if copy_if_newer(&file, &dest.join(relative)).await? {
            copied += 1;
        }
    }
    Ok(copied)
}
