//! Removal of stale packaging output.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

/// Remove each path in order if present. Returns the paths actually removed.
///
/// Absent paths are skipped and nothing is created. Removal failures are
/// fatal and carry the offending path.
pub fn clean_outputs(targets: &[&Path]) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for target in targets {
        if remove_if_present(target)? {
            removed.push(target.to_path_buf());
        }
    }
    Ok(removed)
}

fn remove_if_present(path: &Path) -> Result<bool> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "nothing to clean");
            return Ok(false);
        }
        Err(err) => return Err(err).with_context(|| format!("stat {}", path.display())),
    };

    if meta.is_dir() {
        fs::remove_dir_all(path).with_context(|| format!("remove {}", path.display()))?;
    } else {
        fs::remove_file(path).with_context(|| format!("remove {}", path.display()))?;
    }
    info!(path = %path.display(), "removed stale output");
    Ok(true)
}
