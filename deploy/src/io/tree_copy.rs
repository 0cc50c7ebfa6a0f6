//! Recursive directory copy.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Copy every file under `src` into `dst`, preserving relative layout.
///
/// `dst` is created if missing. Returns the number of files copied.
/// Symlinks to directories are skipped.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<usize> {
    if !src.is_dir() {
        return Err(anyhow!("missing directory {}", src.display()));
    }
    fs::create_dir_all(dst).with_context(|| format!("create {}", dst.display()))?;

    let mut copied = 0usize;
    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walk {}", src.display()))?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .with_context(|| format!("relativize {}", entry.path().display()))?;
        let target = dst.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).with_context(|| format!("create {}", target.display()))?;
        } else if entry.path().is_file() {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("copy {}", entry.path().display()))?;
            copied += 1;
        } else {
            warn!(path = %entry.path().display(), "skipping non-file entry");
        }
    }

    debug!(src = %src.display(), dst = %dst.display(), copied, "copied tree");
    Ok(copied)
}
