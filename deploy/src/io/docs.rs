//! Optional documentation copy into the distribution directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Copy `source` to `target` if `source` exists. Returns whether a copy happened.
///
/// A missing source is not an error. The target's parent directory is created
/// if the packaging tool did not produce it.
pub fn copy_documentation(source: &Path, target: &Path) -> Result<bool> {
    if !source.is_file() {
        debug!(source = %source.display(), "no documentation file, skipping copy");
        return Ok(false);
    }
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::copy(source, target)
        .with_context(|| format!("copy {} to {}", source.display(), target.display()))?;
    debug!(target = %target.display(), "copied documentation");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_when_present() {
        let temp = tempfile::tempdir().expect("tempdir");
        let source = temp.path().join("README.md");
        let target = temp.path().join("dist/WidgetSidebar/README.md");
        fs::write(&source, "# Widget Sidebar\n").expect("write readme");
        fs::create_dir_all(target.parent().expect("parent")).expect("app dir");

        assert!(copy_documentation(&source, &target).expect("copy"));
        let copied = fs::read_to_string(&target).expect("read copy");
        assert_eq!(copied, "# Widget Sidebar\n");
        assert!(source.exists(), "source must be left in place");
    }

    #[test]
    fn skips_when_absent_without_creating_anything() {
        let temp = tempfile::tempdir().expect("tempdir");
        let source = temp.path().join("README.md");
        let target = temp.path().join("dist/WidgetSidebar/README.md");

        assert!(!copy_documentation(&source, &target).expect("skip"));
        assert!(!temp.path().join("dist").exists());
    }

    #[test]
    fn creates_missing_app_dir() {
        let temp = tempfile::tempdir().expect("tempdir");
        let source = temp.path().join("README.md");
        let target = temp.path().join("dist/WidgetSidebar/README.md");
        fs::write(&source, "docs").expect("write readme");

        assert!(copy_documentation(&source, &target).expect("copy"));
        assert!(target.exists());
    }

    #[test]
    fn directory_named_like_doc_is_skipped() {
        let temp = tempfile::tempdir().expect("tempdir");
        let source = temp.path().join("README.md");
        fs::create_dir_all(&source).expect("dir");
        let target = temp.path().join("dist/WidgetSidebar/README.md");

        assert!(!copy_documentation(&source, &target).expect("skip"));
    }
}
