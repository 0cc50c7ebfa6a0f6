//! Orchestration for `deploy snapshot`: a versioned copy of the distribution.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use tracing::info;

use crate::io::tree_copy::copy_tree;
use crate::pipeline::RunContext;

/// Outcome of `deploy snapshot`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotOutcome {
    pub target: PathBuf,
    pub files_copied: usize,
}

/// Copy `dist/<app>` to `<app>_v<version>` under the project root.
///
/// Refuses to overwrite an existing snapshot unless `force` is set, in which
/// case the old snapshot is removed first.
pub fn create_snapshot(ctx: &RunContext, force: bool) -> Result<SnapshotOutcome> {
    let paths = &ctx.paths;
    if !paths.app_dir.is_dir() {
        return Err(anyhow!(
            "missing {} (run `deploy` first)",
            paths.app_dir.display()
        ));
    }

    let target = paths.snapshot_dir.clone();
    if target.exists() {
        if !force {
            return Err(anyhow!(
                "{} already exists (use --force to replace it)",
                target.display()
            ));
        }
        fs::remove_dir_all(&target).with_context(|| format!("remove {}", target.display()))?;
    }

    let files_copied = copy_tree(&paths.app_dir, &target)?;
    info!(target = %target.display(), files_copied, "snapshot created");
    Ok(SnapshotOutcome {
        target,
        files_copied,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestProject;

    #[test]
    fn copies_distribution_to_versioned_dir() {
        let project = TestProject::new().expect("project");
        project
            .write("dist/WidgetSidebar/WidgetSidebar.exe", "exe")
            .expect("exe");
        project
            .write("dist/WidgetSidebar/README.md", "docs")
            .expect("readme");

        let outcome = create_snapshot(&project.context(), false).expect("snapshot");
        assert_eq!(outcome.target, project.root().join("WidgetSidebar_v1.0.0"));
        assert_eq!(outcome.files_copied, 2);
        assert!(outcome.target.join("WidgetSidebar.exe").exists());
    }

    #[test]
    fn missing_distribution_is_an_error() {
        let project = TestProject::new().expect("project");
        let err = create_snapshot(&project.context(), false).expect_err("no dist");
        assert!(err.to_string().contains("run `deploy` first"));
    }

    #[test]
    fn existing_snapshot_requires_force() {
        let project = TestProject::new().expect("project");
        project
            .write("dist/WidgetSidebar/WidgetSidebar.exe", "new")
            .expect("exe");
        project
            .write("WidgetSidebar_v1.0.0/stale.txt", "old")
            .expect("old snapshot");

        let err = create_snapshot(&project.context(), false).expect_err("exists");
        assert!(err.to_string().contains("--force"));

        let outcome = create_snapshot(&project.context(), true).expect("forced");
        assert_eq!(outcome.files_copied, 1);
        assert!(!outcome.target.join("stale.txt").exists());
        assert_eq!(
            fs::read_to_string(outcome.target.join("WidgetSidebar.exe")).expect("exe"),
            "new"
        );
    }
}
