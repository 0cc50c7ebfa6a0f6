//! Canonical filesystem locations for a deploy run.

use std::path::{Path, PathBuf};

use super::config::DeployConfig;

/// All paths a deploy run touches, resolved against a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployPaths {
    pub root: PathBuf,
    pub build_dir: PathBuf,
    pub dist_dir: PathBuf,
    /// `<dist_dir>/<app_name>`, populated by the packaging tool.
    pub app_dir: PathBuf,
    pub executable_path: PathBuf,
    pub doc_source: PathBuf,
    pub doc_target: PathBuf,
    /// `<root>/<app_name>_v<version>`.
    pub snapshot_dir: PathBuf,
}

impl DeployPaths {
    pub fn new(root: impl Into<PathBuf>, cfg: &DeployConfig) -> Self {
        let root = root.into();
        let dist_dir = root.join(&cfg.dist_dir);
        let app_dir = dist_dir.join(&cfg.app_name);
        let doc_source = root.join(&cfg.doc_file);
        let doc_name = Path::new(&cfg.doc_file)
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(&cfg.doc_file));
        Self {
            build_dir: root.join(&cfg.build_dir),
            executable_path: app_dir.join(cfg.executable_name()),
            doc_target: app_dir.join(doc_name),
            snapshot_dir: root.join(cfg.snapshot_name()),
            doc_source,
            app_dir,
            dist_dir,
            root,
        }
    }

    /// Render `path` relative to the root for console messages.
    pub fn display_relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_distribution_tree() {
        let paths = DeployPaths::new("/work", &DeployConfig::default());
        assert_eq!(paths.build_dir, PathBuf::from("/work/build"));
        assert_eq!(paths.dist_dir, PathBuf::from("/work/dist"));
        assert_eq!(
            paths.executable_path,
            PathBuf::from("/work/dist/WidgetSidebar/WidgetSidebar.exe")
        );
        assert_eq!(
            paths.doc_target,
            PathBuf::from("/work/dist/WidgetSidebar/README.md")
        );
        assert_eq!(paths.snapshot_dir, PathBuf::from("/work/WidgetSidebar_v1.0.0"));
    }

    #[test]
    fn nested_doc_file_lands_flat_in_app_dir() {
        let cfg = DeployConfig {
            doc_file: "docs/USER_GUIDE.md".to_string(),
            ..DeployConfig::default()
        };
        let paths = DeployPaths::new("/work", &cfg);
        assert_eq!(paths.doc_source, PathBuf::from("/work/docs/USER_GUIDE.md"));
        assert_eq!(
            paths.doc_target,
            PathBuf::from("/work/dist/WidgetSidebar/USER_GUIDE.md")
        );
    }

    #[test]
    fn display_relative_strips_root() {
        let paths = DeployPaths::new("/work", &DeployConfig::default());
        let shown = paths.display_relative(&paths.executable_path);
        assert_eq!(
            Path::new(&shown),
            Path::new("dist/WidgetSidebar/WidgetSidebar.exe")
        );
    }
}
