//! Test-only fakes and fixtures for driving the deploy pipeline.

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::core::types::PackageStatus;
use crate::io::acknowledge::Acknowledger;
use crate::io::config::DeployConfig;
use crate::io::packager::{PackageRequest, Packager};
use crate::pipeline::RunContext;

/// Executable the default config expects, relative to the project root.
pub const DEFAULT_EXECUTABLE: &str = "dist/WidgetSidebar/WidgetSidebar.exe";

/// Packager that returns a fixed status and records every request.
///
/// On success it writes each configured output file under the request's
/// workdir, standing in for what a real packaging tool would produce.
pub struct ScriptedPackager {
    status: PackageStatus,
    outputs: Vec<PathBuf>,
    calls: RefCell<Vec<PackageRequest>>,
}

impl ScriptedPackager {
    pub fn new(status: PackageStatus) -> Self {
        Self {
            status,
            outputs: Vec::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Succeeds and produces the default executable.
    pub fn succeeding() -> Self {
        Self::new(PackageStatus::Success).with_output(DEFAULT_EXECUTABLE)
    }

    pub fn failing(code: i32) -> Self {
        Self::new(PackageStatus::Failed { code: Some(code) })
    }

    pub fn with_output(mut self, relative: impl Into<PathBuf>) -> Self {
        self.outputs.push(relative.into());
        self
    }

    pub fn without_executable(mut self) -> Self {
        self.outputs.clear();
        self
    }

    pub fn calls(&self) -> Vec<PackageRequest> {
        self.calls.borrow().clone()
    }
}

impl Packager for ScriptedPackager {
    fn package(&self, request: &PackageRequest) -> Result<PackageStatus> {
        self.calls.borrow_mut().push(request.clone());
        if self.status.is_success() {
            for rel in &self.outputs {
                let path = request.workdir.join(rel);
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)
                        .with_context(|| format!("create {}", parent.display()))?;
                }
                fs::write(&path, b"packaged").with_context(|| format!("write {}", path.display()))?;
            }
        }
        Ok(self.status)
    }
}

/// Acknowledger that counts how often it was asked.
#[derive(Default)]
pub struct CountingAcknowledger {
    count: Cell<usize>,
}

impl CountingAcknowledger {
    pub fn count(&self) -> usize {
        self.count.get()
    }
}

impl Acknowledger for CountingAcknowledger {
    fn acknowledge(&self, _prompt: &str) -> Result<()> {
        self.count.set(self.count.get() + 1);
        Ok(())
    }
}

/// Temporary project root with helpers for seeding files.
pub struct TestProject {
    temp: TempDir,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        Ok(Self { temp })
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Context with default layout and pausing disabled.
    pub fn context(&self) -> RunContext {
        RunContext::new(
            self.root(),
            DeployConfig {
                pause: false,
                ..DeployConfig::default()
            },
        )
    }

    pub fn write_readme(&self, contents: &str) -> Result<()> {
        self.write("README.md", contents)
    }

    /// Seed `build/` and `dist/` with leftovers from a previous run.
    pub fn seed_stale_outputs(&self) -> Result<()> {
        self.write("build/widget_sidebar/warn-widget_sidebar.txt", "stale")?;
        self.write("dist/WidgetSidebar/old_file.txt", "stale")
    }

    pub fn write(&self, relative: &str, contents: &str) -> Result<()> {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))
    }
}
