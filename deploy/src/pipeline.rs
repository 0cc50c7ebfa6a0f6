//! Orchestration for a full `deploy` run.
//!
//! The run is a fixed sequence: clean, pre-build hook, package, report,
//! copy documentation, final instructions. Only the packaging step can end the
//! run early; every other failure surfaces as an `Err`.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, error, info, warn};

use crate::core::stage::advance;
use crate::core::types::{RunOutcome, Stage};
use crate::io::acknowledge::{Acknowledger, DEFAULT_PROMPT};
use crate::io::clean::clean_outputs;
use crate::io::config::{DEFAULT_CONFIG_FILE, DeployConfig, load_config};
use crate::io::docs::copy_documentation;
use crate::io::packager::{PackageRequest, Packager};
use crate::io::paths::DeployPaths;

const RULE: &str = "============================================================";

/// Everything a run needs, resolved up front so no step reads ambient state.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub config: DeployConfig,
    pub paths: DeployPaths,
}

impl RunContext {
    pub fn new(root: impl Into<PathBuf>, config: DeployConfig) -> Self {
        let paths = DeployPaths::new(root, &config);
        Self { config, paths }
    }

    /// Load `config_path` (default `<root>/deploy.toml`) and resolve paths.
    pub fn load(root: &Path, config_path: Option<&Path>) -> Result<Self> {
        let config_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.join(DEFAULT_CONFIG_FILE));
        let config = load_config(&config_path)?;
        Ok(Self::new(root, config))
    }

    fn rel(&self, path: &Path) -> String {
        self.paths.display_relative(path)
    }
}

/// Run the packaging pipeline to a terminal stage.
///
/// Console text goes to `out`. A failed packaging step is reported through the
/// returned [`RunOutcome`] (exit code 1), not as an `Err`.
pub fn run_pipeline<P: Packager, A: Acknowledger, W: Write>(
    ctx: &RunContext,
    packager: &P,
    acknowledger: &A,
    out: &mut W,
) -> Result<RunOutcome> {
    let paths = &ctx.paths;
    let cfg = &ctx.config;
    let mut stages = vec![Stage::Start];
    info!(root = %paths.root.display(), app = %cfg.app_name, "deploy run started");

    // 1. Clean
    say(out, "Cleaning previous build output...")?;
    let removed = clean_outputs(&[&paths.build_dir, &paths.dist_dir])?;
    for path in &removed {
        say(out, &format!("  removed {}", ctx.rel(path)))?;
    }
    enter(&mut stages, Stage::Cleaned)?;

    // 2. Pre-build hook
    say(out, "Pre-build: no data migrations to run.")?;

    // 3. Package
    let request = PackageRequest {
        workdir: paths.root.clone(),
        argv: cfg.packager.argv(),
    };
    say(
        out,
        &format!("Packaging {}: {}", cfg.app_name, request.argv.join(" ")),
    )?;
    let status = packager.package(&request)?;
    debug!(%status, "packaging finished");

    if !status.is_success() {
        error!(%status, "packaging failed, aborting run");
        say(out, "")?;
        say(out, &format!("ERROR: build failed, packaging tool {status}."))?;
        say(out, "Check the packaging tool output above for details.")?;
        enter(&mut stages, Stage::PackagingFailed)?;
        acknowledger.acknowledge(DEFAULT_PROMPT)?;
        return Ok(RunOutcome { stages, package: status });
    }
    enter(&mut stages, Stage::Packaged)?;

    // 4. Report success
    let exe = ctx.rel(&paths.executable_path);
    say(out, "")?;
    say(out, RULE)?;
    say(out, " Build complete!")?;
    say(out, &format!(" Executable: {exe}"))?;
    say(out, RULE)?;
    if !paths.executable_path.exists() {
        warn!(path = %paths.executable_path.display(), "packaging succeeded but executable is missing");
    }
    enter(&mut stages, Stage::Reported)?;

    // 5. Copy documentation
    if copy_documentation(&paths.doc_source, &paths.doc_target)? {
        say(
            out,
            &format!(
                "Copied {} to {}",
                ctx.rel(&paths.doc_source),
                ctx.rel(&paths.app_dir)
            ),
        )?;
        enter(&mut stages, Stage::DocCopied)?;
    } else {
        enter(&mut stages, Stage::DocSkipped)?;
    }

    // 6. Final instructions
    say(out, "")?;
    say(out, "To create a versioned distribution copy:")?;
    say(
        out,
        &format!(
            "  copy the folder {} to {}",
            ctx.rel(&paths.app_dir),
            ctx.rel(&paths.snapshot_dir)
        ),
    )?;
    say(out, "  or run: deploy snapshot")?;
    acknowledger.acknowledge(DEFAULT_PROMPT)?;
    enter(&mut stages, Stage::Done)?;

    info!("deploy run finished");
    Ok(RunOutcome { stages, package: status })
}

fn enter(stages: &mut Vec<Stage>, to: Stage) -> Result<()> {
    advance(stages, to).map_err(|err| anyhow!("stage transition failed: {err}"))?;
    debug!(stage = %to, "entered stage");
    Ok(())
}

fn say<W: Write>(out: &mut W, line: &str) -> Result<()> {
    writeln!(out, "{line}").context("write console output")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::PackageStatus;
    use crate::test_support::{CountingAcknowledger, ScriptedPackager, TestProject};

    #[test]
    fn load_uses_root_config_by_default() {
        let project = TestProject::new().expect("project");
        std::fs::write(project.root().join("deploy.toml"), "version = \"3.0.0\"\n")
            .expect("write config");

        let ctx = RunContext::load(project.root(), None).expect("load");
        assert_eq!(ctx.config.version, "3.0.0");
        assert_eq!(
            ctx.paths.snapshot_dir,
            project.root().join("WidgetSidebar_v3.0.0")
        );
    }

    #[test]
    fn packager_receives_root_and_fixed_flags() {
        let project = TestProject::new().expect("project");
        let packager = ScriptedPackager::succeeding();
        let ack = CountingAcknowledger::default();
        let mut out = Vec::new();

        run_pipeline(&project.context(), &packager, &ack, &mut out).expect("run");

        let calls = packager.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].workdir, project.root());
        assert_eq!(
            calls[0].argv,
            vec!["pyinstaller", "widget_sidebar.spec", "--clean", "--noconfirm"]
        );
    }

    #[test]
    fn failure_pauses_once_and_stops() {
        let project = TestProject::new().expect("project");
        let packager = ScriptedPackager::failing(2);
        let ack = CountingAcknowledger::default();
        let mut out = Vec::new();

        let outcome = run_pipeline(&project.context(), &packager, &ack, &mut out).expect("run");

        assert_eq!(outcome.package, PackageStatus::Failed { code: Some(2) });
        assert_eq!(
            outcome.stages,
            vec![Stage::Start, Stage::Cleaned, Stage::PackagingFailed]
        );
        assert_eq!(ack.count(), 1);
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("exit code 2"));
        assert!(!text.contains("versioned distribution copy"));
    }

    #[test]
    fn missing_executable_still_reports_success() {
        let project = TestProject::new().expect("project");
        let packager = ScriptedPackager::succeeding().without_executable();
        let ack = CountingAcknowledger::default();
        let mut out = Vec::new();

        let outcome = run_pipeline(&project.context(), &packager, &ack, &mut out).expect("run");
        assert_eq!(outcome.terminal(), Stage::Done);
        assert!(!project.context().paths.executable_path.exists());
    }
}
