//! Packaging tool abstraction.
//!
//! The [`Packager`] trait decouples the pipeline from the actual packaging
//! backend (PyInstaller by default). Tests use scripted packagers that return
//! predetermined statuses without spawning processes.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Command;

use anyhow::{Result, anyhow};
use tracing::{debug, error, info, instrument};

use crate::core::types::PackageStatus;

/// Parameters for a packaging invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequest {
    /// Working directory for the packaging tool (the project root).
    pub workdir: PathBuf,
    /// Program followed by its arguments.
    pub argv: Vec<String>,
}

/// Abstraction over packaging backends.
pub trait Packager {
    /// Run the tool to completion and classify its exit status.
    ///
    /// `Err` is reserved for malformed requests; a tool that cannot be run
    /// reports [`PackageStatus::Failed`].
    fn package(&self, request: &PackageRequest) -> Result<PackageStatus>;
}

/// Packager that spawns the configured command and blocks until it exits.
///
/// The child inherits stdin/stdout/stderr so the operator sees the tool's own
/// progress output.
pub struct CommandPackager;

impl Packager for CommandPackager {
    #[instrument(skip_all, fields(program = request.argv.first().map(String::as_str).unwrap_or("")))]
    fn package(&self, request: &PackageRequest) -> Result<PackageStatus> {
        let (program, args) = request
            .argv
            .split_first()
            .ok_or_else(|| anyhow!("packaging command is empty"))?;

        info!(workdir = %request.workdir.display(), args = ?args, "starting packaging tool");
        let mut cmd = Command::new(program);
        cmd.args(args).current_dir(&request.workdir);

        let status = match cmd.status() {
            Ok(status) => status,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                error!(program = %program, "packaging tool not found on PATH");
                return Ok(PackageStatus::Failed { code: None });
            }
            Err(err) => {
                error!(program = %program, err = %err, "failed to spawn packaging tool");
                return Ok(PackageStatus::Failed { code: None });
            }
        };

        debug!(exit_code = ?status.code(), "packaging tool finished");
        Ok(PackageStatus::from(status))
    }
}
