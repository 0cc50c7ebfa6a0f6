//! Shared deterministic types for the deploy pipeline.
//!
//! These types define stable contracts between the orchestrator and its
//! collaborators. They must not depend on external state or I/O.

use std::fmt;
use std::process::ExitStatus;

use crate::exit_codes;

/// Outcome reported by the packaging tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageStatus {
    /// The tool exited with status 0.
    Success,
    /// The tool exited non-zero, was killed by a signal, or could not be spawned.
    ///
    /// `code` is `None` when no exit code was available.
    Failed { code: Option<i32> },
}

impl PackageStatus {
    /// Classify a raw exit code. Only `0` counts as success.
    pub fn from_code(code: Option<i32>) -> Self {
        match code {
            Some(0) => PackageStatus::Success,
            other => PackageStatus::Failed { code: other },
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, PackageStatus::Success)
    }
}

impl From<ExitStatus> for PackageStatus {
    fn from(status: ExitStatus) -> Self {
        PackageStatus::from_code(status.code())
    }
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageStatus::Success => write!(f, "success"),
            PackageStatus::Failed { code: Some(code) } => write!(f, "failed (exit code {code})"),
            PackageStatus::Failed { code: None } => write!(f, "failed (no exit code)"),
        }
    }
}

/// Pipeline stage, as entered by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Start,
    /// Build and staging directories are absent.
    Cleaned,
    /// The packaging tool reported success.
    Packaged,
    /// The success banner was printed.
    Reported,
    DocCopied,
    DocSkipped,
    /// Final instructions were printed and acknowledged.
    Done,
    /// The packaging tool reported failure.
    PackagingFailed,
}

impl Stage {
    /// `Done` and `PackagingFailed` end a run; nothing follows them.
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::PackagingFailed)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::Cleaned => "cleaned",
            Stage::Packaged => "packaged",
            Stage::Reported => "reported",
            Stage::DocCopied => "doc_copied",
            Stage::DocSkipped => "doc_skipped",
            Stage::Done => "done",
            Stage::PackagingFailed => "packaging_failed",
        };
        f.write_str(name)
    }
}

/// Result of a completed pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Every stage entered, in order, starting with [`Stage::Start`].
    pub stages: Vec<Stage>,
    /// Packaging result. Every run that returns an outcome has packaged.
    pub package: PackageStatus,
}

impl RunOutcome {
    /// Last stage entered.
    pub fn terminal(&self) -> Stage {
        self.stages.last().copied().unwrap_or(Stage::Start)
    }

    pub fn visited(&self, stage: Stage) -> bool {
        self.stages.contains(&stage)
    }

    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self.terminal() {
            Stage::PackagingFailed => exit_codes::FAILURE,
            _ => exit_codes::OK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_zero_is_success() {
        assert_eq!(PackageStatus::from_code(Some(0)), PackageStatus::Success);
        assert_eq!(
            PackageStatus::from_code(Some(1)),
            PackageStatus::Failed { code: Some(1) }
        );
        assert_eq!(
            PackageStatus::from_code(Some(-1)),
            PackageStatus::Failed { code: Some(-1) }
        );
        assert_eq!(
            PackageStatus::from_code(None),
            PackageStatus::Failed { code: None }
        );
    }

    #[test]
    fn exit_code_follows_terminal_stage() {
        let failed = RunOutcome {
            stages: vec![Stage::Start, Stage::Cleaned, Stage::PackagingFailed],
            package: PackageStatus::Failed { code: Some(2) },
        };
        assert_eq!(failed.exit_code(), exit_codes::FAILURE);

        let done = RunOutcome {
            stages: vec![
                Stage::Start,
                Stage::Cleaned,
                Stage::Packaged,
                Stage::Reported,
                Stage::DocSkipped,
                Stage::Done,
            ],
            package: PackageStatus::Success,
        };
        assert_eq!(done.exit_code(), exit_codes::OK);
        assert!(done.visited(Stage::DocSkipped));
        assert!(!done.visited(Stage::DocCopied));
    }

    #[test]
    fn display_names_failure_code() {
        assert_eq!(
            PackageStatus::Failed { code: Some(3) }.to_string(),
            "failed (exit code 3)"
        );
        assert_eq!(Stage::PackagingFailed.to_string(), "packaging_failed");
    }
}
