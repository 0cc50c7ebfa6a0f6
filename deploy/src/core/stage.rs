//! Stage transition rules for the deploy pipeline.
//!
//! ```text
//! Start -> Cleaned -> Packaged -> Reported -> DocCopied  -> Done
//!                  \                       \-> DocSkipped -> Done
//!                   \-> PackagingFailed
//! ```

use super::types::Stage;

/// Returns true if `to` may directly follow `from`.
pub fn is_allowed(from: Stage, to: Stage) -> bool {
    matches!(
        (from, to),
        (Stage::Start, Stage::Cleaned)
            | (Stage::Cleaned, Stage::Packaged)
            | (Stage::Cleaned, Stage::PackagingFailed)
            | (Stage::Packaged, Stage::Reported)
            | (Stage::Reported, Stage::DocCopied)
            | (Stage::Reported, Stage::DocSkipped)
            | (Stage::DocCopied, Stage::Done)
            | (Stage::DocSkipped, Stage::Done)
    )
}

/// Append `to` to `stages` if the transition from the current stage is allowed.
///
/// An empty history is treated as sitting at [`Stage::Start`].
pub fn advance(stages: &mut Vec<Stage>, to: Stage) -> Result<(), String> {
    let from = stages.last().copied().unwrap_or(Stage::Start);
    if from.is_terminal() {
        return Err(format!("stage {from} is terminal, cannot enter {to}"));
    }
    if !is_allowed(from, to) {
        return Err(format!("invalid stage transition {from} -> {to}"));
    }
    if stages.is_empty() {
        stages.push(Stage::Start);
    }
    stages.push(to);
    Ok(())
}
