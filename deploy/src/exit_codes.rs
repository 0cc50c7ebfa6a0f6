//! Stable exit codes for the deploy CLI.

/// Pipeline reached its final step, or a subcommand succeeded.
pub const OK: i32 = 0;
/// The packaging tool reported failure, or another fatal error stopped the run.
pub const FAILURE: i32 = 1;
