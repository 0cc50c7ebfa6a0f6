//! Fail-fast packaging orchestrator for the Widget Sidebar desktop app.
//!
//! A run cleans stale output, invokes an external packaging tool, and on
//! success copies documentation next to the produced executable. The crate
//! keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (stage transitions, status
//!   classification). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (filesystem, process execution,
//!   operator prompts). Isolated behind traits to enable fakes in tests.
//!
//! Orchestration modules ([`pipeline`], [`snapshot`]) coordinate core logic
//! with I/O to implement CLI commands.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod pipeline;
pub mod snapshot;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
