//! Operator acknowledgment before the process exits.
//!
//! Interactive runs block on Enter; CI runs plug in [`NoPause`].

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

pub const DEFAULT_PROMPT: &str = "Press Enter to continue...";

pub trait Acknowledger {
    /// Block until the operator acknowledges `prompt`.
    fn acknowledge(&self, prompt: &str) -> Result<()>;
}

/// Prompts on stdout and waits for a line on stdin.
pub struct StdinAcknowledger;

impl Acknowledger for StdinAcknowledger {
    fn acknowledge(&self, prompt: &str) -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        wait_for_line(&mut stdin.lock(), &mut stdout.lock(), prompt)
    }
}

/// Returns immediately.
pub struct NoPause;

impl Acknowledger for NoPause {
    fn acknowledge(&self, _prompt: &str) -> Result<()> {
        Ok(())
    }
}

/// Write `prompt`, then consume one line (or EOF) from `input`.
///
/// The line's bytes are discarded unread, so any console encoding acknowledges.
pub fn wait_for_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<()> {
    write!(output, "{prompt}").context("write prompt")?;
    output.flush().context("flush prompt")?;
    let mut line = Vec::new();
    input
        .read_until(b'\n', &mut line)
        .context("read acknowledgment")?;
    // A closed stdin acknowledges immediately; keep the console tidy.
    if line.is_empty() {
        writeln!(output).context("write newline")?;
    }
    Ok(())
}
