//! Packaging orchestrator for the Widget Sidebar desktop app.
//!
//! `deploy` with no arguments cleans `build/` and `dist/`, runs the packaging
//! tool, and copies `README.md` into `dist/WidgetSidebar/`. Exit code 1 means
//! the packaging tool failed.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use deploy::exit_codes;
use deploy::io::acknowledge::{NoPause, StdinAcknowledger};
use deploy::io::packager::CommandPackager;
use deploy::logging;
use deploy::pipeline::{RunContext, run_pipeline};
use deploy::snapshot::create_snapshot;

#[derive(Parser)]
#[command(
    name = "deploy",
    version,
    about = "Package Widget Sidebar into a standalone distributable"
)]
struct Cli {
    /// Project root (defaults to the current directory).
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Config file (defaults to `<root>/deploy.toml`).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Do not wait for Enter before exiting (for CI).
    #[arg(long)]
    no_pause: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Copy `dist/<app>` to `<app>_v<version>`.
    Snapshot {
        /// Replace an existing snapshot.
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::FAILURE);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().context("resolve current directory")?,
    };
    let ctx = RunContext::load(&root, cli.config.as_deref())?;

    match cli.command {
        None => cmd_deploy(&ctx, cli.no_pause),
        Some(Command::Snapshot { force }) => cmd_snapshot(&ctx, force),
    }
}

fn cmd_deploy(ctx: &RunContext, no_pause: bool) -> Result<i32> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = if no_pause || !ctx.config.pause {
        run_pipeline(ctx, &CommandPackager, &NoPause, &mut out)?
    } else {
        run_pipeline(ctx, &CommandPackager, &StdinAcknowledger, &mut out)?
    };
    Ok(outcome.exit_code())
}

fn cmd_snapshot(ctx: &RunContext, force: bool) -> Result<i32> {
    let outcome = create_snapshot(ctx, force)?;
    println!(
        "Copied {} files to {}",
        outcome.files_copied,
        ctx.paths.display_relative(&outcome.target)
    );
    Ok(exit_codes::OK)
}
