//! CLI Adapter
//!
//! Command-line interface for Presale Scout.
//! Uses clap derive macros for argument parsing.

mod commands;
pub mod render;

pub use commands::{build_pipeline, CheckCmd, CliApp, Command, RunCmd};

use anyhow::Result;
use std::process::ExitCode;

/// Initialize the CLI application
pub fn init() -> CliApp {
    use clap::Parser;
    CliApp::parse()
}

/// Execute the CLI command
pub async fn execute(app: CliApp) -> Result<ExitCode> {
    commands::execute(app).await
}
