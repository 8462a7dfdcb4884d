//! CLI command handlers.

pub mod config;
pub mod interactive;
pub mod login;
pub mod register;
pub mod token;

use anyhow::Result;
use keygate_core::workflow::WorkflowReport;

/// Prints the final status message; a failed outcome becomes the error.
fn finish(report: &WorkflowReport, fallback: &str) -> Result<()> {
    for warning in &report.warnings {
        eprintln!("Warning: {warning}");
    }

    let text = report
        .message
        .as_ref()
        .map_or(fallback, |message| message.text.as_str());
    if report.is_success() {
        println!("{text}");
        Ok(())
    } else {
        anyhow::bail!("{text}")
    }
}
