//! Runtime execution modes.
//!
//! - non-interactive: `login` / `register` subcommands (see `cli::commands`)
//! - `tui`: full-screen interactive terminal UI (optional feature)

use anyhow::{Context, Result};
use keygate_core::workflow::Navigator;

#[cfg(feature = "tui")]
pub use keygate_tui::run_interactive;

#[cfg(not(feature = "tui"))]
pub fn run_interactive(
    _config: &keygate_core::config::Config,
    _navigator: std::sync::Arc<dyn Navigator>,
) -> Result<()> {
    anyhow::bail!("TUI support is disabled in this build (feature \"tui\").");
}

/// Opens redirect targets in the system browser.
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, url: &str) -> Result<()> {
        open::that(url).with_context(|| format!("open {url} in browser"))
    }
}
