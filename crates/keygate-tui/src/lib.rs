//! Full-screen TUI for keygate: log in or create an account.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};
use std::sync::Arc;

use anyhow::Result;
pub use features::{login, register, status};
use keygate_core::config::Config;
use keygate_core::token::{TokenSink, TokenStore};
use keygate_core::workflow::Navigator;
pub use runtime::{Services, TuiRuntime};

/// Runs the interactive login/registration screens.
///
/// Must be called from inside a multi-threaded tokio runtime.
///
/// # Errors
/// Returns an error if there is no terminal, the config yields an invalid
/// base URL, or terminal I/O fails.
pub fn run_interactive(config: &Config, navigator: Arc<dyn Navigator>) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "Interactive mode requires a terminal.\n\
             Use `keygate login` or `keygate register` for non-interactive use."
        );
    }

    let client = config.auth_client()?;
    let tokens: Arc<dyn TokenSink> = Arc::new(TokenStore::default());
    tracing::info!(base_url = client.base_url(), "starting interactive session");

    let mut runtime = TuiRuntime::new(
        &config.form_settings(),
        Services {
            client,
            tokens,
            navigator,
        },
    )?;
    runtime.run()
}
