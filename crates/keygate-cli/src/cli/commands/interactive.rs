//! Default command: the full-screen login/registration UI.

use std::sync::Arc;

use anyhow::Result;
use keygate_core::config::Config;

use crate::modes::{self, BrowserNavigator};

pub fn run(config: &Config) -> Result<()> {
    modes::run_interactive(config, Arc::new(BrowserNavigator))
}
