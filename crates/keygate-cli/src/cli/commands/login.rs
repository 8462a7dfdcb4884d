//! `keygate login`.

use anyhow::Result;
use keygate_core::config::Config;
use keygate_core::forms::{LOGIN_FALLBACK_MESSAGE, LoginField, LoginForm};
use keygate_core::token::TokenStore;
use keygate_core::workflow;

use crate::modes::BrowserNavigator;

pub async fn run(config: &Config, email: String, password: String, open_browser: bool) -> Result<()> {
    let client = config.auth_client()?;
    let tokens = TokenStore::default();

    let mut form = LoginForm::new(&config.form_settings());
    form.set_field(LoginField::Email, email);
    form.set_field(LoginField::Password, password);

    let report = workflow::run_login(&mut form, &client, &tokens).await;
    super::finish(&report, LOGIN_FALLBACK_MESSAGE)?;

    if report.warnings.is_empty() {
        println!("Token saved to {}", tokens.path().display());
    }

    if let Some(redirect) = report.redirect {
        if open_browser {
            workflow::follow_redirect(&redirect, &BrowserNavigator).await?;
        } else {
            println!("Continue at {}", redirect.url);
        }
    }

    Ok(())
}
