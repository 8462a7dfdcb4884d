//! `keygate register`.

use anyhow::Result;
use keygate_core::config::Config;
use keygate_core::forms::{REGISTER_FALLBACK_MESSAGE, RegisterField, RegisterForm};
use keygate_core::workflow;

pub async fn run(config: &Config, username: String, email: String, password: String) -> Result<()> {
    let client = config.auth_client()?;

    let mut form = RegisterForm::new(&config.form_settings());
    form.set_field(RegisterField::Username, username);
    form.set_field(RegisterField::Email, email);
    form.set_field(RegisterField::Password, password);

    let report = workflow::run_register(&mut form, &client).await;

    for field in RegisterField::ALL {
        if let Some(error) = form.error(field) {
            eprintln!("{}: {error}", field.label());
        }
    }

    super::finish(&report, REGISTER_FALLBACK_MESSAGE)
}
