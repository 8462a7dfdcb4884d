use keygate_core::forms::{FormSettings, LoginField, LoginForm};

use crate::common::mask;
use crate::features::RedirectGuard;

#[derive(Debug)]
pub struct LoginState {
    pub form: LoginForm,
    pub focus: LoginField,
    pub reveal_password: bool,
    pub redirects: RedirectGuard,
}

impl LoginState {
    pub fn new(settings: &FormSettings) -> Self {
        Self {
            form: LoginForm::new(settings),
            focus: LoginField::Email,
            reveal_password: false,
            redirects: RedirectGuard::default(),
        }
    }

    /// Back to a blank screen; any pending result, timer or redirect goes
    /// stale.
    pub fn reset(&mut self) {
        self.form.reset();
        self.focus = LoginField::Email;
        self.reveal_password = false;
        self.redirects.disarm();
    }

    /// Field text as it should appear on screen.
    pub fn display_value(&self, field: LoginField) -> String {
        let value = self.form.value(field);
        if field.is_secret() && !self.reveal_password {
            mask(value)
        } else {
            value.to_string()
        }
    }
}
