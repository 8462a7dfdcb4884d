use keygate_core::forms::{FormSettings, RegisterField, RegisterForm};

use crate::common::mask;
use crate::features::RedirectGuard;

#[derive(Debug)]
pub struct RegisterState {
    pub form: RegisterForm,
    pub focus: RegisterField,
    pub reveal_password: bool,
    pub redirects: RedirectGuard,
}

impl RegisterState {
    pub fn new(settings: &FormSettings) -> Self {
        Self {
            form: RegisterForm::new(settings),
            focus: RegisterField::Username,
            reveal_password: false,
            redirects: RedirectGuard::default(),
        }
    }

    /// Back to a blank screen; any pending result, timer or redirect goes
    /// stale.
    pub fn reset(&mut self) {
        self.form.reset();
        self.focus = RegisterField::Username;
        self.reveal_password = false;
        self.redirects.disarm();
    }

    /// Moves focus, treating the field being left as blurred.
    pub fn move_focus(&mut self, to: RegisterField) {
        if to != self.focus {
            self.form.blur(self.focus);
            self.focus = to;
        }
    }

    pub fn display_value(&self, field: RegisterField) -> String {
        let value = self.form.value(field);
        if field.is_secret() && !self.reveal_password {
            mask(value)
        } else {
            value.to_string()
        }
    }
}
