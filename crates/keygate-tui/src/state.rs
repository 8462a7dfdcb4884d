//! Application state composition.
//!
//! ```text
//! AppState
//! ├── screen: Screen            (which form is shown)
//! ├── login: LoginState         (LoginForm + focus + reveal flag)
//! ├── register: RegisterState   (RegisterForm + focus + reveal flag)
//! └── should_quit / spinner_frame
//! ```
//!
//! Each screen owns its own form instance; nothing is shared between them.

use keygate_core::forms::FormSettings;

use crate::login::LoginState;
use crate::register::RegisterState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Login,
    Register,
}

impl Screen {
    pub fn other(self) -> Self {
        match self {
            Screen::Login => Screen::Register,
            Screen::Register => Screen::Login,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Screen::Login => "Log in",
            Screen::Register => "Create account",
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub login: LoginState,
    pub register: RegisterState,
    /// Shown in the header so the user knows where credentials go.
    pub base_url: String,
    pub should_quit: bool,
    pub spinner_frame: usize,
}

impl AppState {
    pub fn new(settings: &FormSettings, base_url: impl Into<String>) -> Self {
        Self {
            screen: Screen::default(),
            login: LoginState::new(settings),
            register: RegisterState::new(settings),
            base_url: base_url.into(),
            should_quit: false,
            spinner_frame: 0,
        }
    }

    /// Whether any form has a request in flight.
    pub fn is_busy(&self) -> bool {
        self.login.form.is_busy() || self.register.form.is_busy()
    }
}
