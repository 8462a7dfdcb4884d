//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use keygate_core::forms::FormKind;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{AppState, Screen};
use crate::{login, register};

/// Mutates `app` for `event` and returns effects for the runtime.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::LoginSettled { id, result } => login::handle_settled(&mut app.login, id, result),
        UiEvent::RegisterSettled { id, result } => {
            register::handle_settled(&mut app.register, id, result)
        }
        UiEvent::StatusExpired { form, ticket } => {
            let cleared = match form {
                FormKind::Login => app.login.form.expire_status(ticket),
                FormKind::Register => app.register.form.expire_status(ticket),
            };
            tracing::trace!(?form, generation = ticket.generation, cleared, "status timer fired");
            vec![]
        }
        UiEvent::TokenStored { result } => login::handle_token_stored(&mut app.login, result),
        UiEvent::Redirected { id, url, result } => {
            login::handle_redirected(&mut app.login, id, &url, result)
        }
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Paste(text) => {
            match app.screen {
                Screen::Login => login::handle_paste(&mut app.login, &text),
                Screen::Register => register::handle_paste(&mut app.register, &text),
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Char('c') if ctrl => vec![UiEffect::Quit],
        KeyCode::F(2) => {
            switch_screen(app);
            vec![]
        }
        KeyCode::Char('n') if ctrl => {
            switch_screen(app);
            vec![]
        }
        _ => match app.screen {
            Screen::Login => login::handle_key(&mut app.login, key),
            Screen::Register => register::handle_key(&mut app.register, key),
        },
    }
}

/// Shows the other screen. The screen being left is torn down, so its
/// late HTTP results and expiry timers are ignored when they arrive.
fn switch_screen(app: &mut AppState) {
    match app.screen {
        Screen::Login => app.login.reset(),
        Screen::Register => app.register.reset(),
    }
    app.screen = app.screen.other();
    tracing::debug!(screen = ?app.screen, "switched screen");
}
