use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use keygate_core::api::{AuthResult, LoginResponse};
use keygate_core::forms::{FormKind, SubmissionId};

use super::LoginState;
use crate::common::{edit_value, sanitize_paste};
use crate::effects::UiEffect;
use crate::features::{decision_effects, settlement_effects};

pub fn handle_key(state: &mut LoginState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            state.focus = state.focus.next();
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.focus = state.focus.prev();
            vec![]
        }
        KeyCode::Enter => submit(state),
        KeyCode::Char('r') if ctrl => {
            state.reveal_password = !state.reveal_password;
            vec![]
        }
        _ if state.form.is_busy() => vec![],
        _ => {
            if let Some(value) = edit_value(state.form.value(state.focus), &key) {
                state.form.set_field(state.focus, value);
            }
            vec![]
        }
    }
}

pub fn handle_paste(state: &mut LoginState, text: &str) {
    if state.form.is_busy() {
        return;
    }
    let mut value = state.form.value(state.focus).to_string();
    value.push_str(&sanitize_paste(text));
    state.form.set_field(state.focus, value);
}

pub fn submit(state: &mut LoginState) -> Vec<UiEffect> {
    decision_effects(FormKind::Login, state.form.begin_submit(), |id, request| {
        UiEffect::SubmitLogin { id, request }
    })
}

pub fn handle_settled(
    state: &mut LoginState,
    id: SubmissionId,
    result: AuthResult<LoginResponse>,
) -> Vec<UiEffect> {
    match state.form.settle(id, result) {
        Some(settlement) => {
            settlement_effects(FormKind::Login, id, settlement, &mut state.redirects)
        }
        None => vec![],
    }
}

pub fn handle_token_stored(state: &mut LoginState, result: Result<(), String>) -> Vec<UiEffect> {
    match result {
        Ok(()) => vec![],
        Err(error) => {
            let ticket = state
                .form
                .report_error(format!("Could not save login token: {error}"));
            vec![UiEffect::ScheduleStatusExpiry {
                form: FormKind::Login,
                ticket,
            }]
        }
    }
}

pub fn handle_redirected(
    state: &mut LoginState,
    id: SubmissionId,
    url: &str,
    result: Result<(), String>,
) -> Vec<UiEffect> {
    if !state.redirects.complete(id) {
        tracing::debug!(submission = id.0, "ignoring redirect for a torn-down login");
        return vec![];
    }
    match result {
        Ok(()) => vec![],
        Err(error) => {
            let ticket = state
                .form
                .report_error(format!("Could not open {url}: {error}"));
            vec![UiEffect::ScheduleStatusExpiry {
                form: FormKind::Login,
                ticket,
            }]
        }
    }
}
