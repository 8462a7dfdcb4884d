use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use keygate_core::api::{AuthResult, RegisterResponse};
use keygate_core::forms::{FormKind, SubmissionId};

use super::RegisterState;
use crate::common::{edit_value, sanitize_paste};
use crate::effects::UiEffect;
use crate::features::{decision_effects, settlement_effects};

pub fn handle_key(state: &mut RegisterState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            state.move_focus(state.focus.next());
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.move_focus(state.focus.prev());
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

pub fn handle_paste(state: &mut RegisterState, text: &str) {
    if state.form.is_busy() {
        return;
    }
    let mut value = state.form.value(state.focus).to_string();
    value.push_str(&sanitize_paste(text));
    state.form.set_field(state.focus, value);
}

pub fn submit(state: &mut RegisterState) -> Vec<UiEffect> {
    decision_effects(
        FormKind::Register,
        state.form.begin_submit(),
        |id, request| UiEffect::SubmitRegister { id, request },
    )
}

pub fn handle_settled(
    state: &mut RegisterState,
    id: SubmissionId,
    result: AuthResult<RegisterResponse>,
) -> Vec<UiEffect> {
    match state.form.settle(id, result) {
        Some(settlement) => {
            settlement_effects(FormKind::Register, id, settlement, &mut state.redirects)
        }
        None => vec![],
    }
}
