use keygate_core::forms::RegisterField;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::RegisterState;
use crate::common::render_utils::{
    InputField, centered_box, input_field_lines, render_form_container,
};
use crate::features::status::{button_line, status_line};

const BOX_WIDTH: u16 = 70;
const BOX_HEIGHT: u16 = 22;

pub fn render_register(frame: &mut Frame, area: Rect, state: &RegisterState, spinner: &str) {
    let popup = centered_box(area, BOX_WIDTH, BOX_HEIGHT);
    let inner = render_form_container(frame, popup, "Create account", Color::Magenta);

    let busy = state.form.is_busy();
    let mut lines: Vec<Line<'static>> = Vec::new();
    for field in RegisterField::ALL {
        let display = state.display_value(field);
        let placeholder = match field {
            RegisterField::Username => "letters, numbers, underscores",
            RegisterField::Email => "you@example.com",
            RegisterField::Password => "8-12 characters",
        };
        lines.extend(input_field_lines(
            &InputField {
                label: field.label(),
                display: &display,
                placeholder,
                focused: state.focus == field,
                disabled: busy,
            },
            inner.width,
        ));
        lines.push(match state.form.error(field) {
            Some(error) => Line::from(Span::styled(
                format!("  {error}"),
                Style::default().fg(Color::Red),
            )),
            None => Line::from(""),
        });

        if field == RegisterField::Password && !state.form.value(field).is_empty() {
            lines.extend(criteria_lines(state));
        }
    }

    lines.push(button_line("Register", "Registering...", busy, spinner));
    lines.push(Line::from(""));
    lines.push(status_line(state.form.status().current()));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn criteria_lines(state: &RegisterState) -> Vec<Line<'static>> {
    state
        .form
        .criteria()
        .items()
        .into_iter()
        .map(|(label, met)| {
            let (mark, color) = if met {
                ("✓", Color::Green)
            } else {
                ("·", Color::DarkGray)
            };
            Line::from(vec![
                Span::styled(format!("  {mark} "), Style::default().fg(color)),
                Span::styled(label, Style::default().fg(color)),
            ])
        })
        .collect()
}
