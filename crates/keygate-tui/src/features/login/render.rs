use keygate_core::forms::LoginField;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use super::LoginState;
use crate::common::render_utils::{
    InputField, centered_box, input_field_lines, render_form_container,
};
use crate::features::status::{button_line, status_line};

const BOX_WIDTH: u16 = 56;
const BOX_HEIGHT: u16 = 12;

pub fn render_login(frame: &mut Frame, area: Rect, state: &LoginState, spinner: &str) {
    let popup = centered_box(area, BOX_WIDTH, BOX_HEIGHT);
    let inner = render_form_container(frame, popup, "Log in", Color::Cyan);

    let busy = state.form.is_busy();
    let mut lines: Vec<Line<'static>> = Vec::new();
    for field in LoginField::ALL {
        let display = state.display_value(field);
        let placeholder = match field {
            LoginField::Email => "you@example.com",
            LoginField::Password => "password",
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
        lines.push(Line::from(""));
    }

    lines.push(button_line("Log in", "Logging in...", busy, spinner));
    lines.push(Line::from(""));
    lines.push(status_line(state.form.status().current()));

    frame.render_widget(Paragraph::new(lines), inner);
}
