//! Top-level view.
//!
//! Layout: header (app name, screen tabs, service URL), the active form
//! centered in the body, and a hint line at the bottom.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::render_utils::{InputHint, render_hints};
use crate::common::truncate_start_with_ellipsis;
use crate::state::{AppState, Screen};
use crate::{login, register};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn render(app: &AppState, frame: &mut Frame) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(app, frame, header);

    let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
    match app.screen {
        Screen::Login => login::render_login(frame, body, &app.login, spinner),
        Screen::Register => register::render_register(frame, body, &app.register, spinner),
    }

    let switch_label = match app.screen.other() {
        Screen::Login => "log in",
        Screen::Register => "register",
    };
    render_hints(
        frame,
        footer,
        &[
            InputHint::new("Enter", "submit"),
            InputHint::new("Tab", "next field"),
            InputHint::new("Ctrl+R", "show password"),
            InputHint::new("F2", switch_label),
            InputHint::new("Esc", "quit"),
        ],
        Color::Cyan,
    );
}

fn render_header(app: &AppState, frame: &mut Frame, area: ratatui::layout::Rect) {
    let mut spans = vec![Span::styled(
        "keygate ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    for screen in [Screen::Login, Screen::Register] {
        let style = if screen == app.screen {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(screen.title(), style));
    }

    let used: usize = spans.iter().map(Span::width).sum();
    let room = (area.width as usize).saturating_sub(used + 3);
    spans.push(Span::styled(
        format!("   {}", truncate_start_with_ellipsis(&app.base_url, room)),
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use keygate_core::forms::{FormSettings, LoginField, RegisterField};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn draw(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_password_is_masked_by_default() {
        let mut app = AppState::new(&FormSettings::default(), "http://localhost:5000/api");
        app.login
            .form
            .set_field(LoginField::Password, "hunter2X".to_string());

        let screen = draw(&app);
        assert!(!screen.contains("hunter2X"));
        assert!(screen.contains("••••••••"));

        app.login.reveal_password = true;
        assert!(draw(&app).contains("hunter2X"));
    }

    #[test]
    fn test_register_shows_field_error_and_checklist() {
        let mut app = AppState::new(&FormSettings::default(), "http://localhost:5000/api");
        app.screen = Screen::Register;
        app.register
            .form
            .set_field(RegisterField::Password, "abc".to_string());

        let screen = draw(&app);
        assert!(screen.contains("Password must be between 8 and 12 characters."));
        assert!(screen.contains("8-12 characters"));
        assert!(screen.contains("Create account"));
    }
}
