//! Status message line shared by both screens.

use keygate_core::status::{StatusKind, StatusMessage};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub fn status_line(message: Option<&StatusMessage>) -> Line<'static> {
    let Some(message) = message else {
        return Line::from("");
    };
    let (icon, color) = match message.kind {
        StatusKind::Success => ("✓ ", Color::Green),
        StatusKind::Error => ("✗ ", Color::Red),
    };
    Line::from(vec![
        Span::styled(icon, Style::default().fg(color)),
        Span::styled(
            message.text.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])
}

/// Submit button label; swaps to a spinner while busy.
pub fn button_line(idle: &str, busy: &str, is_busy: bool, spinner: &str) -> Line<'static> {
    if is_busy {
        Line::from(vec![
            Span::styled(format!("{spinner} "), Style::default().fg(Color::Yellow)),
            Span::styled(format!("[ {busy} ]"), Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(Span::styled(
            format!("[ {idle} ]"),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
    }
}
