use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::text::truncate_start_with_ellipsis;

/// Centers a `width` x `height` box inside `area`, clamped to fit.
pub fn centered_box(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Clears the background, draws the border and title, and returns the
/// padded inner area.
pub fn render_form_container(frame: &mut Frame, area: Rect, title: &str, color: Color) -> Rect {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(format!(" {title} "))
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD));
    frame.render_widget(block, area);

    Rect::new(
        area.x + 2,
        area.y + 1,
        area.width.saturating_sub(4),
        area.height.saturating_sub(2),
    )
}

/// One keyboard hint: `key action`.
pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// Renders a centered line of keyboard hints on the last row of `area`.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[InputHint], highlight_color: Color) {
    if area.height == 0 {
        return;
    }
    let hints_y = area.y + area.height - 1;
    let hints_area = Rect::new(area.x, hints_y, area.width, 1);

    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(highlight_color)));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let para = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(para, hints_area);
}

/// A labelled single-line input.
pub struct InputField<'a> {
    pub label: &'a str,
    /// Text to show, already masked if secret.
    pub display: &'a str,
    pub placeholder: &'a str,
    pub focused: bool,
    pub disabled: bool,
}

/// Builds the label line and the input line for a field.
pub fn input_field_lines(field: &InputField<'_>, width: u16) -> [Line<'static>; 2] {
    let accent = if field.focused {
        Color::Cyan
    } else {
        Color::Gray
    };
    let label = Line::from(Span::styled(
        field.label.to_string(),
        Style::default().fg(accent).add_modifier(Modifier::BOLD),
    ));

    let prompt = if field.focused { "> " } else { "  " };
    let max_text_width = (width as usize).saturating_sub(prompt.len() + 1);
    let mut spans = vec![Span::styled(prompt, Style::default().fg(accent))];

    if field.display.is_empty() {
        if field.focused && !field.disabled {
            spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
        }
        spans.push(Span::styled(
            truncate_start_with_ellipsis(field.placeholder, max_text_width),
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        let text_color = if field.disabled {
            Color::DarkGray
        } else {
            Color::White
        };
        spans.push(Span::styled(
            truncate_start_with_ellipsis(field.display, max_text_width),
            Style::default().fg(text_color),
        ));
        if field.focused && !field.disabled {
            spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
        }
    }

    [label, Line::from(spans)]
}
