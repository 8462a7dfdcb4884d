//! Text utilities for field editing and rendering.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MASK_CHAR: char = '•';

/// Replaces every character with a mask bullet.
pub fn mask(value: &str) -> String {
    value.chars().map(|_| MASK_CHAR).collect()
}

/// Applies an editing key to `current`.
///
/// Returns the new value, or `None` if `key` is not an editing key.
/// Supported: printable characters, Backspace, Ctrl+U (clear line),
/// Ctrl+W (delete previous word).
pub fn edit_value(current: &str, key: &KeyEvent) -> Option<String> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('u') if ctrl => Some(String::new()),
        KeyCode::Char('w') if ctrl => {
            let trimmed = current.trim_end();
            let cut = trimmed
                .char_indices()
                .rev()
                .find(|(_, c)| c.is_whitespace())
                .map_or(0, |(i, c)| i + c.len_utf8());
            Some(trimmed[..cut].to_string())
        }
        KeyCode::Char(c) if !ctrl && !alt => {
            let mut next = current.to_string();
            next.push(c);
            Some(next)
        }
        KeyCode::Backspace => {
            let mut next = current.to_string();
            next.pop();
            Some(next)
        }
        _ => None,
    }
}

/// Strips line breaks and control characters from pasted text.
pub fn sanitize_paste(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

/// Keeps the tail of `text` within `max_width` columns, prefixing `…` when
/// something was cut. Inputs scroll left as the user types, so the end is
/// the part worth showing.
pub fn truncate_start_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut kept: Vec<char> = Vec::new();
    let mut width = 0;
    for ch in text.chars().rev() {
        let w = ch.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        width += w;
        kept.push(ch);
    }
    let mut out = String::from("…");
    out.extend(kept.into_iter().rev());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_mask_counts_chars_not_bytes() {
        assert_eq!(mask("pä$"), "•••");
        assert_eq!(mask(""), "");
    }

    #[test]
    fn test_edit_value_typing_and_backspace() {
        assert_eq!(edit_value("ab", &key(KeyCode::Char('c'))).unwrap(), "abc");
        assert_eq!(edit_value("abc", &key(KeyCode::Backspace)).unwrap(), "ab");
        assert_eq!(edit_value("", &key(KeyCode::Backspace)).unwrap(), "");
    }

    #[test]
    fn test_edit_value_shift_is_typing() {
        let upper = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(edit_value("a", &upper).unwrap(), "aA");
    }

    #[test]
    fn test_edit_value_ctrl_shortcuts() {
        assert_eq!(edit_value("hello", &ctrl('u')).unwrap(), "");
        assert_eq!(edit_value("one two", &ctrl('w')).unwrap(), "one ");
        assert_eq!(edit_value("single", &ctrl('w')).unwrap(), "");
        assert!(edit_value("x", &ctrl('r')).is_none());
    }

    #[test]
    fn test_edit_value_ignores_navigation() {
        assert!(edit_value("x", &key(KeyCode::Tab)).is_none());
        assert!(edit_value("x", &key(KeyCode::Enter)).is_none());
    }

    #[test]
    fn test_sanitize_paste_drops_newlines() {
        assert_eq!(sanitize_paste("a@b.com\r\n"), "a@b.com");
        assert_eq!(sanitize_paste("x\ty"), "xy");
    }

    #[test]
    fn test_truncate_start_keeps_tail() {
        assert_eq!(truncate_start_with_ellipsis("hello", 10), "hello");
        assert_eq!(truncate_start_with_ellipsis("abcdefgh", 5), "…efgh");
        assert_eq!(truncate_start_with_ellipsis("abc", 1), "…");
    }
}
