//! Single-line text field with cursor management.
//!
//! Used by every form field in the creation wizard and the quantity input
//! of the purchase dialog.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::tui::theme;

#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    content: String,
    cursor: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer pre-filled with `text`, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let content = text.into();
        let cursor = content.len();
        Self { content, cursor }
    }

    /// Replace the content, cursor at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.content = text.into();
        self.cursor = self.content.len();
    }

    pub fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.content[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.content.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.content.len() {
            let next = self.next_boundary();
            self.content.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.content[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.content.len() {
            self.cursor = self.next_boundary();
        }
    }

    fn next_boundary(&self) -> usize {
        self.content[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.content.len())
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Apply an editing key. Returns true when the content changed.
    ///
    /// Cursor movement is consumed too but reports false, so callers only
    /// re-sync their model on real edits.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return false;
        }
        match key.code {
            KeyCode::Char(c) => {
                self.insert_char(c);
                true
            }
            KeyCode::Backspace => {
                let before = self.content.len();
                self.backspace();
                before != self.content.len()
            }
            KeyCode::Delete => {
                let before = self.content.len();
                self.delete();
                before != self.content.len()
            }
            KeyCode::Left => {
                self.move_left();
                false
            }
            KeyCode::Right => {
                self.move_right();
                false
            }
            KeyCode::Home => {
                self.cursor = 0;
                false
            }
            KeyCode::End => {
                self.cursor = self.content.len();
                false
            }
            _ => false,
        }
    }

    /// Render as a single line. The cursor cell is drawn inverted when focused;
    /// an empty unfocused field shows `placeholder`.
    pub fn render_line(&self, focused: bool, placeholder: &str) -> Line<'static> {
        if self.content.is_empty() && !focused {
            return Line::styled(placeholder.to_string(), theme::dim());
        }
        if !focused {
            return Line::raw(self.content.clone());
        }

        let before = &self.content[..self.cursor];
        let cursor_char = self.content[self.cursor..]
            .chars()
            .next()
            .map(|c| c.to_string())
            .unwrap_or_else(|| " ".to_string());
        let after = if self.cursor < self.content.len() {
            &self.content[self.cursor + cursor_char.len()..]
        } else {
            ""
        };

        Line::from(vec![
            Span::raw(before.to_string()),
            Span::styled(cursor_char, Style::default().bg(theme::TEXT).fg(theme::BG_BASE)),
            Span::raw(after.to_string()),
        ])
    }
}
