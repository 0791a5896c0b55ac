//! The editable field of the dropdown.
//!
//! It holds the text shown to the user and a byte cursor into it. The field does not decide
//! what it shows: the application writes the text with [`TextField::set_value`] after every
//! event, and reads it back after every edit.

use std::sync::Arc;

use ratatui::layout::Position;
use ratatui::{prelude::*, widgets::Paragraph};
use unicode_display_width::width as display_width;

use crate::classes;
use crate::select::{FocusCause, FocusEvent, Focusable};
use crate::theme::{ColorTheme, DEFAULT_THEME};
use crate::tui::widget::{SelectRender, SelectWidget};
use crate::SelectOptions;

/// Single line text input with a cursor and an emacs style kill buffer
pub struct TextField {
    value: String,
    /// Byte offset into value, always on a char boundary
    cursor_pos: usize,
    /// Shown dimmed while the value is empty
    pub placeholder: String,
    focused: bool,
    /// Refuses focus, and therefore typing
    pub disabled: bool,
    /// Last text removed by a kill command
    kill_buffer: String,
    /// Field and placeholder styles
    pub theme: Arc<ColorTheme>,
    area: Rect,
}

impl Default for TextField {
    fn default() -> Self {
        Self {
            value: String::new(),
            cursor_pos: 0,
            placeholder: String::new(),
            focused: false,
            disabled: false,
            kill_buffer: String::new(),
            theme: Arc::new(*DEFAULT_THEME),
            area: Rect::default(),
        }
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric()
}

impl TextField {
    /// Current text
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Class names of the field
    pub fn class_names(&self) -> &'static str {
        classes::VALUE
    }

    /// Where the field was last drawn
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Cursor position as a byte offset into the text
    pub fn cursor(&self) -> usize {
        self.cursor_pos
    }

    /// Replaces the text, keeping the cursor when the text did not change
    pub fn set_value(&mut self, value: &str) {
        if self.value != value {
            value.clone_into(&mut self.value);
            self.cursor_pos = self.value.len();
        }
    }

    /// Inserts `c` at the cursor
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    /// Inserts `s` at the cursor
    pub fn insert_str(&mut self, s: &str) {
        self.value.insert_str(self.cursor_pos, s);
        self.cursor_pos += s.len();
    }

    /// Deletes the char before the cursor
    pub fn delete_backward(&mut self) -> Option<char> {
        let (pos, _) = self.value[..self.cursor_pos].char_indices().next_back()?;
        let ch = self.value.remove(pos);
        self.cursor_pos = pos;
        Some(ch)
    }

    /// Deletes the char under the cursor
    pub fn delete_forward(&mut self) -> Option<char> {
        if self.cursor_pos >= self.value.len() {
            return None;
        }
        Some(self.value.remove(self.cursor_pos))
    }

    /// Moves one char left
    pub fn move_backward(&mut self) {
        if let Some((pos, _)) = self.value[..self.cursor_pos].char_indices().next_back() {
            self.cursor_pos = pos;
        }
    }

    /// Moves one char right
    pub fn move_forward(&mut self) {
        if let Some(ch) = self.value[self.cursor_pos..].chars().next() {
            self.cursor_pos += ch.len_utf8();
        }
    }

    /// Moves to the start of the text
    pub fn move_to_start(&mut self) {
        self.cursor_pos = 0;
    }

    /// Moves to the end of the text
    pub fn move_to_end(&mut self) {
        self.cursor_pos = self.value.len();
    }

    /// Byte offset after the end of the next word
    fn next_word_end(&self, start: usize, is_word: impl Fn(char) -> bool) -> usize {
        let mut chars = self.value[start..].char_indices().skip_while(|(_, c)| !is_word(*c));
        chars
            .find(|(_, c)| !is_word(*c))
            .map_or(self.value.len(), |(i, _)| start + i)
    }

    /// Byte offset of the start of the previous word
    fn prev_word_start(&self, start: usize, is_word: impl Fn(char) -> bool) -> usize {
        let mut chars = self.value[..start].char_indices().rev().skip_while(|(_, c)| !is_word(*c));
        chars.find(|(_, c)| !is_word(*c)).map_or(0, |(i, c)| i + c.len_utf8())
    }

    /// Moves after the end of the next word
    pub fn move_forward_word(&mut self) {
        self.cursor_pos = self.next_word_end(self.cursor_pos, |c| !c.is_whitespace());
    }

    /// Moves to the start of the previous word
    pub fn move_backward_word(&mut self) {
        self.cursor_pos = self.prev_word_start(self.cursor_pos, is_word_char);
    }

    fn kill(&mut self, start: usize, end: usize) -> String {
        let deleted: String = self.value.drain(start..end).collect();
        if self.cursor_pos > start {
            self.cursor_pos = start;
        }
        if !deleted.is_empty() {
            self.kill_buffer.clone_from(&deleted);
        }
        deleted
    }

    /// Deletes back to the start of the previous alphanumeric word
    pub fn delete_backward_word(&mut self) -> String {
        let start = self.prev_word_start(self.cursor_pos, is_word_char);
        self.kill(start, self.cursor_pos)
    }

    /// Deletes back to the previous whitespace
    pub fn delete_backward_to_whitespace(&mut self) -> String {
        let start = self.prev_word_start(self.cursor_pos, |c| !c.is_whitespace());
        self.kill(start, self.cursor_pos)
    }

    /// Deletes to the end of the next word
    pub fn delete_forward_word(&mut self) -> String {
        let end = self.next_word_end(self.cursor_pos, is_word_char);
        self.kill(self.cursor_pos, end)
    }

    /// Deletes everything before the cursor
    pub fn delete_to_beginning(&mut self) -> String {
        self.kill(0, self.cursor_pos)
    }

    /// Deletes everything after the cursor
    pub fn delete_to_end(&mut self) -> String {
        self.kill(self.cursor_pos, self.value.len())
    }

    /// Inserts the last killed text
    pub fn yank(&mut self) {
        let text = self.kill_buffer.clone();
        self.insert_str(&text);
    }

    /// Column of the cursor, relative to the start of the field
    pub fn cursor_offset(&self) -> u16 {
        display_width(&self.value[..self.cursor_pos]).try_into().unwrap_or(u16::MAX)
    }
}

impl Focusable for TextField {
    fn focus(&mut self, cause: FocusCause) -> Option<FocusEvent> {
        if self.disabled || self.focused {
            return None;
        }
        self.focused = true;
        Some(FocusEvent::new(cause))
    }

    fn blur(&mut self, cause: FocusCause) -> Option<FocusEvent> {
        if !self.focused {
            return None;
        }
        self.focused = false;
        Some(FocusEvent::new(cause))
    }

    fn is_focused(&self) -> bool {
        self.focused
    }
}

impl SelectWidget for TextField {
    fn from_options(options: &SelectOptions, theme: Arc<ColorTheme>) -> Self {
        Self {
            placeholder: options.placeholder.clone(),
            disabled: options.disabled,
            theme,
            ..Default::default()
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) -> SelectRender {
        self.area = area;
        let line = if self.value.is_empty() {
            Line::from(Span::styled(&self.placeholder, self.theme.placeholder))
        } else {
            Line::from(Span::styled(&self.value, self.theme.field))
        };
        Paragraph::new(line).render(area, buf);

        let cursor = self.focused.then(|| {
            let x = area.x.saturating_add(self.cursor_offset());
            Position::new(x.min(area.right().saturating_sub(1)), area.y)
        });
        SelectRender { cursor }
    }
}
