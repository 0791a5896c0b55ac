use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use std::ops::BitOrAssign;
use std::sync::Arc;

use crate::options::SelectOptions;
use crate::theme::ColorTheme;

/// Result of rendering a SelectWidget
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectRender {
    /// Where the terminal cursor should be shown, if anywhere
    pub cursor: Option<Position>,
}

impl BitOrAssign for SelectRender {
    fn bitor_assign(&mut self, rhs: Self) {
        self.cursor = rhs.cursor.or(self.cursor);
    }
}

/// Trait for the dropdown's TUI widgets
pub trait SelectWidget: Sized {
    /// Create a widget from options and theme
    fn from_options(options: &SelectOptions, theme: Arc<ColorTheme>) -> Self;

    /// Render the widget to the buffer
    fn render(&mut self, area: Rect, buf: &mut Buffer) -> SelectRender;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_cursor_wins() {
        let mut res = SelectRender {
            cursor: Some(Position::new(1, 1)),
        };
        res |= SelectRender::default();
        assert_eq!(res.cursor, Some(Position::new(1, 1)));
        res |= SelectRender {
            cursor: Some(Position::new(4, 2)),
        };
        assert_eq!(res.cursor, Some(Position::new(4, 2)));
    }
}
