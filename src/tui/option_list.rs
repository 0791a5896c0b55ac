use std::sync::Arc;

use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem};

use crate::classes::{self, RowClasses};
use crate::{SelectOption, SelectOptions};
use crate::theme::{ColorTheme, DEFAULT_THEME};
use crate::tui::widget::{SelectRender, SelectWidget};

/// A visible row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// The option this row draws
    pub option: SelectOption,
    /// Row modifiers, also used to pick the style
    pub classes: RowClasses,
}

/// The rows under the field
///
/// There is no scrolling, rows that do not fit are not drawn.
/// Pointer hits are resolved against the rows of the last frame, not against `rows`.
pub struct OptionList {
    /// Rows to draw on the next frame
    pub rows: Vec<Row>,
    /// Row styles
    pub theme: Arc<ColorTheme>,
    /// Drawn before the selected row's label, blank padding on the others
    pub marker: String,
    drawn: Vec<Row>,
    area: Rect,
}

impl Default for OptionList {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            theme: Arc::new(*DEFAULT_THEME),
            marker: String::from("✓ "),
            drawn: Vec::new(),
            area: Rect::default(),
        }
    }
}

impl OptionList {
    /// Class names of the list container
    pub fn class_names(&self) -> &'static str {
        classes::OPTIONS
    }

    /// Where the list was last drawn
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Forgets the drawn area, so that no row can be hit
    pub fn hide(&mut self) {
        self.area = Rect::default();
        self.drawn.clear();
    }

    /// Number of rows that fit in the last drawn area
    pub fn displayed(&self) -> usize {
        self.drawn.len().min(self.area.height.into())
    }

    /// The row under `pos`, if it was drawn
    pub fn row_at(&self, pos: Position) -> Option<&Row> {
        if !self.area.contains(pos) {
            return None;
        }
        let idx = usize::from(pos.y - self.area.y);
        self.drawn.get(idx).filter(|_| idx < self.displayed())
    }

    fn item<'a>(&self, row: &'a Row) -> ListItem<'a> {
        let prefix = if row.classes.selected {
            self.marker.clone()
        } else {
            " ".repeat(unicode_display_width::width(&self.marker) as usize)
        };
        ListItem::new(Line::from(vec![Span::raw(prefix), Span::raw(row.option.label.as_str())]))
            .style(self.theme.row_style(row.classes))
    }
}

impl SelectWidget for OptionList {
    fn from_options(_options: &SelectOptions, theme: Arc<ColorTheme>) -> Self {
        Self {
            theme,
            ..Default::default()
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) -> SelectRender {
        self.area = area;
        self.drawn.clone_from(&self.rows);
        let items: Vec<ListItem> = self.rows.iter().map(|row| self.item(row)).collect();
        Widget::render(List::new(items), area, buf);
        SelectRender::default()
    }
}
