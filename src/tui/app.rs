use std::sync::Arc;

use color_eyre::eyre::{Result, bail};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::prelude::Backend;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Widget};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

use super::Event;
use super::Tui;
use super::button::Button;
use super::event::Action;
use super::option_list::{OptionList, Row};
use super::text_field::TextField;
use super::widget::{SelectRender, SelectWidget};
use crate::select::{FocusCause, Focusable, Select, SelectHandlers, SelectMessage};
use crate::theme::ColorTheme;
use crate::{SelectOption, SelectOptions};

/// Width of each button, label plus padding
const BUTTON_WIDTH: u16 = 3;

/// Application state of the dropdown's TUI
///
/// The application owns the selected value: it receives the widget's change requests and
/// writes them back into the props, like any caller of [`Select`] would.
pub struct App {
    /// The dropdown state machine
    pub select: Select,
    messages: UnboundedReceiver<SelectMessage>,
    /// Whether the application should quit
    pub should_quit: bool,
    /// Where the terminal cursor goes after rendering
    pub cursor_pos: Option<Position>,

    /// Text field widget
    pub field: TextField,
    /// Clear button widget
    pub clear_button: Button,
    /// Open button widget
    pub open_button: Button,
    /// Option list widget
    pub option_list: OptionList,
    /// Color theme
    pub theme: Arc<ColorTheme>,
    /// Configuration options
    pub options: SelectOptions,
    /// Area of the field line, border included
    field_area: Rect,
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut res = SelectRender::default();
        let has_border = !self.options.no_border;
        let focused = self.select.is_focused();

        let field_height = if has_border { 3 } else { 1 };
        let [field_area, list_area] =
            Layout::vertical([Constraint::Length(field_height), Constraint::Fill(1)]).areas(area);
        self.field_area = field_area;

        let root_style = self
            .theme
            .root_style(self.select.root_classes(), self.select.props.class_name.is_some());
        buf.set_style(field_area, root_style);

        let mut block = Block::default();
        if has_border {
            let mut border_style = self.theme.border;
            if focused {
                border_style = border_style.patch(self.theme.focused);
            }
            block = block.borders(Borders::ALL).border_style(border_style);
        }
        // the count sits in the bottom border, there is no room for it without one
        if has_border && focused && !self.options.no_info {
            let info = format!(
                " {}/{} ",
                self.option_list.rows.len(),
                self.select.props.options.len()
            );
            block = block.title_bottom(Line::from(info).style(self.theme.info).alignment(Alignment::Right));
        }
        let inner = block.inner(field_area);
        block.render(field_area, buf);

        let [value_area, clear_area, open_area] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(BUTTON_WIDTH),
            Constraint::Length(BUTTON_WIDTH),
        ])
        .areas(inner);

        res |= self.field.render(value_area, buf);
        res |= self.clear_button.render(clear_area, buf);
        res |= self.open_button.render(open_area, buf);

        if focused {
            res |= self.option_list.render(list_area, buf);
        } else {
            self.option_list.hide();
        }

        self.cursor_pos = res.cursor;
    }
}

impl App {
    /// Creates the application from the options and the option list
    pub fn from_options(options: SelectOptions, theme: Arc<ColorTheme>, choices: Vec<SelectOption>) -> Self {
        let (tx, rx) = unbounded_channel();
        let select = Select::new(options.props(choices), SelectHandlers::channel(tx));
        let mut app = Self {
            select,
            messages: rx,
            should_quit: false,
            cursor_pos: None,
            field: TextField::from_options(&options, theme.clone()),
            clear_button: Button::clear(&options, theme.clone()),
            open_button: Button::open(&options, theme.clone()),
            option_list: OptionList::from_options(&options, theme.clone()),
            theme,
            options,
            field_area: Rect::default(),
        };
        if app.options.open {
            app.select.open(&mut app.field);
        }
        app.update();
        app
    }

    /// The currently selected option
    pub fn selected(&self) -> Option<&SelectOption> {
        self.select.selected_option()
    }

    /// Applies the widget's pending notifications, then refreshes what the widgets show
    pub fn update(&mut self) {
        while let Ok(msg) = self.messages.try_recv() {
            match msg {
                SelectMessage::Change(value) => {
                    debug!("value changed: {:?} -> {:?}", self.select.props.value, value);
                    self.select.props.value = value;
                }
                SelectMessage::Focus(event) => debug!("focused ({:?})", event.cause),
                SelectMessage::Blur(event) => debug!("blurred ({:?})", event.cause),
            }
        }

        self.field.placeholder = self.select.displayed_placeholder().to_owned();
        self.field.set_value(self.select.displayed_value());

        self.option_list.rows = if self.select.is_focused() {
            self.select
                .visible_options()
                .into_iter()
                .map(|option| Row {
                    option: option.clone(),
                    classes: self.select.row_classes(option),
                })
                .collect()
        } else {
            Vec::new()
        };
    }

    /// Handles one event coming from the terminal
    pub fn handle_event<B: Backend>(&mut self, tui: &mut Tui<B>, event: &Event) -> Result<()>
    where
        B::Error: Send + Sync + 'static,
    {
        match event {
            Event::Render => {
                tui.draw(|f| {
                    f.render_widget(&mut *self, f.area());
                    if let Some(pos) = self.cursor_pos {
                        f.set_cursor_position(pos);
                    }
                })?;
            }
            Event::Heartbeat | Event::Resize => (),
            Event::Redraw => {
                tui.clear()?;
            }
            Event::Quit => {
                tui.exit()?;
                self.should_quit = true;
            }
            Event::Error(msg) => {
                tui.exit()?;
                bail!(msg.to_owned());
            }
            Event::Action(act) => {
                for evt in self.handle_action(act) {
                    tui.event_tx.send(evt)?;
                }
            }
            Event::Key(key) => {
                for evt in self.handle_key(key) {
                    tui.event_tx.send(evt)?;
                }
            }
            Event::Paste(text) => {
                self.edit(|field| field.insert_str(text));
            }
            Event::Mouse(mouse_event) => {
                self.handle_mouse(mouse_event);
            }
            Event::FocusLost => {
                self.select.close(&mut self.field, FocusCause::Terminal);
            }
            Event::FocusGained => {
                debug!("terminal focus gained");
            }
        };
        self.update();

        Ok(())
    }

    /// Maps a key to the events it triggers
    pub fn handle_key(&mut self, key: &KeyEvent) -> Vec<Event> {
        debug!("key event: {:?}", key);

        if let Some(act) = self.options.keymap.get(key) {
            debug!("{act:?}");
            return act.iter().map(|a| Event::Action(a.clone())).collect();
        }
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                vec![Event::Action(Action::AddChar(c))]
            }
            _ => vec![],
        }
    }

    /// Runs an action, returning the events it triggers
    pub fn handle_action(&mut self, act: &Action) -> Vec<Event> {
        use Action::*;
        match act {
            Abort | Accept => {
                self.should_quit = true;
            }
            AddChar(c) => self.edit(|field| field.insert(*c)),
            BackwardChar => self.edit(TextField::move_backward),
            BackwardDeleteChar => self.edit(|field| {
                field.delete_backward();
            }),
            BackwardKillWord => self.edit(|field| {
                field.delete_backward_word();
            }),
            BackwardWord => self.edit(TextField::move_backward_word),
            BeginningOfLine => self.edit(TextField::move_to_start),
            Blur => self.select.close(&mut self.field, FocusCause::Programmatic),
            Clear => self.select.clear(),
            DeleteChar => self.edit(|field| {
                field.delete_forward();
            }),
            EndOfLine => self.edit(TextField::move_to_end),
            ForwardChar => self.edit(TextField::move_forward),
            ForwardWord => self.edit(TextField::move_forward_word),
            Ignore => (),
            KillLine => self.edit(|field| {
                field.delete_to_end();
            }),
            KillWord => self.edit(|field| {
                field.delete_forward_word();
            }),
            Open => self.select.open(&mut self.field),
            Redraw => return vec![Event::Redraw],
            SetQuery(query) => self.edit(|field| field.set_value(query)),
            UnixLineDiscard => self.edit(|field| {
                field.delete_to_beginning();
            }),
            UnixWordRubout => self.edit(|field| {
                field.delete_backward_to_whitespace();
            }),
            Yank => self.edit(TextField::yank),
        }
        vec![]
    }

    /// Applies `f` to the field while it has focus, and reports the text if it changed
    fn edit<F: FnOnce(&mut TextField)>(&mut self, f: F) {
        if !self.field.is_focused() {
            trace!("field not focused, ignoring edit");
            return;
        }
        let before = self.field.value().to_owned();
        f(&mut self.field);
        if self.field.value() != before {
            self.select.handle_filter(self.field.value());
        }
    }

    /// Routes a pointer event in the order a browser would dispatch it
    ///
    /// A press on a row commits it before the field is blurred, so the pick is never lost to
    /// the list closing.
    pub fn handle_mouse(&mut self, mouse_event: &MouseEvent) {
        if self.options.no_mouse {
            return;
        }
        let pos = Position {
            x: mouse_event.column,
            y: mouse_event.row,
        };

        match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(row) = self.option_list.row_at(pos) {
                    let option = row.option.clone();
                    self.select.commit(&option, &mut self.field);
                } else if self.clear_button.contains(pos) {
                    self.select.close(&mut self.field, FocusCause::Pointer);
                    self.clear_button.press();
                } else if self.open_button.contains(pos) {
                    self.select.close(&mut self.field, FocusCause::Pointer);
                    self.open_button.press();
                } else if self.field_area.contains(pos) {
                    if let Some(event) = self.field.focus(FocusCause::Pointer) {
                        self.select.handle_focus(event);
                    }
                } else {
                    self.select.close(&mut self.field, FocusCause::Pointer);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.clear_button.release(pos) {
                    self.select.clear();
                }
                if self.open_button.release(pos) {
                    self.select.open(&mut self.field);
                }
            }
            _ => (),
        }
    }
}
