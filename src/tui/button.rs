use std::sync::Arc;

use ratatui::layout::Position;
use ratatui::{prelude::*, widgets::Paragraph};

use crate::SelectOptions;
use crate::classes;
use crate::theme::{ColorTheme, DEFAULT_THEME};
use crate::tui::widget::{SelectRender, SelectWidget};

/// Visual variant of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    /// Plain button
    #[default]
    Default,
    /// Destructive-looking button, used to clear the selection
    Clear,
}

/// A clickable label
///
/// A click is a press followed by a release inside the same button.
pub struct Button {
    /// Text drawn between the padding
    pub label: String,
    /// Picks the style
    pub variant: ButtonVariant,
    /// Extra class name, next to `SelectAction`
    pub class: &'static str,
    /// Drawn with the disabled style
    pub disabled: bool,
    /// Button styles
    pub theme: Arc<ColorTheme>,
    area: Rect,
    pressed: bool,
}

impl Button {
    /// Creates an unpressed button
    pub fn new(label: impl Into<String>, variant: ButtonVariant, class: &'static str) -> Self {
        Self {
            label: label.into(),
            variant,
            class,
            disabled: false,
            theme: Arc::new(*DEFAULT_THEME),
            area: Rect::default(),
            pressed: false,
        }
    }

    /// Sets what the button shows and its styling hooks
    #[must_use]
    pub fn labeled(mut self, label: impl Into<String>, variant: ButtonVariant, class: &'static str) -> Self {
        self.label = label.into();
        self.variant = variant;
        self.class = class;
        self
    }

    /// The clear button, `✕`
    pub fn clear(options: &SelectOptions, theme: Arc<ColorTheme>) -> Self {
        Self::from_options(options, theme).labeled("✕", ButtonVariant::Clear, classes::ACTION_CLEAR)
    }

    /// The open button, `>`
    pub fn open(options: &SelectOptions, theme: Arc<ColorTheme>) -> Self {
        Self::from_options(options, theme).labeled(">", ButtonVariant::Default, classes::ACTION_OPEN)
    }

    /// Class names of the button
    pub fn class_names(&self) -> String {
        classes::join([Some(classes::ACTION), Some(self.class)])
    }

    /// Where the button was last drawn
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Whether `pos` is inside the last drawn area
    pub fn contains(&self, pos: Position) -> bool {
        self.area.contains(pos)
    }

    /// Whether a press is waiting for its release
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Pointer went down on the button
    pub fn press(&mut self) {
        self.pressed = true;
    }

    /// Pointer went up at `pos`, returns true if that completes a click
    pub fn release(&mut self, pos: Position) -> bool {
        let clicked = self.pressed && self.contains(pos);
        self.pressed = false;
        clicked
    }

    fn style(&self) -> Style {
        let mut style = self.theme.button;
        if self.variant == ButtonVariant::Clear {
            style = style.patch(self.theme.button_clear);
        }
        if self.pressed {
            style = style.patch(self.theme.button_pressed);
        }
        if self.disabled {
            style = style.patch(self.theme.disabled);
        }
        style
    }
}

impl SelectWidget for Button {
    fn from_options(options: &SelectOptions, theme: Arc<ColorTheme>) -> Self {
        Self {
            disabled: options.disabled,
            theme,
            ..Self::new("", ButtonVariant::Default, "")
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) -> SelectRender {
        self.area = area;
        Paragraph::new(format!(" {} ", self.label))
            .style(self.style())
            .alignment(Alignment::Center)
            .render(area, buf);
        SelectRender::default()
    }
}
