use crossterm::event::KeyEvent;

use crate::tui::Event;

/// What the dropdown ended with
#[derive(Debug, Clone)]
pub struct SelectOutput {
    /// The selected value when the program ended, if any
    pub value: Option<String>,
    /// Label of the selected option
    pub label: Option<String>,
    /// The event that made the dropdown quit
    pub final_event: Event,
    /// The last key that was pressed
    pub final_key: KeyEvent,
    /// Whether the user aborted
    ///
    /// An aborted run still carries the value that was selected at that time.
    pub is_abort: bool,
}
