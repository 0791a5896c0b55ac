use crossterm::event::{KeyEvent, MouseEvent};

/// Events flowing from the terminal task into the application
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Quit the application
    Quit,
    /// An error occurred while reading the terminal
    Error(String),
    /// Render the UI
    Render,
    /// Timer tick event
    Heartbeat,
    /// A key was pressed
    Key(KeyEvent),
    /// Text was pasted (bracketed paste)
    Paste(String),
    /// A mouse event occurred
    Mouse(MouseEvent),
    /// The terminal window gained focus
    FocusGained,
    /// The terminal window lost focus
    FocusLost,
    /// The terminal was resized
    Resize,
    /// Clear the terminal and draw again
    Redraw,
    /// An action was triggered
    Action(Action),
}

/// Actions a key can be bound to
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Action {
    /// Abort and exit without a value
    Abort,
    /// Exit with the current value
    Accept,
    /// Add a character to the field
    AddChar(char),
    /// Move cursor backward one character
    BackwardChar,
    /// Delete character before cursor
    BackwardDeleteChar,
    /// Delete word before cursor
    BackwardKillWord,
    /// Move cursor backward one word
    BackwardWord,
    /// Move cursor to beginning of line
    BeginningOfLine,
    /// Give the focus up, as if the pointer was pressed outside of the widget
    Blur,
    /// Unset the selection, same as the clear button
    Clear,
    /// Delete character under cursor
    DeleteChar,
    /// Move cursor to end of line
    EndOfLine,
    /// Move cursor forward one character
    ForwardChar,
    /// Move cursor forward one word
    ForwardWord,
    /// Ignore the key
    Ignore,
    /// Delete from cursor to end of line
    KillLine,
    /// Delete word after cursor
    KillWord,
    /// Focus the field, same as the open button
    Open,
    /// Redraw the screen
    Redraw,
    /// Replace the field's text
    SetQuery(String),
    /// Discard line (unix-style)
    UnixLineDiscard,
    /// Delete word backward (unix-style)
    UnixWordRubout,
    /// Insert the last killed text
    Yank,
}

/// Parses an action string such as `accept` or `set-query(foo)` into an Action
pub fn parse_action(raw_action: &str) -> Option<Action> {
    let parts = raw_action.split_once([':', '(']);
    let (action, arg) = match parts {
        None => (raw_action, None),
        Some((act, "")) => (act, None),
        Some((act, a)) => (act, Some(a.strip_suffix(')').unwrap_or(a).to_string())),
    };
    debug!("parse_action: action={action}, arg={arg:?}");

    use Action::*;
    match action {
        "abort" => Some(Abort),
        "accept" => Some(Accept),
        "backward-char" => Some(BackwardChar),
        "backward-delete-char" => Some(BackwardDeleteChar),
        "backward-kill-word" => Some(BackwardKillWord),
        "backward-word" => Some(BackwardWord),
        "beginning-of-line" => Some(BeginningOfLine),
        "blur" | "close" => Some(Blur),
        "clear" | "clear-selection" => Some(Clear),
        "delete-char" => Some(DeleteChar),
        "end-of-line" => Some(EndOfLine),
        "forward-char" => Some(ForwardChar),
        "forward-word" => Some(ForwardWord),
        "ignore" => Some(Ignore),
        "kill-line" => Some(KillLine),
        "kill-word" => Some(KillWord),
        "open" | "focus" => Some(Open),
        "redraw" => Some(Redraw),
        "set-query" => Some(SetQuery(arg.unwrap_or_default())),
        "unix-line-discard" => Some(UnixLineDiscard),
        "unix-word-rubout" => Some(UnixWordRubout),
        "yank" => Some(Yank),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_actions() {
        assert_eq!(parse_action("accept"), Some(Action::Accept));
        assert_eq!(parse_action("clear-selection"), Some(Action::Clear));
        assert_eq!(parse_action("open"), Some(Action::Open));
        assert_eq!(parse_action("unknown"), None);
    }

    #[test]
    fn action_with_arg() {
        assert_eq!(parse_action("set-query(foo)"), Some(Action::SetQuery(String::from("foo"))));
        assert_eq!(parse_action("set-query:bar"), Some(Action::SetQuery(String::from("bar"))));
        assert_eq!(parse_action("set-query"), Some(Action::SetQuery(String::new())));
    }

    #[test]
    fn arg_keeps_inner_parens() {
        assert_eq!(
            parse_action("set-query(f(x))"),
            Some(Action::SetQuery(String::from("f(x)")))
        );
    }
}
