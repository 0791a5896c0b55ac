//! Styling hooks of the widget.
//!
//! The names are kept stable so that themes written against them keep working; the theme maps
//! each modifier onto a terminal style.

/// Root container
pub const ROOT: &str = "Select";
/// Root modifier while disabled
pub const ROOT_DISABLED: &str = "Select_disabled";
/// Root modifier while the field has focus
pub const ROOT_FOCUS: &str = "Select_focus";
/// The text field
pub const VALUE: &str = "SelectValue";
/// Container of the two buttons
pub const ACTIONS: &str = "SelectActions";
/// Any of the two buttons
pub const ACTION: &str = "SelectAction";
/// The clear button
pub const ACTION_CLEAR: &str = "SelectActionClear";
/// The open button
pub const ACTION_OPEN: &str = "SelectActionOpen";
/// Container of the option rows
pub const OPTIONS: &str = "SelectOptions";
/// One option row
pub const OPTION: &str = "SelectOption";
/// Row modifier for disabled options
pub const OPTION_DISABLED: &str = "SelectOption_disabled";
/// Row modifier for the option matching the current value
pub const OPTION_SELECTED: &str = "SelectOption_selected";

/// State modifiers of the root container
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RootClasses {
    /// The widget is disabled
    pub disabled: bool,
    /// The field has focus
    pub focused: bool,
}

impl RootClasses {
    /// Space separated class list, with the caller's extra class right after the base name
    pub fn class_names(&self, extra: Option<&str>) -> String {
        join([
            Some(ROOT),
            extra,
            self.disabled.then_some(ROOT_DISABLED),
            self.focused.then_some(ROOT_FOCUS),
        ])
    }
}

/// State modifiers of an option row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowClasses {
    /// The option is flagged as disabled
    pub disabled: bool,
    /// The option's value equals the current value
    pub selected: bool,
}

impl RowClasses {
    /// Space separated class list
    pub fn class_names(&self) -> String {
        join([
            Some(OPTION),
            self.disabled.then_some(OPTION_DISABLED),
            self.selected.then_some(OPTION_SELECTED),
        ])
    }
}

/// Joins the present, non-empty names with a single space
pub fn join<'a>(names: impl IntoIterator<Item = Option<&'a str>>) -> String {
    names
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
