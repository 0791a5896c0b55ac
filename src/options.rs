//! Configuration options for dropsel.
//!
//! This module provides the `SelectOptions` struct and builder, which configure the widget's
//! props (value, placeholders, disabled state), how options are read, and the terminal UI.

use derive_builder::Builder;
use regex::Regex;

use crate::binds::KeyMap;
use crate::select::{SelectProps, SelectPropsBuilder};

/// Expands `\t`, `\n`, `\r`, `\\` and `\xNN` escapes
///
/// Unknown escapes are kept verbatim.
pub(crate) fn unescape_delimiter(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('x') => {
                let hex: String = chars.by_ref().take(2).collect();
                match u8::from_str_radix(&hex, 16) {
                    Ok(byte) if hex.len() == 2 => result.push(char::from(byte)),
                    _ => {
                        result.push_str("\\x");
                        result.push_str(&hex);
                    }
                }
            }
            Some('t') => result.push('\t'),
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('\\') => result.push('\\'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}

#[cfg(feature = "cli")]
/// Custom value parser for delimiter that handles escape sequences
fn parse_delimiter_value(s: &str) -> Result<Regex, String> {
    let unescaped = unescape_delimiter(s);
    Regex::new(&unescaped).map_err(|e| format!("Invalid regex delimiter: {}", e))
}

/// dropsel - searchable dropdown selector
///
/// Reads options from stdin (or arguments), lets you search and pick one with the mouse,
/// and prints its value.
///
/// Each input line is `label<TAB>value<TAB>disabled`, the last two columns being optional.
#[derive(Builder, Clone, Debug)]
#[builder(build_fn(name = "final_build"))]
#[builder(default)]
#[cfg_attr(feature = "cli", derive(clap::Parser))]
#[cfg_attr(
    feature = "cli",
    command(name = "dropsel", args_override_self = true, verbatim_doc_comment, version, about)
)]
pub struct SelectOptions {
    //  --- Widget ---
    /// Initially selected value
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Widget"))]
    pub value: Option<String>,

    /// Disable the widget
    ///
    /// The field does not take focus, the clear button still works
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Widget"))]
    pub disabled: bool,

    /// Text shown in the empty field
    #[cfg_attr(feature = "cli", arg(long, default_value = "", help_heading = "Widget"))]
    pub placeholder: String,

    /// Text shown in the empty field while searching
    ///
    /// Defaults to the placeholder
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Widget"))]
    pub search_placeholder: Option<String>,

    /// Extra class name of the root container
    ///
    /// Styled with the `class` color component, e.g. `--color class:#ffaf00:bold`
    #[cfg_attr(feature = "cli", arg(long = "class", help_heading = "Widget"))]
    pub class_name: Option<String>,

    //  --- Input ---
    /// Field delimiter regex of the input lines
    #[cfg_attr(
        feature = "cli",
        arg(short, long, default_value = r"\t", value_parser = parse_delimiter_value, help_heading = "Input")
    )]
    pub delimiter: Regex,

    /// Read the options as a JSON array of `{"label", "value", "disabled"}` objects
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Input"))]
    pub json: bool,

    /// Read input delimited by ASCII NUL characters
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Input"))]
    pub read0: bool,

    /// Options given on the command line, used instead of stdin
    #[cfg_attr(feature = "cli", arg(value_name = "OPTION", help_heading = "Input"))]
    pub choices: Vec<String>,

    //  --- Interface ---
    /// Custom key bindings. A key can be bound to one or more actions (`key:action+action`)
    ///
    /// Actions: accept, abort, clear, open, blur, set-query(...), and the line editing ones
    /// (backward-char, kill-word, unix-line-discard, yank...)
    ///
    /// e.g.: `dropsel --bind 'ctrl-x:clear,ctrl-o:open'`
    #[cfg_attr(
        feature = "cli",
        arg(short, long, help_heading = "Interface", verbatim_doc_comment)
    )]
    pub bind: Vec<String>,

    /// Start with the field focused and the list open
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Interface"))]
    pub open: bool,

    /// Disable mouse
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Interface"))]
    pub no_mouse: bool,

    /// Change color theme
    ///
    /// Format: [BASE][,COMPONENT:COL[:ATTR]...]
    ///
    /// BASE: dark (default), light, molokai, 16, bw, none
    ///
    /// COMPONENT: normal, focused, disabled, class, field, placeholder, border, button, clear,
    /// pressed, option, option_disabled, option_selected, info; suffix `_bg` to set the background
    ///
    /// COL: 0-255 or #rrggbb
    ///
    /// ATTR: bold, underlined, dim, italic, reverse, crossed-out, regular
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Interface", verbatim_doc_comment))]
    pub color: Option<String>,

    //  --- Layout ---
    /// Height of the widget, in lines or percent of the terminal
    #[cfg_attr(feature = "cli", arg(long, default_value = "10", help_heading = "Layout"))]
    pub height: String,

    /// Do not draw a border around the field
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Layout"))]
    pub no_border: bool,

    /// Do not show the match count
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Layout"))]
    pub no_info: bool,

    //  --- Scripting ---
    /// Print the label instead of the value
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Scripting"))]
    pub print_label: bool,

    /// Terminate the output with a NUL character instead of a newline
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Scripting"))]
    pub print0: bool,

    /// Automatically pick the only option without showing the widget
    #[cfg_attr(feature = "cli", arg(short = '1', long, help_heading = "Scripting"))]
    pub select_1: bool,

    /// Exit immediately when there are no options
    #[cfg_attr(feature = "cli", arg(short = '0', long, help_heading = "Scripting"))]
    pub exit_0: bool,

    /// Generate shell completion script
    ///
    /// Examples: `source <(dropsel --shell bash)`
    ///
    /// Supported shells: bash, zsh, fish, powershell, elvish
    #[cfg(feature = "cli")]
    #[cfg_attr(
        feature = "cli",
        arg(long, value_name = "SHELL", help_heading = "Scripting", value_enum)
    )]
    pub shell: Option<crate::completions::Shell>,

    /// The internal (parsed) keymap
    #[cfg_attr(feature = "cli", clap(skip))]
    pub keymap: KeyMap,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            value: Default::default(),
            disabled: Default::default(),
            placeholder: Default::default(),
            search_placeholder: Default::default(),
            class_name: Default::default(),
            delimiter: Regex::new(r"\t").unwrap(),
            json: Default::default(),
            read0: Default::default(),
            choices: Default::default(),
            bind: Default::default(),
            open: Default::default(),
            no_mouse: Default::default(),
            color: Default::default(),
            height: String::from("10"),
            no_border: Default::default(),
            no_info: Default::default(),
            print_label: Default::default(),
            print0: Default::default(),
            select_1: Default::default(),
            exit_0: Default::default(),
            #[cfg(feature = "cli")]
            shell: Default::default(),
            keymap: Default::default(),
        }
    }
}

impl SelectOptionsBuilder {
    /// Builds the SelectOptions from the builder
    pub fn build(&mut self) -> Result<SelectOptions, SelectOptionsBuilderError> {
        self.final_build().map(|opts| opts.build())
    }
}

impl SelectOptions {
    /// Finalizes the options by parsing the key bindings
    pub fn build(mut self) -> Self {
        self.keymap = self.bind.iter().fold(KeyMap::default(), |mut res, part| {
            res.add_keymaps(part.split(','));
            res
        });
        self
    }

    /// The widget props these options describe, for the given option list
    pub fn props(&self, options: Vec<crate::SelectOption>) -> SelectProps {
        let mut builder = SelectPropsBuilder::default();
        builder
            .options(options)
            .disabled(self.disabled)
            .placeholder(self.placeholder.clone());
        if let Some(value) = &self.value {
            builder.value(value.clone());
        }
        if let Some(class_name) = &self.class_name {
            builder.class_name(class_name.clone());
        }
        if let Some(search) = &self.search_placeholder {
            builder.search_placeholder(search.clone());
        }
        builder.build().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SelectOption;
    use crate::tui::event::Action;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_unescape_delimiter() {
        assert_eq!(unescape_delimiter(r"\x00"), "\0");
        assert_eq!(unescape_delimiter(r"\t"), "\t");
        assert_eq!(unescape_delimiter(r"\n"), "\n");
        assert_eq!(unescape_delimiter(r"\r"), "\r");
        assert_eq!(unescape_delimiter(r"\\"), "\\");
        assert_eq!(unescape_delimiter(r"\s+"), r"\s+");
        assert_eq!(unescape_delimiter(r"\xZZ"), r"\xZZ");
        assert_eq!(unescape_delimiter(r"a\"), r"a\");
    }

    #[test]
    fn builder_defaults() {
        let opts = SelectOptionsBuilder::default().build().unwrap();
        assert_eq!(opts.height, "10");
        assert!(opts.delimiter.is_match("a\tb"));
        assert_eq!(opts.keymap, KeyMap::default());
    }

    #[test]
    fn build_folds_binds() {
        let opts = SelectOptionsBuilder::default()
            .bind(vec![String::from("ctrl-x:clear"), String::from("ctrl-o:open,enter:abort")])
            .build()
            .unwrap();
        let get = |code, mods| opts.keymap.get(&KeyEvent::new(code, mods)).cloned();
        assert_eq!(get(KeyCode::Char('x'), KeyModifiers::CONTROL), Some(vec![Action::Clear]));
        assert_eq!(get(KeyCode::Char('o'), KeyModifiers::CONTROL), Some(vec![Action::Open]));
        assert_eq!(get(KeyCode::Enter, KeyModifiers::NONE), Some(vec![Action::Abort]));
    }

    #[test]
    fn props_from_options() {
        let opts = SelectOptionsBuilder::default()
            .value(Some(String::from("b")))
            .placeholder(String::from("Pick"))
            .class_name(Some(String::from("Wide")))
            .disabled(true)
            .build()
            .unwrap();
        let props = opts.props(vec![SelectOption::new("Beta", "b")]);
        assert_eq!(props.value.as_deref(), Some("b"));
        assert_eq!(props.placeholder, "Pick");
        assert_eq!(props.class_name.as_deref(), Some("Wide"));
        assert_eq!(props.search_placeholder, None);
        assert!(props.disabled);
        assert_eq!(props.options.len(), 1);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn parse_cli() {
        use clap::Parser;
        let opts = SelectOptions::try_parse_from([
            "dropsel",
            "--value",
            "a",
            "--search-placeholder",
            "Search...",
            "--class",
            "Wide",
            "-d",
            r"\s*\|\s*",
            "--bind",
            "ctrl-x:clear",
            "Alpha | a",
            "Beta | b",
        ])
        .unwrap()
        .build();
        assert_eq!(opts.value.as_deref(), Some("a"));
        assert_eq!(opts.search_placeholder.as_deref(), Some("Search..."));
        assert_eq!(opts.class_name.as_deref(), Some("Wide"));
        assert_eq!(opts.choices, vec!["Alpha | a", "Beta | b"]);
        assert!(opts.delimiter.is_match("Alpha | a"));
        assert_eq!(
            opts.keymap.get(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            Some(&vec![Action::Clear])
        );
    }

    #[cfg(feature = "cli")]
    #[test]
    fn cli_rejects_bad_delimiter() {
        use clap::Parser;
        assert!(SelectOptions::try_parse_from(["dropsel", "-d", "("]).is_err());
    }
}
