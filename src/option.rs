//! A single selectable entry and how it is parsed from a line of text.

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One selectable entry of the dropdown
///
/// `value` identifies the option and is what gets reported on selection, `label` is what the
/// user sees. Uniqueness of `value` inside a list is assumed, never checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Human readable text
    pub label: String,
    /// Identifier reported to the caller
    pub value: String,
    /// Only changes how the row is drawn, the row can still be picked
    #[serde(default)]
    pub disabled: bool,
}

/// Errors raised while turning text input into options
#[derive(Error, Debug)]
pub enum OptionParseError {
    /// The line had no label
    #[error("line {0}: missing label")]
    MissingLabel(usize),
    /// The third column was not a recognised flag
    #[error("line {line}: invalid disabled flag {flag:?}")]
    InvalidFlag {
        /// 1-based line number
        line: usize,
        /// The offending text
        flag: String,
    },
    /// The input was not a JSON array of options
    #[error("Error parsing options as json: {0}")]
    Json(#[from] serde_json::Error),
    /// The input could not be read
    #[error("Error reading options: {0}")]
    Io(#[from] std::io::Error),
}

impl SelectOption {
    /// Creates an enabled option
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            disabled: false,
        }
    }

    /// Sets the disabled flag
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Parses `label<delim>value<delim>flag`
    ///
    /// The value falls back to the label when the column is missing or empty. The flag column
    /// accepts `disabled`, `true`, `yes`, `1` and their negations.
    pub fn parse_line(line: &str, delimiter: &Regex, line_no: usize) -> Result<Self, OptionParseError> {
        let mut parts = delimiter.splitn(line, 3);
        let label = parts.next().unwrap_or_default();
        if label.is_empty() {
            return Err(OptionParseError::MissingLabel(line_no));
        }
        let value = match parts.next() {
            Some(v) if !v.is_empty() => v,
            _ => label,
        };
        let disabled = match parts.next().map(str::trim) {
            None | Some("" | "enabled" | "false" | "no" | "0") => false,
            Some("disabled" | "true" | "yes" | "1") => true,
            Some(flag) => {
                return Err(OptionParseError::InvalidFlag {
                    line: line_no,
                    flag: flag.to_string(),
                });
            }
        };
        Ok(Self::new(label, value).disabled(disabled))
    }
}

impl From<&str> for SelectOption {
    fn from(value: &str) -> Self {
        Self::new(value, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab() -> Regex {
        Regex::new("\t").unwrap()
    }

    #[test]
    fn label_only() {
        let opt = SelectOption::parse_line("Alpha", &tab(), 1).unwrap();
        assert_eq!(opt, SelectOption::new("Alpha", "Alpha"));
    }

    #[test]
    fn label_and_value() {
        let opt = SelectOption::parse_line("Alpha\ta", &tab(), 1).unwrap();
        assert_eq!(opt.label, "Alpha");
        assert_eq!(opt.value, "a");
        assert!(!opt.disabled);
    }

    #[test]
    fn empty_value_column_falls_back_to_label() {
        let opt = SelectOption::parse_line("Alpha\t\tdisabled", &tab(), 1).unwrap();
        assert_eq!(opt.value, "Alpha");
        assert!(opt.disabled);
    }

    #[test]
    fn value_keeps_extra_delimiters_out() {
        let opt = SelectOption::parse_line("Beta\tb\tyes", &tab(), 1).unwrap();
        assert_eq!(opt, SelectOption::new("Beta", "b").disabled(true));
    }

    #[test]
    fn custom_delimiter() {
        let delim = Regex::new(r"\s*\|\s*").unwrap();
        let opt = SelectOption::parse_line("Gamma | g", &delim, 1).unwrap();
        assert_eq!(opt, SelectOption::new("Gamma", "g"));
    }

    #[test]
    fn missing_label() {
        let err = SelectOption::parse_line("\tvalue", &tab(), 3).unwrap_err();
        assert!(matches!(err, OptionParseError::MissingLabel(3)));
    }

    #[test]
    fn invalid_flag() {
        let err = SelectOption::parse_line("A\ta\tmaybe", &tab(), 7).unwrap_err();
        let OptionParseError::InvalidFlag { line, flag } = err else {
            panic!("expected an invalid flag error");
        };
        assert_eq!(line, 7);
        assert_eq!(flag, "maybe");
    }

    #[test]
    fn json_defaults_disabled() {
        let opt: SelectOption = serde_json::from_str(r#"{"label":"Alpha","value":"a"}"#).unwrap();
        assert!(!opt.disabled);
    }
}
