//! Reading options from a data source (stdin, a file, or command line arguments).
//!
//! Options are read in full before the widget is shown.

use std::io::BufRead;

use regex::Regex;

use crate::SelectOptions;
use crate::option::{OptionParseError, SelectOption};

const READ_BUFFER_SIZE: usize = 1024;

/// Reads options, one per line, or as a JSON array
#[derive(Debug, Clone)]
pub struct OptionReader {
    delimiter: Regex,
    line_ending: u8,
    json: bool,
}

impl Default for OptionReader {
    fn default() -> Self {
        Self {
            delimiter: Regex::new(r"\t").unwrap(),
            line_ending: b'\n',
            json: false,
        }
    }
}

impl OptionReader {
    /// Creates a reader from the options
    pub fn from_options(options: &SelectOptions) -> Self {
        Self {
            delimiter: options.delimiter.clone(),
            line_ending: if options.read0 { b'\0' } else { b'\n' },
            json: options.json,
        }
    }

    /// Sets the field delimiter regex
    pub fn delimiter(mut self, delimiter: Regex) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Enables reading null-terminated lines instead of newline-terminated
    pub fn read0(mut self, enable: bool) -> Self {
        self.line_ending = if enable { b'\0' } else { b'\n' };
        self
    }

    /// Enables JSON input
    pub fn json(mut self, enable: bool) -> Self {
        self.json = enable;
        self
    }

    /// Reads every option from `source`
    ///
    /// Blank lines are skipped. The first malformed line aborts the read.
    pub fn read(&self, mut source: impl BufRead) -> Result<Vec<SelectOption>, OptionParseError> {
        if self.json {
            let res: Vec<SelectOption> = serde_json::from_reader(source)?;
            debug!("read {} options from json", res.len());
            return Ok(res);
        }

        let mut res = Vec::new();
        let mut buffer = Vec::with_capacity(READ_BUFFER_SIZE);
        let mut line_no = 0;
        loop {
            buffer.clear();
            if source.read_until(self.line_ending, &mut buffer)? == 0 {
                break;
            }
            line_no += 1;
            // Strip line endings
            if buffer.ends_with(b"\r\n") {
                buffer.truncate(buffer.len() - 2);
            } else if buffer.ends_with(&[self.line_ending]) {
                buffer.pop();
            }
            let line = String::from_utf8_lossy(&buffer);
            if line.trim().is_empty() {
                continue;
            }
            trace!("got option line {line_no}: {line:?}");
            res.push(SelectOption::parse_line(&line, &self.delimiter, line_no)?);
        }
        debug!("read {} options", res.len());
        Ok(res)
    }

    /// Parses each argument as one input line
    pub fn of_args<S: AsRef<str>>(&self, args: &[S]) -> Result<Vec<SelectOption>, OptionParseError> {
        args.iter()
            .enumerate()
            .map(|(idx, arg)| SelectOption::parse_line(arg.as_ref(), &self.delimiter, idx + 1))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn reads_lines() {
        let input = "Alpha\ta\nBeta\tb\tdisabled\r\n\nGamma\n";
        let opts = OptionReader::default().read(Cursor::new(input)).unwrap();
        assert_eq!(
            opts,
            vec![
                SelectOption::new("Alpha", "a"),
                SelectOption::new("Beta", "b").disabled(true),
                SelectOption::new("Gamma", "Gamma"),
            ]
        );
    }

    #[test]
    fn missing_trailing_newline() {
        let opts = OptionReader::default().read(Cursor::new("Alpha\ta")).unwrap();
        assert_eq!(opts, vec![SelectOption::new("Alpha", "a")]);
    }

    #[test]
    fn read0_keeps_newlines_in_labels() {
        let input = "Two\nlines\tx\0Beta\tb\0";
        let opts = OptionReader::default().read0(true).read(Cursor::new(input)).unwrap();
        assert_eq!(opts[0].label, "Two\nlines");
        assert_eq!(opts[1].value, "b");
    }

    #[test]
    fn error_reports_line_number() {
        let input = "Alpha\ta\n\nBeta\tb\tsometimes\n";
        let err = OptionReader::default().read(Cursor::new(input)).unwrap_err();
        assert_eq!(err.to_string(), "line 3: invalid disabled flag \"sometimes\"");
    }

    #[test]
    fn reads_json() {
        let input = r#"[{"label":"Alpha","value":"a"},{"label":"Beta","value":"b","disabled":true}]"#;
        let opts = OptionReader::default().json(true).read(Cursor::new(input)).unwrap();
        assert_eq!(opts.len(), 2);
        assert!(opts[1].disabled);
    }

    #[test]
    fn bad_json() {
        let err = OptionReader::default().json(true).read(Cursor::new("{")).unwrap_err();
        assert!(matches!(err, OptionParseError::Json(_)));
    }

    #[test]
    fn args_with_custom_delimiter() {
        let reader = OptionReader::default().delimiter(Regex::new("=").unwrap());
        let opts = reader.of_args(&["Alpha=a", "Beta"]).unwrap();
        assert_eq!(opts, vec![SelectOption::new("Alpha", "a"), SelectOption::new("Beta", "Beta")]);
    }
}
