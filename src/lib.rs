//! Dropsel is a searchable dropdown selector for the terminal.
//!
//! The widget is a text field with a list of options under it. While the field has focus the
//! typed text filters the options (case-insensitive substring match on label or value) and a
//! pointer press on a row commits that option. Two buttons next to the field clear the
//! selection or move focus back into the field.
//!
//! The selection itself is owned by the caller: [`select::Select`] never writes the selected
//! value, it only emits [`select::SelectMessage::Change`] requests.
//!
//! # Examples
//!
//! ```no_run
//! use dropsel::prelude::*;
//!
//! let options = SelectOptionsBuilder::default()
//!     .placeholder(String::from("Pick a shell"))
//!     .search_placeholder(Some(String::from("Search...")))
//!     .build()
//!     .unwrap();
//!
//! let choices = vec![
//!     SelectOption::new("Bourne Again SHell", "bash"),
//!     SelectOption::new("Z shell", "zsh"),
//!     SelectOption::new("Friendly Interactive SHell", "fish"),
//! ];
//!
//! let output = Dropsel::run_with(options, choices).unwrap();
//! if let Some(value) = output.value {
//!     println!("{value}");
//! }
//! ```

#![warn(missing_docs)]

#[macro_use]
extern crate log;

pub mod binds;
pub mod classes;
pub mod filter;
pub mod option;
pub mod options;
mod output;
pub mod prelude;
pub mod reader;
mod runner;
pub mod select;
pub mod theme;
pub mod tui;

#[cfg(feature = "cli")]
pub mod completions;

pub use crate::option::SelectOption;
pub use crate::options::SelectOptions;
pub use crate::output::SelectOutput;
pub use crate::runner::Dropsel;
