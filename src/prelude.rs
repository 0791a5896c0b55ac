//! Convenience re-exports of commonly used types.
//!
//! `use dropsel::prelude::*;` brings in everything needed to configure and run the dropdown.

pub use crate::options::{SelectOptions, SelectOptionsBuilder};
pub use crate::reader::OptionReader;
pub use crate::select::{
    FocusCause, FocusEvent, Focusable, Select, SelectHandlers, SelectMessage, SelectProps, SelectPropsBuilder,
};
pub use crate::tui::{Event, event::Action};
pub use crate::*;
pub use std::sync::Arc;
