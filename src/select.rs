//! The dropdown state machine.
//!
//! [`Select`] keeps the transient UI state (focus and the filter text) and derives from it
//! everything the view needs: the visible rows, the placeholder and the text shown in the
//! field. The selected value is part of [`SelectProps`] and belongs to the caller; picking or
//! clearing an option only emits a [`SelectMessage::Change`] request through
//! [`SelectHandlers`].

use std::sync::{Arc, Mutex, PoisonError};

use derive_builder::Builder;
use tokio::sync::mpsc::UnboundedSender;

use crate::SelectOption;
use crate::classes::{RootClasses, RowClasses};
use crate::filter;

/// What moved the focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusCause {
    /// A mouse press
    Pointer,
    /// A call to [`Focusable::focus`] or [`Focusable::blur`] from code, e.g. the open button
    Programmatic,
    /// The terminal window itself gained or lost focus
    Terminal,
}

/// Payload of focus and blur notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusEvent {
    /// What moved the focus
    pub cause: FocusCause,
}

impl FocusEvent {
    /// Creates an event for `cause`
    pub fn new(cause: FocusCause) -> Self {
        Self { cause }
    }
}

/// Notifications emitted towards the owner of the widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectMessage {
    /// The user asked for the selection to become this value, `None` meaning no selection
    Change(Option<String>),
    /// The field gained focus
    Focus(FocusEvent),
    /// The field lost focus
    Blur(FocusEvent),
}

/// Something that can take the input focus
///
/// Both methods return the event to forward when the focus actually moved, and `None` when
/// the call was a no-op (already in that state, or disabled).
pub trait Focusable {
    /// Requests the focus
    fn focus(&mut self, cause: FocusCause) -> Option<FocusEvent>;
    /// Gives the focus up
    fn blur(&mut self, cause: FocusCause) -> Option<FocusEvent>;
    /// Whether the focus is currently held
    fn is_focused(&self) -> bool;
}

type CallbackFn<T> = dyn FnMut(T) + Send;

/// A notification handler
#[derive(Clone)]
pub struct Callback<T>(Arc<Mutex<CallbackFn<T>>>);

impl<T> std::fmt::Debug for Callback<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callback").finish()
    }
}

impl<T> Callback<T> {
    /// Wraps a closure
    pub fn new<F>(f: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        Self(Arc::new(Mutex::new(f)))
    }

    pub(crate) fn call(&self, arg: T) {
        let mut callback = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        callback(arg)
    }
}

/// The three optional notification handlers
#[derive(Debug, Clone, Default)]
pub struct SelectHandlers {
    /// Called with the value the caller should store
    pub on_change: Option<Callback<Option<String>>>,
    /// Called after the field gained focus
    pub on_focus: Option<Callback<FocusEvent>>,
    /// Called after the field lost focus
    pub on_blur: Option<Callback<FocusEvent>>,
}

impl SelectHandlers {
    /// Handlers forwarding every notification into `tx`
    pub fn channel(tx: UnboundedSender<SelectMessage>) -> Self {
        let change_tx = tx.clone();
        let focus_tx = tx.clone();
        Self {
            on_change: Some(Callback::new(move |value| {
                let _ = change_tx.send(SelectMessage::Change(value));
            })),
            on_focus: Some(Callback::new(move |event| {
                let _ = focus_tx.send(SelectMessage::Focus(event));
            })),
            on_blur: Some(Callback::new(move |event| {
                let _ = tx.send(SelectMessage::Blur(event));
            })),
        }
    }

    /// Sets the change handler
    #[must_use]
    pub fn on_change<F: FnMut(Option<String>) + Send + 'static>(mut self, f: F) -> Self {
        self.on_change = Some(Callback::new(f));
        self
    }

    /// Sets the focus handler
    #[must_use]
    pub fn on_focus<F: FnMut(FocusEvent) + Send + 'static>(mut self, f: F) -> Self {
        self.on_focus = Some(Callback::new(f));
        self
    }

    /// Sets the blur handler
    #[must_use]
    pub fn on_blur<F: FnMut(FocusEvent) + Send + 'static>(mut self, f: F) -> Self {
        self.on_blur = Some(Callback::new(f));
        self
    }
}

/// Inputs of the widget, all owned by the caller
#[derive(Debug, Clone, Default, Builder)]
#[builder(default)]
pub struct SelectProps {
    /// Currently selected value
    #[builder(setter(into, strip_option))]
    pub value: Option<String>,
    /// Options, in display order
    pub options: Vec<SelectOption>,
    /// Extra class appended to the root container
    #[builder(setter(into, strip_option))]
    pub class_name: Option<String>,
    /// Disables the field and both buttons
    pub disabled: bool,
    /// Shown in the empty field while blurred
    #[builder(setter(into))]
    pub placeholder: String,
    /// Shown in the empty field while focused, falls back to `placeholder`
    #[builder(setter(into, strip_option))]
    pub search_placeholder: Option<String>,
}

/// Transient UI state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectState {
    /// The field has focus
    pub focused: bool,
    /// Text typed since the field last gained focus
    pub filter: String,
}

/// A searchable dropdown
#[derive(Debug, Default)]
pub struct Select {
    /// Caller owned inputs
    pub props: SelectProps,
    state: SelectState,
    handlers: SelectHandlers,
}

impl Select {
    /// Creates a blurred select with an empty filter
    pub fn new(props: SelectProps, handlers: SelectHandlers) -> Self {
        Self {
            props,
            state: SelectState::default(),
            handlers,
        }
    }

    /// The transient state
    pub fn state(&self) -> &SelectState {
        &self.state
    }

    /// Whether the field has focus
    pub fn is_focused(&self) -> bool {
        self.state.focused
    }

    /// Current filter text
    pub fn filter(&self) -> &str {
        &self.state.filter
    }

    /// Called once the field gained focus
    ///
    /// The filter is reset on every call, not only on transitions.
    pub fn handle_focus(&mut self, event: FocusEvent) {
        debug!("focus ({:?})", event.cause);
        self.state.filter.clear();
        self.state.focused = true;
        if let Some(cb) = &self.handlers.on_focus {
            cb.call(event);
        }
    }

    /// Called once the field lost focus
    pub fn handle_blur(&mut self, event: FocusEvent) {
        debug!("blur ({:?})", event.cause);
        self.state.filter.clear();
        self.state.focused = false;
        if let Some(cb) = &self.handlers.on_blur {
            cb.call(event);
        }
    }

    /// Called with the full field text on every edit
    pub fn handle_filter(&mut self, text: &str) {
        trace!("filter: {text:?}");
        text.clone_into(&mut self.state.filter);
    }

    /// Options matching the current filter, in their original order
    pub fn visible_options(&self) -> Vec<&SelectOption> {
        filter::visible_options(&self.props.options, &self.state.filter)
    }

    /// The first option whose value equals the current value
    ///
    /// An empty value selects nothing, even when an option carries an empty value.
    pub fn selected_option(&self) -> Option<&SelectOption> {
        let value = self.props.value.as_deref().filter(|v| !v.is_empty())?;
        self.props.options.iter().find(|o| o.value == value)
    }

    /// Placeholder to draw in the empty field
    ///
    /// An empty search placeholder falls back to the placeholder.
    pub fn displayed_placeholder(&self) -> &str {
        match (&self.props.search_placeholder, self.state.focused) {
            (Some(search), true) if !search.is_empty() => search,
            _ => &self.props.placeholder,
        }
    }

    /// Text to draw in the field
    ///
    /// While focused this is the filter. While blurred it is the label of the selected option,
    /// or nothing when the value is unset or matches no option.
    pub fn displayed_value(&self) -> &str {
        if self.state.focused {
            return &self.state.filter;
        }
        self.selected_option().map(|o| o.label.as_str()).unwrap_or_default()
    }

    /// Requests `option` to become the selection, without leaving focus
    ///
    /// Disabled options are accepted too. Picking a row is [`Select::commit`], which also blurs.
    pub(crate) fn select_option(&self, option: &SelectOption) {
        debug!("select {:?}", option.value);
        if let Some(cb) = &self.handlers.on_change {
            cb.call(Some(option.value.clone()));
        }
    }

    /// Commits a row picked with the pointer: the change request goes out before the blur
    pub fn commit<F: Focusable>(&mut self, option: &SelectOption, field: &mut F) {
        self.select_option(option);
        self.close(field, FocusCause::Pointer);
    }

    /// Requests the selection to be unset, whatever the focus state
    pub fn clear(&self) {
        debug!("clear");
        if let Some(cb) = &self.handlers.on_change {
            cb.call(None);
        }
    }

    /// Moves the focus into `field`, running the focus transition if it took
    pub fn open<F: Focusable>(&mut self, field: &mut F) {
        if let Some(event) = field.focus(FocusCause::Programmatic) {
            self.handle_focus(event);
        }
    }

    /// Moves the focus out of `field`, running the blur transition if it took
    pub fn close<F: Focusable>(&mut self, field: &mut F, cause: FocusCause) {
        if let Some(event) = field.blur(cause) {
            self.handle_blur(event);
        }
    }

    /// Modifiers of the root container
    pub fn root_classes(&self) -> RootClasses {
        RootClasses {
            disabled: self.props.disabled,
            focused: self.state.focused,
        }
    }

    /// Class list of the root container
    pub fn class_names(&self) -> String {
        self.root_classes().class_names(self.props.class_name.as_deref())
    }

    /// Modifiers of one row
    pub fn row_classes(&self, option: &SelectOption) -> RowClasses {
        RowClasses {
            disabled: option.disabled,
            selected: self.props.value.as_deref() == Some(option.value.as_str()),
        }
    }
}
