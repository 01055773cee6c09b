//! Footer buttons: specs, rendered state, lookup and the busy spinner.
//!
//! # Invariants
//!
//! - Starting a spinner on a spinning button changes nothing. Every start
//!   from idle captures the content and disabled state current at that
//!   moment, so changes made between spins survive the next stop.
//! - Stopping restores exactly what the start captured, then forgets it.
//!
//! # Lookup
//!
//! A [`ButtonRef::Index`] selects by 0-based position and never falls back.
//! A [`ButtonRef::Key`] matches an id first (a leading `#` is ignored), then
//! exact label text. Anything unresolved is `None`.

use std::fmt;

use iris_backend::ButtonView;

use crate::context::{ActionFlow, ButtonAction, DialogContext};

/// Default class for buttons that do not set one.
pub const DEFAULT_BUTTON_CLASS: &str = "btn-secondary";

/// Selects a button by position, id or label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ButtonRef {
    Index(usize),
    Key(String),
}

impl From<usize> for ButtonRef {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for ButtonRef {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for ButtonRef {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

/// Caller description of a footer button.
pub struct ButtonSpec {
    pub(crate) label: String,
    pub(crate) id: Option<String>,
    pub(crate) icon: Option<String>,
    pub(crate) css_class: String,
    pub(crate) disabled: bool,
    pub(crate) action: Option<ButtonAction>,
    pub(crate) auto_spin: bool,
    pub(crate) auto_close: bool,
}

impl ButtonSpec {
    /// Create a button that closes the dialog when clicked.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            id: None,
            icon: None,
            css_class: DEFAULT_BUTTON_CLASS.to_string(),
            disabled: false,
            action: None,
            auto_spin: false,
            auto_close: true,
        }
    }

    /// Element id. Buttons without one get `btn_<n>` when shown.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Icon class rendered before the label.
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn css_class(mut self, class: impl Into<String>) -> Self {
        self.css_class = class.into();
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Callback run on click.
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: FnMut(&mut DialogContext<'_>) -> ActionFlow + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    /// Show the spinner while the action runs.
    pub fn auto_spin(mut self, auto_spin: bool) -> Self {
        self.auto_spin = auto_spin;
        self
    }

    /// Close the dialog after a click (default `true`).
    pub fn auto_close(mut self, auto_close: bool) -> Self {
        self.auto_close = auto_close;
        self
    }

    pub(crate) fn build(self, id: String) -> Button {
        let content = render_content(self.icon.as_deref(), &self.label);
        Button {
            id,
            label: self.label,
            icon: self.icon,
            css_class: self.css_class,
            disabled: self.disabled,
            spinning: false,
            saved: None,
            content,
            action: self.action,
            auto_spin: self.auto_spin,
            auto_close: self.auto_close,
        }
    }
}

impl fmt::Debug for ButtonSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonSpec")
            .field("label", &self.label)
            .field("id", &self.id)
            .field("icon", &self.icon)
            .field("css_class", &self.css_class)
            .field("disabled", &self.disabled)
            .field("action", &self.action.is_some())
            .field("auto_spin", &self.auto_spin)
            .field("auto_close", &self.auto_close)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SavedButton {
    content: String,
    disabled: bool,
}

/// A footer button of a shown dialog.
pub struct Button {
    id: String,
    label: String,
    icon: Option<String>,
    css_class: String,
    disabled: bool,
    spinning: bool,
    saved: Option<SavedButton>,
    content: String,
    pub(crate) action: Option<ButtonAction>,
    auto_spin: bool,
    auto_close: bool,
}

impl Button {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn css_class(&self) -> &str {
        &self.css_class
    }

    /// Rendered inner content.
    pub fn content(&self) -> &str {
        &self.content
    }

    #[inline]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    #[inline]
    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    pub fn auto_spin(&self) -> bool {
        self.auto_spin
    }

    pub fn auto_close(&self) -> bool {
        self.auto_close
    }

    /// Returns `true` if the disabled state changed.
    pub(crate) fn set_disabled(&mut self, disabled: bool) -> bool {
        std::mem::replace(&mut self.disabled, disabled) != disabled
    }

    /// Returns `true` if the spinner was started.
    pub(crate) fn start_spin(&mut self, spin_icon: &str) -> bool {
        if self.spinning {
            return false;
        }
        self.saved = Some(SavedButton {
            content: self.content.clone(),
            disabled: self.disabled,
        });
        self.content = format!(
            "<span class=\"{spin_icon}\" role=\"status\" aria-hidden=\"true\"></span> {}",
            self.label
        );
        self.disabled = true;
        self.spinning = true;
        true
    }

    /// Returns `true` if the spinner was stopped.
    pub(crate) fn stop_spin(&mut self) -> bool {
        if !self.spinning {
            return false;
        }
        if let Some(saved) = self.saved.take() {
            self.content = saved.content;
            self.disabled = saved.disabled;
        }
        self.spinning = false;
        true
    }

    pub fn view(&self, index: usize) -> ButtonView {
        ButtonView {
            index,
            id: self.id.clone(),
            content: self.content.clone(),
            css_class: self.css_class.clone(),
            disabled: self.disabled,
            spinning: self.spinning,
        }
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("disabled", &self.disabled)
            .field("spinning", &self.spinning)
            .field("action", &self.action.is_some())
            .finish_non_exhaustive()
    }
}

fn render_content(icon: Option<&str>, label: &str) -> String {
    match icon {
        Some(icon) => format!("<i class=\"{icon}\"></i> {label}"),
        None => label.to_string(),
    }
}

/// Position of the button `target` selects.
pub(crate) fn resolve(buttons: &[Button], target: &ButtonRef) -> Option<usize> {
    match target {
        ButtonRef::Index(index) => (*index < buttons.len()).then_some(*index),
        ButtonRef::Key(key) => {
            let id = key.strip_prefix('#').unwrap_or(key);
            buttons
                .iter()
                .position(|b| b.id == id)
                .or_else(|| buttons.iter().position(|b| b.label == *key))
        }
    }
}
