//! Dialog creation options.
//!
//! [`DialogOptions`] is the caller's request. Unset fields fall back to the
//! session's [`DialogDefaults`]; the merged result is the dialog's
//! [`DialogConfig`], which only the title, content and type accessors change
//! afterwards.

use std::fmt;

use bitflags::bitflags;

use crate::button::ButtonSpec;
use crate::closable::{Backdrop, ClosePolicy};
use crate::config::DialogDefaults;
use crate::context::{DialogContext, HideDecision, Hooks};
use crate::palette::DialogType;

bitflags! {
    /// Presentation and behavior switches.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DialogFlags: u8 {
        /// Vertically center the dialog.
        const CENTERED = 1 << 0;
        /// Scroll the body instead of the page.
        const SCROLLABLE = 1 << 1;
        /// The header can be dragged to move the dialog.
        const DRAGGABLE = 1 << 2;
        /// The dialog may be minimized to the tray.
        const MINIMIZABLE = 1 << 3;
    }
}

/// Dialog width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DialogSize {
    Small,
    #[default]
    Normal,
    Large,
    XLarge,
    FullWidth,
    FullScreen,
}

impl DialogSize {
    /// Class applied to the dialog box, `None` for the normal width.
    pub const fn class(self) -> Option<&'static str> {
        match self {
            Self::Small => Some("modal-sm"),
            Self::Normal => None,
            Self::Large => Some("modal-lg"),
            Self::XLarge => Some("modal-xl"),
            Self::FullWidth => Some("modal-fullwidth"),
            Self::FullScreen => Some("modal-fullscreen"),
        }
    }
}

/// Remote body content fetched right after the dialog is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AjaxSource {
    pub url: String,
    pub params: Vec<(String, String)>,
}

/// Caller request for a new dialog.
#[derive(Default)]
pub struct DialogOptions {
    title: Option<String>,
    message: Option<String>,
    element_id: Option<String>,
    size: Option<DialogSize>,
    kind: Option<DialogType>,
    centered: Option<bool>,
    scrollable: Option<bool>,
    draggable: Option<bool>,
    minimizable: Option<bool>,
    backdrop: Option<Backdrop>,
    keyboard: Option<bool>,
    close_on_backdrop: Option<bool>,
    close_button: Option<bool>,
    spin_icon: Option<String>,
    buttons: Vec<ButtonSpec>,
    ajax: Option<AjaxSource>,
    hooks: Hooks,
}

impl DialogOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header title. Without one the dialog has no header.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Body markup. Left empty, the body shows a loading placeholder.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Element id of the dialog box.
    pub fn element_id(mut self, id: impl Into<String>) -> Self {
        self.element_id = Some(id.into());
        self
    }

    pub fn size(mut self, size: DialogSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn kind(mut self, kind: DialogType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn centered(mut self, centered: bool) -> Self {
        self.centered = Some(centered);
        self
    }

    pub fn scrollable(mut self, scrollable: bool) -> Self {
        self.scrollable = Some(scrollable);
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = Some(draggable);
        self
    }

    pub fn minimizable(mut self, minimizable: bool) -> Self {
        self.minimizable = Some(minimizable);
        self
    }

    pub fn backdrop(mut self, backdrop: Backdrop) -> Self {
        self.backdrop = Some(backdrop);
        self
    }

    /// Close on Escape.
    pub fn keyboard(mut self, keyboard: bool) -> Self {
        self.keyboard = Some(keyboard);
        self
    }

    pub fn close_on_backdrop(mut self, close: bool) -> Self {
        self.close_on_backdrop = Some(close);
        self
    }

    /// Show the header close button.
    pub fn close_button(mut self, close_button: bool) -> Self {
        self.close_button = Some(close_button);
        self
    }

    /// Spinner classes for busy buttons.
    pub fn spin_icon(mut self, classes: impl Into<String>) -> Self {
        self.spin_icon = Some(classes.into());
        self
    }

    /// Append a footer button.
    pub fn button(mut self, button: ButtonSpec) -> Self {
        self.buttons.push(button);
        self
    }

    /// Replace the footer buttons.
    pub fn buttons(mut self, buttons: Vec<ButtonSpec>) -> Self {
        self.buttons = buttons;
        self
    }

    /// Fetch the body from `url` once shown.
    pub fn ajax(mut self, url: impl Into<String>, params: Vec<(String, String)>) -> Self {
        self.ajax = Some(AjaxSource {
            url: url.into(),
            params,
        });
        self
    }

    /// Runs before the dialog is mounted.
    pub fn on_show(mut self, hook: impl FnMut(&mut DialogContext<'_>) + 'static) -> Self {
        self.hooks.on_show = Some(Box::new(hook));
        self
    }

    /// Runs once the dialog is mounted.
    pub fn on_shown(mut self, hook: impl FnMut(&mut DialogContext<'_>) + 'static) -> Self {
        self.hooks.on_shown = Some(Box::new(hook));
        self
    }

    /// Runs before a non-forced close; [`HideDecision::Cancel`] keeps the dialog open.
    pub fn on_hide(
        mut self,
        hook: impl FnMut(&mut DialogContext<'_>) -> HideDecision + 'static,
    ) -> Self {
        self.hooks.on_hide = Some(Box::new(hook));
        self
    }

    /// Runs after the dialog is unmounted, just before it is destroyed.
    pub fn on_hidden(mut self, hook: impl FnMut(&mut DialogContext<'_>) + 'static) -> Self {
        self.hooks.on_hidden = Some(Box::new(hook));
        self
    }

    pub fn on_minimize(mut self, hook: impl FnMut(&mut DialogContext<'_>) + 'static) -> Self {
        self.hooks.on_minimize = Some(Box::new(hook));
        self
    }

    pub fn on_restore(mut self, hook: impl FnMut(&mut DialogContext<'_>) + 'static) -> Self {
        self.hooks.on_restore = Some(Box::new(hook));
        self
    }

    /// Runs after remote content has been applied to the body.
    pub fn on_content_loaded(
        mut self,
        hook: impl FnMut(&mut DialogContext<'_>) + 'static,
    ) -> Self {
        self.hooks.on_content_loaded = Some(Box::new(hook));
        self
    }

    /// Merge with `defaults`.
    pub(crate) fn resolve(self, defaults: &DialogDefaults) -> ResolvedOptions {
        let mut flags = DialogFlags::empty();
        flags.set(DialogFlags::CENTERED, self.centered.unwrap_or(defaults.centered));
        flags.set(
            DialogFlags::SCROLLABLE,
            self.scrollable.unwrap_or(defaults.scrollable),
        );
        flags.set(DialogFlags::DRAGGABLE, self.draggable.unwrap_or(defaults.draggable));
        flags.set(
            DialogFlags::MINIMIZABLE,
            self.minimizable.unwrap_or(defaults.minimizable),
        );

        // The close button lives in the header, which only a titled dialog has.
        let has_header = self.title.is_some();
        let config = DialogConfig {
            title: self.title,
            message: self.message.unwrap_or_default(),
            element_id: self.element_id,
            size: self.size.unwrap_or(defaults.size),
            kind: self.kind.unwrap_or(defaults.kind),
            flags,
            spin_icon: self.spin_icon.unwrap_or_else(|| defaults.spin_icon.clone()),
        };
        let policy = ClosePolicy {
            backdrop: self.backdrop.unwrap_or(defaults.backdrop),
            close_on_backdrop: self.close_on_backdrop.unwrap_or(defaults.close_on_backdrop),
            keyboard: self.keyboard.unwrap_or(defaults.keyboard),
            close_button: has_header && self.close_button.unwrap_or(defaults.close_button),
        };

        ResolvedOptions {
            config,
            policy,
            buttons: self.buttons,
            hooks: self.hooks,
            ajax: self.ajax,
        }
    }
}

impl fmt::Debug for DialogOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogOptions")
            .field("title", &self.title)
            .field("size", &self.size)
            .field("kind", &self.kind)
            .field("backdrop", &self.backdrop)
            .field("buttons", &self.buttons)
            .field("ajax", &self.ajax)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}

/// Merged, per-dialog configuration snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogConfig {
    pub title: Option<String>,
    /// Body markup as given at creation (may be empty).
    pub message: String,
    pub element_id: Option<String>,
    pub size: DialogSize,
    pub kind: DialogType,
    pub flags: DialogFlags,
    pub spin_icon: String,
}

impl DialogConfig {
    /// Classes for the dialog box.
    pub fn dialog_classes(&self) -> Vec<&'static str> {
        let mut classes = Vec::with_capacity(3);
        classes.extend(self.size.class());
        if self.flags.contains(DialogFlags::CENTERED) {
            classes.push("modal-dialog-centered");
        }
        if self.flags.contains(DialogFlags::SCROLLABLE) {
            classes.push("modal-dialog-scrollable");
        }
        classes
    }
}

pub(crate) struct ResolvedOptions {
    pub(crate) config: DialogConfig,
    pub(crate) policy: ClosePolicy,
    pub(crate) buttons: Vec<ButtonSpec>,
    pub(crate) hooks: Hooks,
    pub(crate) ajax: Option<AjaxSource>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_take_defaults() {
        let resolved = DialogOptions::new().title("T").resolve(&DialogDefaults::default());
        assert_eq!(resolved.config.title.as_deref(), Some("T"));
        assert_eq!(resolved.config.message, "");
        assert_eq!(resolved.config.size, DialogSize::Normal);
        assert_eq!(resolved.config.flags, DialogFlags::empty());
        assert_eq!(resolved.policy.backdrop, Backdrop::On);
        assert!(resolved.policy.keyboard && resolved.policy.close_on_backdrop);
    }

    #[test]
    fn caller_values_override_defaults() {
        let defaults = DialogDefaults {
            minimizable: true,
            ..DialogDefaults::default()
        };
        let resolved = DialogOptions::new()
            .minimizable(false)
            .draggable(true)
            .keyboard(false)
            .backdrop(Backdrop::Static)
            .spin_icon("spin")
            .resolve(&defaults);
        assert_eq!(resolved.config.flags, DialogFlags::DRAGGABLE);
        assert!(!resolved.policy.keyboard);
        assert_eq!(resolved.policy.backdrop, Backdrop::Static);
        assert_eq!(resolved.config.spin_icon, "spin");
    }

    #[test]
    fn dialog_classes_follow_size_and_flags() {
        let resolved = DialogOptions::new()
            .size(DialogSize::Large)
            .centered(true)
            .scrollable(true)
            .resolve(&DialogDefaults::default());
        assert_eq!(
            resolved.config.dialog_classes(),
            vec!["modal-lg", "modal-dialog-centered", "modal-dialog-scrollable"]
        );

        let normal = DialogOptions::new().resolve(&DialogDefaults::default());
        assert!(normal.config.dialog_classes().is_empty());
    }

    #[test]
    fn hooks_and_buttons_carry_over() {
        let resolved = DialogOptions::new()
            .on_shown(|_| {})
            .on_hide(|_| HideDecision::Cancel)
            .button(ButtonSpec::new("A"))
            .button(ButtonSpec::new("B"))
            .ajax("/panel", vec![("id".into(), "7".into())])
            .resolve(&DialogDefaults::default());
        assert!(resolved.hooks.on_shown.is_some());
        assert!(resolved.hooks.on_hide.is_some());
        assert!(resolved.hooks.on_show.is_none());
        assert_eq!(resolved.buttons.len(), 2);
        assert_eq!(resolved.ajax.map(|a| a.url).as_deref(), Some("/panel"));
    }

    #[test]
    fn untitled_dialog_has_no_close_button() {
        let defaults = DialogDefaults::default();
        let untitled = DialogOptions::new().close_button(true).resolve(&defaults);
        assert!(!untitled.policy.close_button);
        assert!(!untitled.policy.allows(crate::closable::DismissSource::CloseButton));

        let titled = DialogOptions::new().title("T").resolve(&defaults);
        assert!(titled.policy.close_button);
    }
}
