//! Hook and button-action callbacks, and the context they run in.
//!
//! Callbacks get a [`DialogContext`] for the dialog they belong to. They may
//! change its title, content, type, buttons and closability directly. Lifecycle
//! requests (`close`, `minimize`, `restore`, `load_content`) are queued and run
//! by the session once the transition that invoked the callback is complete.

use std::fmt;

use iris_backend::{DialogId, Host};
use iris_i18n::Catalog;

use crate::button::ButtonRef;
use crate::dialog::{Dialog, DialogState};
use crate::palette::DialogType;

/// Lifecycle callback.
pub type Hook = Box<dyn FnMut(&mut DialogContext<'_>)>;

/// Pre-close callback that may veto the close.
pub type HideHook = Box<dyn FnMut(&mut DialogContext<'_>) -> HideDecision>;

/// Footer button callback.
pub type ButtonAction = Box<dyn FnMut(&mut DialogContext<'_>) -> ActionFlow>;

/// Answer of an `on_hide` hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HideDecision {
    #[default]
    Proceed,
    /// Abort the close; the dialog stays shown.
    Cancel,
}

/// Answer of a button action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActionFlow {
    /// Carry on with auto-close (if enabled for the button).
    #[default]
    Continue,
    /// Skip auto-close; the action will close the dialog itself, or not.
    KeepOpen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HookKind {
    Show,
    Shown,
    Hidden,
    Minimize,
    Restore,
    ContentLoaded,
}

/// Optional callbacks attached to a dialog.
#[derive(Default)]
pub struct Hooks {
    pub(crate) on_show: Option<Hook>,
    pub(crate) on_shown: Option<Hook>,
    pub(crate) on_hide: Option<HideHook>,
    pub(crate) on_hidden: Option<Hook>,
    pub(crate) on_minimize: Option<Hook>,
    pub(crate) on_restore: Option<Hook>,
    pub(crate) on_content_loaded: Option<Hook>,
}

impl Hooks {
    pub(crate) fn slot(&mut self, kind: HookKind) -> &mut Option<Hook> {
        match kind {
            HookKind::Show => &mut self.on_show,
            HookKind::Shown => &mut self.on_shown,
            HookKind::Hidden => &mut self.on_hidden,
            HookKind::Minimize => &mut self.on_minimize,
            HookKind::Restore => &mut self.on_restore,
            HookKind::ContentLoaded => &mut self.on_content_loaded,
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("on_show", &self.on_show.is_some())
            .field("on_shown", &self.on_shown.is_some())
            .field("on_hide", &self.on_hide.is_some())
            .field("on_hidden", &self.on_hidden.is_some())
            .field("on_minimize", &self.on_minimize.is_some())
            .field("on_restore", &self.on_restore.is_some())
            .field("on_content_loaded", &self.on_content_loaded.is_some())
            .finish()
    }
}

/// Lifecycle request queued from inside a callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Deferred {
    Close {
        id: DialogId,
        force: bool,
    },
    Minimize(DialogId),
    Restore(DialogId),
    Load {
        id: DialogId,
        url: String,
        params: Vec<(String, String)>,
    },
}

/// Access to one dialog from inside its callbacks.
pub struct DialogContext<'a> {
    dialog: &'a mut Dialog,
    host: &'a mut dyn Host,
    catalog: &'a Catalog,
    deferred: &'a mut Vec<Deferred>,
}

impl<'a> DialogContext<'a> {
    pub(crate) fn new(
        dialog: &'a mut Dialog,
        host: &'a mut dyn Host,
        catalog: &'a Catalog,
        deferred: &'a mut Vec<Deferred>,
    ) -> Self {
        Self {
            dialog,
            host,
            catalog,
            deferred,
        }
    }

    pub fn id(&self) -> DialogId {
        self.dialog.id()
    }

    pub fn state(&self) -> DialogState {
        self.dialog.state()
    }

    pub fn dialog(&self) -> &Dialog {
        &*self.dialog
    }

    pub fn set_title(&mut self, title: &str) {
        self.dialog.set_title(self.host, title);
    }

    pub fn set_content(&mut self, content: &str) {
        self.dialog.set_content(self.host, content);
    }

    pub fn set_type(&mut self, kind: DialogType) {
        self.dialog.set_type(self.host, kind);
    }

    pub fn set_closable(&mut self, closable: bool) {
        self.dialog.set_closable(self.host, closable);
    }

    pub fn enable_button(&mut self, button: impl Into<ButtonRef>) {
        self.dialog.set_button_disabled(self.host, &button.into(), false);
    }

    pub fn disable_button(&mut self, button: impl Into<ButtonRef>) {
        self.dialog.set_button_disabled(self.host, &button.into(), true);
    }

    pub fn enable_buttons(&mut self, enable: bool) {
        self.dialog.set_all_buttons_disabled(self.host, !enable);
    }

    pub fn button_spin(&mut self, button: impl Into<ButtonRef>, spin: bool) {
        self.dialog.button_spin(self.host, &button.into(), spin);
    }

    pub fn button_spin_all(&mut self, spin: bool) {
        self.dialog.button_spin_all(self.host, spin);
    }

    /// Value of an input field in the dialog body.
    pub fn input_value(&self, field: &str) -> Option<String> {
        self.host.input_value(self.dialog.id(), field)
    }

    pub fn focus_input(&mut self, field: &str) {
        self.host.focus_input(self.dialog.id(), field);
    }

    /// Translate with the session's catalog.
    pub fn t(&self, key: &str, args: &[&str]) -> String {
        self.catalog.t(key, args)
    }

    /// Request a close that `on_hide` may veto.
    pub fn close(&mut self) {
        self.deferred.push(Deferred::Close {
            id: self.dialog.id(),
            force: false,
        });
    }

    /// Request a close that bypasses `on_hide`.
    pub fn force_close(&mut self) {
        self.deferred.push(Deferred::Close {
            id: self.dialog.id(),
            force: true,
        });
    }

    pub fn minimize(&mut self) {
        self.deferred.push(Deferred::Minimize(self.dialog.id()));
    }

    pub fn restore(&mut self) {
        self.deferred.push(Deferred::Restore(self.dialog.id()));
    }

    pub fn load_content(&mut self, url: impl Into<String>, params: Vec<(String, String)>) {
        self.deferred.push(Deferred::Load {
            id: self.dialog.id(),
            url: url.into(),
            params,
        });
    }
}
