//! The dialog session: one per host page.
//!
//! A [`Session`] owns the host, the translation catalog, the [`Registry`] of
//! live dialogs, the minimize [`Tray`] and every [`Dialog`]. All lifecycle
//! transitions go through it, so the page-wide state derived from the
//! registry and tray is recomputed after each one.
//!
//! # Invariants
//!
//! - The page scroll lock is on iff the registry or the tray is non-empty.
//! - A closed dialog leaves the registry and the tray in the same transition.
//! - Only the topmost shown dialog (by registry order) may minimize.
//! - Requests made from inside hooks run after the current transition
//!   completes; transitions never nest.
//! - A content load result is applied only to a live dialog whose newest
//!   load it answers.
//!
//! # Failure Modes
//!
//! - Operations on unknown or closed ids are no-ops (`NotOpen`, `false`,
//!   `None`).
//! - Rejected minimize/restore leaves every piece of state untouched and logs
//!   a warning.

use ahash::AHashMap;
use iris_backend::{
    ContentRequest, DialogId, Host, Layer, LoadTicket, TrayEntryView, TrayView,
};
use iris_i18n::Catalog;

use crate::button::{Button, ButtonRef};
use crate::closable::DismissSource;
use crate::config::SessionConfig;
use crate::content::{self, LoadError, LoadOutcome};
use crate::context::{ActionFlow, Deferred, DialogContext, HideDecision, HookKind};
use crate::dialog::{Dialog, DialogState};
use crate::options::DialogOptions;
use crate::palette::DialogType;
use crate::registry::Registry;
use crate::tray::{Tray, TrayChange, TrayTarget};

/// Why a minimize or restore was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("dialog is not open")]
    NotOpen,
    #[error("dialog is already minimized")]
    AlreadyMinimized,
    #[error("dialog is not minimizable")]
    NotMinimizable,
    #[error("dialog is not topmost ({topmost} is above it)")]
    NotTopmost { topmost: DialogId },
    #[error("dialog is not minimized")]
    NotMinimized,
}

/// Result of a close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    /// `on_hide` cancelled the close.
    Vetoed,
    /// The current close policy does not allow this gesture.
    Refused,
    NotOpen,
}

/// Process-scoped dialog coordinator.
pub struct Session<H: Host> {
    host: H,
    catalog: Catalog,
    config: SessionConfig,
    registry: Registry,
    tray: Tray,
    dialogs: AHashMap<DialogId, Dialog>,
    next_dialog: u64,
    next_button: u64,
    next_field: u64,
    next_load: u64,
    scroll_locked: bool,
    outside_watch: bool,
    deferred: Vec<Deferred>,
}

fn call_hook(
    dialog: &mut Dialog,
    kind: HookKind,
    host: &mut dyn Host,
    catalog: &Catalog,
    deferred: &mut Vec<Deferred>,
) {
    let Some(mut hook) = dialog.hooks.slot(kind).take() else {
        return;
    };
    {
        let mut ctx = DialogContext::new(dialog, host, catalog, deferred);
        hook(&mut ctx);
    }
    *dialog.hooks.slot(kind) = Some(hook);
}

impl<H: Host> Session<H> {
    #[must_use]
    pub fn new(host: H, catalog: Catalog) -> Self {
        Self::with_config(host, catalog, SessionConfig::default())
    }

    #[must_use]
    pub fn with_config(host: H, catalog: Catalog, mut config: SessionConfig) -> Self {
        let registry = Registry::with_base(config.base_layer);
        if registry.base() != config.base_layer {
            tracing::warn!(
                requested = config.base_layer,
                used = registry.base(),
                "base layer out of range, clamped"
            );
            config.base_layer = registry.base();
        }
        Self {
            host,
            catalog,
            registry,
            config,
            tray: Tray::new(),
            dialogs: AHashMap::new(),
            next_dialog: 0,
            next_button: 0,
            next_field: 0,
            next_load: 0,
            scroll_locked: false,
            outside_watch: false,
            deferred: Vec::new(),
        }
    }

    /// Close everything without running hooks and hand the host back.
    pub fn teardown(mut self) -> H {
        for id in self.registry.clear() {
            self.host.unmount(id);
        }
        self.dialogs.clear();
        self.tray.clear();
        self.deferred.clear();
        self.host.remove_tray();
        self.set_outside_watch(false);
        self.sync_scroll_lock();
        tracing::debug!("session torn down");
        self.host
    }

    // --- Accessors ---

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub fn tray(&self) -> &Tray {
        &self.tray
    }

    #[must_use]
    pub fn dialog(&self, id: DialogId) -> Option<&Dialog> {
        self.dialogs.get(&id)
    }

    /// State of a dialog this session created; `None` for foreign ids.
    #[must_use]
    pub fn state(&self, id: DialogId) -> Option<DialogState> {
        match self.dialogs.get(&id) {
            Some(dialog) => Some(dialog.state()),
            None if (1..=self.next_dialog).contains(&id.id()) => Some(DialogState::Destroyed),
            None => None,
        }
    }

    #[must_use]
    pub fn layer(&self, id: DialogId) -> Option<Layer> {
        self.registry.layer_of(id)
    }

    /// The shown dialog highest in registry order.
    #[must_use]
    pub fn topmost(&self) -> Option<DialogId> {
        self.registry.top_where(|id| {
            self.dialogs
                .get(&id)
                .is_some_and(|d| d.state() == DialogState::Shown)
        })
    }

    #[inline]
    #[must_use]
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// Current language code.
    #[must_use]
    pub fn language(&self) -> &str {
        self.catalog.language()
    }

    /// Switch language. Affects text rendered from now on, including the tray.
    pub fn set_language(&mut self, code: &str) -> bool {
        let changed = self.catalog.set_language(code);
        if changed && !self.tray.is_empty() {
            self.render_tray();
        }
        changed
    }

    /// Translate with the session's catalog.
    #[must_use]
    pub fn t(&self, key: &str, args: &[&str]) -> String {
        self.catalog.t(key, args)
    }

    // --- Lifecycle ---

    /// Create, register and mount a dialog.
    pub fn show(&mut self, options: DialogOptions) -> DialogId {
        self.next_dialog += 1;
        let id = DialogId::new(self.next_dialog);
        let _span = tracing::debug_span!("dialog_show", dialog = %id).entered();

        let Some(layer) = self.assign_layer(id) else {
            tracing::warn!(dialog = %id, "dialog not shown: layer range exhausted");
            return id;
        };
        let resolved = options.resolve(&self.config.defaults);

        let buttons: Vec<Button> = resolved
            .buttons
            .into_iter()
            .map(|mut spec| {
                let button_id = match spec.id.take() {
                    Some(given) => given,
                    None => {
                        self.next_button += 1;
                        format!("btn_{}", self.next_button)
                    }
                };
                spec.build(button_id)
            })
            .collect();
        let body = if resolved.config.message.is_empty() {
            content::loading_placeholder(&self.catalog)
        } else {
            resolved.config.message.clone()
        };

        let dialog = Dialog::new(
            id,
            layer,
            resolved.config,
            resolved.policy,
            buttons,
            resolved.hooks,
            body,
        );
        self.dialogs.insert(id, dialog);

        self.run_hook(id, HookKind::Show);
        if let Some(dialog) = self.dialogs.get(&id) {
            self.host.mount(&dialog.mount_spec());
        }
        self.sync_scroll_lock();
        tracing::debug!(dialog = %id, layer, "dialog shown");

        if let Some(ajax) = resolved.ajax {
            self.start_load(id, ajax.url, ajax.params);
        }
        self.run_hook(id, HookKind::Shown);
        self.drain_deferred();
        id
    }

    /// Close a dialog. Unless `force`, `on_hide` may veto.
    pub fn close(&mut self, id: DialogId, force: bool) -> CloseOutcome {
        let outcome = self.close_now(id, force);
        self.drain_deferred();
        outcome
    }

    /// A user gesture asking to close, honoring the current close policy.
    pub fn dismiss(&mut self, id: DialogId, source: DismissSource) -> CloseOutcome {
        let Some(dialog) = self.dialogs.get(&id) else {
            return CloseOutcome::NotOpen;
        };
        if dialog.state() != DialogState::Shown {
            return CloseOutcome::NotOpen;
        }
        if !dialog.policy().allows(source) {
            tracing::debug!(dialog = %id, ?source, "dismiss refused");
            return CloseOutcome::Refused;
        }
        self.close(id, false)
    }

    /// Minimize the topmost shown dialog to the tray.
    pub fn minimize(&mut self, id: DialogId) -> Result<(), TransitionError> {
        let result = self.minimize_now(id);
        self.drain_deferred();
        result
    }

    /// Bring a minimized dialog back.
    pub fn restore(&mut self, id: DialogId) -> Result<(), TransitionError> {
        let result = self.restore_now(id);
        self.drain_deferred();
        result
    }

    fn close_now(&mut self, id: DialogId, force: bool) -> CloseOutcome {
        let Some(dialog) = self.dialogs.get_mut(&id) else {
            return CloseOutcome::NotOpen;
        };

        if !force && let Some(mut hook) = dialog.hooks.on_hide.take() {
            let decision = {
                let mut ctx =
                    DialogContext::new(dialog, &mut self.host, &self.catalog, &mut self.deferred);
                hook(&mut ctx)
            };
            dialog.hooks.on_hide = Some(hook);
            if decision == HideDecision::Cancel {
                tracing::debug!(dialog = %id, "close vetoed by on_hide");
                return CloseOutcome::Vetoed;
            }
        }

        let Some(mut dialog) = self.dialogs.remove(&id) else {
            return CloseOutcome::NotOpen;
        };
        self.host.unmount(id);
        self.registry.unregister(id);
        let change = self.tray.remove(id);
        dialog.mark_destroyed();
        self.apply_tray_change(change);
        self.sync_scroll_lock();
        tracing::debug!(dialog = %id, layer = dialog.layer(), force, "dialog closed");

        call_hook(
            &mut dialog,
            HookKind::Hidden,
            &mut self.host,
            &self.catalog,
            &mut self.deferred,
        );
        CloseOutcome::Closed
    }

    fn check_minimize(&self, id: DialogId) -> Result<(), TransitionError> {
        let dialog = self.dialogs.get(&id).ok_or(TransitionError::NotOpen)?;
        match dialog.state() {
            DialogState::Shown => {}
            DialogState::Minimized => return Err(TransitionError::AlreadyMinimized),
            DialogState::Destroyed => return Err(TransitionError::NotOpen),
        }
        if !dialog.is_minimizable() {
            return Err(TransitionError::NotMinimizable);
        }
        match self.topmost() {
            Some(topmost) if topmost != id => Err(TransitionError::NotTopmost { topmost }),
            _ => Ok(()),
        }
    }

    fn minimize_now(&mut self, id: DialogId) -> Result<(), TransitionError> {
        if let Err(err) = self.check_minimize(id) {
            tracing::warn!(dialog = %id, error = %err, "minimize rejected");
            return Err(err);
        }
        let Some(dialog) = self.dialogs.get_mut(&id) else {
            return Err(TransitionError::NotOpen);
        };
        dialog.minimize(&mut self.host);
        let change = self.tray.add(id);
        self.apply_tray_change(change);
        self.sync_scroll_lock();
        tracing::debug!(dialog = %id, tray = self.tray.len(), "dialog minimized");
        self.run_hook(id, HookKind::Minimize);
        Ok(())
    }

    fn restore_now(&mut self, id: DialogId) -> Result<(), TransitionError> {
        let Some(dialog) = self.dialogs.get_mut(&id) else {
            tracing::warn!(dialog = %id, "restore rejected: not open");
            return Err(TransitionError::NotOpen);
        };
        if dialog.state() != DialogState::Minimized {
            tracing::warn!(dialog = %id, "restore rejected: not minimized");
            return Err(TransitionError::NotMinimized);
        }
        let change = self.tray.remove(id);
        dialog.restore(&mut self.host);
        self.apply_tray_change(change);
        self.sync_scroll_lock();
        tracing::debug!(dialog = %id, tray = self.tray.len(), "dialog restored");
        self.run_hook(id, HookKind::Restore);
        Ok(())
    }

    // --- Accessors on one dialog ---

    pub fn set_title(&mut self, id: DialogId, title: &str) {
        if let Some(dialog) = self.dialogs.get_mut(&id) {
            dialog.set_title(&mut self.host, title);
            if self.tray.contains(id) {
                self.render_tray();
            }
        }
    }

    pub fn set_content(&mut self, id: DialogId, content: &str) {
        if let Some(dialog) = self.dialogs.get_mut(&id) {
            dialog.set_content(&mut self.host, content);
        }
    }

    pub fn set_type(&mut self, id: DialogId, kind: DialogType) {
        if let Some(dialog) = self.dialogs.get_mut(&id) {
            dialog.set_type(&mut self.host, kind);
        }
    }

    /// Disable (`false`) or restore (`true`) every close affordance.
    pub fn set_closable(&mut self, id: DialogId, closable: bool) {
        if let Some(dialog) = self.dialogs.get_mut(&id) {
            dialog.set_closable(&mut self.host, closable);
        }
    }

    // --- Buttons ---

    #[must_use]
    pub fn button(&self, id: DialogId, button: impl Into<ButtonRef>) -> Option<&Button> {
        self.dialogs.get(&id)?.button(&button.into())
    }

    pub fn enable_button(&mut self, id: DialogId, button: impl Into<ButtonRef>) {
        if let Some(dialog) = self.dialogs.get_mut(&id) {
            dialog.set_button_disabled(&mut self.host, &button.into(), false);
        }
    }

    pub fn disable_button(&mut self, id: DialogId, button: impl Into<ButtonRef>) {
        if let Some(dialog) = self.dialogs.get_mut(&id) {
            dialog.set_button_disabled(&mut self.host, &button.into(), true);
        }
    }

    pub fn enable_buttons(&mut self, id: DialogId, enable: bool) {
        if let Some(dialog) = self.dialogs.get_mut(&id) {
            dialog.set_all_buttons_disabled(&mut self.host, !enable);
        }
    }

    pub fn button_spin(&mut self, id: DialogId, button: impl Into<ButtonRef>, spin: bool) {
        if let Some(dialog) = self.dialogs.get_mut(&id) {
            dialog.button_spin(&mut self.host, &button.into(), spin);
        }
    }

    pub fn button_spin_all(&mut self, id: DialogId, spin: bool) {
        if let Some(dialog) = self.dialogs.get_mut(&id) {
            dialog.button_spin_all(&mut self.host, spin);
        }
    }

    /// Activate a footer button as if clicked. Returns `false` when the click
    /// was ignored (unknown dialog or button, dialog not shown, button disabled).
    pub fn click_button(&mut self, id: DialogId, button: impl Into<ButtonRef>) -> bool {
        let target = button.into();
        let Some(dialog) = self.dialogs.get_mut(&id) else {
            return false;
        };
        if dialog.state() != DialogState::Shown {
            return false;
        }
        let Some(index) = dialog.resolve_button(&target) else {
            return false;
        };
        let (disabled, auto_spin, auto_close) = {
            let b = &dialog.buttons[index];
            (b.is_disabled(), b.auto_spin(), b.auto_close())
        };
        if disabled {
            return false;
        }

        let action = dialog.buttons[index].action.take();
        let flow = match action {
            Some(mut action) => {
                let here = ButtonRef::Index(index);
                if auto_spin {
                    dialog.button_spin(&mut self.host, &here, true);
                }
                let flow = {
                    let mut ctx = DialogContext::new(
                        dialog,
                        &mut self.host,
                        &self.catalog,
                        &mut self.deferred,
                    );
                    action(&mut ctx)
                };
                if let Some(slot) = dialog.buttons.get_mut(index) {
                    slot.action = Some(action);
                }
                if flow == ActionFlow::Continue && auto_close && auto_spin {
                    dialog.button_spin(&mut self.host, &here, false);
                }
                flow
            }
            None => ActionFlow::Continue,
        };

        if flow == ActionFlow::Continue && auto_close {
            self.close_now(id, false);
        }
        self.drain_deferred();
        true
    }

    // --- Tray ---

    /// Open or close the tray list. Returns whether it is now open.
    pub fn toggle_tray_list(&mut self) -> bool {
        let open = self.tray.toggle_list();
        self.set_outside_watch(open);
        if !self.tray.is_empty() {
            self.render_tray();
        }
        open
    }

    /// A click on a tray entry. `Entry` restores the dialog and closes the
    /// list; `Discard` force-closes it and leaves the list open.
    pub fn tray_click(&mut self, id: DialogId, target: TrayTarget) -> bool {
        if !self.tray.contains(id) {
            return false;
        }
        match target {
            TrayTarget::Entry => {
                if self.restore_now(id).is_err() {
                    return false;
                }
                self.close_tray_list();
            }
            TrayTarget::Discard => {
                self.close_now(id, true);
            }
        }
        self.drain_deferred();
        true
    }

    /// A click anywhere outside the tray. Closes the list if it is open.
    pub fn outside_click(&mut self) -> bool {
        if !self.outside_watch {
            return false;
        }
        self.close_tray_list()
    }

    fn close_tray_list(&mut self) -> bool {
        let was_open = self.tray.close_list();
        self.set_outside_watch(false);
        if was_open && !self.tray.is_empty() {
            self.render_tray();
        }
        was_open
    }

    // --- Content loading ---

    /// Fetch body content for a dialog. Supersedes any load still outstanding.
    pub fn load_content(
        &mut self,
        id: DialogId,
        url: impl Into<String>,
        params: Vec<(String, String)>,
    ) -> Option<LoadTicket> {
        let ticket = self.start_load(id, url.into(), params);
        self.drain_deferred();
        ticket
    }

    /// Deliver a fetch result from the host.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<String, LoadError>,
    ) -> LoadOutcome {
        let id = ticket.dialog;
        let Some(dialog) = self.dialogs.get_mut(&id) else {
            tracing::debug!(dialog = %id, seq = ticket.seq, "load result discarded: dialog closed");
            return LoadOutcome::Discarded;
        };
        if dialog.pending_load != Some(ticket.seq) {
            tracing::debug!(dialog = %id, seq = ticket.seq, "load result discarded: superseded");
            return LoadOutcome::Discarded;
        }
        dialog.pending_load = None;

        let outcome = match result {
            Ok(html) => {
                dialog.set_content(&mut self.host, &html);
                LoadOutcome::Applied
            }
            Err(err) => {
                tracing::warn!(dialog = %id, error = %err, "content load failed");
                let markup = content::error_markup(&self.catalog, &err);
                dialog.set_content(&mut self.host, &markup);
                LoadOutcome::Failed
            }
        };
        if outcome == LoadOutcome::Applied {
            self.run_hook(id, HookKind::ContentLoaded);
        }
        self.drain_deferred();
        outcome
    }

    fn start_load(
        &mut self,
        id: DialogId,
        url: String,
        params: Vec<(String, String)>,
    ) -> Option<LoadTicket> {
        let dialog = self.dialogs.get_mut(&id)?;
        self.next_load += 1;
        let ticket = LoadTicket {
            dialog: id,
            seq: self.next_load,
        };
        dialog.pending_load = Some(ticket.seq);
        tracing::debug!(dialog = %id, url = %url, seq = ticket.seq, "content load requested");
        self.host.fetch(ContentRequest {
            ticket,
            url,
            params,
        });
        Some(ticket)
    }

    // --- Internals ---

    /// Register `id`, renumbering live dialogs first if the layer range is
    /// used up.
    fn assign_layer(&mut self, id: DialogId) -> Option<Layer> {
        if let Some(layer) = self.registry.register(id) {
            return Some(layer);
        }
        let moved = self.registry.compact();
        tracing::debug!(moved = moved.len(), "layers compacted");
        for (moved_id, layer) in moved {
            if let Some(dialog) = self.dialogs.get_mut(&moved_id) {
                dialog.relayer(&mut self.host, layer);
            }
        }
        self.registry.register(id)
    }

    /// Session-unique id for an input field inside a dialog body.
    pub(crate) fn next_field_id(&mut self, prefix: &str) -> String {
        self.next_field += 1;
        format!("{prefix}_{}", self.next_field)
    }

    fn run_hook(&mut self, id: DialogId, kind: HookKind) {
        if let Some(dialog) = self.dialogs.get_mut(&id) {
            call_hook(
                dialog,
                kind,
                &mut self.host,
                &self.catalog,
                &mut self.deferred,
            );
        }
    }

    /// Apply requests queued by hooks, including any they queue in turn.
    fn drain_deferred(&mut self) {
        loop {
            let batch = std::mem::take(&mut self.deferred);
            if batch.is_empty() {
                break;
            }
            for request in batch {
                match request {
                    Deferred::Close { id, force } => {
                        self.close_now(id, force);
                    }
                    Deferred::Minimize(id) => {
                        let _ = self.minimize_now(id);
                    }
                    Deferred::Restore(id) => {
                        let _ = self.restore_now(id);
                    }
                    Deferred::Load { id, url, params } => {
                        self.start_load(id, url, params);
                    }
                }
            }
        }
    }

    fn sync_scroll_lock(&mut self) {
        let locked = !self.registry.is_empty() || !self.tray.is_empty();
        if locked != self.scroll_locked {
            self.scroll_locked = locked;
            self.host.set_scroll_lock(locked);
            tracing::debug!(locked, "page scroll lock changed");
        }
    }

    fn set_outside_watch(&mut self, active: bool) {
        if self.outside_watch != active {
            self.outside_watch = active;
            self.host.set_outside_click_watch(active);
        }
    }

    fn apply_tray_change(&mut self, change: TrayChange) {
        if !change.changed {
            return;
        }
        if change.list_closed {
            self.set_outside_watch(false);
        }
        if change.indicator_hidden {
            self.host.remove_tray();
        } else {
            self.render_tray();
        }
    }

    fn render_tray(&mut self) {
        let entries = self
            .tray
            .entries()
            .iter()
            .map(|&id| TrayEntryView {
                id,
                title: self
                    .dialogs
                    .get(&id)
                    .and_then(Dialog::title)
                    .unwrap_or_else(|| self.catalog.text("untitled"))
                    .to_string(),
            })
            .collect();
        let view = TrayView {
            heading: self.catalog.text("minimized").to_string(),
            discard_label: self.catalog.text("close").to_string(),
            indicator_visible: self.tray.is_indicator_visible(),
            list_open: self.tray.is_list_open(),
            entries,
        };
        self.host.render_tray(&self.config.tray, &view);
    }
}

impl<H: Host + std::fmt::Debug> std::fmt::Debug for Session<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("host", &self.host)
            .field("language", &self.catalog.language())
            .field("registry", &self.registry)
            .field("tray", &self.tray)
            .field("scroll_locked", &self.scroll_locked)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::ButtonSpec;
    use crate::closable::Backdrop;
    use iris_backend::{HeadlessHost, HostCall, ScrollOffset};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn session() -> Session<HeadlessHost> {
        Session::new(HeadlessHost::new(), Catalog::builtin())
    }

    fn minimizable() -> DialogOptions {
        DialogOptions::new().title("T").message("body").minimizable(true)
    }

    #[test]
    fn fresh_session_queries_report_nothing_open() {
        let s = session();
        assert!(s.registry().is_empty());
        assert!(s.tray().is_empty() && !s.tray().is_indicator_visible());
        assert_eq!(s.topmost(), None);
        assert!(!s.is_scroll_locked());
        assert_eq!(s.config().base_layer, crate::registry::BASE_LAYER);
        assert_eq!(s.language(), s.catalog().language());
    }

    #[test]
    fn layers_unique_and_increasing() {
        let mut s = session();
        let ids: Vec<DialogId> = (0..4).map(|_| s.show(DialogOptions::new())).collect();
        s.close(ids[1], false);
        let e = s.show(DialogOptions::new());

        assert_eq!(s.registry().len(), 4);
        let layers: Vec<Layer> = s.registry().ids().filter_map(|id| s.layer(id)).collect();
        assert!(layers.windows(2).all(|w| w[0] < w[1]), "{layers:?}");
        assert_eq!(s.layer(e), Some(1090));
    }

    #[test]
    fn scroll_lock_follows_registry() {
        let mut s = session();
        assert!(!s.is_scroll_locked());
        let a = s.show(DialogOptions::new());
        assert!(s.is_scroll_locked() && s.host().is_scroll_locked());
        s.close(a, false);
        assert!(!s.is_scroll_locked() && !s.host().is_scroll_locked());
    }

    #[test]
    fn minimize_only_topmost() {
        let mut s = session();
        let a = s.show(minimizable());
        let b = s.show(minimizable());
        assert_eq!(
            s.minimize(a),
            Err(TransitionError::NotTopmost { topmost: b })
        );
        assert_eq!(s.state(a), Some(DialogState::Shown));
        assert!(s.tray().is_empty());

        s.minimize(b).unwrap();
        // b no longer counts; a is now topmost.
        assert_eq!(s.topmost(), Some(a));
        s.minimize(a).unwrap();
        assert_eq!(s.tray().entries(), &[b, a]);
    }

    #[test]
    fn minimize_preconditions() {
        let mut s = session();
        let plain = s.show(DialogOptions::new());
        assert_eq!(s.minimize(plain), Err(TransitionError::NotMinimizable));
        s.close(plain, true);
        assert_eq!(s.minimize(plain), Err(TransitionError::NotOpen));

        let m = s.show(minimizable());
        s.minimize(m).unwrap();
        assert_eq!(s.minimize(m), Err(TransitionError::AlreadyMinimized));
        assert_eq!(s.tray().len(), 1);
        assert_eq!(s.restore(plain), Err(TransitionError::NotOpen));
    }

    #[test]
    fn restore_requires_minimized() {
        let mut s = session();
        let a = s.show(minimizable());
        assert_eq!(s.restore(a), Err(TransitionError::NotMinimized));
    }

    #[test]
    fn closing_minimized_clears_registry_and_tray() {
        let mut s = session();
        let a = s.show(minimizable());
        s.minimize(a).unwrap();
        assert_eq!(s.close(a, false), CloseOutcome::Closed);
        assert!(!s.registry().contains(a));
        assert!(!s.tray().contains(a));
        assert_eq!(s.state(a), Some(DialogState::Destroyed));
        assert!(s.host().tray().is_none());
        assert!(!s.is_scroll_locked());
    }

    #[test]
    fn tray_scenario() {
        let mut s = session();
        let a = s.show(minimizable());
        s.host_mut().scroll_to(a, ScrollOffset::new(0, 120));
        s.minimize(a).unwrap();
        assert_eq!(s.tray().len(), 1);
        assert!(s.tray().is_indicator_visible());

        let b = s.show(minimizable());
        s.minimize(b).unwrap();
        assert_eq!(s.host().tray().unwrap().view.count(), 2);

        s.restore(a).unwrap();
        assert_eq!(s.tray().len(), 1);
        let mounted = s.host().dialog(a).unwrap();
        assert!(mounted.visible);
        assert_eq!(mounted.scroll, ScrollOffset::new(0, 120));

        assert!(s.toggle_tray_list());
        assert!(s.tray_click(b, TrayTarget::Discard));
        assert!(s.tray().is_empty());
        assert!(!s.tray().is_indicator_visible());
        assert!(!s.tray().is_list_open());
        assert!(!s.host().is_watching_outside_clicks());
        assert_eq!(s.state(b), Some(DialogState::Destroyed));
    }

    #[test]
    fn on_hide_can_veto_unless_forced() {
        let mut s = session();
        let a = s.show(DialogOptions::new().on_hide(|_| HideDecision::Cancel));
        assert_eq!(s.close(a, false), CloseOutcome::Vetoed);
        assert_eq!(s.state(a), Some(DialogState::Shown));
        assert_eq!(s.close(a, true), CloseOutcome::Closed);
        assert_eq!(s.close(a, true), CloseOutcome::NotOpen);
    }

    #[test]
    fn hooks_run_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let push = |name: &'static str| {
            let log = Rc::clone(&log);
            move |_: &mut DialogContext<'_>| log.borrow_mut().push(name)
        };
        let hide_log = Rc::clone(&log);
        let mut s = session();
        let a = s.show(
            minimizable()
                .on_show(push("show"))
                .on_shown(push("shown"))
                .on_minimize(push("minimize"))
                .on_restore(push("restore"))
                .on_hidden(push("hidden"))
                .on_hide(move |_| {
                    hide_log.borrow_mut().push("hide");
                    HideDecision::Proceed
                }),
        );
        s.minimize(a).unwrap();
        s.restore(a).unwrap();
        s.close(a, false);
        assert_eq!(
            *log.borrow(),
            vec!["show", "shown", "minimize", "restore", "hide", "hidden"]
        );
    }

    #[test]
    fn hook_requests_run_after_transition() {
        let mut s = session();
        let a = s.show(minimizable().on_shown(|ctx| ctx.minimize()));
        assert_eq!(s.state(a), Some(DialogState::Minimized));
        assert_eq!(s.tray().entries(), &[a]);
    }

    #[test]
    fn restore_hook_can_close() {
        let mut s = session();
        let a = s.show(minimizable().on_restore(|ctx| ctx.force_close()));
        s.minimize(a).unwrap();
        s.restore(a).unwrap();
        assert_eq!(s.state(a), Some(DialogState::Destroyed));
        assert!(s.registry().is_empty());
    }

    #[test]
    fn dismiss_honors_policy() {
        let mut s = session();
        let a = s.show(DialogOptions::new().title("T").backdrop(Backdrop::Static));
        assert_eq!(s.dismiss(a, DismissSource::Backdrop), CloseOutcome::Refused);
        s.set_closable(a, false);
        assert_eq!(s.dismiss(a, DismissSource::Keyboard), CloseOutcome::Refused);
        s.set_closable(a, true);
        assert_eq!(s.dismiss(a, DismissSource::CloseButton), CloseOutcome::Closed);
    }

    #[test]
    fn button_without_action_auto_closes() {
        let mut s = session();
        let a = s.show(DialogOptions::new().button(ButtonSpec::new("Ok")));
        assert!(s.click_button(a, "Ok"));
        assert_eq!(s.state(a), Some(DialogState::Destroyed));
    }

    #[test]
    fn keep_open_leaves_spinner_running() {
        let mut s = session();
        let a = s.show(
            DialogOptions::new().button(
                ButtonSpec::new("Save")
                    .id("btn_save")
                    .auto_spin(true)
                    .action(|_| ActionFlow::KeepOpen),
            ),
        );
        assert!(s.click_button(a, "#btn_save"));
        assert_eq!(s.state(a), Some(DialogState::Shown));
        assert!(s.button(a, "btn_save").unwrap().is_spinning());
        // spinning buttons are disabled, so a second click is ignored
        assert!(!s.click_button(a, 0usize));
        s.button_spin(a, "Save", false);
        assert!(!s.button(a, 0usize).unwrap().is_disabled());
    }

    #[test]
    fn generated_button_ids_are_unique() {
        let mut s = session();
        let a = s.show(DialogOptions::new().button(ButtonSpec::new("A")).button(ButtonSpec::new("B")));
        let b = s.show(DialogOptions::new().button(ButtonSpec::new("A")));
        let ids: Vec<&str> = [(a, 0usize), (a, 1), (b, 0)]
            .iter()
            .filter_map(|&(d, i)| s.button(d, i).map(Button::id))
            .collect();
        assert_eq!(ids, vec!["btn_1", "btn_2", "btn_3"]);
    }

    #[test]
    fn stale_load_is_discarded() {
        let mut s = session();
        let a = s.show(DialogOptions::new());
        let first = s.load_content(a, "/one", vec![]).unwrap();
        let second = s.load_content(a, "/two", vec![]).unwrap();
        assert_eq!(
            s.complete_load(first, Ok("old".into())),
            LoadOutcome::Discarded
        );
        assert_eq!(s.complete_load(second, Ok("new".into())), LoadOutcome::Applied);
        assert_eq!(s.host().dialog(a).unwrap().body, "new");
    }

    #[test]
    fn load_after_close_never_touches_host() {
        let mut s = session();
        let a = s.show(DialogOptions::new().ajax("/slow", vec![]));
        let request = s.host_mut().take_fetch().unwrap();
        s.close(a, true);
        s.host_mut().clear_calls();
        assert_eq!(
            s.complete_load(request.ticket, Ok("late".into())),
            LoadOutcome::Discarded
        );
        assert!(s.host().calls().is_empty());
    }

    #[test]
    fn failed_load_renders_inline_error() {
        let mut s = session();
        let a = s.show(DialogOptions::new());
        let ticket = s.load_content(a, "/x", vec![]).unwrap();
        let outcome = s.complete_load(ticket, Err(LoadError::Network("timeout".into())));
        assert_eq!(outcome, LoadOutcome::Failed);
        let body = &s.host().dialog(a).unwrap().body;
        assert!(body.contains("alert-danger"));
        assert!(body.contains("timeout"));
    }

    #[test]
    fn empty_message_shows_loading_placeholder() {
        let mut s = session();
        let a = s.show(DialogOptions::new());
        assert!(s.dialog(a).unwrap().body().contains("Loading..."));
    }

    #[test]
    fn outside_click_closes_list_only_when_watching() {
        let mut s = session();
        assert!(!s.outside_click());
        let a = s.show(minimizable());
        s.minimize(a).unwrap();
        s.toggle_tray_list();
        assert!(s.host().is_watching_outside_clicks());
        assert!(s.outside_click());
        assert!(!s.tray().is_list_open());
        assert!(!s.host().is_watching_outside_clicks());
    }

    #[test]
    fn tray_entry_restores_and_closes_list() {
        let mut s = session();
        let a = s.show(minimizable());
        s.minimize(a).unwrap();
        let b = s.show(minimizable());
        s.minimize(b).unwrap();
        s.toggle_tray_list();
        assert!(s.tray_click(a, TrayTarget::Entry));
        assert_eq!(s.state(a), Some(DialogState::Shown));
        assert!(!s.tray().is_list_open());
        assert_eq!(s.tray().entries(), &[b]);
    }

    #[test]
    fn tray_titles_and_language() {
        let mut s = session();
        let a = s.show(minimizable());
        s.minimize(a).unwrap();
        assert_eq!(s.host().tray().unwrap().view.entries[0].title, "T");
        s.set_title(a, "Renamed");
        assert_eq!(s.host().tray().unwrap().view.entries[0].title, "Renamed");
        assert!(s.set_language("de"));
        assert_eq!(s.host().tray().unwrap().view.heading, "Minimierte Dialoge");
    }

    #[test]
    fn teardown_releases_everything() {
        let mut s = session();
        let a = s.show(minimizable());
        s.minimize(a).unwrap();
        s.show(DialogOptions::new());
        s.toggle_tray_list();
        let host = s.teardown();
        assert!(host.mounted().is_empty());
        assert!(host.tray().is_none());
        assert!(!host.is_scroll_locked());
        assert!(!host.is_watching_outside_clicks());
        assert!(host.calls().contains(&HostCall::RemoveTray));
    }

    #[test]
    fn foreign_id_has_no_state() {
        let s = session();
        assert_eq!(s.state(DialogId::new(42)), None);
    }

    #[test]
    fn untitled_tray_entry_uses_translated_label() {
        let mut s = session();
        let a = s.show(DialogOptions::new().message("body").minimizable(true));
        s.minimize(a).unwrap();
        assert_eq!(s.host().tray().unwrap().view.entries[0].title, "Untitled");
        assert!(s.set_language("es"));
        assert_eq!(s.host().tray().unwrap().view.entries[0].title, "Sin título");
    }

    #[test]
    fn untitled_dialog_refuses_close_button_dismiss() {
        let mut s = session();
        let a = s.show(DialogOptions::new().message("body"));
        assert!(!s.host().dialog(a).unwrap().dismiss.close_button);
        assert_eq!(s.dismiss(a, DismissSource::CloseButton), CloseOutcome::Refused);
        assert_eq!(s.dismiss(a, DismissSource::Keyboard), CloseOutcome::Closed);
    }

    #[test]
    fn out_of_range_base_layer_is_clamped() {
        let config = SessionConfig {
            base_layer: 0,
            ..SessionConfig::default()
        };
        let mut s = Session::with_config(HeadlessHost::new(), Catalog::builtin(), config);
        assert_eq!(s.config().base_layer, 1);
        let a = s.show(DialogOptions::new());
        let mounted = s.host().dialog(a).unwrap();
        assert_eq!(mounted.layer, 1);
        assert_eq!(mounted.backdrop_layer, Some(0));
    }

    #[test]
    fn high_base_layer_keeps_layers_distinct() {
        let config = SessionConfig {
            base_layer: Layer::MAX - 5,
            ..SessionConfig::default()
        };
        let mut s = Session::with_config(HeadlessHost::new(), Catalog::builtin(), config);
        let ids: Vec<DialogId> = (0..3).map(|_| s.show(DialogOptions::new())).collect();
        let layers: Vec<Layer> = ids.iter().filter_map(|&id| s.layer(id)).collect();
        assert_eq!(layers.len(), 3);
        assert!(layers.windows(2).all(|w| w[0] < w[1]), "{layers:?}");
        for &id in &ids {
            let mounted = s.host().dialog(id).unwrap();
            assert_ne!(mounted.backdrop_layer, Some(mounted.layer));
        }
    }

    #[test]
    fn exhausted_layers_are_compacted() {
        let config = SessionConfig::default().base_layer(crate::registry::MAX_BASE_LAYER);
        let mut s = Session::with_config(HeadlessHost::new(), Catalog::builtin(), config);
        let a = s.show(DialogOptions::new());
        let b = s.show(minimizable());
        s.minimize(b).unwrap();
        s.registry.force_layer(b, Layer::MAX - 3);
        s.host_mut().clear_calls();

        let c = s.show(DialogOptions::new());
        let base = crate::registry::MAX_BASE_LAYER;
        assert_eq!(s.layer(a), Some(base));
        assert_eq!(s.layer(b), Some(base + 10));
        assert_eq!(s.layer(c), Some(base + 20));
        // Minimized dialogs are not revealed by the renumbering.
        assert!(!s.host().calls().contains(&HostCall::Reveal(b)));

        s.restore(b).unwrap();
        let mounted = s.host().dialog(b).unwrap();
        assert_eq!(mounted.layer, base + 10);
        assert_eq!(mounted.backdrop_layer, Some(base + 9));
    }
}
