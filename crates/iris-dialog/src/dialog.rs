//! One dialog instance and its host-facing mutations.
//!
//! A [`Dialog`] owns its configuration snapshot, body, close policy, buttons
//! and hooks. Lifecycle transitions are driven by the
//! [`Session`](crate::session::Session); the methods here only keep the
//! instance and its mounted element in step.
//!
//! # Invariants
//!
//! - The minimized capture exists only while the state is `Minimized`.
//! - Once `Destroyed`, no method touches the host again.

use iris_backend::{DialogId, Host, Layer, MountSpec, Part, Point, ScrollOffset};

use crate::button::{self, Button, ButtonRef};
use crate::closable::{Backdrop, Closability, ClosePolicy};
use crate::context::Hooks;
use crate::options::{DialogConfig, DialogFlags};
use crate::palette::{CLOSE_BUTTON_CLASSES, DialogType, HEADER_CLASSES, TITLE_CLASSES};

/// Lifecycle state of a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogState {
    Shown,
    Minimized,
    /// Closed. Terminal.
    Destroyed,
}

/// What minimizing saved, for restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MinimizedCapture {
    scroll: ScrollOffset,
    /// Only recorded for draggable dialogs.
    position: Option<Point>,
    backdrop: Option<Layer>,
}

#[derive(Debug)]
pub struct Dialog {
    id: DialogId,
    layer: Layer,
    state: DialogState,
    config: DialogConfig,
    body: String,
    closability: Closability,
    pub(crate) buttons: Vec<Button>,
    pub(crate) hooks: Hooks,
    capture: Option<MinimizedCapture>,
    /// Sequence number of the newest outstanding content load.
    pub(crate) pending_load: Option<u64>,
}

impl Dialog {
    pub(crate) fn new(
        id: DialogId,
        layer: Layer,
        config: DialogConfig,
        policy: ClosePolicy,
        buttons: Vec<Button>,
        hooks: Hooks,
        body: String,
    ) -> Self {
        Self {
            id,
            layer,
            state: DialogState::Shown,
            config,
            body,
            closability: Closability::new(policy),
            buttons,
            hooks,
            capture: None,
            pending_load: None,
        }
    }

    // --- State Queries ---

    #[inline]
    pub fn id(&self) -> DialogId {
        self.id
    }

    #[inline]
    pub fn layer(&self) -> Layer {
        self.layer
    }

    #[inline]
    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    pub fn title(&self) -> Option<&str> {
        self.config.title.as_deref()
    }

    /// Current body markup.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn kind(&self) -> DialogType {
        self.config.kind
    }

    pub fn flags(&self) -> DialogFlags {
        self.config.flags
    }

    pub fn is_minimizable(&self) -> bool {
        self.config.flags.contains(DialogFlags::MINIMIZABLE)
    }

    pub fn is_draggable(&self) -> bool {
        self.config.flags.contains(DialogFlags::DRAGGABLE)
    }

    /// Close policy in effect right now.
    pub fn policy(&self) -> &ClosePolicy {
        self.closability.policy()
    }

    /// `false` between `set_closable(false)` and `set_closable(true)`.
    pub fn is_closable(&self) -> bool {
        !self.closability.is_locked()
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn button(&self, target: &ButtonRef) -> Option<&Button> {
        button::resolve(&self.buttons, target).map(|index| &self.buttons[index])
    }

    /// Layer of the dimming backdrop, one below the dialog.
    pub fn backdrop_layer(&self) -> Option<Layer> {
        match self.policy().backdrop {
            Backdrop::Off => None,
            Backdrop::On | Backdrop::Static => self.layer.checked_sub(1),
        }
    }

    /// Whether a content load is outstanding.
    pub fn is_loading(&self) -> bool {
        self.pending_load.is_some()
    }

    pub(crate) fn mount_spec(&self) -> MountSpec {
        let classes = self.config.kind.classes();
        MountSpec {
            id: self.id,
            layer: self.layer,
            backdrop_layer: self.backdrop_layer(),
            element_id: self.config.element_id.clone(),
            title: self.config.title.clone(),
            body: self.body.clone(),
            dialog_classes: self.config.dialog_classes(),
            header_class: classes.header,
            title_class: classes.title,
            close_button_class: classes.close_button,
            dismiss: self.policy().dismiss_config(),
            buttons: self
                .buttons
                .iter()
                .enumerate()
                .map(|(index, b)| b.view(index))
                .collect(),
            draggable: self.is_draggable(),
        }
    }

    #[inline]
    fn is_live(&self) -> bool {
        self.state != DialogState::Destroyed
    }

    // --- Accessors ---

    /// Move to `layer`. A shown dialog is re-displayed there at once; a
    /// minimized one comes back at it on restore.
    pub(crate) fn relayer(&mut self, host: &mut dyn Host, layer: Layer) {
        if !self.is_live() {
            return;
        }
        self.layer = layer;
        let backdrop = self.backdrop_layer();
        match &mut self.capture {
            Some(capture) => capture.backdrop = capture.backdrop.and(backdrop),
            None => host.reveal(self.id, layer, backdrop),
        }
    }

    pub(crate) fn set_title(&mut self, host: &mut dyn Host, title: &str) {
        if !self.is_live() {
            return;
        }
        self.config.title = Some(title.to_string());
        host.set_title(self.id, title);
    }

    pub(crate) fn set_content(&mut self, host: &mut dyn Host, content: &str) {
        if !self.is_live() {
            return;
        }
        self.body = content.to_string();
        host.set_body(self.id, content);
    }

    /// Swap the header theme, clearing every class any type may have applied.
    pub(crate) fn set_type(&mut self, host: &mut dyn Host, kind: DialogType) {
        if !self.is_live() {
            return;
        }
        self.config.kind = kind;
        let classes = kind.classes();
        host.set_classes(self.id, Part::Header, &HEADER_CLASSES, classes.header.as_slice());
        host.set_classes(self.id, Part::Title, &TITLE_CLASSES, classes.title.as_slice());
        host.set_classes(
            self.id,
            Part::CloseButton,
            &CLOSE_BUTTON_CLASSES,
            classes.close_button.as_slice(),
        );
    }

    pub(crate) fn set_closable(&mut self, host: &mut dyn Host, closable: bool) {
        if !self.is_live() {
            return;
        }
        if self.closability.set_closable(closable) {
            host.set_dismiss(self.id, &self.policy().dismiss_config());
        }
    }

    // --- Buttons ---

    fn push_button(&self, host: &mut dyn Host, index: usize) {
        if let Some(button) = self.buttons.get(index) {
            host.set_button(self.id, &button.view(index));
        }
    }

    pub(crate) fn resolve_button(&self, target: &ButtonRef) -> Option<usize> {
        button::resolve(&self.buttons, target)
    }

    pub(crate) fn set_button_disabled(
        &mut self,
        host: &mut dyn Host,
        target: &ButtonRef,
        disabled: bool,
    ) {
        if !self.is_live() {
            return;
        }
        let Some(index) = self.resolve_button(target) else {
            return;
        };
        if self.buttons[index].set_disabled(disabled) {
            self.push_button(host, index);
        }
    }

    pub(crate) fn set_all_buttons_disabled(&mut self, host: &mut dyn Host, disabled: bool) {
        if !self.is_live() {
            return;
        }
        for index in 0..self.buttons.len() {
            if self.buttons[index].set_disabled(disabled) {
                self.push_button(host, index);
            }
        }
    }

    pub(crate) fn button_spin(&mut self, host: &mut dyn Host, target: &ButtonRef, spin: bool) {
        if !self.is_live() {
            return;
        }
        let Some(index) = self.resolve_button(target) else {
            return;
        };
        if self.spin_at(index, spin) {
            self.push_button(host, index);
        }
    }

    pub(crate) fn button_spin_all(&mut self, host: &mut dyn Host, spin: bool) {
        if !self.is_live() {
            return;
        }
        for index in 0..self.buttons.len() {
            if self.spin_at(index, spin) {
                self.push_button(host, index);
            }
        }
    }

    fn spin_at(&mut self, index: usize, spin: bool) -> bool {
        let spin_icon = &self.config.spin_icon;
        match self.buttons.get_mut(index) {
            Some(button) if spin => button.start_spin(spin_icon),
            Some(button) => button.stop_spin(),
            None => false,
        }
    }

    // --- Transitions ---

    /// Save scroll, position and backdrop, then hide.
    pub(crate) fn minimize(&mut self, host: &mut dyn Host) {
        let position = if self.is_draggable() {
            host.position(self.id)
        } else {
            None
        };
        self.capture = Some(MinimizedCapture {
            scroll: host.scroll_offset(self.id),
            position,
            backdrop: self.backdrop_layer(),
        });
        host.hide(self.id);
        self.state = DialogState::Minimized;
    }

    /// Re-display at the dialog's layer and put back what minimize saved.
    pub(crate) fn restore(&mut self, host: &mut dyn Host) {
        let capture = self.capture.take().unwrap_or(MinimizedCapture {
            scroll: ScrollOffset::default(),
            position: None,
            backdrop: self.backdrop_layer(),
        });
        host.reveal(self.id, self.layer, capture.backdrop);
        host.set_scroll_offset(self.id, capture.scroll);
        if let Some(position) = capture.position {
            host.set_position(self.id, position);
        }
        self.state = DialogState::Shown;
    }

    pub(crate) fn mark_destroyed(&mut self) {
        self.state = DialogState::Destroyed;
        self.capture = None;
        self.pending_load = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::ButtonSpec;
    use crate::config::DialogDefaults;
    use crate::options::DialogOptions;
    use iris_backend::{BackdropMode, HeadlessHost, HostCall};

    fn dialog(options: DialogOptions) -> Dialog {
        let resolved = options.resolve(&DialogDefaults::default());
        let buttons = resolved
            .buttons
            .into_iter()
            .enumerate()
            .map(|(n, spec)| spec.build(format!("btn_{n}")))
            .collect();
        let body = resolved.config.message.clone();
        Dialog::new(
            DialogId::new(1),
            1050,
            resolved.config,
            resolved.policy,
            buttons,
            resolved.hooks,
            body,
        )
    }

    fn mounted(options: DialogOptions) -> (Dialog, HeadlessHost) {
        let d = dialog(options);
        let mut host = HeadlessHost::new();
        host.mount(&d.mount_spec());
        (d, host)
    }

    #[test]
    fn mount_spec_carries_layers_and_classes() {
        let d = dialog(
            DialogOptions::new()
                .title("T")
                .kind(DialogType::Danger)
                .centered(true),
        );
        let spec = d.mount_spec();
        assert_eq!(spec.layer, 1050);
        assert_eq!(spec.backdrop_layer, Some(1049));
        assert_eq!(spec.header_class, Some("bg-danger"));
        assert_eq!(spec.title_class, Some("text-white"));
        assert_eq!(spec.dialog_classes, vec!["modal-dialog-centered"]);
        assert_eq!(spec.dismiss.backdrop, BackdropMode::Dismissable);
    }

    #[test]
    fn no_backdrop_layer_when_off() {
        let d = dialog(DialogOptions::new().backdrop(Backdrop::Off));
        assert_eq!(d.backdrop_layer(), None);
    }

    #[test]
    fn set_type_never_stacks_classes() {
        let (mut d, mut host) = mounted(DialogOptions::new().title("T").kind(DialogType::Primary));
        d.set_type(&mut host, DialogType::Warning);
        d.set_type(&mut host, DialogType::Danger);
        let m = host.dialog(d.id()).unwrap();
        assert_eq!(m.classes_of(Part::Header), vec!["bg-danger"]);
        assert_eq!(m.classes_of(Part::Title), vec!["text-white"]);
        assert_eq!(m.classes_of(Part::CloseButton), vec!["btn-close-white"]);

        d.set_type(&mut host, DialogType::Warning);
        let m = host.dialog(d.id()).unwrap();
        assert_eq!(m.classes_of(Part::Header), vec!["bg-warning"]);
        assert_eq!(m.classes_of(Part::Title), vec!["text-dark"]);
        assert!(m.classes_of(Part::CloseButton).is_empty());
        assert_eq!(d.kind(), DialogType::Warning);
    }

    #[test]
    fn set_closable_pushes_dismiss_only_on_change() {
        let (mut d, mut host) = mounted(DialogOptions::new().title("T"));
        host.clear_calls();
        d.set_closable(&mut host, true);
        assert!(host.calls().is_empty());

        d.set_closable(&mut host, false);
        assert!(!d.is_closable());
        let dismiss = host.dialog(d.id()).unwrap().dismiss;
        assert_eq!(dismiss.backdrop, BackdropMode::Static);
        assert!(!dismiss.keyboard && !dismiss.close_button);

        d.set_closable(&mut host, true);
        let dismiss = host.dialog(d.id()).unwrap().dismiss;
        assert_eq!(dismiss.backdrop, BackdropMode::Dismissable);
        assert!(dismiss.keyboard && dismiss.close_button);
    }

    #[test]
    fn button_spin_round_trip_through_host() {
        let (mut d, mut host) = mounted(
            DialogOptions::new()
                .button(ButtonSpec::new("Cancel"))
                .button(ButtonSpec::new("Save").icon("bi bi-save")),
        );
        let before = host.dialog(d.id()).unwrap().buttons[1].clone();

        d.button_spin(&mut host, &"Save".into(), true);
        let spinning = &host.dialog(d.id()).unwrap().buttons[1];
        assert!(spinning.spinning && spinning.disabled);
        assert!(spinning.content.contains("spinner-border"));

        host.clear_calls();
        d.button_spin(&mut host, &ButtonRef::Index(1), true);
        assert!(host.calls().is_empty());

        d.button_spin(&mut host, &"btn_1".into(), false);
        assert_eq!(host.dialog(d.id()).unwrap().buttons[1], before);
    }

    #[test]
    fn unresolved_button_is_noop() {
        let (mut d, mut host) = mounted(DialogOptions::new().button(ButtonSpec::new("Ok")));
        host.clear_calls();
        d.set_button_disabled(&mut host, &"Nope".into(), true);
        d.button_spin(&mut host, &ButtonRef::Index(3), true);
        assert!(host.calls().is_empty());
    }

    #[test]
    fn enable_all_buttons() {
        let (mut d, mut host) = mounted(
            DialogOptions::new()
                .button(ButtonSpec::new("A").disabled(true))
                .button(ButtonSpec::new("B")),
        );
        host.clear_calls();
        d.set_all_buttons_disabled(&mut host, false);
        assert_eq!(host.calls(), &[HostCall::SetButton(d.id(), 0)]);
        assert!(d.buttons().iter().all(|b| !b.is_disabled()));
    }

    #[test]
    fn minimize_restore_keeps_scroll_and_position() {
        let (mut d, mut host) = mounted(DialogOptions::new().draggable(true));
        host.scroll_to(d.id(), ScrollOffset::new(0, 240));
        host.move_to(d.id(), Point::new(30, 40));

        d.minimize(&mut host);
        assert_eq!(d.state(), DialogState::Minimized);
        assert!(!host.dialog(d.id()).unwrap().visible);

        host.scroll_to(d.id(), ScrollOffset::default());
        host.move_to(d.id(), Point::new(0, 0));
        d.restore(&mut host);

        let m = host.dialog(d.id()).unwrap();
        assert!(m.visible);
        assert_eq!(m.scroll, ScrollOffset::new(0, 240));
        assert_eq!(m.position, Some(Point::new(30, 40)));
        assert_eq!(m.backdrop_layer, Some(1049));
        assert_eq!(d.state(), DialogState::Shown);
    }

    #[test]
    fn position_ignored_unless_draggable() {
        let (mut d, mut host) = mounted(DialogOptions::new());
        host.move_to(d.id(), Point::new(5, 5));
        d.minimize(&mut host);
        host.clear_calls();
        d.restore(&mut host);
        assert!(!host.calls().contains(&HostCall::SetPosition(d.id())));
    }

    #[test]
    fn destroyed_dialog_ignores_mutations() {
        let (mut d, mut host) = mounted(DialogOptions::new().title("T"));
        d.mark_destroyed();
        host.clear_calls();
        d.set_title(&mut host, "New");
        d.set_content(&mut host, "x");
        d.set_type(&mut host, DialogType::Info);
        assert!(host.calls().is_empty());
        assert_eq!(d.title(), Some("T"));
    }
}
