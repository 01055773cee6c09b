//! In-memory [`Host`] for tests and headless embedding.
//!
//! Records every call and keeps the observable state of each mounted dialog,
//! the page scroll lock, the rendered tray and queued fetches. Test code plays
//! the user's part with [`HeadlessHost::scroll_to`], [`HeadlessHost::move_to`]
//! and [`HeadlessHost::type_input`].

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use ahash::AHashMap;

use crate::{
    ButtonView, ContentRequest, DialogId, DismissConfig, Host, Layer, MountSpec, Part, Point,
    ScrollOffset, TrayConfig, TrayView,
};

/// One recorded host call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Mount(DialogId),
    Unmount(DialogId),
    Hide(DialogId),
    Reveal(DialogId),
    SetTitle(DialogId),
    SetBody(DialogId),
    SetClasses(DialogId, Part),
    SetDismiss(DialogId),
    SetButton(DialogId, usize),
    FocusInput(DialogId, String),
    SetScrollOffset(DialogId),
    SetPosition(DialogId),
    ScrollLock(bool),
    RenderTray,
    RemoveTray,
    OutsideClickWatch(bool),
    Fetch(DialogId),
}

/// Observable state of one mounted dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedDialog {
    pub layer: Layer,
    pub backdrop_layer: Option<Layer>,
    pub visible: bool,
    pub element_id: Option<String>,
    pub title: Option<String>,
    pub body: String,
    pub dialog_classes: Vec<&'static str>,
    pub classes: BTreeMap<Part, BTreeSet<String>>,
    pub dismiss: DismissConfig,
    pub buttons: Vec<ButtonView>,
    pub draggable: bool,
    pub scroll: ScrollOffset,
    pub position: Option<Point>,
    pub focused_input: Option<String>,
}

impl MountedDialog {
    fn from_spec(spec: &MountSpec) -> Self {
        let mut classes: BTreeMap<Part, BTreeSet<String>> = BTreeMap::new();
        for (part, class) in [
            (Part::Header, spec.header_class),
            (Part::Title, spec.title_class),
            (Part::CloseButton, spec.close_button_class),
        ] {
            let set = classes.entry(part).or_default();
            if let Some(class) = class {
                set.insert(class.to_string());
            }
        }
        Self {
            layer: spec.layer,
            backdrop_layer: spec.backdrop_layer,
            visible: true,
            element_id: spec.element_id.clone(),
            title: spec.title.clone(),
            body: spec.body.clone(),
            dialog_classes: spec.dialog_classes.clone(),
            classes,
            dismiss: spec.dismiss,
            buttons: spec.buttons.clone(),
            draggable: spec.draggable,
            scroll: ScrollOffset::default(),
            position: None,
            focused_input: None,
        }
    }

    /// Classes currently applied to `part`.
    pub fn classes_of(&self, part: Part) -> Vec<&str> {
        self.classes
            .get(&part)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// Last tray rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTray {
    pub config: TrayConfig,
    pub view: TrayView,
}

/// Recording, in-memory host.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    calls: Vec<HostCall>,
    dialogs: BTreeMap<DialogId, MountedDialog>,
    inputs: AHashMap<(DialogId, String), String>,
    fetches: VecDeque<ContentRequest>,
    tray: Option<RenderedTray>,
    scroll_locked: bool,
    outside_click_watch: bool,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call since creation (or the last [`clear_calls`](Self::clear_calls)).
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// State of a mounted dialog.
    pub fn dialog(&self, id: DialogId) -> Option<&MountedDialog> {
        self.dialogs.get(&id)
    }

    /// Ids of every mounted dialog, visible or not.
    pub fn mounted(&self) -> Vec<DialogId> {
        self.dialogs.keys().copied().collect()
    }

    /// Ids of visible dialogs, lowest layer first.
    pub fn visible(&self) -> Vec<DialogId> {
        let mut visible: Vec<(Layer, DialogId)> = self
            .dialogs
            .iter()
            .filter(|(_, d)| d.visible)
            .map(|(id, d)| (d.layer, *id))
            .collect();
        visible.sort_unstable();
        visible.into_iter().map(|(_, id)| id).collect()
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn tray(&self) -> Option<&RenderedTray> {
        self.tray.as_ref()
    }

    pub fn is_watching_outside_clicks(&self) -> bool {
        self.outside_click_watch
    }

    /// Take the oldest outstanding fetch request.
    pub fn take_fetch(&mut self) -> Option<ContentRequest> {
        self.fetches.pop_front()
    }

    pub fn pending_fetches(&self) -> usize {
        self.fetches.len()
    }

    /// Simulate the user scrolling a dialog body.
    pub fn scroll_to(&mut self, id: DialogId, offset: ScrollOffset) {
        if let Some(dialog) = self.dialogs.get_mut(&id) {
            dialog.scroll = offset;
        }
    }

    /// Simulate the user dragging a dialog.
    pub fn move_to(&mut self, id: DialogId, position: Point) {
        if let Some(dialog) = self.dialogs.get_mut(&id) {
            dialog.position = Some(position);
        }
    }

    /// Simulate the user typing into an input field.
    pub fn type_input(&mut self, id: DialogId, field: &str, value: &str) {
        self.inputs
            .insert((id, field.to_string()), value.to_string());
    }
}

impl Host for HeadlessHost {
    fn mount(&mut self, spec: &MountSpec) {
        self.calls.push(HostCall::Mount(spec.id));
        self.dialogs.insert(spec.id, MountedDialog::from_spec(spec));
    }

    fn unmount(&mut self, id: DialogId) {
        self.calls.push(HostCall::Unmount(id));
        self.dialogs.remove(&id);
        self.inputs.retain(|(owner, _), _| *owner != id);
    }

    fn hide(&mut self, id: DialogId) {
        self.calls.push(HostCall::Hide(id));
        if let Some(dialog) = self.dialogs.get_mut(&id) {
            dialog.visible = false;
        }
    }

    fn reveal(&mut self, id: DialogId, layer: Layer, backdrop: Option<Layer>) {
        self.calls.push(HostCall::Reveal(id));
        if let Some(dialog) = self.dialogs.get_mut(&id) {
            dialog.visible = true;
            dialog.layer = layer;
            dialog.backdrop_layer = backdrop;
        }
    }

    fn set_title(&mut self, id: DialogId, title: &str) {
        self.calls.push(HostCall::SetTitle(id));
        if let Some(dialog) = self.dialogs.get_mut(&id) {
            dialog.title = Some(title.to_string());
        }
    }

    fn set_body(&mut self, id: DialogId, body: &str) {
        self.calls.push(HostCall::SetBody(id));
        if let Some(dialog) = self.dialogs.get_mut(&id) {
            dialog.body = body.to_string();
        }
    }

    fn set_classes(&mut self, id: DialogId, part: Part, remove: &[&str], add: &[&str]) {
        self.calls.push(HostCall::SetClasses(id, part));
        if let Some(dialog) = self.dialogs.get_mut(&id) {
            let set = dialog.classes.entry(part).or_default();
            for class in remove {
                set.remove(*class);
            }
            for class in add {
                set.insert((*class).to_string());
            }
        }
    }

    fn set_dismiss(&mut self, id: DialogId, dismiss: &DismissConfig) {
        self.calls.push(HostCall::SetDismiss(id));
        if let Some(dialog) = self.dialogs.get_mut(&id) {
            dialog.dismiss = *dismiss;
        }
    }

    fn set_button(&mut self, id: DialogId, button: &ButtonView) {
        self.calls.push(HostCall::SetButton(id, button.index));
        if let Some(slot) = self
            .dialogs
            .get_mut(&id)
            .and_then(|d| d.buttons.get_mut(button.index))
        {
            *slot = button.clone();
        }
    }

    fn focus_input(&mut self, id: DialogId, field: &str) {
        self.calls.push(HostCall::FocusInput(id, field.to_string()));
        if let Some(dialog) = self.dialogs.get_mut(&id) {
            dialog.focused_input = Some(field.to_string());
        }
    }

    fn input_value(&self, id: DialogId, field: &str) -> Option<String> {
        if !self.dialogs.contains_key(&id) {
            return None;
        }
        self.inputs.get(&(id, field.to_string())).cloned()
    }

    fn scroll_offset(&self, id: DialogId) -> ScrollOffset {
        self.dialogs
            .get(&id)
            .map(|d| d.scroll)
            .unwrap_or_default()
    }

    fn set_scroll_offset(&mut self, id: DialogId, offset: ScrollOffset) {
        self.calls.push(HostCall::SetScrollOffset(id));
        self.scroll_to(id, offset);
    }

    fn position(&self, id: DialogId) -> Option<Point> {
        self.dialogs.get(&id).and_then(|d| d.position)
    }

    fn set_position(&mut self, id: DialogId, position: Point) {
        self.calls.push(HostCall::SetPosition(id));
        self.move_to(id, position);
    }

    fn set_scroll_lock(&mut self, locked: bool) {
        self.calls.push(HostCall::ScrollLock(locked));
        self.scroll_locked = locked;
    }

    fn render_tray(&mut self, config: &TrayConfig, view: &TrayView) {
        self.calls.push(HostCall::RenderTray);
        self.tray = Some(RenderedTray {
            config: config.clone(),
            view: view.clone(),
        });
    }

    fn remove_tray(&mut self) {
        self.calls.push(HostCall::RemoveTray);
        self.tray = None;
    }

    fn set_outside_click_watch(&mut self, active: bool) {
        self.calls.push(HostCall::OutsideClickWatch(active));
        self.outside_click_watch = active;
    }

    fn fetch(&mut self, request: ContentRequest) {
        self.calls.push(HostCall::Fetch(request.ticket.dialog));
        self.fetches.push_back(request);
    }
}
