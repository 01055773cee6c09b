#![forbid(unsafe_code)]

//! Host capability traits for Iris.
//!
//! The dialog coordinator never touches rendering primitives. Everything it
//! needs from the page (mounting elements, toggling classes, reading scroll
//! offsets, fetching remote content) goes through the [`Host`] trait, so the
//! lifecycle state machine can run headless in tests via [`HeadlessHost`].
//!
//! # Layering
//!
//! Each dialog is assigned a [`Layer`]. Its dimming backdrop, when present,
//! sits one unit below at `layer - 1`; dialogs are spaced ten units apart so
//! auxiliary host elements have room in between.

mod headless;

pub use headless::{HeadlessHost, HostCall, MountedDialog, RenderedTray};

use std::fmt;

/// Stacking depth assigned to a dialog's visual elements.
pub type Layer = u32;

/// Unique identifier for a dialog within a session. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DialogId(u64);

impl DialogId {
    /// Wrap a raw id.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw ID value.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dialog-{}", self.0)
    }
}

/// Scroll offset of a dialog body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ScrollOffset {
    pub x: i32,
    pub y: i32,
}

impl ScrollOffset {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Top-left position of a repositioned (dragged) dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Backdrop behavior handed to the host toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackdropMode {
    /// No backdrop element.
    None,
    /// Backdrop that closes the dialog when clicked.
    Dismissable,
    /// Backdrop that swallows clicks.
    Static,
}

/// Element of a mounted dialog whose classes can change after mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Part {
    Header,
    Title,
    CloseButton,
}

/// The ways a user can dismiss a dialog, as currently permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DismissConfig {
    pub backdrop: BackdropMode,
    pub keyboard: bool,
    pub close_button: bool,
}

/// Rendered state of one footer button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    /// 0-based position in the footer.
    pub index: usize,
    /// Element id.
    pub id: String,
    /// Rendered inner content (icon markup, spinner and label).
    pub content: String,
    pub css_class: String,
    pub disabled: bool,
    pub spinning: bool,
}

/// Everything a host needs to build a dialog's elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountSpec {
    pub id: DialogId,
    pub layer: Layer,
    /// Layer of the dimming backdrop; `None` when the backdrop is off.
    pub backdrop_layer: Option<Layer>,
    /// Caller-supplied element id for the dialog box.
    pub element_id: Option<String>,
    pub title: Option<String>,
    pub body: String,
    /// Size, centering and scrolling classes for the dialog box.
    pub dialog_classes: Vec<&'static str>,
    pub header_class: Option<&'static str>,
    pub title_class: Option<&'static str>,
    pub close_button_class: Option<&'static str>,
    pub dismiss: DismissConfig,
    pub buttons: Vec<ButtonView>,
    pub draggable: bool,
}

/// Screen corner the tray is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TrayAnchor {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

/// Static, process-wide tray appearance, read at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct TrayConfig {
    pub anchor: TrayAnchor,
    /// Horizontal distance from the anchored edge, in pixels.
    pub offset_x: u32,
    /// Vertical distance from the anchored edge, in pixels.
    pub offset_y: u32,
    pub layer: Layer,
    pub color: String,
    /// Maximum height of the expanded list, in pixels.
    pub max_list_height: u32,
    /// Diameter of the indicator button, in pixels.
    pub button_size: u32,
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            anchor: TrayAnchor::BottomRight,
            offset_x: 20,
            offset_y: 20,
            layer: 1090,
            color: "#0d6efd".to_string(),
            max_list_height: 300,
            button_size: 48,
        }
    }
}

/// One minimized dialog as listed in the tray.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrayEntryView {
    pub id: DialogId,
    pub title: String,
}

/// Tray state to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrayView {
    pub heading: String,
    /// Label for each entry's discard control.
    pub discard_label: String,
    pub indicator_visible: bool,
    pub list_open: bool,
    /// Oldest-minimized first.
    pub entries: Vec<TrayEntryView>,
}

impl TrayView {
    /// Badge count.
    #[inline]
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

/// Identifies one outstanding content load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    pub dialog: DialogId,
    pub seq: u64,
}

/// A request for remote body content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRequest {
    pub ticket: LoadTicket,
    pub url: String,
    /// Query parameters; the host encodes them.
    pub params: Vec<(String, String)>,
}

/// Rendering and I/O surface the dialog coordinator drives.
///
/// All calls happen on the host's UI thread, synchronously within an input
/// or network-completion handler. Implementations must tolerate calls for
/// ids they have never mounted (treat as no-ops).
pub trait Host {
    /// Build and display a dialog.
    fn mount(&mut self, spec: &MountSpec);

    /// Remove a dialog and its backdrop, releasing its elements.
    fn unmount(&mut self, id: DialogId);

    /// Hide a dialog and its backdrop without releasing them.
    fn hide(&mut self, id: DialogId);

    /// Re-display a hidden dialog at `layer`, with its backdrop at `backdrop`.
    fn reveal(&mut self, id: DialogId, layer: Layer, backdrop: Option<Layer>);

    fn set_title(&mut self, id: DialogId, title: &str);

    fn set_body(&mut self, id: DialogId, body: &str);

    /// Remove `remove` classes then add `add` classes on one part.
    fn set_classes(&mut self, id: DialogId, part: Part, remove: &[&str], add: &[&str]);

    fn set_dismiss(&mut self, id: DialogId, dismiss: &DismissConfig);

    fn set_button(&mut self, id: DialogId, button: &ButtonView);

    fn focus_input(&mut self, id: DialogId, field: &str);

    /// Current value of an input field inside the dialog body.
    fn input_value(&self, id: DialogId, field: &str) -> Option<String>;

    fn scroll_offset(&self, id: DialogId) -> ScrollOffset;

    fn set_scroll_offset(&mut self, id: DialogId, offset: ScrollOffset);

    /// Position of a repositioned dialog, `None` if it sits where it was mounted.
    fn position(&self, id: DialogId) -> Option<Point>;

    fn set_position(&mut self, id: DialogId, position: Point);

    /// Page-level scroll lock while any dialog is open.
    fn set_scroll_lock(&mut self, locked: bool);

    fn render_tray(&mut self, config: &TrayConfig, view: &TrayView);

    fn remove_tray(&mut self);

    /// Install or remove the single page-wide outside-click listener.
    fn set_outside_click_watch(&mut self, active: bool);

    /// Start fetching remote content. The answer comes back later through the
    /// session's completion entry point with the same ticket.
    fn fetch(&mut self, request: ContentRequest);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialog_id_display() {
        assert_eq!(DialogId::new(7).to_string(), "dialog-7");
        assert_eq!(DialogId::new(7).id(), 7);
    }

    #[test]
    fn tray_view_count() {
        let view = TrayView {
            heading: String::new(),
            discard_label: String::new(),
            indicator_visible: true,
            list_open: false,
            entries: vec![TrayEntryView {
                id: DialogId::new(1),
                title: "A".into(),
            }],
        };
        assert_eq!(view.count(), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn tray_config_from_partial_json() {
        let config: TrayConfig =
            serde_json::from_str(r#"{"anchor":"top-left","maxListHeight":120}"#).unwrap();
        assert_eq!(config.anchor, TrayAnchor::TopLeft);
        assert_eq!(config.max_list_height, 120);
        assert_eq!(config.button_size, TrayConfig::default().button_size);
    }
}
