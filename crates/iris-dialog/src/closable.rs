//! Close affordances and the `set_closable` snapshot.
//!
//! # Invariants
//!
//! - `set_closable(false)` snapshots the policy only when no snapshot exists,
//!   so repeated calls never overwrite the original.
//! - `set_closable(true)` restores the snapshot exactly and clears it; with no
//!   snapshot it is a no-op.

use iris_backend::{BackdropMode, DismissConfig};

/// Backdrop option as configured by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Backdrop {
    /// No dimming element.
    Off,
    /// Dimming element; clicking it closes when `close_on_backdrop` is set.
    #[default]
    On,
    /// Dimming element that never closes the dialog.
    Static,
}

/// A user gesture that asks a dialog to close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DismissSource {
    Backdrop,
    Keyboard,
    CloseButton,
}

/// How a dialog may currently be dismissed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClosePolicy {
    pub backdrop: Backdrop,
    pub close_on_backdrop: bool,
    pub keyboard: bool,
    pub close_button: bool,
}

impl ClosePolicy {
    /// Backdrop behavior handed to the host.
    pub fn backdrop_mode(&self) -> BackdropMode {
        match self.backdrop {
            Backdrop::Off => BackdropMode::None,
            Backdrop::On if self.close_on_backdrop => BackdropMode::Dismissable,
            Backdrop::On | Backdrop::Static => BackdropMode::Static,
        }
    }

    pub fn dismiss_config(&self) -> DismissConfig {
        DismissConfig {
            backdrop: self.backdrop_mode(),
            keyboard: self.keyboard,
            close_button: self.close_button,
        }
    }

    /// Whether `source` may close the dialog right now.
    pub fn allows(&self, source: DismissSource) -> bool {
        match source {
            DismissSource::Backdrop => self.backdrop_mode() == BackdropMode::Dismissable,
            DismissSource::Keyboard => self.keyboard,
            DismissSource::CloseButton => self.close_button,
        }
    }

    fn locked(self) -> Self {
        Self {
            close_on_backdrop: false,
            keyboard: false,
            close_button: false,
            ..self
        }
    }
}

/// Current policy plus the snapshot taken by `set_closable(false)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Closability {
    current: ClosePolicy,
    saved: Option<ClosePolicy>,
}

impl Closability {
    pub(crate) fn new(policy: ClosePolicy) -> Self {
        Self {
            current: policy,
            saved: None,
        }
    }

    pub(crate) fn policy(&self) -> &ClosePolicy {
        &self.current
    }

    pub(crate) fn is_locked(&self) -> bool {
        self.saved.is_some()
    }

    /// Apply `set_closable`. Returns `true` if the policy changed.
    pub(crate) fn set_closable(&mut self, closable: bool) -> bool {
        let before = self.current;
        if closable {
            if let Some(saved) = self.saved.take() {
                self.current = saved;
            }
        } else {
            self.saved.get_or_insert(self.current);
            self.current = self.current.locked();
        }
        before != self.current
    }
}
