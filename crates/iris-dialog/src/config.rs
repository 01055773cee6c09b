//! Session and per-dialog defaults.
//!
//! With the `serde` feature every type here loads from partial JSON: missing
//! fields take their default.

use iris_backend::{Layer, TrayConfig};

use crate::closable::Backdrop;
use crate::options::DialogSize;
use crate::palette::DialogType;
use crate::registry::{BASE_LAYER, MAX_BASE_LAYER, MIN_BASE_LAYER};

/// Spinner classes used when a dialog does not set its own.
pub const DEFAULT_SPIN_ICON: &str = "spinner-border spinner-border-sm";

/// Values a dialog option takes when the caller leaves it unset.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct DialogDefaults {
    pub backdrop: Backdrop,
    pub keyboard: bool,
    pub close_on_backdrop: bool,
    pub close_button: bool,
    pub centered: bool,
    pub scrollable: bool,
    pub draggable: bool,
    pub minimizable: bool,
    pub spin_icon: String,
    pub size: DialogSize,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: DialogType,
}

impl Default for DialogDefaults {
    fn default() -> Self {
        Self {
            backdrop: Backdrop::On,
            keyboard: true,
            close_on_backdrop: true,
            close_button: true,
            centered: false,
            scrollable: false,
            draggable: false,
            minimizable: false,
            spin_icon: DEFAULT_SPIN_ICON.to_string(),
            size: DialogSize::Normal,
            kind: DialogType::Default,
        }
    }
}

/// Configuration of one [`Session`](crate::session::Session).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct SessionConfig {
    /// Layer of the first dialog.
    pub base_layer: Layer,
    pub defaults: DialogDefaults,
    pub tray: TrayConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_layer: BASE_LAYER,
            defaults: DialogDefaults::default(),
            tray: TrayConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Layer of the first dialog, clamped to
    /// [`MIN_BASE_LAYER`]`..=`[`MAX_BASE_LAYER`].
    #[must_use]
    pub fn base_layer(mut self, base_layer: Layer) -> Self {
        self.base_layer = base_layer.clamp(MIN_BASE_LAYER, MAX_BASE_LAYER);
        self
    }

    #[must_use]
    pub fn defaults(mut self, defaults: DialogDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    #[must_use]
    pub fn tray(mut self, tray: TrayConfig) -> Self {
        self.tray = tray;
        self
    }
}
