#![forbid(unsafe_code)]

//! Dialog lifecycle, stacking and minimize tray for Iris.
//!
//! This crate provides:
//! - [`Session`], the per-page coordinator that shows, closes, minimizes and
//!   restores dialogs and keeps page-wide state in step
//! - [`Registry`] for layer assignment and [`Tray`] for minimized dialogs
//! - [`DialogOptions`] and [`ButtonSpec`] builders, plus ready-made presets
//!   (`alert`, `confirm`, `prompt`, ...)
//!
//! Rendering goes through the [`Host`](iris_backend::Host) trait; pair a
//! session with [`HeadlessHost`](iris_backend::HeadlessHost) to drive it
//! without a page.
//!
//! # Example
//!
//! ```
//! use iris_backend::HeadlessHost;
//! use iris_dialog::{DialogOptions, Session};
//! use iris_i18n::Catalog;
//!
//! let mut session = Session::new(HeadlessHost::new(), Catalog::builtin());
//! let a = session.show(DialogOptions::new().title("First").minimizable(true));
//! assert_eq!(session.layer(a), Some(1050));
//! assert!(session.is_scroll_locked());
//!
//! session.minimize(a).unwrap();
//! assert_eq!(session.tray().len(), 1);
//! ```

pub mod button;
pub mod closable;
pub mod config;
pub mod content;
pub mod context;
pub mod dialog;
pub mod options;
pub mod palette;
pub mod presets;
pub mod registry;
pub mod session;
pub mod tray;

pub use button::{Button, ButtonRef, ButtonSpec};
pub use closable::{Backdrop, ClosePolicy, DismissSource};
pub use config::{DialogDefaults, SessionConfig};
pub use content::{LoadError, LoadOutcome};
pub use context::{ActionFlow, DialogContext, HideDecision};
pub use dialog::{Dialog, DialogState};
pub use options::{DialogConfig, DialogFlags, DialogOptions, DialogSize};
pub use palette::DialogType;
pub use presets::{NoticeKind, Pending};
pub use registry::{BASE_LAYER, LAYER_STEP, Registry};
pub use session::{CloseOutcome, Session, TransitionError};
pub use tray::{Tray, TrayTarget};
