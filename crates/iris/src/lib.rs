#![forbid(unsafe_code)]

//! Iris public facade and prelude.
//!
//! Re-exports the dialog coordinator, the host interface and the translation
//! catalog. Most callers only need the prelude:
//!
//! ```
//! use iris::prelude::*;
//!
//! let mut session = Session::new(HeadlessHost::new(), Catalog::builtin());
//! let mut pending = session.confirm("Delete this item?");
//! session.click_button(pending.dialog, "Yes");
//! assert_eq!(pending.try_reply(), Ok(Some(true)));
//! ```

pub use iris_backend as backend;
pub use iris_dialog as dialog;
pub use iris_i18n as i18n;

pub use iris_backend::{DialogId, HeadlessHost, Host, Layer, TrayAnchor, TrayConfig};
pub use iris_dialog::{
    ActionFlow, Backdrop, ButtonRef, ButtonSpec, CloseOutcome, DialogContext, DialogOptions,
    DialogSize, DialogState, DialogType, DismissSource, HideDecision, LoadError, LoadOutcome,
    NoticeKind, Pending, Session, SessionConfig, TransitionError, TrayTarget,
};
pub use iris_i18n::Catalog;

/// Oneshot cancellation returned by a [`Pending`] reply whose dialog closed
/// without a choice.
pub use iris_dialog::presets::Canceled;

pub mod prelude {
    pub use crate::{
        ActionFlow, Backdrop, ButtonSpec, Canceled, Catalog, CloseOutcome, DialogId,
        DialogOptions, DialogSize, DialogState, DialogType, DismissSource, HeadlessHost,
        HideDecision, Host, Pending, Session, SessionConfig, TrayTarget,
    };
}
