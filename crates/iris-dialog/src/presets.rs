//! Ready-made dialogs: notices, confirm and prompt.
//!
//! Each preset is a thin layer over [`Session::show`]. The `_with` variants
//! take a closure that adjusts the preset's options before the dialog is
//! shown, so any preset field can be overridden.
//!
//! `confirm` and `prompt` answer through a [`Pending`] reply resolved by their
//! buttons. A dialog that closes without a button choice drops the sender and
//! the reply reports [`Canceled`].

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use iris_backend::{DialogId, Host};
use v_htmlescape::escape;

use crate::button::ButtonSpec;
use crate::context::ActionFlow;
use crate::options::DialogOptions;
use crate::palette::DialogType;
use crate::session::Session;

pub use futures::channel::oneshot::Canceled;

/// Flavor of a single-button notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
    Warning,
}

impl NoticeKind {
    /// Translation key of the default title.
    pub const fn title_key(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }

    pub const fn dialog_type(self) -> DialogType {
        match self {
            Self::Info => DialogType::Info,
            Self::Success => DialogType::Success,
            Self::Error => DialogType::Danger,
            Self::Warning => DialogType::Warning,
        }
    }

    /// Class of the OK button.
    pub const fn button_class(self) -> &'static str {
        match self {
            Self::Info => "btn-primary",
            Self::Success => "btn-success",
            Self::Error => "btn-danger",
            Self::Warning => "btn-warning",
        }
    }
}

/// A dialog whose answer arrives later.
///
/// Await it, or poll with [`try_reply`](Self::try_reply).
#[derive(Debug)]
pub struct Pending<T> {
    pub dialog: DialogId,
    pub reply: oneshot::Receiver<T>,
}

impl<T> Pending<T> {
    /// `Ok(None)` while the dialog is still waiting for a choice.
    pub fn try_reply(&mut self) -> Result<Option<T>, Canceled> {
        self.reply.try_recv()
    }
}

impl<T> Future for Pending<T> {
    type Output = Result<T, Canceled>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.get_mut().reply).poll(cx)
    }
}

type ReplySlot<T> = Rc<RefCell<Option<oneshot::Sender<T>>>>;

fn reply_channel<T>() -> (ReplySlot<T>, oneshot::Receiver<T>) {
    let (tx, rx) = oneshot::channel();
    (Rc::new(RefCell::new(Some(tx))), rx)
}

/// Send once; later answers and a dropped receiver are ignored.
fn answer<T>(slot: &ReplySlot<T>, value: T) {
    if let Some(tx) = slot.borrow_mut().take() {
        let _ = tx.send(value);
    }
}

impl<H: Host> Session<H> {
    pub fn alert(&mut self, message: impl Into<String>) -> DialogId {
        self.notice_with(NoticeKind::Info, message, |o| o)
    }

    pub fn success(&mut self, message: impl Into<String>) -> DialogId {
        self.notice_with(NoticeKind::Success, message, |o| o)
    }

    pub fn error(&mut self, message: impl Into<String>) -> DialogId {
        self.notice_with(NoticeKind::Error, message, |o| o)
    }

    pub fn warning(&mut self, message: impl Into<String>) -> DialogId {
        self.notice_with(NoticeKind::Warning, message, |o| o)
    }

    /// Single OK button notice, titled and themed by `kind`.
    pub fn notice_with(
        &mut self,
        kind: NoticeKind,
        message: impl Into<String>,
        customize: impl FnOnce(DialogOptions) -> DialogOptions,
    ) -> DialogId {
        let options = DialogOptions::new()
            .title(self.t(kind.title_key(), &[]))
            .message(message)
            .kind(kind.dialog_type())
            .button(
                ButtonSpec::new(self.t("ok", &[]))
                    .css_class(kind.button_class())
                    .auto_close(true),
            );
        self.show(customize(options))
    }

    /// Yes/No question. Resolves `true` for Yes, `false` for No.
    pub fn confirm(&mut self, message: impl Into<String>) -> Pending<bool> {
        self.confirm_with(message, |o| o)
    }

    pub fn confirm_with(
        &mut self,
        message: impl Into<String>,
        customize: impl FnOnce(DialogOptions) -> DialogOptions,
    ) -> Pending<bool> {
        let (slot, reply) = reply_channel();
        let no = Rc::clone(&slot);
        let options = DialogOptions::new()
            .title(self.t("confirm", &[]))
            .message(message)
            .kind(DialogType::Warning)
            .button(
                ButtonSpec::new(self.t("no", &[]))
                    .css_class("btn-secondary")
                    .action(move |_| {
                        answer(&no, false);
                        ActionFlow::Continue
                    }),
            )
            .button(
                ButtonSpec::new(self.t("yes", &[]))
                    .css_class("btn-primary")
                    .action(move |_| {
                        answer(&slot, true);
                        ActionFlow::Continue
                    }),
            );
        let dialog = self.show(customize(options));
        Pending { dialog, reply }
    }

    /// Text question. Resolves the entered text for OK, `None` for Cancel.
    pub fn prompt(
        &mut self,
        message: impl Into<String>,
        default_value: &str,
    ) -> Pending<Option<String>> {
        self.prompt_with(message, default_value, |o| o)
    }

    pub fn prompt_with(
        &mut self,
        message: impl Into<String>,
        default_value: &str,
        customize: impl FnOnce(DialogOptions) -> DialogOptions,
    ) -> Pending<Option<String>> {
        let field = self.next_field_id("prompt");
        let body = format!(
            "<p>{}</p><input type=\"text\" id=\"{field}\" class=\"form-control\" value=\"{}\">",
            message.into(),
            escape(default_value)
        );

        let (slot, reply) = reply_channel();
        let cancel = Rc::clone(&slot);
        let ok_field = field.clone();
        let fallback = default_value.to_string();
        let options = DialogOptions::new()
            .title(self.t("prompt", &[]))
            .message(body)
            .kind(DialogType::Info)
            .button(
                ButtonSpec::new(self.t("cancel", &[]))
                    .css_class("btn-secondary")
                    .action(move |_| {
                        answer(&cancel, None);
                        ActionFlow::Continue
                    }),
            )
            .button(
                ButtonSpec::new(self.t("ok", &[]))
                    .css_class("btn-primary")
                    .action(move |ctx| {
                        // Hosts that never saw an edit report nothing: the field
                        // still holds its initial value.
                        let value = ctx
                            .input_value(&ok_field)
                            .unwrap_or_else(|| fallback.clone());
                        answer(&slot, Some(value));
                        ActionFlow::Continue
                    }),
            )
            .on_shown(move |ctx| ctx.focus_input(&field));
        let dialog = self.show(customize(options));
        Pending { dialog, reply }
    }
}
