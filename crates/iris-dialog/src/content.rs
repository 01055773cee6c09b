//! Remote body content: load errors, outcomes and the markup around them.

use iris_i18n::Catalog;
use v_htmlescape::escape;

/// Why a content load failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The server answered with a non-success status.
    #[error("network response was not ok (status {0})")]
    Status(u16),
    /// The request never produced a response.
    #[error("{0}")]
    Network(String),
}

/// What [`Session::complete_load`](crate::session::Session::complete_load) did
/// with a fetch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The body now holds the fetched content.
    Applied,
    /// The body now holds an inline error message.
    Failed,
    /// The dialog is gone or a newer load superseded this one.
    Discarded,
}

/// Body shown while the message is empty.
pub(crate) fn loading_placeholder(catalog: &Catalog) -> String {
    format!(
        "<div class=\"text-center\"><div class=\"spinner-border\" role=\"status\"><span class=\"visually-hidden\">{}</span></div></div>",
        escape(catalog.text("loading"))
    )
}

/// Inline error rendered in place of failed content.
pub(crate) fn error_markup(catalog: &Catalog, error: &LoadError) -> String {
    let message = catalog.t("loadError", &[&error.to_string()]);
    format!("<div class=\"alert alert-danger\">{}</div>", escape(&message))
}
