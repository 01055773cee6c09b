//! Dialog types and the header classes each one maps to.
//!
//! Every type except `Default` pairs a header background with a light title
//! and close button. `Warning` is the exception: its pale background keeps a
//! dark title and the default (dark) close button.

/// Header background classes any type may apply.
pub const HEADER_CLASSES: [&str; 6] = [
    "bg-primary",
    "bg-success",
    "bg-info",
    "bg-warning",
    "bg-danger",
    "bg-dark",
];

/// Title foreground classes any type may apply.
pub const TITLE_CLASSES: [&str; 2] = ["text-white", "text-dark"];

/// Close button classes any type may apply.
pub const CLOSE_BUTTON_CLASSES: [&str; 1] = ["btn-close-white"];

/// Named header theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DialogType {
    #[default]
    Default,
    Primary,
    Success,
    Info,
    Warning,
    Danger,
    Dark,
}

/// Classes a type applies to the header, title and close button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeClasses {
    pub header: Option<&'static str>,
    pub title: Option<&'static str>,
    pub close_button: Option<&'static str>,
}

impl DialogType {
    pub const ALL: [DialogType; 7] = [
        DialogType::Default,
        DialogType::Primary,
        DialogType::Success,
        DialogType::Info,
        DialogType::Warning,
        DialogType::Danger,
        DialogType::Dark,
    ];

    /// Lowercase name (`"warning"`).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Primary => "primary",
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Dark => "dark",
        }
    }

    /// Parse a lowercase type name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    pub const fn classes(self) -> TypeClasses {
        let header = match self {
            Self::Default => None,
            Self::Primary => Some("bg-primary"),
            Self::Success => Some("bg-success"),
            Self::Info => Some("bg-info"),
            Self::Warning => Some("bg-warning"),
            Self::Danger => Some("bg-danger"),
            Self::Dark => Some("bg-dark"),
        };
        match self {
            Self::Default => TypeClasses {
                header,
                title: None,
                close_button: None,
            },
            // Pale background: keep dark text for contrast.
            Self::Warning => TypeClasses {
                header,
                title: Some("text-dark"),
                close_button: None,
            },
            _ => TypeClasses {
                header,
                title: Some("text-white"),
                close_button: Some("btn-close-white"),
            },
        }
    }
}
