//! User-facing status notices.
//!
//! The page has a single status slot. Rather than classify free-form
//! text for styling, each notice is a [`Feedback`] variant that knows
//! its own [`Tone`].

use std::fmt;

use crate::types::FileKind;

/// Styling category for a [`Feedback`] notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Success,
    Error,
    Info,
    Neutral,
}

impl Tone {
    /// Stable lowercase name, used as a CSS modifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
            Self::Neutral => "neutral",
        }
    }
}

/// A status notice shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// `count` files were just added to the `kind` selection.
    Selected { kind: FileKind, count: usize },
    /// A file was removed; `count` remain in the `kind` selection.
    Remaining { kind: FileKind, count: usize },
    /// Generation was requested with nothing selected.
    EmptySelection,
    /// Generation is in flight. Styled [`Tone::Neutral`], not
    /// [`Tone::Info`], to stay distinct from selection notices.
    Generating,
    /// Generation finished successfully.
    Generated,
    /// Generation failed; carries the error text.
    GenerationFailed(String),
}

impl Feedback {
    #[must_use]
    pub const fn tone(&self) -> Tone {
        match self {
            Self::Selected { .. } | Self::Remaining { .. } => Tone::Info,
            Self::EmptySelection | Self::GenerationFailed(_) => Tone::Error,
            Self::Generating => Tone::Neutral,
            Self::Generated => Tone::Success,
        }
    }

    /// Whether this is a fresh-selection notice.
    ///
    /// The page hides its "nothing selected" placeholders while one of
    /// these is showing.
    #[must_use]
    pub const fn is_selection_notice(&self) -> bool {
        matches!(self, Self::Selected { .. })
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selected { kind, count } => {
                write!(f, "{count} {} selected.", kind.noun(*count))
            }
            Self::Remaining { kind, count } => {
                write!(f, "{count} {} remaining.", kind.noun(*count))
            }
            Self::EmptySelection => {
                f.write_str("Error: please select at least one image or file.")
            }
            Self::Generating => f.write_str("Generating your copy, please wait..."),
            Self::Generated => f.write_str("Success: copy generated!"),
            Self::GenerationFailed(reason) => write!(f, "Error: generation failed: {reason}"),
        }
    }
}
