//! Effects attached to dialog choices.

use std::fmt;

/// A directive applied when a dialog choice is selected.
///
/// Effects arrive in content as tagged strings such as `"gain:ORANGE-7"`.
/// Only the `gain` tag is recognized; anything else parses to [`Effect::Unknown`]
/// and is skipped at play time rather than rejected, so content can carry
/// directives this engine does not understand yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Add a code to the player's known-code set.
    Gain {
        /// The code to learn.
        code: String,
    },
    /// An unrecognized directive, preserved verbatim.
    Unknown {
        /// The raw directive string.
        raw: String,
    },
}

impl Effect {
    /// Parse a tagged directive string. Never fails: unrecognized tags
    /// become [`Effect::Unknown`].
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(':') {
            Some(("gain", code)) if !code.is_empty() => Self::Gain {
                code: code.to_string(),
            },
            _ => Self::Unknown {
                raw: raw.to_string(),
            },
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gain { code } => write!(f, "gain:{code}"),
            Self::Unknown { raw } => write!(f, "{raw}"),
        }
    }
}
