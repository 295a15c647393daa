//! Error types for the play engine.
//!
//! Two tiers. Everything except [`FictionError::World`] is a recoverable
//! user-input problem: report it and re-prompt. [`FictionError::World`] wraps
//! the content-integrity tier from `cog-core` and means the current run
//! cannot continue.

use thiserror::Error;

use cog_core::WorldError;

/// Result type for play-engine operations.
pub type FictionResult<T> = Result<T, FictionError>;

/// Errors that can occur during play.
#[derive(Debug, Error)]
pub enum FictionError {
    /// The movement label matches no connection at the current location.
    #[error("you can't go \"{0}\" from here")]
    InvalidMove(String),

    /// A menu selection outside the listed range.
    #[error("selection {index} is out of range (1-{len})")]
    OutOfRange {
        /// The 1-based index the player supplied.
        index: usize,
        /// Number of listed entries.
        len: usize,
    },

    /// A conversation operation with no conversation in progress.
    #[error("there is no conversation in progress")]
    NoConversation,

    /// A station operation away from a station panel.
    #[error("there is no station panel here")]
    NoStationHere,

    /// A ride attempt at a station that has not been unlocked.
    #[error("the station is not operational")]
    StationLocked,

    /// A ride to a district that does not exist on this line, or to the
    /// district the player is already in.
    #[error("no line runs to \"{0}\"")]
    InvalidDestination(String),

    /// Malformed static content. Unrecoverable for this run.
    #[error(transparent)]
    World(#[from] WorldError),
}

impl FictionError {
    /// Whether this error is malformed content rather than player input.
    /// Fatal errors should abort the run; everything else re-prompts.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::World(_))
    }
}
