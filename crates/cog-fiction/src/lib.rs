//! Play engine for Cogtown.
//!
//! Drives one playthrough of a `cog-core` world: exploration along the
//! location graph, conversations with robots, and the code-gated tram
//! puzzle. The engine owns all game rules and input parsing; rendering and
//! raw line reading belong to the caller, which receives structured view
//! data and recoverable errors to report.

/// Parsing of raw prompt tokens.
pub mod command;
/// The dialog-walk state machine.
pub mod conversation;
/// Error types for the play engine.
pub mod error;
/// Player state management.
pub mod player;
/// Game session management.
pub mod session;
/// Structured view data handed to the presentation layer.
pub mod view;

pub use command::{ExploreCommand, MenuPick, ReplyCommand};
pub use conversation::{Conversation, Exchange};
pub use error::{FictionError, FictionResult};
pub use player::PlayerState;
pub use session::{GameSession, Turn, UnlockOutcome};
pub use view::{ConnectionView, DestinationView, DialogView, LocationView, StationView};
