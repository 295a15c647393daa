//! Core types for Cogtown: the city graph, robots, and dialog trees.
//!
//! This crate defines the world model the play engine walks. A world is
//! described once as declarative content ([`content::WorldDef`], usually
//! JSON), then built into a validated [`World`] whose structure never changes
//! at runtime; the only mutable state in the tree is each tram station's
//! one-way unlock flag.

/// Robot characters and their dialog graphs.
pub mod character;
/// Declarative content defs and the build step into a validated world.
pub mod content;
/// Dialog nodes and choices.
pub mod dialog;
/// Effect directives attached to dialog choices.
pub mod effect;
/// Error types used throughout the crate.
pub mod error;
/// Traversable locations.
pub mod location;
/// Districts, cities, and the world that owns them.
pub mod world;

pub use character::Character;
pub use content::WorldDef;
pub use dialog::{DialogChoice, DialogNode};
pub use effect::Effect;
pub use error::{WorldError, WorldResult};
pub use location::Location;
pub use world::{City, District, Position, World};
