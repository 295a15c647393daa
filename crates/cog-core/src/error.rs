//! Error types used throughout the crate.
//!
//! Every variant here marks malformed content, not player behavior: a key that
//! does not resolve, a collision, a dialog edge into nothing. They surface at
//! world construction or, failing that, from the keyed lookups.

/// Alias for `Result<T, WorldError>`.
pub type WorldResult<T> = Result<T, WorldError>;

/// Content-integrity errors. Each variant names the offending key and the
/// container it failed to resolve in.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The requested city key does not exist in the world.
    #[error("city not found: \"{0}\"")]
    CityNotFound(String),

    /// The requested district key does not exist in the city.
    #[error("district not found in {city}: \"{key}\"")]
    DistrictNotFound {
        /// City the lookup ran against.
        city: String,
        /// The unresolved district key.
        key: String,
    },

    /// The requested location key does not exist in the district.
    #[error("location not found in {district}: \"{key}\"")]
    LocationNotFound {
        /// District the lookup ran against.
        district: String,
        /// The unresolved location key.
        key: String,
    },

    /// Two definitions in the same container share a key.
    #[error("duplicate {kind} key in {container}: \"{key}\"")]
    DuplicateKey {
        /// What kind of entity collided (location, district, …).
        kind: &'static str,
        /// Container holding both definitions.
        container: String,
        /// The colliding key.
        key: String,
    },

    /// A connection points at a location key absent from the district.
    #[error(
        "connection \"{label}\" from {location} in {district} \
         points at unknown location \"{target}\""
    )]
    DanglingConnection {
        /// District owning the source location.
        district: String,
        /// Source location key.
        location: String,
        /// Connection label as written in the content.
        label: String,
        /// The unresolved destination key.
        target: String,
    },

    /// A district designates a station location that does not exist,
    /// or one that is not flagged as a station.
    #[error("district {district} designates missing or unflagged station \"{key}\"")]
    MissingStation {
        /// District whose station designation failed.
        district: String,
        /// The designated station key.
        key: String,
    },

    /// A location is flagged as a station but is not the district's
    /// designated one. Each district has exactly one station.
    #[error(
        "location {location} in {district} is flagged as a station \
         but the district designates \"{station}\""
    )]
    StrayStation {
        /// District owning the offending location.
        district: String,
        /// The offending location key.
        location: String,
        /// The key the district actually designates.
        station: String,
    },

    /// A dialog graph's entry node id is absent from the graph.
    #[error("dialog for {character} enters at unknown node \"{node}\"")]
    MissingEntryNode {
        /// Character owning the graph.
        character: String,
        /// The unresolved entry node id.
        node: String,
    },

    /// The requested dialog node id does not exist in the character's graph.
    #[error("dialog node not found in {character}: \"{node}\"")]
    DialogNodeNotFound {
        /// Character whose graph the lookup ran against.
        character: String,
        /// The unresolved node id.
        node: String,
    },

    /// A dialog choice reachable from the entry node points at a node id
    /// absent from the graph.
    #[error(
        "dialog choice in node \"{node}\" of {character} \
         points at unknown node \"{target}\""
    )]
    DanglingDialogEdge {
        /// Character owning the graph.
        character: String,
        /// Node holding the offending choice.
        node: String,
        /// The unresolved target node id.
        target: String,
    },

    /// The content document is not valid JSON for the def schema.
    #[error("malformed world content: {0}")]
    Content(#[from] serde_json::Error),
}
