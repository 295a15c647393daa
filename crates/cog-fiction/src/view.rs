//! Structured view data handed to the presentation layer.
//!
//! The engine supplies facts (names, descriptions, labeled connections,
//! indexed lists, flags) and leaves wording and layout to the renderer.

/// Everything a renderer needs to describe the current location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationView {
    /// Display name of the city.
    pub city: String,
    /// Display name of the district.
    pub district: String,
    /// Display name of the location.
    pub name: String,
    /// Descriptive text.
    pub description: String,
    /// Outgoing connections in label order.
    pub connections: Vec<ConnectionView>,
    /// Names of robots present, in roster order.
    pub occupants: Vec<String>,
    /// Station status, if this location is a tram station.
    pub station: Option<StationView>,
}

/// One outgoing connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionView {
    /// The label the player types to follow it.
    pub label: String,
    /// Display name of the destination.
    pub destination: String,
}

/// Station status at the current location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationView {
    /// Whether the station panel has been unlocked.
    pub unlocked: bool,
}

/// One step of a conversation: the character's line and the player's options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogView {
    /// Name of the character speaking.
    pub speaker: String,
    /// The line spoken at the current node.
    pub text: String,
    /// Choice texts in display order; selections are 1-based against this
    /// list. Exiting the conversation is always available and not listed.
    pub choices: Vec<String>,
}

/// One destination on the tram line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationView {
    /// District key, as accepted by `ride`.
    pub key: String,
    /// District display name.
    pub name: String,
}
