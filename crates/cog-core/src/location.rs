//! Traversable locations.

use std::collections::BTreeMap;

use crate::character::Character;

/// A traversable area within a district.
///
/// Connections are one-way: a label maps to a destination key with no implied
/// return edge. Labels are stored lowercase so movement input can match
/// case-insensitively.
#[derive(Debug, Clone)]
pub struct Location {
    /// Identity, unique within the owning district.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Descriptive text shown when the player arrives.
    pub description: String,
    /// Lowercased direction/label → destination location key.
    pub connections: BTreeMap<String, String>,
    /// Robots present here, in display order.
    pub occupants: Vec<Character>,
    /// Whether this location is the district's tram station.
    pub is_station: bool,
    unlocked: bool,
}

impl Location {
    /// Create a location with no connections or occupants.
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            description: description.into(),
            connections: BTreeMap::new(),
            occupants: Vec::new(),
            is_station: false,
            unlocked: false,
        }
    }

    /// Add a connection. The label is lowercased; a repeated label keeps the
    /// first destination (duplicate labels are caught during district
    /// construction from content defs).
    pub fn with_connection(mut self, label: &str, destination: impl Into<String>) -> Self {
        self.connections
            .entry(label.to_lowercase())
            .or_insert_with(|| destination.into());
        self
    }

    /// Add a robot occupant.
    pub fn with_occupant(mut self, character: Character) -> Self {
        self.occupants.push(character);
        self
    }

    /// Mark this location as a tram station, with its initial lock state.
    pub fn as_station(mut self, unlocked: bool) -> Self {
        self.is_station = true;
        self.unlocked = unlocked;
        self
    }

    /// Whether the station panel has been unlocked. Meaningless unless
    /// [`Location::is_station`] is set.
    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Unlock the station. One-way: there is no API to re-lock.
    pub fn unlock(&mut self) {
        self.unlocked = true;
    }

    /// Destination key for a movement label, matched case-insensitively.
    pub fn connection(&self, label: &str) -> Option<&str> {
        self.connections.get(&label.to_lowercase()).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_labels_fold_case() {
        let plaza = Location::new("plaza", "Plaza", "Open ground.")
            .with_connection("East", "depot");

        assert_eq!(plaza.connection("east"), Some("depot"));
        assert_eq!(plaza.connection("EAST"), Some("depot"));
        assert_eq!(plaza.connection("north"), None);
    }

    #[test]
    fn unlock_is_one_way() {
        let mut stop = Location::new("stop", "Stop", "A platform.").as_station(false);
        assert!(stop.is_station);
        assert!(!stop.is_unlocked());

        stop.unlock();
        assert!(stop.is_unlocked());

        stop.unlock();
        assert!(stop.is_unlocked());
    }

    #[test]
    fn station_may_start_unlocked() {
        let terminus = Location::new("end", "Terminus", "End of the line.").as_station(true);
        assert!(terminus.is_unlocked());
    }
}
