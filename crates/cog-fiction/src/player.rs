//! Player state management.

use std::collections::BTreeSet;

use cog_core::Position;

/// The player's state: where they are and which codes they know.
///
/// The known-code set only grows, and duplicates collapse: learning a code
/// twice leaves the set unchanged. Only dialog effects add to it.
#[derive(Debug, Clone)]
pub struct PlayerState {
    position: Position,
    codes: BTreeSet<String>,
}

impl PlayerState {
    /// Create a player at the given start position with no known codes.
    pub fn new(start: Position) -> Self {
        Self {
            position: start,
            codes: BTreeSet::new(),
        }
    }

    /// The player's current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Move within the current district.
    pub(crate) fn set_location(&mut self, key: impl Into<String>) {
        self.position.location = key.into();
    }

    /// Move to another district's location within the current city.
    pub(crate) fn set_district(&mut self, district: impl Into<String>, location: impl Into<String>) {
        self.position.district = district.into();
        self.position.location = location.into();
    }

    /// Learn a code. Returns `false` if it was already known.
    pub fn learn(&mut self, code: impl Into<String>) -> bool {
        self.codes.insert(code.into())
    }

    /// Whether the player knows a code.
    pub fn knows(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// Iterate known codes in sorted order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_no_codes() {
        let player = PlayerState::new(Position::new("alpha", "yard", "plaza"));
        assert_eq!(player.position(), &Position::new("alpha", "yard", "plaza"));
        assert_eq!(player.codes().count(), 0);
    }

    #[test]
    fn codes_accumulate_and_deduplicate() {
        let mut player = PlayerState::new(Position::new("alpha", "yard", "plaza"));

        assert!(player.learn("ORANGE-7"));
        assert!(!player.learn("ORANGE-7"));
        assert!(player.learn("TEAL-3"));

        assert!(player.knows("ORANGE-7"));
        assert!(!player.knows("orange-7")); // codes are case-sensitive
        assert_eq!(player.codes().count(), 2);
    }

    #[test]
    fn movement_updates_position() {
        let mut player = PlayerState::new(Position::new("alpha", "yard", "plaza"));

        player.set_location("stop");
        assert_eq!(player.position().location, "stop");

        player.set_district("harbor", "harbor_stop");
        assert_eq!(player.position().district, "harbor");
        assert_eq!(player.position().location, "harbor_stop");
        assert_eq!(player.position().city, "alpha");
    }
}
