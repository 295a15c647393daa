//! Game session management.
//!
//! A [`GameSession`] is the context object for one playthrough: it owns the
//! world and the player state and exposes every operation the presentation
//! layer can invoke. Nothing here is global; multiple sessions can run side
//! by side.

use cog_core::{Character, Position, World};

use crate::conversation::Conversation;
use crate::error::{FictionError, FictionResult};
use crate::player::PlayerState;
use crate::view::{ConnectionView, DestinationView, DialogView, LocationView, StationView};

/// Outcome of a station unlock attempt. These are ordinary results, not
/// errors: a wrong code or a repeat attempt is reported and play continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockOutcome {
    /// Blank input; nothing attempted.
    Cancelled,
    /// The station was already operational; nothing changed.
    AlreadyUnlocked,
    /// The code matched a known code; the station is now operational.
    Unlocked,
    /// The code is not in the player's known-code set; still locked.
    Incorrect,
}

/// Outcome of choosing a conversation reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    /// The conversation moved to another node.
    Continued {
        /// Codes granted by the chosen reply.
        learned: Vec<String>,
        /// The next node's view.
        view: DialogView,
    },
    /// The chosen reply ended the conversation.
    Ended {
        /// Codes granted by the chosen reply.
        learned: Vec<String>,
        /// Name of the character the player was talking to.
        speaker: String,
    },
}

#[derive(Debug)]
struct ActiveConversation {
    /// Where the conversation started; the character is resolved through
    /// this rather than the player's current position.
    position: Position,
    /// Roster index of the character, 0-based.
    occupant: usize,
    cursor: Conversation,
}

/// One playthrough: world, player, and (at most one) conversation in
/// progress.
#[derive(Debug)]
pub struct GameSession {
    world: World,
    player: PlayerState,
    conversation: Option<ActiveConversation>,
}

impl GameSession {
    /// Start a session with the player at the world's start position.
    pub fn new(world: World) -> Self {
        let player = PlayerState::new(world.start().clone());
        Self {
            world,
            player,
            conversation: None,
        }
    }

    /// The world being explored.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The player's state.
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Describe the current location. Read-only; calling it twice without an
    /// intervening mutation returns identical data.
    pub fn look(&self) -> FictionResult<LocationView> {
        let pos = self.player.position();
        let city = self.world.city(&pos.city)?;
        let district = city.district(&pos.district)?;
        let location = district.location(&pos.location)?;

        let mut connections = Vec::new();
        for (label, target) in &location.connections {
            connections.push(ConnectionView {
                label: label.clone(),
                destination: district.location(target)?.name.clone(),
            });
        }

        Ok(LocationView {
            city: city.name().to_string(),
            district: district.name().to_string(),
            name: location.name.clone(),
            description: location.description.clone(),
            connections,
            occupants: location.occupants.iter().map(|c| c.name().to_string()).collect(),
            station: location
                .is_station
                .then(|| StationView { unlocked: location.is_unlocked() }),
        })
    }

    /// Follow a connection out of the current location. The label matches
    /// case-insensitively; a miss fails with [`FictionError::InvalidMove`]
    /// and the player does not move.
    pub fn move_to(&mut self, label: &str) -> FictionResult<LocationView> {
        let label = label.trim();
        let location = self.world.location_at(self.player.position())?;
        let destination = location
            .connection(label)
            .ok_or_else(|| FictionError::InvalidMove(label.to_string()))?
            .to_string();

        self.player.set_location(destination);
        self.look()
    }

    /// Start a conversation with the robot at the given 1-based roster
    /// index. Fails with [`FictionError::OutOfRange`] if the index is not
    /// within the roster; any previous conversation is discarded.
    pub fn talk(&mut self, index: usize) -> FictionResult<DialogView> {
        let position = self.player.position().clone();
        let location = self.world.location_at(&position)?;
        let occupant = index
            .checked_sub(1)
            .filter(|i| *i < location.occupants.len())
            .ok_or(FictionError::OutOfRange {
                index,
                len: location.occupants.len(),
            })?;

        let cursor = Conversation::start(&location.occupants[occupant]);
        self.conversation = Some(ActiveConversation {
            position,
            occupant,
            cursor,
        });
        self.dialog()
    }

    /// Whether a conversation is in progress.
    pub fn in_conversation(&self) -> bool {
        self.conversation.is_some()
    }

    /// The current conversation node's view.
    pub fn dialog(&self) -> FictionResult<DialogView> {
        let active = self.conversation.as_ref().ok_or(FictionError::NoConversation)?;
        let character = Self::character_at(&self.world, active)?;
        active.cursor.view(character)
    }

    /// Choose a reply in the active conversation by its 1-based index.
    /// An out-of-range index leaves the conversation where it was so the
    /// caller can re-prompt.
    pub fn reply(&mut self, index: usize) -> FictionResult<Turn> {
        let Self {
            world,
            player,
            conversation,
        } = self;
        let active = conversation.as_mut().ok_or(FictionError::NoConversation)?;
        let character = Self::character_at(world, active)?;

        let exchange = active.cursor.choose(character, index, player)?;
        let turn = if exchange.ended {
            Turn::Ended {
                learned: exchange.learned,
                speaker: character.name().to_string(),
            }
        } else {
            Turn::Continued {
                learned: exchange.learned,
                view: active.cursor.view(character)?,
            }
        };

        if matches!(turn, Turn::Ended { .. }) {
            self.conversation = None;
        }
        Ok(turn)
    }

    /// Leave the active conversation. Returns the character's name for the
    /// sign-off line.
    pub fn leave_conversation(&mut self) -> FictionResult<String> {
        let active = self.conversation.take().ok_or(FictionError::NoConversation)?;
        let character = Self::character_at(&self.world, &active)?;
        Ok(character.name().to_string())
    }

    /// Try the station override panel at the current location.
    ///
    /// Only valid at a station ([`FictionError::NoStationHere`] otherwise).
    /// Blank input cancels. The unlock succeeds iff the trimmed code is in
    /// the player's known-code set; once unlocked, further attempts report
    /// [`UnlockOutcome::AlreadyUnlocked`] and the flag never reverts.
    pub fn attempt_unlock(&mut self, code: &str) -> FictionResult<UnlockOutcome> {
        let location = self.world.location_at(self.player.position())?;
        if !location.is_station {
            return Err(FictionError::NoStationHere);
        }
        if location.is_unlocked() {
            return Ok(UnlockOutcome::AlreadyUnlocked);
        }

        let code = code.trim();
        if code.is_empty() {
            return Ok(UnlockOutcome::Cancelled);
        }
        if !self.player.knows(code) {
            return Ok(UnlockOutcome::Incorrect);
        }

        self.world
            .location_at_mut(self.player.position())?
            .unlock();
        Ok(UnlockOutcome::Unlocked)
    }

    /// Districts reachable from the current station, excluding the one the
    /// player is in. Only valid at an unlocked station.
    pub fn destinations(&self) -> FictionResult<Vec<DestinationView>> {
        let pos = self.player.position();
        let location = self.world.location_at(pos)?;
        if !location.is_station {
            return Err(FictionError::NoStationHere);
        }
        if !location.is_unlocked() {
            return Err(FictionError::StationLocked);
        }

        Ok(self
            .world
            .city(&pos.city)?
            .districts()
            .filter(|(key, _)| *key != pos.district)
            .map(|(key, district)| DestinationView {
                key: key.to_string(),
                name: district.name().to_string(),
            })
            .collect())
    }

    /// Ride the tram to another district, arriving at its station.
    ///
    /// Only valid at an unlocked station. The destination must be a district
    /// of the current city other than the one the player is in; otherwise
    /// fails with [`FictionError::InvalidDestination`] and the player does
    /// not move.
    pub fn ride(&mut self, district_key: &str) -> FictionResult<LocationView> {
        let pos = self.player.position();
        let location = self.world.location_at(pos)?;
        if !location.is_station {
            return Err(FictionError::NoStationHere);
        }
        if !location.is_unlocked() {
            return Err(FictionError::StationLocked);
        }
        if district_key == pos.district {
            return Err(FictionError::InvalidDestination(district_key.to_string()));
        }

        let city = self.world.city(&pos.city)?;
        let Ok(destination) = city.district(district_key) else {
            return Err(FictionError::InvalidDestination(district_key.to_string()));
        };
        let arrival = destination.station_key().to_string();

        self.player.set_district(district_key.to_string(), arrival);
        self.look()
    }

    fn character_at<'w>(
        world: &'w World,
        active: &ActiveConversation,
    ) -> FictionResult<&'w Character> {
        // The world's structure is fixed, so a started conversation always
        // resolves; a miss means the session state itself is stale.
        world
            .location_at(&active.position)?
            .occupants
            .get(active.occupant)
            .ok_or(FictionError::NoConversation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cog_core::{City, DialogChoice, DialogNode, District, Effect, Location};

    fn ada() -> Character {
        Character::new(
            "Ada",
            "start",
            vec![
                DialogNode::new("start", "I still remember how the station used to work.")
                    .with_choice(
                        DialogChoice::new("Ask about the broken tram station.")
                            .with_next("station_info"),
                    )
                    .with_choice(
                        DialogChoice::new("Compliment the diagnostic stickers.")
                            .with_next("stickers"),
                    ),
                DialogNode::new("stickers", "Thank you! I organize them by checksum.")
                    .with_choice(
                        DialogChoice::new("Ask about the override code.")
                            .with_next("station_info"),
                    ),
                DialogNode::new("station_info", "The panel wants 'ORANGE-7'.").with_choice(
                    DialogChoice::new("Memorize 'ORANGE-7'.")
                        .with_effect(Effect::parse("gain:ORANGE-7")),
                ),
            ],
        )
        .unwrap()
    }

    fn bolt() -> Character {
        Character::new(
            "Bolt",
            "start",
            vec![DialogNode::new("start", "Same patrol, every day.")
                .with_choice(DialogChoice::new("Wish Bolt a good loop."))],
        )
        .unwrap()
    }

    fn test_world() -> World {
        let central_yard = District::new(
            "Central Yard",
            "station",
            vec![
                Location::new("square", "Square", "A bright plaza.")
                    .with_connection("east", "workshop")
                    .with_connection("south", "station")
                    .with_occupant(bolt()),
                Location::new("workshop", "Workshop", "Benches and tools.")
                    .with_connection("west", "square")
                    .with_occupant(ada()),
                Location::new("station", "Station", "A flickering panel.")
                    .with_connection("north", "square")
                    .as_station(false),
            ],
        )
        .unwrap();

        let harbor_loop = District::new(
            "Harbor Loop",
            "harbor_station",
            vec![
                Location::new("harbor_station", "Harbor Station", "The line terminus.")
                    .with_connection("out", "pier")
                    .as_station(true),
                Location::new("pier", "Pier", "Wind and gulls.")
                    .with_connection("back", "harbor_station"),
            ],
        )
        .unwrap();

        let city = City::new(
            "Alpha City",
            vec![
                ("central_yard".to_string(), central_yard),
                ("harbor_loop".to_string(), harbor_loop),
            ],
        )
        .unwrap();

        World::new(
            vec![("alpha_city".to_string(), city)],
            Position::new("alpha_city", "central_yard", "square"),
        )
        .unwrap()
    }

    fn learn_orange7(session: &mut GameSession) {
        session.move_to("east").unwrap();
        session.talk(1).unwrap();
        session.reply(1).unwrap();
        match session.reply(1).unwrap() {
            Turn::Ended { learned, .. } => {
                assert_eq!(learned, vec!["ORANGE-7".to_string()]);
            }
            other => panic!("expected the conversation to end, got {other:?}"),
        }
        session.move_to("west").unwrap();
        session.move_to("south").unwrap();
    }

    #[test]
    fn moves_follow_connections() {
        // Scenario: east from the square reaches the workshop; a label with
        // no connection leaves the player in place.
        let mut session = GameSession::new(test_world());

        let view = session.move_to("east").unwrap();
        assert_eq!(view.name, "Workshop");

        let err = session.move_to("north").unwrap_err();
        assert!(matches!(err, FictionError::InvalidMove(_)));
        assert_eq!(session.player().position().location, "workshop");
    }

    #[test]
    fn move_labels_match_case_insensitively() {
        let mut session = GameSession::new(test_world());
        let view = session.move_to("  EAST ").unwrap();
        assert_eq!(view.name, "Workshop");
    }

    #[test]
    fn look_is_idempotent() {
        let session = GameSession::new(test_world());
        assert_eq!(session.look().unwrap(), session.look().unwrap());
    }

    #[test]
    fn look_reports_structured_facts() {
        let session = GameSession::new(test_world());
        let view = session.look().unwrap();

        assert_eq!(view.city, "Alpha City");
        assert_eq!(view.district, "Central Yard");
        assert_eq!(view.name, "Square");
        assert_eq!(view.occupants, vec!["Bolt".to_string()]);
        assert_eq!(view.station, None);

        let labels: Vec<_> = view.connections.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["east", "south"]);
        assert_eq!(view.connections[0].destination, "Workshop");
    }

    #[test]
    fn conversation_with_ada_teaches_the_code() {
        // Scenario: workshop roster index 1 is Ada; entry → station_info →
        // terminal memorize choice adds ORANGE-7.
        let mut session = GameSession::new(test_world());
        session.move_to("east").unwrap();

        let view = session.talk(1).unwrap();
        assert_eq!(view.speaker, "Ada");
        assert!(session.in_conversation());

        match session.reply(1).unwrap() {
            Turn::Continued { view, .. } => assert!(view.text.contains("ORANGE-7")),
            other => panic!("expected the conversation to continue, got {other:?}"),
        }
        match session.reply(1).unwrap() {
            Turn::Ended { learned, speaker } => {
                assert_eq!(learned, vec!["ORANGE-7".to_string()]);
                assert_eq!(speaker, "Ada");
            }
            other => panic!("expected the conversation to end, got {other:?}"),
        }

        assert!(session.player().knows("ORANGE-7"));
        assert!(!session.in_conversation());
    }

    #[test]
    fn talk_index_out_of_range() {
        let mut session = GameSession::new(test_world());
        for bad in [0, 2] {
            let err = session.talk(bad).unwrap_err();
            assert!(matches!(err, FictionError::OutOfRange { len: 1, .. }));
        }
        assert!(!session.in_conversation());
    }

    #[test]
    fn bad_reply_reprompts_without_losing_the_conversation() {
        let mut session = GameSession::new(test_world());
        session.talk(1).unwrap();

        let err = session.reply(5).unwrap_err();
        assert!(matches!(err, FictionError::OutOfRange { .. }));
        assert!(session.in_conversation());
        assert_eq!(session.dialog().unwrap().speaker, "Bolt");
    }

    #[test]
    fn leaving_a_conversation() {
        let mut session = GameSession::new(test_world());
        session.talk(1).unwrap();
        assert_eq!(session.leave_conversation().unwrap(), "Bolt");
        assert!(!session.in_conversation());
        assert!(matches!(
            session.leave_conversation().unwrap_err(),
            FictionError::NoConversation
        ));
    }

    #[test]
    fn unlock_requires_a_known_code() {
        // Scenario: a wrong code fails, leaves the station locked, and does
        // not touch the known-code set.
        let mut session = GameSession::new(test_world());
        session.move_to("south").unwrap();

        assert_eq!(
            session.attempt_unlock("WRONG-CODE").unwrap(),
            UnlockOutcome::Incorrect
        );
        let view = session.look().unwrap();
        assert_eq!(view.station, Some(StationView { unlocked: false }));
        assert_eq!(session.player().codes().count(), 0);
    }

    #[test]
    fn unlock_is_monotonic() {
        // Scenario: with ORANGE-7 known the panel unlocks; a second attempt
        // reports already-unlocked and nothing reverts.
        let mut session = GameSession::new(test_world());
        learn_orange7(&mut session);

        assert_eq!(
            session.attempt_unlock("ORANGE-7").unwrap(),
            UnlockOutcome::Unlocked
        );
        assert_eq!(
            session.attempt_unlock("ORANGE-7").unwrap(),
            UnlockOutcome::AlreadyUnlocked
        );
        let view = session.look().unwrap();
        assert_eq!(view.station, Some(StationView { unlocked: true }));
    }

    #[test]
    fn blank_unlock_input_cancels() {
        let mut session = GameSession::new(test_world());
        session.move_to("south").unwrap();
        assert_eq!(
            session.attempt_unlock("   ").unwrap(),
            UnlockOutcome::Cancelled
        );
        assert_eq!(
            session.look().unwrap().station,
            Some(StationView { unlocked: false })
        );
    }

    #[test]
    fn unlock_away_from_a_station_is_rejected() {
        let mut session = GameSession::new(test_world());
        let err = session.attempt_unlock("ORANGE-7").unwrap_err();
        assert!(matches!(err, FictionError::NoStationHere));
    }

    #[test]
    fn locked_station_refuses_rides() {
        let mut session = GameSession::new(test_world());
        session.move_to("south").unwrap();

        assert!(matches!(
            session.destinations().unwrap_err(),
            FictionError::StationLocked
        ));
        let err = session.ride("harbor_loop").unwrap_err();
        assert!(matches!(err, FictionError::StationLocked));
        assert_eq!(session.player().position().location, "station");
    }

    #[test]
    fn riding_the_line() {
        // Scenario: from the unlocked station, riding to harbor_loop lands
        // at that district's designated station.
        let mut session = GameSession::new(test_world());
        learn_orange7(&mut session);
        session.attempt_unlock("ORANGE-7").unwrap();

        let destinations = session.destinations().unwrap();
        assert_eq!(
            destinations,
            vec![DestinationView {
                key: "harbor_loop".to_string(),
                name: "Harbor Loop".to_string(),
            }]
        );

        let view = session.ride("harbor_loop").unwrap();
        assert_eq!(view.name, "Harbor Station");
        assert_eq!(session.player().position().district, "harbor_loop");
        assert_eq!(session.player().position().location, "harbor_station");
    }

    #[test]
    fn self_travel_is_rejected() {
        let mut session = GameSession::new(test_world());
        learn_orange7(&mut session);
        session.attempt_unlock("ORANGE-7").unwrap();

        let err = session.ride("central_yard").unwrap_err();
        assert!(matches!(err, FictionError::InvalidDestination(_)));
        assert_eq!(session.player().position().district, "central_yard");
    }

    #[test]
    fn unknown_destination_is_rejected() {
        let mut session = GameSession::new(test_world());
        learn_orange7(&mut session);
        session.attempt_unlock("ORANGE-7").unwrap();

        let err = session.ride("atlantis").unwrap_err();
        assert!(matches!(err, FictionError::InvalidDestination(_)));
        assert_eq!(session.player().position().district, "central_yard");
    }

    #[test]
    fn arrival_station_keeps_its_own_lock_state() {
        // The harbor terminus ships unlocked, so the return trip needs no
        // second code.
        let mut session = GameSession::new(test_world());
        learn_orange7(&mut session);
        session.attempt_unlock("ORANGE-7").unwrap();
        session.ride("harbor_loop").unwrap();

        let view = session.look().unwrap();
        assert_eq!(view.station, Some(StationView { unlocked: true }));

        let back = session.ride("central_yard").unwrap();
        assert_eq!(back.name, "Station");
    }
}
