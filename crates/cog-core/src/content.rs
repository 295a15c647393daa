//! Declarative content defs.
//!
//! A world is described once, as plain data (a [`WorldDef`] document,
//! typically JSON) and built into a validated [`World`] at startup. Defs are
//! `Vec`-based with explicit keys, so a key defined twice is a reported
//! [`WorldError::DuplicateKey`] rather than a silent last-definition-wins.

use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::dialog::{DialogChoice, DialogNode};
use crate::effect::Effect;
use crate::error::{WorldError, WorldResult};
use crate::location::Location;
use crate::world::{City, District, Position, World};

/// Top-level content document: every city plus the start position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldDef {
    /// Where a new game begins.
    pub start: StartDef,
    /// City definitions.
    pub cities: Vec<CityDef>,
}

/// The start position as written in content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartDef {
    /// City key.
    pub city: String,
    /// District key.
    pub district: String,
    /// Location key.
    pub location: String,
}

/// One city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityDef {
    /// City key, unique within the world.
    pub key: String,
    /// Display name.
    pub name: String,
    /// District definitions.
    pub districts: Vec<DistrictDef>,
}

/// One district.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistrictDef {
    /// District key, unique within the city.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Key of the district's tram station location.
    pub station: String,
    /// Location definitions.
    pub locations: Vec<LocationDef>,
}

/// One location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationDef {
    /// Location key, unique within the district.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Descriptive text.
    pub description: String,
    /// Outgoing connections. One-way; add the reverse explicitly.
    #[serde(default)]
    pub connections: Vec<ConnectionDef>,
    /// Robots present here.
    #[serde(default)]
    pub characters: Vec<CharacterDef>,
    /// Whether this location is the district's tram station.
    #[serde(default)]
    pub station: bool,
    /// Initial lock state, meaningful only for stations.
    #[serde(default)]
    pub unlocked: bool,
}

/// A labeled one-way edge to another location in the same district.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionDef {
    /// Direction or name the player types to follow the edge.
    pub label: String,
    /// Destination location key.
    pub to: String,
}

/// One robot and its dialog graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterDef {
    /// Display name.
    pub name: String,
    /// Id of the node conversations enter at.
    pub entry: String,
    /// Dialog node definitions.
    pub nodes: Vec<DialogNodeDef>,
}

/// One dialog node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogNodeDef {
    /// Node id, unique within the character's graph.
    pub id: String,
    /// The line the character speaks.
    pub text: String,
    /// Player response options.
    #[serde(default)]
    pub choices: Vec<DialogChoiceDef>,
}

/// One player response option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogChoiceDef {
    /// The text the player sees.
    pub text: String,
    /// Node the conversation moves to; omit to end the conversation.
    #[serde(default)]
    pub next: Option<String>,
    /// Tagged effect directives, e.g. `"gain:ORANGE-7"`.
    #[serde(default)]
    pub effects: Vec<String>,
}

impl WorldDef {
    /// Parse a JSON content document.
    pub fn from_json(text: &str) -> WorldResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build the validated world. All content-integrity checks run here,
    /// through the typed constructors.
    pub fn build(self) -> WorldResult<World> {
        let start = Position::new(
            self.start.city,
            self.start.district,
            self.start.location,
        );

        let mut cities = Vec::new();
        for city_def in self.cities {
            let mut districts = Vec::new();
            for district_def in city_def.districts {
                let mut locations = Vec::new();
                for location_def in district_def.locations {
                    locations.push(build_location(&district_def.key, location_def)?);
                }
                districts.push((
                    district_def.key,
                    District::new(district_def.name, district_def.station, locations)?,
                ));
            }
            cities.push((city_def.key, City::new(city_def.name, districts)?));
        }

        World::new(cities, start)
    }
}

fn build_location(district_key: &str, def: LocationDef) -> WorldResult<Location> {
    let mut location = Location::new(def.key, def.name, def.description);

    for connection in def.connections {
        // The builder folds labels to lowercase and keeps the first edge;
        // a repeated label in content is a collision, not an override.
        if location.connection(&connection.label).is_some() {
            return Err(WorldError::DuplicateKey {
                kind: "connection label",
                container: format!("{district_key}/{}", location.key),
                key: connection.label.to_lowercase(),
            });
        }
        location = location.with_connection(&connection.label, connection.to);
    }

    for character in def.characters {
        location = location.with_occupant(build_character(character)?);
    }

    if def.station {
        location = location.as_station(def.unlocked);
    }

    Ok(location)
}

fn build_character(def: CharacterDef) -> WorldResult<Character> {
    let nodes = def
        .nodes
        .into_iter()
        .map(|node_def| {
            let mut node = DialogNode::new(node_def.id, node_def.text);
            for choice_def in node_def.choices {
                let mut choice = DialogChoice::new(choice_def.text);
                if let Some(next) = choice_def.next {
                    choice = choice.with_next(next);
                }
                for raw in &choice_def.effects {
                    choice = choice.with_effect(Effect::parse(raw));
                }
                node = node.with_choice(choice);
            }
            node
        })
        .collect();

    Character::new(def.name, def.entry, nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_json() -> String {
        r#"{
            "start": { "city": "alpha", "district": "yard", "location": "plaza" },
            "cities": [{
                "key": "alpha",
                "name": "Alpha City",
                "districts": [{
                    "key": "yard",
                    "name": "Central Yard",
                    "station": "stop",
                    "locations": [
                        {
                            "key": "plaza",
                            "name": "Plaza",
                            "description": "Open ground.",
                            "connections": [{ "label": "South", "to": "stop" }],
                            "characters": [{
                                "name": "Ada",
                                "entry": "start",
                                "nodes": [{
                                    "id": "start",
                                    "text": "Hello.",
                                    "choices": [{
                                        "text": "Memorize the code.",
                                        "effects": ["gain:ORANGE-7", "hum:quietly"]
                                    }]
                                }]
                            }]
                        },
                        {
                            "key": "stop",
                            "name": "Tram Stop",
                            "description": "A platform.",
                            "connections": [{ "label": "north", "to": "plaza" }],
                            "station": true
                        }
                    ]
                }]
            }]
        }"#
        .to_string()
    }

    #[test]
    fn builds_a_valid_document() {
        let world = WorldDef::from_json(&minimal_json()).unwrap().build().unwrap();

        assert_eq!(world.start(), &Position::new("alpha", "yard", "plaza"));
        let plaza = world.location_at(world.start()).unwrap();
        assert_eq!(plaza.connection("south"), Some("stop"));

        let ada = &plaza.occupants[0];
        let choice = &ada.node("start").unwrap().choices[0];
        assert_eq!(
            choice.effects,
            vec![
                Effect::Gain { code: "ORANGE-7".to_string() },
                Effect::Unknown { raw: "hum:quietly".to_string() },
            ]
        );

        let station = world.city("alpha").unwrap().district("yard").unwrap().station().unwrap();
        assert!(station.is_station);
        assert!(!station.is_unlocked());
    }

    #[test]
    fn rejects_duplicate_location_keys() {
        let json = minimal_json().replace("\"key\": \"stop\"", "\"key\": \"plaza\"");
        let err = WorldDef::from_json(&json).unwrap().build().unwrap_err();
        assert!(matches!(err, WorldError::DuplicateKey { kind: "location", .. }));
    }

    #[test]
    fn rejects_duplicate_connection_labels() {
        let json = minimal_json().replace(
            r#""connections": [{ "label": "South", "to": "stop" }]"#,
            r#""connections": [{ "label": "South", "to": "stop" }, { "label": "south", "to": "stop" }]"#,
        );
        let err = WorldDef::from_json(&json).unwrap().build().unwrap_err();
        assert!(matches!(
            err,
            WorldError::DuplicateKey { kind: "connection label", .. }
        ));
    }

    #[test]
    fn rejects_dangling_dialog_edge() {
        let json = minimal_json().replace(
            r#""text": "Memorize the code.","#,
            r#""text": "Memorize the code.", "next": "gone","#,
        );
        let err = WorldDef::from_json(&json).unwrap().build().unwrap_err();
        assert!(matches!(err, WorldError::DanglingDialogEdge { .. }));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = WorldDef::from_json("{ not json").unwrap_err();
        assert!(matches!(err, WorldError::Content(_)));
    }

    #[test]
    fn defs_round_trip_through_json() {
        let def = WorldDef::from_json(&minimal_json()).unwrap();
        let rendered = serde_json::to_string(&def).unwrap();
        let again = WorldDef::from_json(&rendered).unwrap();
        assert_eq!(again.cities[0].districts[0].locations.len(), 2);
    }
}
