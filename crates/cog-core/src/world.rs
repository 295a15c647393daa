//! The city graph: districts, cities, and the world that owns them.
//!
//! Ownership runs strictly downward: a [`World`] owns its [`City`]s, a city
//! its [`District`]s, a district its [`Location`]s, and a location its
//! occupants. The structure is fixed after construction; the only mutable
//! state anywhere in the tree is each station's one-way unlock flag.

use std::collections::BTreeMap;

use crate::error::{WorldError, WorldResult};
use crate::location::Location;

/// A `(city, district, location)` key triple identifying one place in the
/// world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// City key.
    pub city: String,
    /// District key within the city.
    pub district: String,
    /// Location key within the district.
    pub location: String,
}

impl Position {
    /// Create a position from its three keys.
    pub fn new(
        city: impl Into<String>,
        district: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            city: city.into(),
            district: district.into(),
            location: location.into(),
        }
    }
}

/// A neighborhood: connected locations sharing one tram station.
#[derive(Debug, Clone)]
pub struct District {
    name: String,
    station: String,
    locations: BTreeMap<String, Location>,
}

impl District {
    /// Build a district from its locations and designated station key.
    ///
    /// Validates that location keys are unique, that every connection
    /// resolves within the district, that the station key resolves to a
    /// station-flagged location, and that no other location carries the
    /// station flag.
    pub fn new(
        name: impl Into<String>,
        station: impl Into<String>,
        locations: Vec<Location>,
    ) -> WorldResult<Self> {
        let name = name.into();
        let station = station.into();

        let mut map = BTreeMap::new();
        for location in locations {
            if map.contains_key(&location.key) {
                return Err(WorldError::DuplicateKey {
                    kind: "location",
                    container: name,
                    key: location.key,
                });
            }
            map.insert(location.key.clone(), location);
        }

        for location in map.values() {
            for (label, target) in &location.connections {
                if !map.contains_key(target) {
                    return Err(WorldError::DanglingConnection {
                        district: name,
                        location: location.key.clone(),
                        label: label.clone(),
                        target: target.clone(),
                    });
                }
            }
            if location.is_station && location.key != station {
                return Err(WorldError::StrayStation {
                    district: name,
                    location: location.key.clone(),
                    station,
                });
            }
        }

        if !map.get(&station).is_some_and(|l| l.is_station) {
            return Err(WorldError::MissingStation {
                district: name,
                key: station,
            });
        }

        Ok(Self {
            name,
            station,
            locations: map,
        })
    }

    /// The district's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key of the district's tram station location.
    pub fn station_key(&self) -> &str {
        &self.station
    }

    /// Look up a location by key.
    pub fn location(&self, key: &str) -> WorldResult<&Location> {
        self.locations
            .get(key)
            .ok_or_else(|| WorldError::LocationNotFound {
                district: self.name.clone(),
                key: key.to_string(),
            })
    }

    /// The district's tram station location.
    pub fn station(&self) -> WorldResult<&Location> {
        self.location(&self.station)
    }

    /// Iterate locations in key order.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    fn location_mut(&mut self, key: &str) -> WorldResult<&mut Location> {
        let Self { name, locations, .. } = self;
        locations
            .get_mut(key)
            .ok_or_else(|| WorldError::LocationNotFound {
                district: name.clone(),
                key: key.to_string(),
            })
    }
}

/// A city: a group of districts joined by a tram line.
#[derive(Debug, Clone)]
pub struct City {
    name: String,
    districts: BTreeMap<String, District>,
}

impl City {
    /// Build a city from keyed districts, rejecting key collisions.
    pub fn new(
        name: impl Into<String>,
        districts: Vec<(String, District)>,
    ) -> WorldResult<Self> {
        let name = name.into();
        let mut map = BTreeMap::new();
        for (key, district) in districts {
            if map.contains_key(&key) {
                return Err(WorldError::DuplicateKey {
                    kind: "district",
                    container: name,
                    key,
                });
            }
            map.insert(key, district);
        }
        Ok(Self { name, districts: map })
    }

    /// The city's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a district by key.
    pub fn district(&self, key: &str) -> WorldResult<&District> {
        self.districts
            .get(key)
            .ok_or_else(|| WorldError::DistrictNotFound {
                city: self.name.clone(),
                key: key.to_string(),
            })
    }

    /// Iterate `(key, district)` pairs in key order.
    pub fn districts(&self) -> impl Iterator<Item = (&str, &District)> {
        self.districts.iter().map(|(k, d)| (k.as_str(), d))
    }

    fn district_mut(&mut self, key: &str) -> WorldResult<&mut District> {
        let Self { name, districts } = self;
        districts
            .get_mut(key)
            .ok_or_else(|| WorldError::DistrictNotFound {
                city: name.clone(),
                key: key.to_string(),
            })
    }
}

/// The world: every city, plus the position a new game starts at.
#[derive(Debug, Clone)]
pub struct World {
    cities: BTreeMap<String, City>,
    start: Position,
}

impl World {
    /// Build a world from keyed cities, rejecting key collisions and a start
    /// position that does not resolve.
    pub fn new(cities: Vec<(String, City)>, start: Position) -> WorldResult<Self> {
        let mut map = BTreeMap::new();
        for (key, city) in cities {
            if map.contains_key(&key) {
                return Err(WorldError::DuplicateKey {
                    kind: "city",
                    container: "world".to_string(),
                    key,
                });
            }
            map.insert(key, city);
        }

        let world = Self { cities: map, start };
        world.location_at(&world.start)?;
        Ok(world)
    }

    /// The position a new game starts at.
    pub fn start(&self) -> &Position {
        &self.start
    }

    /// Look up a city by key.
    pub fn city(&self, key: &str) -> WorldResult<&City> {
        self.cities
            .get(key)
            .ok_or_else(|| WorldError::CityNotFound(key.to_string()))
    }

    /// Iterate `(key, city)` pairs in key order.
    pub fn cities(&self) -> impl Iterator<Item = (&str, &City)> {
        self.cities.iter().map(|(k, c)| (k.as_str(), c))
    }

    /// Resolve a position to its location.
    pub fn location_at(&self, pos: &Position) -> WorldResult<&Location> {
        self.city(&pos.city)?
            .district(&pos.district)?
            .location(&pos.location)
    }

    /// Resolve a position to its location, mutably. Used by the play engine
    /// to flip a station's unlock flag; the graph itself never changes.
    pub fn location_at_mut(&mut self, pos: &Position) -> WorldResult<&mut Location> {
        self.cities
            .get_mut(&pos.city)
            .ok_or_else(|| WorldError::CityNotFound(pos.city.clone()))?
            .district_mut(&pos.district)?
            .location_mut(&pos.location)
    }

    /// Total number of locations across all cities.
    pub fn location_count(&self) -> usize {
        self.cities
            .values()
            .flat_map(|c| c.districts.values())
            .map(|d| d.locations.len())
            .sum()
    }

    /// Total number of robot characters across all cities.
    pub fn character_count(&self) -> usize {
        self.cities
            .values()
            .flat_map(|c| c.districts.values())
            .flat_map(|d| d.locations.values())
            .map(|l| l.occupants.len())
            .sum()
    }
}
