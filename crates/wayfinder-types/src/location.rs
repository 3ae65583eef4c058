use crate::geo::LatLng;
use serde::Serialize;

/// A known destination in the prototype's fixed location set.
///
/// The identifier doubles as the node id the routing service keys routes by.
/// The set is defined at startup and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub id: u32,
    pub name: &'static str,
    pub position: LatLng,
}

/// Node id the prototype always routes from.
pub const ORIGIN_LOCATION_ID: u32 = 1;

pub const CENTRAL_CHENNAI: Location = Location {
    id: 1,
    name: "Central Chennai",
    position: LatLng::new(13.0827, 80.2707),
};

pub const MARINA_BEACH: Location = Location {
    id: 2,
    name: "Marina Beach",
    position: LatLng::new(13.0878, 80.2799),
};

pub const ANNA_UNIVERSITY: Location = Location {
    id: 3,
    name: "Anna University",
    position: LatLng::new(13.0604, 80.2451),
};

pub const GUINDY_STATION: Location = Location {
    id: 4,
    name: "Guindy Station",
    position: LatLng::new(13.0050, 80.2250),
};

/// The static location table.
///
/// Order here is presentation order for markers; it is *not* the matcher's
/// rule priority, which lives in `wayfinder-voice`.
pub static KNOWN_LOCATIONS: [Location; 4] =
    [CENTRAL_CHENNAI, MARINA_BEACH, ANNA_UNIVERSITY, GUINDY_STATION];

/// Looks up a known location by its stable identifier.
pub fn location_by_id(id: u32) -> Option<&'static Location> {
    KNOWN_LOCATIONS.iter().find(|location| location.id == id)
}
