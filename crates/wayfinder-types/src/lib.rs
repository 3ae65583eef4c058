//! Shared domain types for the wayfinder client.
//!
//! This crate provides the foundational types used across all wayfinder
//! crates: geographic coordinates and bounds, the static table of known
//! locations, and decoded route geometry.
//!
//! No crate in the workspace depends on anything *except* `wayfinder-types`
//! for cross-cutting type definitions. This keeps the dependency graph clean
//! and prevents circular dependencies.
//!
//! # Coordinate order
//!
//! Everything in this crate, and everything downstream of it, is
//! latitude-first. The routing service speaks longitude-first GeoJSON; the
//! swap happens once, inside `wayfinder-routing`'s wire decoder, and
//! longitude-first data never crosses a crate boundary.

mod geo;
mod location;
mod route;

pub use geo::{LatLng, LatLngBounds};
pub use location::{
    location_by_id, Location, ANNA_UNIVERSITY, CENTRAL_CHENNAI, GUINDY_STATION, KNOWN_LOCATIONS,
    MARINA_BEACH, ORIGIN_LOCATION_ID,
};
pub use route::{RouteGeometry, RouteSegment};
