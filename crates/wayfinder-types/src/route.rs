use crate::geo::{LatLng, LatLngBounds};
use serde::{Deserialize, Serialize};

/// One decoded path segment of a route.
///
/// `properties` is whatever the routing service attached to the feature
/// (source/target node ids, cost, ...). It passes through unmodified; the
/// client never interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub points: Vec<LatLng>,
    pub properties: serde_json::Value,
}

/// Decoded route geometry: one or more path segments, latitude-first.
///
/// The first segment is the renderable path; further segments ride along as
/// metadata. A `RouteGeometry` always holds at least one segment, because an
/// empty feature collection decodes to "no route" upstream, not to an empty
/// geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteGeometry {
    pub segments: Vec<RouteSegment>,
}

impl RouteGeometry {
    /// The segment the overlay is drawn from.
    pub fn primary(&self) -> Option<&RouteSegment> {
        self.segments.first()
    }

    /// Bounding box of the renderable path, if it has any points.
    pub fn bounds(&self) -> Option<LatLngBounds> {
        LatLngBounds::from_points(&self.primary()?.points)
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}
