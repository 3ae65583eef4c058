use serde::{Deserialize, Serialize};

/// A geographic point, latitude-first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// An axis-aligned bounding box over geographic points.
///
/// Used to fit the map viewport to a route overlay. Degenerate boxes
/// (a single point) are valid; the rendering surface decides how to zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    /// Computes the bounding box of a point sequence.
    ///
    /// Returns `None` for an empty sequence: there is nothing to fit the
    /// viewport to.
    pub fn from_points(points: &[LatLng]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self {
            south_west: *first,
            north_east: *first,
        };
        for point in &points[1..] {
            bounds.extend(*point);
        }
        Some(bounds)
    }

    /// Grows the box to include `point`.
    pub fn extend(&mut self, point: LatLng) {
        if point.lat < self.south_west.lat {
            self.south_west.lat = point.lat;
        }
        if point.lon < self.south_west.lon {
            self.south_west.lon = point.lon;
        }
        if point.lat > self.north_east.lat {
            self.north_east.lat = point.lat;
        }
        if point.lon > self.north_east.lon {
            self.north_east.lon = point.lon;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_of_empty_slice_is_none() {
        assert_eq!(LatLngBounds::from_points(&[]), None);
    }

    #[test]
    fn bounds_of_single_point_is_degenerate() {
        let p = LatLng::new(13.08, 80.27);
        let bounds = LatLngBounds::from_points(&[p]).unwrap();
        assert_eq!(bounds.south_west, p);
        assert_eq!(bounds.north_east, p);
    }

    #[test]
    fn bounds_covers_all_points() {
        let points = [
            LatLng::new(13.08, 80.27),
            LatLng::new(13.09, 80.28),
            LatLng::new(13.00, 80.22),
        ];
        let bounds = LatLngBounds::from_points(&points).unwrap();
        assert_eq!(bounds.south_west, LatLng::new(13.00, 80.22));
        assert_eq!(bounds.north_east, LatLng::new(13.09, 80.28));
    }
}
