//! Wire format of the routing service response.
//!
//! The service speaks GeoJSON: a feature collection whose features hold
//! `LineString` coordinates as `[longitude, latitude]` pairs. Decoding
//! swaps every pair to latitude-first; nothing longitude-first leaves this
//! module.

use serde::Deserialize;
use serde_json::Value;
use wayfinder_types::{LatLng, RouteGeometry, RouteSegment};

#[derive(Debug, Deserialize)]
pub(crate) struct WireFeatureCollection {
    /// A collection without a `features` array is treated the same as an
    /// empty one: no route.
    #[serde(default)]
    features: Vec<WireFeature>,
}

#[derive(Debug, Deserialize)]
struct WireFeature {
    geometry: WireGeometry,
    #[serde(default)]
    properties: Value,
}

#[derive(Debug, Deserialize)]
struct WireGeometry {
    coordinates: Vec<[f64; 2]>,
}

impl WireFeatureCollection {
    /// Decodes into renderable geometry, or `None` for "no route found".
    pub(crate) fn into_geometry(self) -> Option<RouteGeometry> {
        if self.features.is_empty() {
            return None;
        }
        let segments = self
            .features
            .into_iter()
            .map(|feature| RouteSegment {
                points: feature
                    .geometry
                    .coordinates
                    .into_iter()
                    .map(|[lon, lat]| LatLng::new(lat, lon))
                    .collect(),
                properties: feature.properties,
            })
            .collect();
        Some(RouteGeometry { segments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(body: &str) -> Option<RouteGeometry> {
        let collection: WireFeatureCollection =
            serde_json::from_str(body).expect("wire decode failed");
        collection.into_geometry()
    }

    // The swap is the easy-to-miss contract point, pinned exactly.
    #[test]
    fn coordinates_are_swapped_to_latitude_first() {
        let geometry = decode(
            r#"{
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[80.27, 13.08], [80.28, 13.09]]
                    },
                    "properties": {}
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(
            geometry.primary().unwrap().points,
            vec![LatLng::new(13.08, 80.27), LatLng::new(13.09, 80.28)]
        );
    }

    #[test]
    fn empty_feature_collection_is_no_route() {
        assert_eq!(
            decode(r#"{"type": "FeatureCollection", "features": []}"#),
            None
        );
    }

    #[test]
    fn missing_features_array_is_no_route() {
        assert_eq!(decode(r#"{"type": "FeatureCollection"}"#), None);
    }

    #[test]
    fn properties_pass_through_opaque() {
        let geometry = decode(
            r#"{
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "geometry": {"type": "LineString", "coordinates": [[80.27, 13.08]]},
                    "properties": {"source": 1, "target": 2, "cost": 2.4}
                }]
            }"#,
        )
        .unwrap();

        let properties = &geometry.primary().unwrap().properties;
        assert_eq!(properties["source"], 1);
        assert_eq!(properties["cost"], 2.4);
    }

    #[test]
    fn every_feature_becomes_a_segment() {
        let geometry = decode(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {"geometry": {"type": "LineString", "coordinates": [[80.27, 13.08]]}, "properties": {"leg": 1}},
                    {"geometry": {"type": "LineString", "coordinates": [[80.28, 13.09]]}, "properties": {"leg": 2}}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(geometry.segment_count(), 2);
        assert_eq!(geometry.segments[1].properties["leg"], 2);
    }
}
