use crate::surface::{LayerHandle, MapSurface, MarkerStyle, PolylineStyle, TileLayerSpec};
use tracing::debug;
use wayfinder_types::{LatLng, LatLngBounds, Location, RouteGeometry};

/// Everything `initialize` needs to set up the base map.
#[derive(Debug, Clone)]
pub struct MapViewConfig {
    pub center: LatLng,
    pub zoom: u8,
    pub tile_layer: TileLayerSpec,
    pub marker_style: MarkerStyle,
    pub route_style: PolylineStyle,
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self {
            center: LatLng::new(13.0827, 80.2707),
            zoom: 13,
            tile_layer: TileLayerSpec::default(),
            marker_style: MarkerStyle::default(),
            route_style: PolylineStyle::default(),
        }
    }
}

/// A live map view and the layers it owns.
///
/// The overlay slot holds at most one route polyline. Every mutation goes
/// through [`MapSession::apply_route`], which removes before it adds, so
/// two overlays can never coexist, not even transiently.
pub struct MapSession<S: MapSurface> {
    surface: S,
    base_layer: LayerHandle,
    markers: Vec<LayerHandle>,
    overlay: Option<LayerHandle>,
    route_style: PolylineStyle,
}

impl<S: MapSurface> MapSession<S> {
    /// Creates the base layer, centers the view, and places the static
    /// markers.
    ///
    /// Consumes the surface: a view is initialized exactly once, and the
    /// returned session is the only handle for further mutation.
    pub fn initialize(mut surface: S, view: &MapViewConfig, markers: &[Location]) -> Self {
        surface.set_view(view.center, view.zoom);
        let base_layer = surface.add_tile_layer(&view.tile_layer);

        let markers = markers
            .iter()
            .map(|location| {
                let label = format!("{} (id {})", location.name, location.id);
                surface.add_circle_marker(location.position, &view.marker_style, &label)
            })
            .collect();

        Self {
            surface,
            base_layer,
            markers,
            overlay: None,
            route_style: view.route_style.clone(),
        }
    }

    /// Replaces the route overlay.
    ///
    /// Any existing overlay is removed first. With geometry, the primary
    /// segment is drawn and the viewport fitted to its bounds; with `None`
    /// (no route), the slot is simply left empty. Removing from an empty
    /// slot is a no-op, never an error.
    pub fn apply_route(&mut self, geometry: Option<&RouteGeometry>) {
        if let Some(previous) = self.overlay.take() {
            self.surface.remove_layer(previous);
        }

        let Some(geometry) = geometry else {
            return;
        };
        let Some(segment) = geometry.primary() else {
            return;
        };
        let Some(bounds) = LatLngBounds::from_points(&segment.points) else {
            debug!("route segment has no points, overlay slot left empty");
            return;
        };

        let handle = self.surface.add_polyline(&segment.points, &self.route_style);
        self.surface.fit_bounds(bounds);
        self.overlay = Some(handle);
    }

    /// Whether a route overlay is currently drawn.
    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// Read access to the underlying surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Releases every layer the session owns.
    ///
    /// Consuming `self` makes a second teardown unrepresentable; "call
    /// exactly once" is enforced by the type system rather than documented
    /// as a runtime precondition.
    pub fn teardown(mut self) {
        if let Some(overlay) = self.overlay.take() {
            self.surface.remove_layer(overlay);
        }
        for marker in self.markers.drain(..) {
            self.surface.remove_layer(marker);
        }
        self.surface.remove_layer(self.base_layer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use wayfinder_types::{RouteSegment, KNOWN_LOCATIONS};

    fn geometry(points: Vec<LatLng>) -> RouteGeometry {
        RouteGeometry {
            segments: vec![RouteSegment {
                points,
                properties: serde_json::Value::Null,
            }],
        }
    }

    fn session() -> (MapSession<RecordingSurface>, RecordingSurface) {
        let surface = RecordingSurface::new();
        let inspector = surface.clone();
        let session = MapSession::initialize(surface, &MapViewConfig::default(), &KNOWN_LOCATIONS);
        (session, inspector)
    }

    #[test]
    fn initialize_places_base_layer_and_markers() {
        let (_session, surface) = session();
        // One tile layer plus one marker per known location.
        assert_eq!(surface.live_layer_count(), 1 + KNOWN_LOCATIONS.len());
        assert_eq!(
            surface.live_marker_labels(),
            vec![
                "Central Chennai (id 1)",
                "Marina Beach (id 2)",
                "Anna University (id 3)",
                "Guindy Station (id 4)",
            ]
        );
        assert_eq!(
            surface.last_view(),
            Some((LatLng::new(13.0827, 80.2707), 13))
        );
    }

    #[test]
    fn apply_route_draws_and_fits() {
        let (mut session, surface) = session();
        let points = vec![LatLng::new(13.08, 80.27), LatLng::new(13.09, 80.28)];
        session.apply_route(Some(&geometry(points.clone())));

        assert!(session.has_overlay());
        assert_eq!(surface.live_polylines(), vec![points.clone()]);
        assert_eq!(surface.last_fit(), LatLngBounds::from_points(&points));
    }

    #[test]
    fn new_route_replaces_the_old_overlay() {
        let (mut session, surface) = session();
        session.apply_route(Some(&geometry(vec![LatLng::new(13.08, 80.27)])));
        let replacement = vec![LatLng::new(13.00, 80.22), LatLng::new(13.01, 80.23)];
        session.apply_route(Some(&geometry(replacement.clone())));

        assert_eq!(surface.live_polylines(), vec![replacement]);
    }

    #[test]
    fn apply_none_clears_the_slot() {
        let (mut session, surface) = session();
        session.apply_route(Some(&geometry(vec![LatLng::new(13.08, 80.27)])));
        session.apply_route(None);

        assert!(!session.has_overlay());
        assert!(surface.live_polylines().is_empty());
    }

    #[test]
    fn apply_none_on_empty_slot_is_a_no_op() {
        let (mut session, surface) = session();
        session.apply_route(None);
        session.apply_route(None);

        assert!(!session.has_overlay());
        assert_eq!(surface.live_layer_count(), 1 + KNOWN_LOCATIONS.len());
    }

    #[test]
    fn pointless_geometry_leaves_the_slot_empty() {
        let (mut session, surface) = session();
        session.apply_route(Some(&geometry(vec![LatLng::new(13.08, 80.27)])));
        session.apply_route(Some(&geometry(vec![])));

        // The old overlay is gone and nothing replaced it.
        assert!(!session.has_overlay());
        assert!(surface.live_polylines().is_empty());
    }

    #[test]
    fn overlay_stays_exclusive_across_any_sequence() {
        let (mut session, surface) = session();
        for i in 0..5u32 {
            session.apply_route(Some(&geometry(vec![LatLng::new(
                13.0 + f64::from(i) / 100.0,
                80.2,
            )])));
            assert!(surface.live_polylines().len() <= 1);
        }
        session.apply_route(None);
        assert!(surface.live_polylines().is_empty());
    }

    #[test]
    fn teardown_releases_everything() {
        let (mut session, surface) = session();
        session.apply_route(Some(&geometry(vec![LatLng::new(13.08, 80.27)])));
        session.teardown();

        assert_eq!(surface.live_layer_count(), 0);
    }
}
