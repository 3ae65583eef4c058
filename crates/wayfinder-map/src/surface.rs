use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tracing::info;
use wayfinder_types::{LatLng, LatLngBounds};

/// Opaque reference to a layer owned by a rendering surface.
///
/// Handles are issued by the surface and only ever handed back to it; the
/// session never fabricates one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerHandle(pub u64);

/// Base tile layer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayerSpec {
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: u8,
}

impl Default for TileLayerSpec {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "© OpenStreetMap contributors".to_string(),
            max_zoom: 19,
        }
    }
}

/// Style for the static location markers.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub radius: u32,
    pub fill_color: String,
    pub color: String,
    pub weight: u32,
    pub opacity: f64,
    pub fill_opacity: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 8,
            fill_color: "#3b82f6".to_string(),
            color: "#1e40af".to_string(),
            weight: 2,
            opacity: 1.0,
            fill_opacity: 0.8,
        }
    }
}

/// Style for the route overlay polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineStyle {
    pub color: String,
    pub weight: u32,
    pub opacity: f64,
    pub dash_array: Option<String>,
}

impl Default for PolylineStyle {
    fn default() -> Self {
        Self {
            color: "#ef4444".to_string(),
            weight: 4,
            opacity: 0.8,
            dash_array: Some("5, 5".to_string()),
        }
    }
}

/// The interactive-map rendering capability.
///
/// Implementations bind whatever map library the platform offers. All
/// operations are infallible, mirroring the surfaces this client targets;
/// a binding that can fail should surface that through its own channel,
/// not through this trait.
pub trait MapSurface: Send {
    /// Centers the viewport.
    fn set_view(&mut self, center: LatLng, zoom: u8);

    /// Creates the base tile layer.
    fn add_tile_layer(&mut self, spec: &TileLayerSpec) -> LayerHandle;

    /// Places a circular marker with a bound label.
    fn add_circle_marker(&mut self, position: LatLng, style: &MarkerStyle, label: &str)
        -> LayerHandle;

    /// Draws a styled polyline through an ordered point sequence.
    fn add_polyline(&mut self, points: &[LatLng], style: &PolylineStyle) -> LayerHandle;

    /// Fits the viewport to a bounding box.
    fn fit_bounds(&mut self, bounds: LatLngBounds);

    /// Removes a previously added layer.
    fn remove_layer(&mut self, handle: LayerHandle);
}

/// Headless surface that logs every draw operation.
///
/// The prototype binary renders onto this; swapping in a real map binding
/// means implementing [`MapSurface`] over it and changing one constructor
/// call.
#[derive(Debug, Default)]
pub struct TracingSurface {
    next_handle: u64,
}

impl TracingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn issue(&mut self) -> LayerHandle {
        self.next_handle += 1;
        LayerHandle(self.next_handle)
    }
}

impl MapSurface for TracingSurface {
    fn set_view(&mut self, center: LatLng, zoom: u8) {
        info!(lat = center.lat, lon = center.lon, zoom, "map view centered");
    }

    fn add_tile_layer(&mut self, spec: &TileLayerSpec) -> LayerHandle {
        let handle = self.issue();
        info!(url = %spec.url_template, layer = handle.0, "tile layer added");
        handle
    }

    fn add_circle_marker(
        &mut self,
        position: LatLng,
        _style: &MarkerStyle,
        label: &str,
    ) -> LayerHandle {
        let handle = self.issue();
        info!(
            lat = position.lat,
            lon = position.lon,
            label,
            layer = handle.0,
            "marker placed"
        );
        handle
    }

    fn add_polyline(&mut self, points: &[LatLng], style: &PolylineStyle) -> LayerHandle {
        let handle = self.issue();
        info!(
            points = points.len(),
            color = %style.color,
            layer = handle.0,
            "route overlay drawn"
        );
        handle
    }

    fn fit_bounds(&mut self, bounds: LatLngBounds) {
        info!(
            south = bounds.south_west.lat,
            west = bounds.south_west.lon,
            north = bounds.north_east.lat,
            east = bounds.north_east.lon,
            "viewport fitted to route"
        );
    }

    fn remove_layer(&mut self, handle: LayerHandle) {
        info!(layer = handle.0, "layer removed");
    }
}

/// Everything a [`RecordingSurface`] knows about one live layer.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Tile,
    Marker { label: String, position: LatLng },
    Polyline { points: Vec<LatLng> },
}

#[derive(Debug, Default)]
struct RecordingInner {
    next_handle: u64,
    live: BTreeMap<u64, SurfaceOp>,
    last_fit: Option<LatLngBounds>,
    last_view: Option<(LatLng, u8)>,
}

/// A surface double for tests.
///
/// Tracks which layers are currently live so invariants like overlay
/// exclusivity can be asserted after any call sequence. Clones share
/// state, so a test can keep one clone for inspection while the session
/// owns the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    inner: Arc<Mutex<RecordingInner>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RecordingInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn issue(&self, op: SurfaceOp) -> LayerHandle {
        let mut inner = self.lock();
        inner.next_handle += 1;
        let handle = LayerHandle(inner.next_handle);
        inner.live.insert(handle.0, op);
        handle
    }

    /// Point sequences of every live polyline, in insertion order.
    pub fn live_polylines(&self) -> Vec<Vec<LatLng>> {
        self.lock()
            .live
            .values()
            .filter_map(|op| match op {
                SurfaceOp::Polyline { points } => Some(points.clone()),
                _ => None,
            })
            .collect()
    }

    /// Labels of every live marker, in insertion order.
    pub fn live_marker_labels(&self) -> Vec<String> {
        self.lock()
            .live
            .values()
            .filter_map(|op| match op {
                SurfaceOp::Marker { label, .. } => Some(label.clone()),
                _ => None,
            })
            .collect()
    }

    /// Total live layers of any kind.
    pub fn live_layer_count(&self) -> usize {
        self.lock().live.len()
    }

    /// The most recent viewport fit, if any.
    pub fn last_fit(&self) -> Option<LatLngBounds> {
        self.lock().last_fit
    }

    /// The most recent view center and zoom, if any.
    pub fn last_view(&self) -> Option<(LatLng, u8)> {
        self.lock().last_view
    }
}

impl MapSurface for RecordingSurface {
    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.lock().last_view = Some((center, zoom));
    }

    fn add_tile_layer(&mut self, _spec: &TileLayerSpec) -> LayerHandle {
        self.issue(SurfaceOp::Tile)
    }

    fn add_circle_marker(
        &mut self,
        position: LatLng,
        _style: &MarkerStyle,
        label: &str,
    ) -> LayerHandle {
        self.issue(SurfaceOp::Marker {
            label: label.to_string(),
            position,
        })
    }

    fn add_polyline(&mut self, points: &[LatLng], _style: &PolylineStyle) -> LayerHandle {
        self.issue(SurfaceOp::Polyline {
            points: points.to_vec(),
        })
    }

    fn fit_bounds(&mut self, bounds: LatLngBounds) {
        self.lock().last_fit = Some(bounds);
    }

    fn remove_layer(&mut self, handle: LayerHandle) {
        self.lock().live.remove(&handle.0);
    }
}
