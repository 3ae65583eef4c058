//! Map rendering session for the wayfinder client.
//!
//! The interactive rendering surface is an external capability; this crate
//! owns what is drawn on it, not how drawing works. [`MapSurface`] is the
//! capability boundary (tile layer, markers, polylines, viewport fitting,
//! layer removal). [`MapSession`] owns a live surface and enforces the one
//! visual invariant that matters: at most one route overlay at any time,
//! replaced by remove-then-add sequencing.
//!
//! Session lifecycle is encoded in ownership. `initialize` consumes the
//! surface, so a view is initialized exactly once; `teardown` consumes the
//! session, so double-release is unrepresentable.

mod session;
mod surface;

pub use session::{MapSession, MapViewConfig};
pub use surface::{
    LayerHandle, MapSurface, MarkerStyle, PolylineStyle, RecordingSurface, SurfaceOp,
    TileLayerSpec, TracingSurface,
};
