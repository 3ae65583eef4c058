//! Route client for the wayfinder navigation pipeline.
//!
//! Consumes the external routing service: `GET
//! /api/routes/{origin}/{destination}` returns a GeoJSON-shaped feature
//! collection whose features carry `LineString` geometry. This crate owns
//! the transport error taxonomy and the wire decoding, including the
//! longitude-first to latitude-first swap, which happens here and nowhere
//! else.
//!
//! Requests are idempotent and side-effect free; the client never touches
//! map state. An empty feature collection decodes to `Ok(None)` ("no route
//! found"), which is a result, not an error.

mod client;
mod error;
mod wire;

pub use client::RouteClient;
pub use error::RouteError;
