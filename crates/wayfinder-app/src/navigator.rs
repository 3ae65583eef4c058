//! The navigator: voice resolution, route fetching, and map state, wired
//! into one controller.
//!
//! All map mutation happens on the caller's single logical thread. The
//! only suspension point is the route fetch, which runs as a spawned task
//! and reports back through a completion channel. Completions carry the
//! sequence number of the request that produced them; anything but the
//! latest issued request is stale and discarded, so a slow response can
//! never overwrite the route a newer request already drew. That guard is
//! the one safety-critical invariant in this otherwise simple pipeline.

use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};
use wayfinder_map::{MapSession, MapSurface};
use wayfinder_routing::{RouteClient, RouteError};
use wayfinder_types::{Location, RouteGeometry};
use wayfinder_voice::{CaptureFault, TranscriptMatcher};

/// Default capacity for the status broadcast channel.
const STATUS_CAPACITY: usize = 64;

/// User-visible pipeline status, rendered by the caller as inline status
/// text.
#[derive(Debug, Clone)]
pub enum NavStatus {
    Heard { transcript: String },
    NoMatch { transcript: String },
    Routing { destination: Location },
    RouteApplied { segments: usize, points: usize },
    NoRoute,
    RouteFailed { message: String },
    SpeechFailed { message: String },
}

/// Result of one route fetch, tagged with the issue order of its request.
#[derive(Debug)]
pub struct RouteCompletion {
    pub seq: u64,
    pub origin: u32,
    pub destination: u32,
    pub result: Result<Option<RouteGeometry>, RouteError>,
}

/// Controller owning the map session and the resolution pipeline.
pub struct Navigator<S: MapSurface> {
    session: MapSession<S>,
    client: Arc<RouteClient>,
    matcher: TranscriptMatcher,
    origin: u32,
    issued_seq: u64,
    completions_tx: mpsc::UnboundedSender<RouteCompletion>,
    status_tx: broadcast::Sender<NavStatus>,
}

impl<S: MapSurface> Navigator<S> {
    /// Builds the controller and hands back the channel its spawned
    /// fetches report on. The caller's event loop feeds each received
    /// completion back into [`Navigator::handle_completion`].
    pub fn new(
        session: MapSession<S>,
        client: RouteClient,
        matcher: TranscriptMatcher,
        origin: u32,
    ) -> (Self, mpsc::UnboundedReceiver<RouteCompletion>) {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let (status_tx, _) = broadcast::channel(STATUS_CAPACITY);
        let navigator = Self {
            session,
            client: Arc::new(client),
            matcher,
            origin,
            issued_seq: 0,
            completions_tx,
            status_tx,
        };
        (navigator, completions_rx)
    }

    /// Subscribes to user-visible status events.
    pub fn status_events(&self) -> broadcast::Receiver<NavStatus> {
        self.status_tx.subscribe()
    }

    /// Feeds one final transcript through destination resolution.
    ///
    /// A resolution miss is not an error: no request is issued and the map
    /// is untouched.
    pub fn handle_transcript(&mut self, transcript: &str) {
        self.emit(NavStatus::Heard {
            transcript: transcript.to_string(),
        });

        match self.matcher.resolve(transcript) {
            Some(destination) => {
                let destination = *destination;
                info!(
                    destination = destination.name,
                    id = destination.id,
                    "transcript resolved"
                );
                self.emit(NavStatus::Routing { destination });
                self.request_route(self.origin, destination.id);
            }
            None => {
                debug!(transcript, "no destination matched");
                self.emit(NavStatus::NoMatch {
                    transcript: transcript.to_string(),
                });
            }
        }
    }

    /// Issues a route request and returns its sequence number.
    ///
    /// Also the manual path: callers may route between any two known nodes
    /// directly, bypassing voice resolution.
    pub fn request_route(&mut self, origin: u32, destination: u32) -> u64 {
        self.issued_seq += 1;
        let seq = self.issued_seq;
        let client = Arc::clone(&self.client);
        let completions = self.completions_tx.clone();

        tokio::spawn(async move {
            let result = client.fetch_route(origin, destination).await;
            let _ = completions.send(RouteCompletion {
                seq,
                origin,
                destination,
                result,
            });
        });

        seq
    }

    /// Applies a completed fetch to the map.
    ///
    /// Policy, pinned by tests:
    /// - a route replaces the overlay and refits the viewport
    /// - "no route found" clears the overlay
    /// - a transport failure leaves the existing overlay in place; a failed
    ///   refresh must not destroy a working route
    pub fn handle_completion(&mut self, completion: RouteCompletion) {
        if completion.seq != self.issued_seq {
            debug!(
                seq = completion.seq,
                latest = self.issued_seq,
                "discarding stale route response"
            );
            return;
        }

        match completion.result {
            Ok(Some(geometry)) => {
                let segments = geometry.segment_count();
                let points = geometry.primary().map_or(0, |s| s.points.len());
                info!(
                    origin = completion.origin,
                    destination = completion.destination,
                    segments,
                    points,
                    "route applied"
                );
                self.session.apply_route(Some(&geometry));
                self.emit(NavStatus::RouteApplied { segments, points });
            }
            Ok(None) => {
                info!(
                    origin = completion.origin,
                    destination = completion.destination,
                    "no route between nodes"
                );
                self.session.apply_route(None);
                self.emit(NavStatus::NoRoute);
            }
            Err(error) => {
                warn!(
                    origin = completion.origin,
                    destination = completion.destination,
                    error = %error,
                    "route fetch failed"
                );
                self.emit(NavStatus::RouteFailed {
                    message: error.to_string(),
                });
            }
        }
    }

    /// Surfaces an engine-reported capture failure; recording state resets
    /// to idle on the caller's side.
    pub fn handle_capture_fault(&mut self, fault: CaptureFault) {
        warn!(code = fault.code(), "speech capture failed");
        self.emit(NavStatus::SpeechFailed {
            message: fault.to_string(),
        });
    }

    /// Read access to the owned map session.
    pub fn session(&self) -> &MapSession<S> {
        &self.session
    }

    /// Ends the session, releasing everything it drew.
    pub fn shutdown(self) {
        self.session.teardown();
    }

    fn emit(&self, status: NavStatus) {
        let _ = self.status_tx.send(status);
    }
}
