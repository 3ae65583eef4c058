use crate::error::RouteError;
use crate::wire::WireFeatureCollection;
use std::time::Duration;
use tracing::debug;
use wayfinder_types::RouteGeometry;

/// Default per-request deadline. Bounds how long a dead routing service
/// can hold the pipeline in a loading state.
const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(8);

/// Client for the external routing service.
#[derive(Debug, Clone)]
pub struct RouteClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl RouteClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_FETCH_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .user_agent("wayfinder/0.1")
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url,
            timeout,
        }
    }

    /// Fetches the route between two known node identifiers.
    ///
    /// `Ok(None)` means the service answered well-formed but empty: no
    /// route exists between the nodes. All geometry in the returned value
    /// is already latitude-first.
    pub async fn fetch_route(
        &self,
        origin: u32,
        destination: u32,
    ) -> Result<Option<RouteGeometry>, RouteError> {
        let url = format!("{}/api/routes/{}/{}", self.base_url, origin, destination);
        debug!(%url, origin, destination, "requesting route");

        let response = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RouteError::BadStatus(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        let collection: WireFeatureCollection =
            serde_json::from_slice(&body).map_err(|e| RouteError::Parse(e.to_string()))?;

        Ok(collection.into_geometry())
    }

    /// Probes the routing service's health endpoint.
    pub async fn health(&self) -> Result<(), RouteError> {
        let url = format!("{}/api/health", self.base_url);
        let response = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(RouteError::BadStatus(status.as_u16()))
        }
    }

    fn classify(&self, error: reqwest::Error) -> RouteError {
        if error.is_timeout() {
            RouteError::Timeout(self.timeout)
        } else {
            RouteError::Network(error.to_string())
        }
    }
}
