//! Route client tests against a stub routing service behind a real listener.

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::net::SocketAddr;
use std::time::Duration;
use wayfinder_routing::{RouteClient, RouteError};
use wayfinder_types::LatLng;

/// Binds the stub on an ephemeral port and serves it in the background.
async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind stub routing service");
    let addr = listener.local_addr().expect("stub has no local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server error");
    });
    addr
}

fn marina_route() -> serde_json::Value {
    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": [[80.2707, 13.0827], [80.2750, 13.0850], [80.2799, 13.0878]]
            },
            "properties": {"source": 1, "target": 2, "cost": 3.1}
        }]
    })
}

#[tokio::test]
async fn fetch_route_decodes_and_swaps() {
    let app = Router::new().route(
        "/api/routes/1/2",
        get(|| async { Json(marina_route()) }),
    );
    let addr = serve(app).await;

    let client = RouteClient::new(format!("http://{}", addr));
    let geometry = client
        .fetch_route(1, 2)
        .await
        .expect("fetch failed")
        .expect("expected a route");

    let points = &geometry.primary().expect("no primary segment").points;
    assert_eq!(points.len(), 3);
    assert_eq!(points[0], LatLng::new(13.0827, 80.2707));
    assert_eq!(points[2], LatLng::new(13.0878, 80.2799));
    assert_eq!(geometry.primary().unwrap().properties["cost"], 3.1);
}

#[tokio::test]
async fn empty_collection_is_ok_none() {
    let app = Router::new().route(
        "/api/routes/1/4",
        get(|| async { Json(json!({"type": "FeatureCollection", "features": []})) }),
    );
    let addr = serve(app).await;

    let client = RouteClient::new(format!("http://{}", addr));
    let geometry = client.fetch_route(1, 4).await.expect("fetch failed");
    assert!(geometry.is_none());
}

#[tokio::test]
async fn server_error_is_bad_status() {
    let app = Router::new().route(
        "/api/routes/1/2",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let addr = serve(app).await;

    let client = RouteClient::new(format!("http://{}", addr));
    match client.fetch_route(1, 2).await {
        Err(RouteError::BadStatus(500)) => {}
        other => panic!("expected BadStatus(500), got {:?}", other),
    }
}

#[tokio::test]
async fn unknown_route_is_bad_status_404() {
    let app = Router::new();
    let addr = serve(app).await;

    let client = RouteClient::new(format!("http://{}", addr));
    match client.fetch_route(7, 8).await {
        Err(RouteError::BadStatus(404)) => {}
        other => panic!("expected BadStatus(404), got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let app = Router::new().route(
        "/api/routes/1/2",
        get(|| async { "not json at all" }),
    );
    let addr = serve(app).await;

    let client = RouteClient::new(format!("http://{}", addr));
    match client.fetch_route(1, 2).await {
        Err(RouteError::Parse(_)) => {}
        other => panic!("expected Parse error, got {:?}", other),
    }
}

#[tokio::test]
async fn slow_service_is_timeout() {
    let app = Router::new().route(
        "/api/routes/1/2",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(marina_route())
        }),
    );
    let addr = serve(app).await;

    let client = RouteClient::with_timeout(format!("http://{}", addr), Duration::from_millis(200));
    match client.fetch_route(1, 2).await {
        Err(RouteError::Timeout(_)) => {}
        other => panic!("expected Timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_service_is_network_error() {
    // Bind a listener to reserve a port, then drop it so nothing answers.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = RouteClient::new(format!("http://{}", addr));
    match client.fetch_route(1, 2).await {
        Err(RouteError::Network(_)) => {}
        other => panic!("expected Network error, got {:?}", other),
    }
}

#[tokio::test]
async fn health_probe_round_trip() {
    let app = Router::new().route(
        "/api/health",
        get(|| async { Json(json!({"status": "ok"})) }),
    );
    let addr = serve(app).await;

    let client = RouteClient::new(format!("http://{}", addr));
    client.health().await.expect("health probe failed");
}

#[tokio::test]
async fn unhealthy_service_reports_status() {
    let app = Router::new().route(
        "/api/health",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
    );
    let addr = serve(app).await;

    let client = RouteClient::new(format!("http://{}", addr));
    match client.health().await {
        Err(RouteError::BadStatus(503)) => {}
        other => panic!("expected BadStatus(503), got {:?}", other),
    }
}
