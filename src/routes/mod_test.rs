use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use super::*;
use crate::state::test_helpers::{MockSource, furniture_row, test_app_state};

async fn serve(state: AppState) -> std::net::SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.unwrap();
    });
    addr
}

async fn request(addr: std::net::SocketAddr, method: &str, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let req = format!("{method} {path} HTTP/1.1\r\nHost: localhost\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
    stream.write_all(req.as_bytes()).await.unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn healthz_reports_ok_before_first_fetch() {
    let Json(health) = healthz(State(test_app_state(Arc::new(MockSource::new(Vec::new()))))).await;
    assert_eq!(health.status, "ok");
    assert_eq!(health.catalog, None);
}

#[tokio::test]
async fn router_serves_catalog_routes() {
    let source = Arc::new(MockSource::new(vec![furniture_row("Sofa")]));
    let addr = serve(test_app_state(Arc::clone(&source))).await;

    let listed = request(addr, "GET", "/api/furniture").await;
    assert!(listed.starts_with("HTTP/1.1 200"), "{listed}");
    assert!(listed.contains("\"name\":\"Sofa\""));

    let health = request(addr, "GET", "/healthz").await;
    assert!(health.contains("\"catalog\":\"fresh\""), "{health}");

    let invalidated = request(addr, "POST", "/api/furniture/invalidate").await;
    assert!(invalidated.starts_with("HTTP/1.1 204"), "{invalidated}");

    let health = request(addr, "GET", "/healthz").await;
    assert!(health.contains("\"catalog\":\"stale\""), "{health}");
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn router_rejects_unknown_route() {
    let addr = serve(test_app_state(Arc::new(MockSource::new(Vec::new())))).await;
    let response = request(addr, "GET", "/api/nothing").await;
    assert!(response.starts_with("HTTP/1.1 404"), "{response}");
}
