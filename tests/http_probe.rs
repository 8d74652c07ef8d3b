//! HTTP probe behavior against real sockets.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use netwatch::{HttpProbe, Probe};

mod common;

#[tokio::test]
async fn succeeds_against_a_healthy_endpoint() {
    let addr: SocketAddr = "127.0.0.1:29311".parse().unwrap();
    common::start_status_endpoint(addr, "200 OK").await;

    let probe = HttpProbe::new(format!("http://{}/healthz", addr), Duration::from_secs(2));
    assert!(probe.check().await);
}

#[tokio::test]
async fn non_success_status_is_a_failure() {
    let addr: SocketAddr = "127.0.0.1:29312".parse().unwrap();
    common::start_status_endpoint(addr, "503 Service Unavailable").await;

    let probe = HttpProbe::new(format!("http://{}/healthz", addr), Duration::from_secs(2));
    assert!(!probe.check().await);
}

#[tokio::test]
async fn connection_refused_is_a_failure_not_an_error() {
    // Nothing listens here.
    let probe = HttpProbe::new("http://127.0.0.1:29313/healthz", Duration::from_secs(2));
    assert!(!probe.check().await);
}

#[tokio::test]
async fn unresponsive_endpoint_times_out_as_failure() {
    let addr: SocketAddr = "127.0.0.1:29314".parse().unwrap();
    common::start_silent_endpoint(addr).await;

    let probe = HttpProbe::new(format!("http://{}/healthz", addr), Duration::from_millis(300));
    let start = std::time::Instant::now();
    assert!(!probe.check().await);
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn probe_is_usable_through_the_trait_object() {
    let addr: SocketAddr = "127.0.0.1:29315".parse().unwrap();
    common::start_status_endpoint(addr, "204 No Content").await;

    let probe: Arc<dyn Probe> = Arc::new(HttpProbe::new(
        format!("http://{}/healthz", addr),
        Duration::from_secs(2),
    ));
    assert!(probe.check().await);
}
