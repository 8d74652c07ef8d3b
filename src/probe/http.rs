//! HTTP reachability probe.
//!
//! # Responsibilities
//! - Issue a single GET against a lightweight endpoint
//! - Enforce a hard timeout on the whole exchange
//! - Collapse every failure mode to `false`

use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::time;

use crate::probe::Probe;

/// Probe that checks reachability of an HTTP endpoint.
pub struct HttpProbe {
    url: String,
    timeout: Duration,
    client: Client<HttpConnector, Body>,
}

impl HttpProbe {
    /// Create a probe for `url` with the given hard timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self {
            url: url.into(),
            timeout,
            client,
        }
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn check(&self) -> bool {
        let request = match Request::builder()
            .method("GET")
            .uri(&self.url)
            .header("user-agent", "netwatch-probe")
            .body(Body::empty())
        {
            Ok(req) => req,
            Err(e) => {
                tracing::error!(url = %self.url, error = %e, "Failed to build probe request");
                return false;
            }
        };

        let response_future = self.client.request(request);

        match time::timeout(self.timeout, response_future).await {
            Ok(Ok(response)) => {
                let success = response.status().is_success();
                if !success {
                    tracing::debug!(
                        url = %self.url,
                        status = %response.status(),
                        "Probe failed: non-success status"
                    );
                }
                success
            }
            Ok(Err(e)) => {
                tracing::debug!(url = %self.url, error = %e, "Probe failed: connection error");
                false
            }
            Err(_) => {
                tracing::debug!(url = %self.url, "Probe failed: timeout");
                false
            }
        }
    }
}
