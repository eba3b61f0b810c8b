//! `gloo-net` transport for host requests.

use gloo_net::http::Request;
use serde_json::Value;
use tiao_protocol::HostRequest;
use tracing::{debug, warn};

use crate::core::transport::{CONTENT_TYPE, HostTransport, request_url};

/// Posts requests to `https://{resource}/{event}` and swallows failures.
#[derive(Clone, Debug)]
pub(crate) struct FetchTransport {
    base_url: String,
}

impl FetchTransport {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl HostTransport for FetchTransport {
    fn post(&self, request: &HostRequest) {
        let event = request.event();
        let body = match request.body() {
            Ok(body) => body,
            Err(err) => {
                warn!(event, error = %err, "dropping host request");
                return;
            }
        };
        let url = request_url(&self.base_url, request);
        debug!(event, "posting host request");
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = send(&url, &body).await {
                debug!(event, error = %err, "host request failed");
            }
        });
    }
}

async fn send(url: &str, body: &Value) -> anyhow::Result<()> {
    Request::post(url)
        .header("Content-Type", CONTENT_TYPE)
        .body(serde_json::to_string(body)?)
        .send()
        .await?;
    Ok(())
}
