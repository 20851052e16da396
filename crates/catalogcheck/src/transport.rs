use std::future::Future;
use std::time::Duration;

use catalogcheck_core::fetch::TransportReply;

use crate::prelude::*;

/// Default bound on a single catalog request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("catalogcheck/", env!("CARGO_PKG_VERSION"));

/// Performs a single GET and reports what happened.
///
/// Implementations never fail: every outcome, including errors, is described
/// by a [`TransportReply`].
pub trait Transport {
    fn get(&self, endpoint: &str) -> impl Future<Output = TransportReply> + Send;
}

/// `reqwest`-backed transport with a fixed timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::ClientSetup(e.to_string()))?;

        Ok(Self::from_client(client))
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn get(&self, endpoint: &str) -> TransportReply {
        log::debug!("GET {endpoint}");

        let response = match self.client.get(endpoint).send().await {
            Ok(response) => response,
            Err(e) => return reply_for_error(&e),
        };

        let status = response.status().as_u16();
        log::debug!("Received status {status} from {endpoint}");

        match response.text().await {
            Ok(body) => TransportReply::Response { status, body },
            Err(e) => reply_for_error(&e),
        }
    }
}

/// Maps a `reqwest` error onto the transport taxonomy.
fn reply_for_error(error: &reqwest::Error) -> TransportReply {
    if let Some(status) = error.status() {
        log::warn!("Request failed with HTTP status {status}");
        return TransportReply::ErrorResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        };
    }

    if error.is_builder() {
        log::warn!("Request could not be built: {error}");
        return TransportReply::RequestFailed {
            message: error.to_string(),
        };
    }

    if error.is_timeout() {
        log::warn!("Request timed out: {error}");
    } else {
        log::warn!("No response received: {error}");
    }

    TransportReply::NoResponse {
        detail: error.to_string(),
    }
}
