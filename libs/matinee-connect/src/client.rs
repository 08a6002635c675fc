//! Single-attempt JSON HTTP client.
//!
//! One request, one response, and a typed error for everything that can
//! go wrong on the way. There is no retry loop and no backoff: callers
//! wrap these calls in a fallback guard, and a second attempt would
//! only delay the fallback.

use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::discovery::DiscoveryError;

/// Failures of a remote call, all absorbable by a fallback guard.
#[derive(Debug, Error)]
pub enum RemoteCallError {
    /// Connection-level failure (refused, reset, DNS, TLS).
    #[error("network error: {0}")]
    Network(String),

    /// The request exceeded the client's time budget.
    #[error("request timed out")]
    Timeout,

    /// The server answered with a non-success status.
    #[error("unexpected status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for logging.
        body: String,
    },

    /// The response body did not decode into the expected shape.
    #[error("malformed response body: {0}")]
    Decode(String),

    /// The service name could not be resolved to an address.
    #[error("service discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),
}

impl From<reqwest::Error> for RemoteCallError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// JSON-over-HTTP client shared by the demo services.
#[derive(Debug, Clone)]
pub struct JsonClient {
    client: reqwest::Client,
}

impl JsonClient {
    /// Create a client with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, RemoteCallError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteCallError::Network(e.to_string()))?;

        Ok(Self { client })
    }

    /// Access the underlying client to build a request with extra
    /// headers or query parameters, then pass it to [`Self::execute`].
    #[must_use]
    pub const fn http(&self) -> &reqwest::Client {
        &self.client
    }

    /// GET a URL and decode the JSON response body.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RemoteCallError> {
        self.execute(self.client.get(url)).await
    }

    /// Send a prepared request and decode the JSON response body.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, RemoteCallError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteCallError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Widget {
        id: String,
        count: i32,
    }

    #[tokio::test]
    async fn get_json_decodes_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/widgets/1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "id": "1",
                    "count": 3
                })),
            )
            .mount(&server)
            .await;

        let client = JsonClient::new(Duration::from_secs(1)).unwrap();
        let widget: Widget = client
            .get_json(&format!("{}/widgets/1", server.uri()))
            .await
            .unwrap();

        assert_eq!(
            widget,
            Widget {
                id: "1".to_string(),
                count: 3
            }
        );
    }

    #[tokio::test]
    async fn non_success_status_maps_to_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/widgets/1"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down for maintenance"))
            .mount(&server)
            .await;

        let client = JsonClient::new(Duration::from_secs(1)).unwrap();
        let err = client
            .get_json::<Widget>(&format!("{}/widgets/1", server.uri()))
            .await
            .unwrap_err();

        assert!(
            matches!(err, RemoteCallError::Status { status: 503, ref body } if body == "down for maintenance")
        );
    }

    #[tokio::test]
    async fn malformed_body_maps_to_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/widgets/1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = JsonClient::new(Duration::from_secs(1)).unwrap();
        let err = client
            .get_json::<Widget>(&format!("{}/widgets/1", server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, RemoteCallError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_host_maps_to_network_error() {
        // Bind an ephemeral port, then free it so the connection is refused.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = JsonClient::new(Duration::from_secs(1)).unwrap();
        let err = client
            .get_json::<Widget>(&format!("http://127.0.0.1:{port}/widgets/1"))
            .await
            .unwrap_err();

        assert!(matches!(err, RemoteCallError::Network(_)));
    }

    #[tokio::test]
    async fn slow_response_maps_to_timeout_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/widgets/1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"id": "1", "count": 3}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = JsonClient::new(Duration::from_millis(50)).unwrap();
        let err = client
            .get_json::<Widget>(&format!("{}/widgets/1", server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, RemoteCallError::Timeout));
    }
}
