//! crt.sh query client implementation.

use crtsh_core::{CertificateRecord, CrtshError, Result};
use reqwest::Client as HttpClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// The crt.sh base URL
pub const DEFAULT_BASE_URL: &str = "https://crt.sh";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the crt.sh JSON search endpoint
#[derive(Clone)]
pub struct CrtshClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    base_url: Url,
    timeout: Duration,
}

impl CrtshClient {
    /// Create a client with default settings
    pub fn new() -> Result<Self> {
        CrtshClientBuilder::new().build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> CrtshClientBuilder {
        CrtshClientBuilder::new()
    }

    /// Base URL this client queries
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    /// Fetch every certificate record crt.sh holds for `domain`.
    ///
    /// A body that is not a JSON array, including an empty one, is an error.
    pub async fn query(&self, domain: &str) -> Result<Vec<CertificateRecord>> {
        let url = self.build_url(domain);
        debug!(url = %url, "GET request");

        let response = self
            .inner
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "crt.sh returned an error status");
            let message = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("unknown").to_string()
            } else {
                body
            };
            return Err(CrtshError::Api {
                code: status.as_u16(),
                message,
            });
        }

        let records: Vec<CertificateRecord> = serde_json::from_str(&body)?;
        debug!(domain, records = records.len(), "decoded certificate records");
        Ok(records)
    }

    /// Build the search URL with `q` and `output` parameters
    fn build_url(&self, domain: &str) -> Url {
        let mut url = self.inner.base_url.clone();
        url.query_pairs_mut()
            .append_pair("q", domain)
            .append_pair("output", "json");
        url
    }

    fn transport_error(&self, err: &reqwest::Error) -> CrtshError {
        if err.is_timeout() {
            CrtshError::Timeout(self.inner.timeout.as_secs())
        } else {
            CrtshError::Http(err.to_string())
        }
    }
}

/// Builder for configuring a [`CrtshClient`]
pub struct CrtshClientBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl Default for CrtshClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CrtshClientBuilder {
    /// Create a builder with the default endpoint and timeout
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("crtsh-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<CrtshClient> {
        let base_url = Url::parse(&self.base_url)
            .map_err(|e| CrtshError::InvalidUrl(format!("{}: {e}", self.base_url)))?;

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| CrtshError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(CrtshClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                timeout: self.timeout,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> CrtshClient {
        CrtshClient::builder().base_url(server.uri()).build().unwrap()
    }

    #[tokio::test]
    async fn query_sends_domain_and_json_output() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "example.com"))
            .and(query_param("output", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "issuer_ca_id": 16418,
                    "issuer_name": "C=US, O=Let's Encrypt, CN=R3",
                    "common_name": "example.com",
                    "name_value": "*.example.com\nwww.example.com",
                    "id": 1
                },
                {
                    "issuer_ca_id": 16418,
                    "issuer_name": "C=US, O=Let's Encrypt, CN=R3",
                    "common_name": "mail.example.com",
                    "name_value": "mail.example.com",
                    "id": 2
                }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let records = client_for(&server).query("example.com").await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name_value, "*.example.com\nwww.example.com");
        assert_eq!(records[1].id, 2);
    }

    #[tokio::test]
    async fn query_value_is_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "%.example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let records = client_for(&server).query("%.example.com").await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn empty_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .query("nothing.invalid")
            .await
            .unwrap_err();
        assert!(matches!(err, CrtshError::Json(_)));
        assert!(!err.is_transport());
    }

    #[tokio::test]
    async fn error_status_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let err = client_for(&server).query("example.com").await.unwrap_err();
        assert_eq!(err.status_code(), Some(503));
        assert!(err.to_string().contains("overloaded"));
    }

    #[tokio::test]
    async fn malformed_body_is_json_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).query("example.com").await.unwrap_err();
        assert!(matches!(err, CrtshError::Json(_)));
    }

    #[tokio::test]
    async fn slow_endpoint_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("[]")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = CrtshClient::builder()
            .base_url(server.uri())
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap();

        let err = client.query("example.com").await.unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = CrtshClient::builder().base_url("not a url").build().err().unwrap();
        assert!(matches!(err, CrtshError::InvalidUrl(_)));
    }

    #[test]
    fn default_endpoint() {
        let client = CrtshClient::new().unwrap();
        assert_eq!(client.base_url(), "https://crt.sh/");
    }
}
