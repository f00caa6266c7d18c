//! GraphQL Links
//!
//! A link delivers a request to a GraphQL endpoint and returns the raw
//! response. [`HttpLink`] posts JSON over HTTP with reqwest; the web UI
//! supplies its own link on top of the browser fetch API.

use async_trait::async_trait;

use super::error::GraphQLResult;
use super::request::{GraphQLRequest, GraphQLResponse};

/// Transport used by [`GraphQLClient`](super::GraphQLClient)
///
/// With the `native` feature the returned futures are `Send` so they can run
/// on tokio. Without it they are not, matching browser fetch futures on
/// every target.
#[cfg_attr(feature = "native", async_trait)]
#[cfg_attr(not(feature = "native"), async_trait(?Send))]
pub trait GraphQLLink {
    /// Endpoint this link sends requests to
    fn uri(&self) -> &str;

    /// Execute one request
    async fn execute(&self, request: GraphQLRequest) -> GraphQLResult<GraphQLResponse>;
}

#[cfg(feature = "native")]
pub use http::{HttpLink, HttpLinkConfig};

#[cfg(feature = "native")]
mod http {
    use std::time::Duration;

    use async_trait::async_trait;
    use reqwest::Client;
    use tracing::Instrument;

    use super::GraphQLLink;
    use crate::graphql::error::{GraphQLError, GraphQLResult};
    use crate::graphql::request::{GraphQLRequest, GraphQLResponse};

    /// Configuration for [`HttpLink`]
    #[derive(Debug, Clone)]
    pub struct HttpLinkConfig {
        /// GraphQL endpoint URL
        pub uri: String,
        /// Request timeout in seconds
        pub timeout_secs: u64,
    }

    impl Default for HttpLinkConfig {
        fn default() -> Self {
            Self {
                uri: crate::config::DEFAULT_GRAPHQL_URL.to_string(),
                timeout_secs: 30,
            }
        }
    }

    /// Link that posts requests as JSON to a single HTTP endpoint
    #[derive(Debug, Clone)]
    pub struct HttpLink {
        client: Client,
        config: HttpLinkConfig,
    }

    impl HttpLink {
        pub fn new(config: HttpLinkConfig) -> GraphQLResult<Self> {
            let client = Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .map_err(|e| GraphQLError::Transport(format!("Failed to create HTTP client: {}", e)))?;

            Ok(Self { client, config })
        }

        /// Link to `uri` with the default timeout
        pub fn with_uri(uri: impl Into<String>) -> GraphQLResult<Self> {
            Self::new(HttpLinkConfig {
                uri: uri.into(),
                ..HttpLinkConfig::default()
            })
        }

        pub fn config(&self) -> &HttpLinkConfig {
            &self.config
        }

        async fn post(&self, request: &GraphQLRequest) -> GraphQLResult<GraphQLResponse> {
            let response = self
                .client
                .post(&self.config.uri)
                .json(request)
                .send()
                .await
                .map_err(|e| {
                    if e.is_timeout() {
                        GraphQLError::Timeout
                    } else {
                        GraphQLError::Transport(e.to_string())
                    }
                })?;

            let status = response.status();
            let body = response.text().await.map_err(|e| {
                if e.is_timeout() {
                    GraphQLError::Timeout
                } else {
                    GraphQLError::Transport(e.to_string())
                }
            })?;

            if status.is_success() {
                return Ok(serde_json::from_str(&body)?);
            }

            // Servers commonly answer 400 with a regular GraphQL error body
            match serde_json::from_str::<GraphQLResponse>(&body) {
                Ok(parsed) if !parsed.errors.is_empty() => Ok(parsed),
                _ => Err(GraphQLError::Http {
                    status: status.as_u16(),
                    body,
                }),
            }
        }
    }

    #[async_trait]
    impl GraphQLLink for HttpLink {
        fn uri(&self) -> &str {
            &self.config.uri
        }

        async fn execute(&self, request: GraphQLRequest) -> GraphQLResult<GraphQLResponse> {
            let request_id = uuid::Uuid::new_v4();
            let span = tracing::debug_span!(
                "graphql_request",
                request_id = %request_id,
                operation = request.operation_name.as_deref().unwrap_or("anonymous"),
            );

            async {
                tracing::debug!(uri = %self.config.uri, "Sending GraphQL request");
                let result = self.post(&request).await;
                match &result {
                    Ok(response) => tracing::debug!(errors = response.errors.len(), "GraphQL response received"),
                    Err(e) => tracing::warn!(error = %e, "GraphQL request failed"),
                }
                result
            }
            .instrument(span)
            .await
        }
    }

}
