//! Fetch Link
//!
//! Sends catalog operations to the GraphQL endpoint with the browser fetch
//! API.

use async_trait::async_trait;
use gloo_net::http::Request;

use catalog::{GraphQLError, GraphQLLink, GraphQLRequest, GraphQLResponse, GraphQLResult, DEFAULT_GRAPHQL_URL};

/// Local storage key holding an endpoint override
pub const ENDPOINT_STORAGE_KEY: &str = "catalog_graphql_url";

/// Get the GraphQL endpoint from local storage or use the default
pub fn get_endpoint() -> String {
    web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(ENDPOINT_STORAGE_KEY).ok().flatten())
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_GRAPHQL_URL.to_string())
}

/// Link that posts JSON to one endpoint through `fetch`
#[derive(Debug, Clone)]
pub struct FetchLink {
    uri: String,
}

impl FetchLink {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

#[async_trait(?Send)]
impl GraphQLLink for FetchLink {
    fn uri(&self) -> &str {
        &self.uri
    }

    async fn execute(&self, request: GraphQLRequest) -> GraphQLResult<GraphQLResponse> {
        let response = Request::post(&self.uri)
            .json(&request)
            .map_err(|e| GraphQLError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| GraphQLError::Transport(format!("Network error: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GraphQLError::Transport(e.to_string()))?;

        if response.ok() {
            return Ok(serde_json::from_str(&body)?);
        }

        // Servers may report validation failures with a 4xx and a GraphQL body
        match serde_json::from_str::<GraphQLResponse>(&body) {
            Ok(parsed) if !parsed.errors.is_empty() => Ok(parsed),
            _ => Err(GraphQLError::Http { status, body }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_arch = "wasm32")]
    wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

    #[test]
    fn test_fetch_link_uri() {
        let link = FetchLink::new("http://127.0.0.1:8000/graphql");
        assert_eq!(link.uri(), "http://127.0.0.1:8000/graphql");
    }

    #[cfg(target_arch = "wasm32")]
    #[wasm_bindgen_test::wasm_bindgen_test]
    fn test_endpoint_override_from_local_storage() {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .unwrap();

        storage.remove_item(ENDPOINT_STORAGE_KEY).unwrap();
        assert_eq!(get_endpoint(), DEFAULT_GRAPHQL_URL);

        storage
            .set_item(ENDPOINT_STORAGE_KEY, " http://10.0.0.2:8000/graphql ")
            .unwrap();
        assert_eq!(get_endpoint(), "http://10.0.0.2:8000/graphql");

        storage.set_item(ENDPOINT_STORAGE_KEY, "").unwrap();
        assert_eq!(get_endpoint(), DEFAULT_GRAPHQL_URL);

        storage.remove_item(ENDPOINT_STORAGE_KEY).unwrap();
    }
}
