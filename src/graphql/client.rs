//! GraphQL Client
//!
//! Composes one link and one in-memory cache. Queries are answered from the
//! cache according to their [`FetchPolicy`]; mutations always go over the
//! link and are never cached.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::cache::{CacheKey, InMemoryCache};
use super::document::OperationKind;
use super::error::{GraphQLError, GraphQLResult};
use super::link::GraphQLLink;
use super::request::GraphQLRequest;
use crate::documents::QueryDocument;

/// How a query consults the cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Cached data if present, otherwise fetch and cache
    #[default]
    CacheFirst,
    /// Always fetch, then cache
    NetworkOnly,
    /// Never fetch; a miss is an error
    CacheOnly,
    /// Always fetch, never cache
    NoCache,
}

/// Client options
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Policy used by [`GraphQLClient::query`]
    pub default_fetch_policy: FetchPolicy,
    /// Advertise the client to browser developer tools
    pub connect_to_dev_tools: bool,
}

/// GraphQL client over a single link and cache
pub struct GraphQLClient<L> {
    link: L,
    cache: InMemoryCache,
    options: ClientOptions,
}

impl<L: GraphQLLink> GraphQLClient<L> {
    pub fn new(link: L) -> Self {
        Self::with_options(link, ClientOptions::default())
    }

    pub fn with_options(link: L, options: ClientOptions) -> Self {
        Self::with_cache(link, InMemoryCache::new(), options)
    }

    pub fn with_cache(link: L, cache: InMemoryCache, options: ClientOptions) -> Self {
        tracing::debug!(
            uri = link.uri(),
            dev_tools = options.connect_to_dev_tools,
            "GraphQL client created"
        );
        Self {
            link,
            cache,
            options,
        }
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn cache(&self) -> &InMemoryCache {
        &self.cache
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Run a query with the default fetch policy and decode its data
    pub async fn query<T: DeserializeOwned>(
        &self,
        document: &QueryDocument,
        variables: Option<Value>,
    ) -> GraphQLResult<T> {
        self.query_with_policy(document, variables, self.options.default_fetch_policy)
            .await
    }

    pub async fn query_with_policy<T: DeserializeOwned>(
        &self,
        document: &QueryDocument,
        variables: Option<Value>,
        policy: FetchPolicy,
    ) -> GraphQLResult<T> {
        if document.kind != OperationKind::Query {
            return Err(GraphQLError::InvalidOperation(format!(
                "{} is a {}, not a query",
                document.operation_name, document.kind
            )));
        }

        let key = CacheKey::new(document.source, variables.as_ref());

        if matches!(policy, FetchPolicy::CacheFirst | FetchPolicy::CacheOnly) {
            if let Some(data) = self.cache.read(&key) {
                tracing::debug!(operation = document.operation_name, "Cache hit");
                return decode(data);
            }
            if policy == FetchPolicy::CacheOnly {
                return Err(GraphQLError::CacheMiss(document.operation_name.to_string()));
            }
        }

        let data = self.fetch(document, variables).await?;

        if policy != FetchPolicy::NoCache {
            self.cache.write(key, data.clone());
        }

        decode(data)
    }

    /// Run a mutation over the link and decode its data
    pub async fn mutate<T: DeserializeOwned>(
        &self,
        document: &QueryDocument,
        variables: Option<Value>,
    ) -> GraphQLResult<T> {
        if document.kind != OperationKind::Mutation {
            return Err(GraphQLError::InvalidOperation(format!(
                "{} is a {}, not a mutation",
                document.operation_name, document.kind
            )));
        }

        let data = self.fetch(document, variables).await?;
        decode(data)
    }

    /// Drop every cached result
    pub fn reset_store(&self) {
        tracing::debug!(entries = self.cache.len(), "Resetting cache");
        self.cache.clear();
    }

    async fn fetch(&self, document: &QueryDocument, variables: Option<Value>) -> GraphQLResult<Value> {
        let mut request = GraphQLRequest::new(document.source).operation_name(document.operation_name);
        if let Some(variables) = variables {
            request = request.variables(variables);
        }

        self.link.execute(request).await?.into_data()
    }
}

fn decode<T: DeserializeOwned>(data: Value) -> GraphQLResult<T> {
    serde_json::from_value(data).map_err(|e| GraphQLError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::{BOOKS_QUERY, CATEGORIES_QUERY, CREATE_CATEGORY};
    use crate::graphql::request::{GraphQLResponse, ServerError};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Link that answers from a fixed response and records requests
    struct FakeLink {
        response: GraphQLResponse,
        calls: AtomicUsize,
        requests: Mutex<Vec<GraphQLRequest>>,
    }

    impl FakeLink {
        fn new(response: GraphQLResponse) -> Self {
            Self {
                response,
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[cfg_attr(feature = "native", async_trait)]
    #[cfg_attr(not(feature = "native"), async_trait(?Send))]
    impl GraphQLLink for FakeLink {
        fn uri(&self) -> &str {
            "http://fake/graphql"
        }

        async fn execute(&self, request: GraphQLRequest) -> GraphQLResult<GraphQLResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request);
            Ok(self.response.clone())
        }
    }

    fn categories_response() -> GraphQLResponse {
        GraphQLResponse::from_data(json!({
            "categories": [{ "id": "1", "title": "Fruits" }]
        }))
    }

    #[tokio::test]
    async fn test_cache_first_fetches_once() {
        let client = GraphQLClient::new(FakeLink::new(categories_response()));

        let first: Value = client.query(&CATEGORIES_QUERY, None).await.unwrap();
        let second: Value = client.query(&CATEGORIES_QUERY, None).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(client.link().calls(), 1);
        assert_eq!(client.cache().len(), 1);
    }

    #[tokio::test]
    async fn test_request_carries_operation_name() {
        let client = GraphQLClient::new(FakeLink::new(categories_response()));
        let _: Value = client.query(&CATEGORIES_QUERY, None).await.unwrap();

        let requests = client.link().requests.lock().unwrap();
        assert_eq!(requests[0].operation_name.as_deref(), Some("Categories"));
        assert_eq!(requests[0].query, CATEGORIES_QUERY.source);
        assert!(requests[0].variables.is_none());
    }

    #[tokio::test]
    async fn test_network_only_always_fetches() {
        let client = GraphQLClient::new(FakeLink::new(categories_response()));

        for _ in 0..3 {
            let _: Value = client
                .query_with_policy(&CATEGORIES_QUERY, None, FetchPolicy::NetworkOnly)
                .await
                .unwrap();
        }

        assert_eq!(client.link().calls(), 3);
        assert_eq!(client.cache().len(), 1);
    }

    #[tokio::test]
    async fn test_no_cache_leaves_store_empty() {
        let client = GraphQLClient::new(FakeLink::new(categories_response()));
        let _: Value = client
            .query_with_policy(&CATEGORIES_QUERY, None, FetchPolicy::NoCache)
            .await
            .unwrap();

        assert!(client.cache().is_empty());
    }

    #[tokio::test]
    async fn test_cache_only_miss() {
        let client = GraphQLClient::new(FakeLink::new(categories_response()));
        let result: GraphQLResult<Value> = client
            .query_with_policy(&CATEGORIES_QUERY, None, FetchPolicy::CacheOnly)
            .await;

        assert!(matches!(result, Err(GraphQLError::CacheMiss(_))));
        assert_eq!(client.link().calls(), 0);
    }

    #[tokio::test]
    async fn test_default_policy_from_options() {
        let options = ClientOptions {
            default_fetch_policy: FetchPolicy::NetworkOnly,
            ..ClientOptions::default()
        };
        let client = GraphQLClient::with_options(FakeLink::new(categories_response()), options);

        let _: Value = client.query(&CATEGORIES_QUERY, None).await.unwrap();
        let _: Value = client.query(&CATEGORIES_QUERY, None).await.unwrap();
        assert_eq!(client.link().calls(), 2);
    }

    #[tokio::test]
    async fn test_reset_store_forces_refetch() {
        let client = GraphQLClient::new(FakeLink::new(categories_response()));

        let _: Value = client.query(&CATEGORIES_QUERY, None).await.unwrap();
        client.reset_store();
        let _: Value = client.query(&CATEGORIES_QUERY, None).await.unwrap();

        assert_eq!(client.link().calls(), 2);
    }

    #[tokio::test]
    async fn test_mutations_are_never_cached() {
        let response = GraphQLResponse::from_data(json!({
            "createCategory": { "category": { "id": "7", "title": "Snacks" } }
        }));
        let client = GraphQLClient::new(FakeLink::new(response));
        let variables = json!({ "title": "Snacks" });

        let _: Value = client.mutate(&CREATE_CATEGORY, Some(variables.clone())).await.unwrap();
        let _: Value = client.mutate(&CREATE_CATEGORY, Some(variables)).await.unwrap();

        assert_eq!(client.link().calls(), 2);
        assert!(client.cache().is_empty());

        let requests = client.link().requests.lock().unwrap();
        assert_eq!(requests[1].variables, Some(json!({ "title": "Snacks" })));
    }

    #[tokio::test]
    async fn test_operation_kind_is_checked() {
        let client = GraphQLClient::new(FakeLink::new(categories_response()));

        let as_mutation: GraphQLResult<Value> = client.mutate(&BOOKS_QUERY, None).await;
        let as_query: GraphQLResult<Value> = client.query(&CREATE_CATEGORY, None).await;

        assert!(matches!(as_mutation, Err(GraphQLError::InvalidOperation(_))));
        assert!(matches!(as_query, Err(GraphQLError::InvalidOperation(_))));
        assert_eq!(client.link().calls(), 0);
    }

    #[tokio::test]
    async fn test_server_errors_are_not_cached() {
        let response = GraphQLResponse::from_errors(vec![ServerError::new("boom")]);
        let client = GraphQLClient::new(FakeLink::new(response));

        let result: GraphQLResult<Value> = client.query(&BOOKS_QUERY, None).await;

        assert!(matches!(result, Err(GraphQLError::Server(_))));
        assert!(client.cache().is_empty());
    }

    #[tokio::test]
    async fn test_decode_failure() {
        let client = GraphQLClient::new(FakeLink::new(categories_response()));
        let result: GraphQLResult<Vec<String>> = client.query(&CATEGORIES_QUERY, None).await;

        assert!(matches!(result, Err(GraphQLError::Decode(_))));
    }
}
