//! Application bootstrap
//!
//! Builds the shared pieces once: one link pointed at the configured
//! endpoint, one cache, one client over that link, and the route table.
//! Front ends hold the resulting [`AppContext`] (the web UI registers its
//! client with the component context instead).

use std::sync::Arc;

use crate::config::Config;
use crate::graphql::{ClientOptions, GraphQLClient, GraphQLLink, InMemoryCache};
use crate::routes::RouteTable;

/// Shared client and route table
pub struct AppContext<L> {
    pub client: Arc<GraphQLClient<L>>,
    pub routes: RouteTable,
}

impl<L> Clone for AppContext<L> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            routes: self.routes.clone(),
        }
    }
}

impl<L: GraphQLLink> AppContext<L> {
    /// Wire a caller-supplied link into a fresh client
    pub fn with_link(link: L, config: &Config) -> Self {
        let options = ClientOptions {
            connect_to_dev_tools: config.graphql.connect_to_dev_tools,
            ..ClientOptions::default()
        };
        let client = GraphQLClient::with_cache(link, InMemoryCache::new(), options);

        tracing::info!(
            endpoint = client.link().uri(),
            base = %config.router.base_url,
            "Catalog client ready"
        );

        Self {
            client: Arc::new(client),
            routes: RouteTable::new(&config.router.base_url),
        }
    }
}

#[cfg(feature = "native")]
impl AppContext<crate::graphql::HttpLink> {
    /// Wire an HTTP link to the configured endpoint
    pub fn bootstrap(config: &Config) -> crate::graphql::GraphQLResult<Self> {
        let link = crate::graphql::HttpLink::new(crate::graphql::HttpLinkConfig {
            uri: config.graphql.url.clone(),
            timeout_secs: config.graphql.timeout_secs,
        })?;

        Ok(Self::with_link(link, config))
    }
}

#[cfg(all(test, feature = "native"))]
mod tests {
    use super::*;
    use crate::routes::Page;

    #[test]
    fn test_bootstrap_uses_configured_endpoint() {
        let mut config = Config::default();
        config.graphql.url = "http://127.0.0.1:9999/graphql".to_string();
        config.graphql.timeout_secs = 3;

        let app = AppContext::bootstrap(&config).unwrap();

        assert_eq!(app.client.link().uri(), "http://127.0.0.1:9999/graphql");
        assert_eq!(app.client.link().config().timeout_secs, 3);
        assert!(app.client.cache().is_empty());
        assert!(app.client.options().connect_to_dev_tools);
    }

    #[test]
    fn test_default_endpoint() {
        let app = AppContext::bootstrap(&Config::default()).unwrap();
        assert_eq!(app.client.link().uri(), "http://127.0.0.1:8000/graphql");
    }

    #[test]
    fn test_clones_share_one_client() {
        let app = AppContext::bootstrap(&Config::default()).unwrap();
        let other = app.clone();

        assert!(Arc::ptr_eq(&app.client, &other.client));
        assert_eq!(Arc::strong_count(&app.client), 2);
    }

    #[test]
    fn test_routes_use_base_path() {
        let mut config = Config::default();
        config.router.base_url = "/store".to_string();

        let app = AppContext::bootstrap(&config).unwrap();
        assert_eq!(app.routes.resolve("/store/grocery"), Some(Page::Grocery));
        assert_eq!(app.routes.resolve("/grocery"), None);
    }
}
