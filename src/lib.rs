//! # Catalog
//!
//! Client for a books and groceries catalog served over GraphQL.
//!
//! ## Features
//!
//! - **Documents**: the fixed catalog queries and mutations
//! - **GraphQL client**: HTTP link, in-memory cache, fetch policies
//! - **Routing**: the `/`, `/book`, `/grocery` route table
//! - **Bootstrap**: one link, one cache, one client per application
//!
//! ## Modules
//!
//! - [`documents`]: Hard-coded GraphQL documents
//! - [`graphql`]: Parser, link, cache and client
//! - [`models`]: Book, category and grocery view models
//! - [`routes`]: Path → page mapping
//! - [`bootstrap`]: Application wiring
//!
//! The default `native` feature adds the reqwest link, config file loading,
//! logging setup and the `catalog-cli` binary. Without it the crate builds
//! for `wasm32-unknown-unknown` and is shared with the web UI.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use catalog::{AppContext, BooksData, Config, BOOKS_QUERY};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let app = AppContext::bootstrap(&Config::from_env())?;
//!
//!     let data: BooksData = app.client.query(&BOOKS_QUERY, None).await?;
//!     for book in data.books {
//!         println!("{} by {}", book.title, book.author);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod bootstrap;
pub mod config;
pub mod documents;
pub mod graphql;
#[cfg(feature = "native")]
pub mod logging;
pub mod models;
pub mod routes;

// Re-export top-level types for convenience
pub use bootstrap::AppContext;

pub use config::{Config, GraphQLConfig, LoggingConfig, RouterConfig, DEFAULT_GRAPHQL_URL};
#[cfg(feature = "native")]
pub use config::{ConfigError, ConfigSource};

pub use documents::{QueryDocument, BOOKS_QUERY, CATEGORIES_QUERY, GROCERIES_QUERY};

pub use graphql::{
    ClientOptions, FetchPolicy, GraphQLClient, GraphQLError, GraphQLLink, GraphQLRequest,
    GraphQLResponse, GraphQLResult, InMemoryCache,
};
#[cfg(feature = "native")]
pub use graphql::{HttpLink, HttpLinkConfig};

pub use models::{
    Book, BookInput, BooksData, CategoriesData, Category, GroceriesData, Grocery, Status,
};

pub use routes::{Page, Route, RouteTable, ROUTES};
