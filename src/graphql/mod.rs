//! Catalog GraphQL Client
//!
//! Everything needed to send the catalog documents to a GraphQL endpoint:
//!
//! - **Document**: parser for the executable GraphQL subset
//! - **Request**: JSON request/response envelope
//! - **Link**: transport trait and the reqwest HTTP link
//! - **Cache**: in-memory result cache
//! - **Client**: link + cache composition with fetch policies
//!
//! # Example
//!
//! ```rust,no_run
//! use catalog::documents::BOOKS_QUERY;
//! use catalog::graphql::{GraphQLClient, HttpLink};
//! use catalog::models::BooksData;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let link = HttpLink::with_uri("http://127.0.0.1:8000/graphql")?;
//!     let client = GraphQLClient::new(link);
//!
//!     let data: BooksData = client.query(&BOOKS_QUERY, None).await?;
//!     println!("{} books", data.books.len());
//!     Ok(())
//! }
//! ```

mod cache;
mod client;
mod document;
mod error;
mod link;
mod request;

pub use cache::{CacheKey, InMemoryCache};
pub use client::{ClientOptions, FetchPolicy, GraphQLClient};
pub use document::{
    parse_document, Argument, Document, Field, Operation, OperationKind, TypeRef, Value,
    VariableDefinition,
};
pub use error::{GraphQLError, GraphQLResult};
pub use link::GraphQLLink;
#[cfg(feature = "native")]
pub use link::{HttpLink, HttpLinkConfig};
pub use request::{GraphQLRequest, GraphQLResponse, Location, ServerError};
