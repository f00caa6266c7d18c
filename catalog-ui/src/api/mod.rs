//! GraphQL transport for the browser

mod link;

pub use link::{get_endpoint, FetchLink};
