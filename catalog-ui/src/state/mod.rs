//! State Management
//!
//! The GraphQL client and route table shared through the component context.

pub mod global;

pub use global::{provide_global_state, GlobalState};
