//! UI Components
//!
//! Reusable Leptos components for the catalog pages.

pub mod loading;
pub mod nav;
pub mod status;
pub mod toast;

pub use loading::{ErrorPanel, Loading};
pub use nav::Nav;
pub use status::{format_price, StatusBadge};
pub use toast::Toast;
