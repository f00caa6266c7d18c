//! Catalog Web UI
//!
//! Browser front end for the books and groceries catalog, built with
//! Leptos (WASM).
//!
//! # Architecture
//!
//! Client-side rendered. On start the app builds one fetch link, one cache
//! and one GraphQL client, registers the client with the component context
//! and mounts a router with three pages:
//!
//! - `/` categories
//! - `/book` books
//! - `/grocery` groceries

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
