//! Pages
//!
//! One component per route. Each page issues its query when it mounts and
//! renders the result as a table.

pub mod book;
pub mod category;
pub mod grocery;

pub use book::BookPage;
pub use category::CategoryPage;
pub use grocery::GroceryPage;

use std::sync::Arc;

use leptos::*;
use serde::de::DeserializeOwned;

use catalog::Page;

use crate::state::GlobalState;

/// State of a page query
#[derive(Debug, Clone, PartialEq)]
pub enum Fetch<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

/// Run the page's query once on mount
pub fn use_page_query<T>(page: Page) -> RwSignal<Fetch<T>>
where
    T: DeserializeOwned + Clone + 'static,
{
    let state = expect_context::<GlobalState>();
    let result = create_rw_signal(Fetch::Loading);

    create_effect(move |_| {
        let state = state.clone();
        let client = Arc::clone(&state.client);
        wasm_bindgen_futures::spawn_local(async move {
            match client.query::<T>(page.document(), None).await {
                Ok(data) => result.set(Fetch::Loaded(data)),
                Err(e) => {
                    let message = e.to_string();
                    state.show_error(&message);
                    result.set(Fetch::Failed(message));
                }
            }
        });
    });

    result
}

/// Page title and subtitle
#[component]
fn PageHeader(title: &'static str, subtitle: &'static str) -> impl IntoView {
    view! {
        <div>
            <h1 class="text-3xl font-bold">{title}</h1>
            <p class="text-gray-400 mt-1">{subtitle}</p>
        </div>
    }
}

/// Placeholder row set for an empty result
#[component]
fn EmptyState(message: &'static str) -> impl IntoView {
    view! {
        <div class="text-center py-12">
            <p class="text-gray-400">{message}</p>
        </div>
    }
}
