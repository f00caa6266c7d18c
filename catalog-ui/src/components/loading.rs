//! Loading Component
//!
//! Loading spinner and error states of the page tables.

use leptos::*;

/// Full-page loading spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-12">
            <div class="loading-spinner w-8 h-8" />
        </div>
    }
}

/// Error message in place of a table
#[component]
pub fn ErrorPanel(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-red-900/40 border border-red-700 rounded-lg p-4 text-red-200">
            <p class="font-medium">"Could not load data"</p>
            <p class="text-sm mt-1">{message}</p>
        </div>
    }
}
