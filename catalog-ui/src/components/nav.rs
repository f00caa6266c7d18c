//! Navigation Component
//!
//! Header navigation bar with one link per catalog page.

use leptos::*;
use leptos_router::*;

use catalog::Page;

use crate::state::GlobalState;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let home = state.routes.href(Page::Category);
    let refresh_state = state.clone();

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Logo and brand
                    <A href=home class="flex items-center space-x-3">
                        <span class="text-2xl">"📚"</span>
                        <span class="text-xl font-bold text-white">"Catalog"</span>
                    </A>

                    // Navigation links
                    <div class="flex items-center space-x-1">
                        {Page::ALL
                            .into_iter()
                            .map(|page| view! { <NavLink href=state.routes.href(page) label=page.title() /> })
                            .collect_view()}

                        <button
                            on:click=move |_| refresh_state.refresh()
                            class="ml-4 px-3 py-2 rounded-lg text-gray-400 hover:text-white hover:bg-gray-700 transition-colors"
                            title="Clear cached results"
                        >
                            "↻"
                        </button>
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(href: String, label: &'static str) -> impl IntoView {
    view! {
        <A
            href=href
            exact=true
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            {label}
        </A>
    }
}
