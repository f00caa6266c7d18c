//! App Root Component
//!
//! Bootstraps the GraphQL client and mounts the router.

use leptos::*;
use leptos_router::*;

use catalog::Page;

use crate::components::{Nav, Toast};
use crate::pages::{BookPage, CategoryPage, GroceryPage};
use crate::state::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let state = provide_global_state();
    let base = state.routes.base().to_string();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                // Navigation header
                <Nav />

                // Main content area
                <main class="flex-1 container mx-auto px-4 py-8">
                    <Routes base=base>
                        <Route path=Page::Category.path() view=CategoryPage />
                        <Route path=Page::Book.path() view=BookPage />
                        <Route path=Page::Grocery.path() view=GroceryPage />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                // Toast notifications
                <Toast />
            </div>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href=state.routes.href(Page::Category)
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Go to Categories"
            </A>
        </div>
    }
}
