//! Categories Page
//!
//! Served at `/`.

use leptos::*;

use catalog::{CategoriesData, Category, Page};

use super::{use_page_query, EmptyState, Fetch, PageHeader};
use crate::components::{ErrorPanel, Loading};

/// Category listing
#[component]
pub fn CategoryPage() -> impl IntoView {
    let result = use_page_query::<CategoriesData>(Page::Category);

    view! {
        <div class="space-y-8">
            <PageHeader title="Categories" subtitle="Product categories in the catalog" />

            {move || match result.get() {
                Fetch::Loading => view! { <Loading /> }.into_view(),
                Fetch::Failed(message) => view! { <ErrorPanel message=message /> }.into_view(),
                Fetch::Loaded(data) if data.categories.is_empty() => {
                    view! { <EmptyState message="No categories yet." /> }.into_view()
                }
                Fetch::Loaded(data) => view! { <CategoryTable categories=data.categories /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn CategoryTable(categories: Vec<Category>) -> impl IntoView {
    view! {
        <table class="w-full bg-gray-800 rounded-xl overflow-hidden">
            <thead class="bg-gray-700 text-left text-sm text-gray-300">
                <tr>
                    <th class="px-4 py-3">"ID"</th>
                    <th class="px-4 py-3">"Title"</th>
                </tr>
            </thead>
            <tbody>
                {categories.into_iter().map(|category| view! {
                    <tr class="border-t border-gray-700">
                        <td class="px-4 py-3 text-gray-400">{category.id}</td>
                        <td class="px-4 py-3 font-medium">{category.title}</td>
                    </tr>
                }).collect_view()}
            </tbody>
        </table>
    }
}
