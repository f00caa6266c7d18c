//! Groceries Page
//!
//! Served at `/grocery`.

use leptos::*;

use catalog::{GroceriesData, Grocery, Page};

use super::{use_page_query, EmptyState, Fetch, PageHeader};
use crate::components::{format_price, ErrorPanel, Loading, StatusBadge};

/// Grocery listing
#[component]
pub fn GroceryPage() -> impl IntoView {
    let result = use_page_query::<GroceriesData>(Page::Grocery);

    view! {
        <div class="space-y-8">
            <PageHeader title="Groceries" subtitle="Grocery products grouped by category" />

            {move || match result.get() {
                Fetch::Loading => view! { <Loading /> }.into_view(),
                Fetch::Failed(message) => view! { <ErrorPanel message=message /> }.into_view(),
                Fetch::Loaded(data) if data.groceries.is_empty() => {
                    view! { <EmptyState message="No groceries yet." /> }.into_view()
                }
                Fetch::Loaded(data) => view! { <GroceryTable groceries=data.groceries /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn GroceryTable(groceries: Vec<Grocery>) -> impl IntoView {
    view! {
        <table class="w-full bg-gray-800 rounded-xl overflow-hidden">
            <thead class="bg-gray-700 text-left text-sm text-gray-300">
                <tr>
                    <th class="px-4 py-3"></th>
                    <th class="px-4 py-3">"Tag"</th>
                    <th class="px-4 py-3">"Name"</th>
                    <th class="px-4 py-3">"Category"</th>
                    <th class="px-4 py-3 text-right">"Price"</th>
                    <th class="px-4 py-3 text-right">"Qty"</th>
                    <th class="px-4 py-3">"Status"</th>
                    <th class="px-4 py-3">"Added"</th>
                </tr>
            </thead>
            <tbody>
                {groceries.into_iter().map(|grocery| view! {
                    <tr class="border-t border-gray-700">
                        <td class="px-4 py-3">
                            <img src=grocery.imageurl alt=grocery.name.clone() class="w-10 h-10 rounded object-cover" />
                        </td>
                        <td class="px-4 py-3 text-gray-400 font-mono text-sm">{grocery.product_tag}</td>
                        <td class="px-4 py-3 font-medium">{grocery.name}</td>
                        <td class="px-4 py-3">{grocery.category.title}</td>
                        <td class="px-4 py-3 text-right">{format_price(grocery.price)}</td>
                        <td class="px-4 py-3 text-right">{grocery.quantity}</td>
                        <td class="px-4 py-3"><StatusBadge status=grocery.status /></td>
                        <td class="px-4 py-3 text-gray-400">{grocery.date_created.format("%b %e, %Y").to_string()}</td>
                    </tr>
                }).collect_view()}
            </tbody>
        </table>
    }
}
