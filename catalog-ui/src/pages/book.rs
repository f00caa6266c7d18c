//! Books Page
//!
//! Served at `/book`.

use leptos::*;

use catalog::{Book, BooksData, Page};

use super::{use_page_query, EmptyState, Fetch, PageHeader};
use crate::components::{format_price, ErrorPanel, Loading, StatusBadge};

/// Book listing
#[component]
pub fn BookPage() -> impl IntoView {
    let result = use_page_query::<BooksData>(Page::Book);

    view! {
        <div class="space-y-8">
            <PageHeader title="Books" subtitle="Every book with its stock and price" />

            {move || match result.get() {
                Fetch::Loading => view! { <Loading /> }.into_view(),
                Fetch::Failed(message) => view! { <ErrorPanel message=message /> }.into_view(),
                Fetch::Loaded(data) if data.books.is_empty() => {
                    view! { <EmptyState message="No books yet." /> }.into_view()
                }
                Fetch::Loaded(data) => view! { <BookTable books=data.books /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn BookTable(books: Vec<Book>) -> impl IntoView {
    view! {
        <table class="w-full bg-gray-800 rounded-xl overflow-hidden">
            <thead class="bg-gray-700 text-left text-sm text-gray-300">
                <tr>
                    <th class="px-4 py-3">"Title"</th>
                    <th class="px-4 py-3">"Author"</th>
                    <th class="px-4 py-3">"ISBN"</th>
                    <th class="px-4 py-3 text-right">"Pages"</th>
                    <th class="px-4 py-3 text-right">"Price"</th>
                    <th class="px-4 py-3 text-right">"Qty"</th>
                    <th class="px-4 py-3">"Status"</th>
                    <th class="px-4 py-3">"Added"</th>
                </tr>
            </thead>
            <tbody>
                {books.into_iter().map(|book| view! {
                    <tr class="border-t border-gray-700" title=book.description>
                        <td class="px-4 py-3 font-medium">{book.title}</td>
                        <td class="px-4 py-3">{book.author}</td>
                        <td class="px-4 py-3 text-gray-400 font-mono text-sm">{book.isbn}</td>
                        <td class="px-4 py-3 text-right">{book.pages}</td>
                        <td class="px-4 py-3 text-right">{format_price(book.price)}</td>
                        <td class="px-4 py-3 text-right">{book.quantity}</td>
                        <td class="px-4 py-3"><StatusBadge status=book.status /></td>
                        <td class="px-4 py-3 text-gray-400">{book.date_created.format("%b %e, %Y").to_string()}</td>
                    </tr>
                }).collect_view()}
            </tbody>
        </table>
    }
}
