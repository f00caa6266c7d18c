//! Status badge and price formatting

use leptos::*;

use catalog::Status;

/// Availability badge
#[component]
pub fn StatusBadge(status: Status) -> impl IntoView {
    view! {
        <span class=format!("{} text-xs px-2 py-0.5 rounded-full text-white capitalize", badge_class(status))>
            {status.label()}
        </span>
    }
}

fn badge_class(status: Status) -> &'static str {
    match status {
        Status::Available => "bg-green-600",
        Status::Unavailable => "bg-gray-600",
    }
}

/// Whole-unit price with a currency sign
pub fn format_price(price: i64) -> String {
    if price < 0 {
        format!("-${}", price.unsigned_abs())
    } else {
        format!("${}", price)
    }
}
