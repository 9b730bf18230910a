use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::{use_app_state, NotFound};
use crate::data::booking::BookingStatus;

#[component]
fn SummaryRow(label: &'static str, #[prop(into)] value: String) -> impl IntoView {
    view! {
        <div class="flex justify-between py-2 border-b border-gray-100 last:border-b-0">
            <span class="text-gray-500">{label}</span>
            <span class="font-semibold text-gray-900 text-right">{value}</span>
        </div>
    }
}

#[component]
pub fn ConfirmationPage() -> impl IntoView {
    let state = use_app_state();
    let navigate = use_navigate();

    let Some(summary) = state.flow.with_untracked(|flow| flow.summary.clone()) else {
        return view! { <NotFound message="There is no reservation to confirm."/> }.into_any();
    };
    let currency = state.currency();
    let paid = summary.status == BookingStatus::Paid;
    let status_class = if paid {
        "px-2 py-1 rounded-md text-xs font-bold bg-green-100 text-green-800"
    } else {
        "px-2 py-1 rounded-md text-xs font-bold bg-amber-100 text-amber-800"
    };

    view! {
        <div class="bg-gray-50 min-h-screen">
            <div class="max-w-xl mx-auto px-4 py-12">
                <h1 class="text-3xl font-bold text-gray-900 mb-6">"Confirm your reservation"</h1>
                <div class="bg-white p-6 rounded-lg shadow-xl">
                    <div class="flex justify-between items-center mb-4">
                        <span class="text-sm text-gray-500">{summary.reservation_number.clone()}</span>
                        <span class=status_class>{summary.status.to_string()}</span>
                    </div>
                    <SummaryRow label="Court" value=summary.court_name.clone()/>
                    <SummaryRow label="Venue" value=summary.venue.clone()/>
                    <SummaryRow label="Date" value=summary.display_date()/>
                    <SummaryRow label="Time" value=summary.time_range.clone()/>
                    <div class="flex justify-between pt-4 mt-2 text-lg">
                        <span class="font-semibold text-gray-700">"Total"</span>
                        <span class="font-bold text-green-700">{format!("{currency} {:.2}", summary.amount)}</span>
                    </div>

                    <button
                        class="w-full mt-6 bg-blue-600 text-white font-bold p-4 rounded-lg hover:bg-blue-700 transition duration-300 disabled:opacity-50"
                        disabled=paid
                        on:click=move |_| navigate("/reservar/pago", Default::default())
                    >
                        "Go to payment"
                    </button>
                </div>
            </div>
        </div>
    }
    .into_any()
}
