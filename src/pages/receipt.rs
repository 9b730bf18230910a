use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::{use_app_state, NotFound};

#[component]
pub fn ReceiptPage() -> impl IntoView {
    let state = use_app_state();

    let Some(receipt) = state.flow.with_untracked(|flow| flow.receipt.clone()) else {
        return view! { <NotFound message="No payment has been made yet."/> }.into_any();
    };
    let currency = state.currency();

    let rows = [
        ("Reservation", receipt.reservation_number.clone()),
        ("Court", receipt.court.clone()),
        ("Date", receipt.date.clone()),
        ("Time", receipt.time_range.clone()),
        ("Payment method", receipt.method.clone()),
        ("Operation no.", receipt.operation.clone()),
    ];

    view! {
        <div class="bg-gray-50 min-h-screen">
            <div class="max-w-xl mx-auto px-4 py-12">
                <div class="bg-white p-8 rounded-lg shadow-xl text-center">
                    <div class="text-5xl text-green-500 mb-2">"✓"</div>
                    <h1 class="text-2xl font-bold text-gray-900 mb-1">"Payment successful"</h1>
                    <p class="text-gray-500 mb-6">"Keep this receipt for your records."</p>

                    <dl class="text-left divide-y divide-gray-100">
                        {rows
                            .into_iter()
                            .map(|(label, value)| {
                                view! {
                                    <div class="flex justify-between py-2">
                                        <dt class="text-gray-500">{label}</dt>
                                        <dd class="font-semibold text-gray-900">{value}</dd>
                                    </div>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </dl>
                    <div class="flex justify-between pt-4 mt-2 text-lg border-t">
                        <span class="font-semibold text-gray-700">"Amount paid"</span>
                        <span class="font-bold text-green-700">{format!("{currency} {:.2}", receipt.amount)}</span>
                    </div>

                    <A href="/">
                        <span class="inline-block mt-8 bg-blue-600 text-white font-bold py-3 px-8 rounded-lg hover:bg-blue-700">
                            "Back to courts"
                        </span>
                    </A>
                </div>
            </div>
        </div>
    }
    .into_any()
}
