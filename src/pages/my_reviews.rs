use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::{use_app_state, CURRENT_USER};
use crate::pages::court_detail::ReviewStars;
use crate::utils::date::format_short_date;

#[component]
pub fn MyReviewsPage() -> impl IntoView {
    let state = use_app_state();

    let reviews = move || {
        state.reviews.with(|board| {
            board
                .by_user(CURRENT_USER)
                .into_iter()
                .map(|review| {
                    let court = state
                        .catalog
                        .with_value(|catalog| catalog.get(review.court_id).map(|c| c.name.clone()))
                        .unwrap_or_else(|| format!("Court #{}", review.court_id));
                    (court, review.clone())
                })
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="bg-gray-50 min-h-screen">
            <div class="max-w-4xl mx-auto px-4 py-12">
                <h1 class="text-3xl font-bold text-gray-900 mb-6">"My reviews"</h1>
                <div class="space-y-4">
                    {move || {
                        let reviews = reviews();
                        if reviews.is_empty() {
                            return view! {
                                <p class="text-gray-500">"You have not reviewed any court yet."</p>
                            }
                            .into_any();
                        }
                        reviews
                            .into_iter()
                            .map(|(court, review)| {
                                view! {
                                    <div class="bg-white p-6 rounded-lg shadow">
                                        <div class="flex justify-between items-center mb-2">
                                            <A href=format!("/cancha/{}", review.court_id)>
                                                <span class="text-lg font-semibold text-blue-600 hover:underline">{court}</span>
                                            </A>
                                            <span class="text-sm text-gray-500">{format_short_date(review.date)}</span>
                                        </div>
                                        <ReviewStars rating=review.rating/>
                                        <p class="text-gray-600 mt-2">{review.comment}</p>
                                    </div>
                                }
                            })
                            .collect::<Vec<_>>()
                            .into_any()
                    }}
                </div>
            </div>
        </div>
    }
}
