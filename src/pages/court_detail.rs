use chrono::Local;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::app::{use_app_state, use_court_id, NotFound, CURRENT_USER};
use crate::data::courts::CourtProfile;
use crate::data::reviews::ReviewDraft;
use crate::utils::date::format_short_date;

#[component]
pub fn ReviewStars(rating: u8) -> impl IntoView {
    view! {
        <div class="flex items-center">
            {(1..=5u8)
                .map(|i| {
                    let class = if i <= rating { "text-yellow-400" } else { "text-gray-300" };
                    view! { <span class=class>"★"</span> }
                })
                .collect::<Vec<_>>()}
        </div>
    }
}

#[component]
fn StarRatingInput(rating: ReadSignal<u8>, set_rating: WriteSignal<u8>) -> impl IntoView {
    view! {
        <div class="flex items-center space-x-1 mb-4">
            {(1..=5u8)
                .map(|value| {
                    view! {
                        <button
                            type="button"
                            class=move || {
                                if value <= rating.get() {
                                    "text-3xl transition-colors text-yellow-400"
                                } else {
                                    "text-3xl transition-colors text-gray-300 hover:text-yellow-300"
                                }
                            }
                            on:click=move |_| set_rating.set(value)
                        >
                            "★"
                        </button>
                    }
                })
                .collect::<Vec<_>>()}
        </div>
    }
}

#[component]
fn CourtProfileSection(profile: CourtProfile) -> impl IntoView {
    let (main_image, set_main_image) = signal(profile.cover().map(str::to_string));

    view! {
        <div class="mb-8">
            {move || {
                main_image
                    .get()
                    .map(|src| {
                        view! {
                            <img
                                src=src
                                alt="Court photo"
                                class="w-full h-64 md:h-96 object-cover rounded-lg shadow-lg mb-4"
                            />
                        }
                    })
            }}
            <div class="flex gap-2 overflow-x-auto">
                {profile
                    .gallery
                    .iter()
                    .enumerate()
                    .map(|(index, src)| {
                        let shown = src.clone();
                        let thumb = src.clone();
                        let selected = src.clone();
                        view! {
                            <img
                                src=shown
                                alt=format!("Thumbnail {}", index + 1)
                                class=move || {
                                    if main_image.get().as_deref() == Some(thumb.as_str()) {
                                        "w-20 h-16 md:w-32 md:h-24 object-cover rounded-md cursor-pointer border-2 border-blue-500"
                                    } else {
                                        "w-20 h-16 md:w-32 md:h-24 object-cover rounded-md cursor-pointer border-2 border-transparent"
                                    }
                                }
                                on:click=move |_| set_main_image.set(Some(selected.clone()))
                            />
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
        </div>

        <h2 class="text-2xl font-bold text-gray-800 mb-4">"Description"</h2>
        <p class="text-gray-600 mb-8 whitespace-pre-line">{profile.description.clone()}</p>

        <h2 class="text-2xl font-bold text-gray-800 mb-4">"Services"</h2>
        <div class="grid grid-cols-2 sm:grid-cols-3 gap-4 mb-8">
            {profile
                .services
                .iter()
                .map(|service| {
                    view! {
                        <div class="flex items-center p-3 bg-gray-50 rounded-lg">
                            <span class="text-2xl mr-3">{service.icon.clone()}</span>
                            <span class="text-gray-700">{service.name.clone()}</span>
                        </div>
                    }
                })
                .collect::<Vec<_>>()}
        </div>
    }
}

#[component]
pub fn CourtDetailPage() -> impl IntoView {
    let state = use_app_state();
    let court_id = use_court_id();
    let navigate = use_navigate();

    let Some(court) = court_id().and_then(|id| state.catalog.with_value(|catalog| catalog.get(id).cloned())) else {
        return view! { <NotFound message="Court not found."/> }.into_any();
    };

    let id = court.id;
    let profile = state.profiles.with_value(|profiles| profiles.get(id).cloned());
    let (new_rating, set_new_rating) = signal(0u8);
    let (new_comment, set_new_comment) = signal(String::new());
    let (review_msg, set_review_msg) = signal::<Option<String>>(None);

    let draft = move || ReviewDraft {
        rating: new_rating.get(),
        comment: new_comment.get(),
    };

    let submit_review = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let today = Local::now().date_naive();
        let mut result = None;
        state.reviews.update(|board| {
            result = Some(
                board
                    .submit(id, CURRENT_USER, today, draft())
                    .map(|review| review.id),
            );
        });
        match result {
            Some(Ok(review_id)) => {
                leptos::logging::log!("review {review_id} published for court {id}");
                set_new_rating.set(0);
                set_new_comment.set(String::new());
                set_review_msg.set(Some("Thanks for your review!".into()));
            }
            Some(Err(e)) => set_review_msg.set(Some(e.to_string())),
            None => {}
        }
    };

    let book_court = court.clone();
    let handle_reservation = move |_| {
        let court = book_court.clone();
        state.flow.update(|flow| flow.choose_court(court));
        navigate(&format!("/cancha/{id}/reservar"), Default::default());
    };

    let toggle_favorite = move |_| {
        state.favorites.update(|favorites| {
            favorites.toggle(id);
        });
    };

    let currency = state.currency();

    view! {
        <div class="bg-gray-50">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-12">
                <div class="text-sm text-gray-500 mb-4">
                    <A href="/"><span class="hover:underline">"Home"</span></A>
                    <span class="mx-2">">"</span>
                    <span class="font-semibold text-gray-700">{court.name.clone()}</span>
                </div>

                <div class="bg-white p-8 rounded-lg shadow-xl">
                    <div class="flex justify-between items-start mb-4">
                        <div>
                            <h1 class="text-3xl font-bold text-gray-900">{court.name.clone()}</h1>
                            <p class="text-gray-600 mt-1">{court.location.clone()}</p>
                            <p class="text-gray-600">{court.sport.clone()}</p>
                        </div>
                        <button
                            class=move || {
                                if state.favorites.with(|f| f.contains(id)) {
                                    "p-2 text-3xl text-red-500"
                                } else {
                                    "p-2 text-3xl text-gray-300 hover:text-red-400"
                                }
                            }
                            on:click=toggle_favorite
                        >
                            "♥"
                        </button>
                    </div>

                    {profile.map(|profile| view! { <CourtProfileSection profile=profile/> })}

                    <p class="text-2xl font-semibold text-green-700 mb-6">
                        {format!("{currency} {:.2} / hour", court.price_per_hour)}
                    </p>

                    <button
                        class="w-full bg-blue-600 text-white font-bold p-4 rounded-lg hover:bg-blue-700 transition duration-300 mb-8"
                        on:click=handle_reservation
                    >
                        "Book now"
                    </button>

                    <h2 class="text-2xl font-bold text-gray-800 mb-4">
                        "Reviews "
                        <span class="text-base text-yellow-600">
                            {move || {
                                state
                                    .reviews
                                    .with(|board| board.average_rating(id))
                                    .map(|avg| format!("({avg:.1})"))
                                    .unwrap_or_default()
                            }}
                        </span>
                    </h2>
                    <div class="space-y-4 mb-8">
                        {move || {
                            let reviews = state
                                .reviews
                                .with(|board| board.for_court(id).into_iter().cloned().collect::<Vec<_>>());
                            if reviews.is_empty() {
                                return view! { <p class="text-gray-500">"No reviews for this court yet."</p> }.into_any();
                            }
                            reviews
                                .into_iter()
                                .map(|review| {
                                    view! {
                                        <div class="border-b border-gray-200 pb-4 last:border-b-0">
                                            <div class="flex items-center justify-between mb-1">
                                                <h3 class="font-semibold text-gray-900">{review.user}</h3>
                                                <span class="text-sm text-gray-500">{format_short_date(review.date)}</span>
                                            </div>
                                            <ReviewStars rating=review.rating/>
                                            <p class="text-gray-600">{review.comment}</p>
                                        </div>
                                    }
                                })
                                .collect::<Vec<_>>()
                                .into_any()
                        }}
                    </div>

                    <h3 class="text-xl font-bold text-gray-800 mb-4">"Leave a review"</h3>
                    <form on:submit=submit_review>
                        <StarRatingInput rating=new_rating set_rating=set_new_rating/>
                        <textarea
                            class="w-full p-3 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-500"
                            rows="3"
                            placeholder="Tell other players about this court"
                            prop:value=move || new_comment.get()
                            on:input=move |ev| set_new_comment.set(event_target_value(&ev))
                        ></textarea>
                        <button
                            type="submit"
                            class="bg-blue-600 text-white font-bold py-2 px-6 rounded-lg hover:bg-blue-700 transition duration-300 disabled:opacity-50 mt-2"
                            disabled=move || !draft().is_ready()
                        >
                            "Publish review"
                        </button>
                        <p class="text-sm text-emerald-600 mt-2">{move || review_msg.get().unwrap_or_default()}</p>
                    </form>
                </div>
            </div>
        </div>
    }
    .into_any()
}
