use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::app::{use_app_state, use_court_id, NotFound};
use crate::data::selection::{SelectionError, SlotSelection};
use crate::data::shared_booking::{AvailabilityMap, DaySchedule};
use crate::utils::date::{format_long_date, parse_iso_date};

#[component]
pub fn SlotPickerPage() -> impl IntoView {
    let state = use_app_state();
    let court_id = use_court_id();
    let query = use_query_map();
    let navigate = use_navigate();

    let Some(court) = court_id().and_then(|id| state.catalog.with_value(|catalog| catalog.get(id).cloned())) else {
        return view! { <NotFound message="Court not found."/> }.into_any();
    };
    state.flow.update(|flow| flow.choose_court(court.clone()));

    // `?fecha=2025-10-26` stands in for a date picked on the previous page
    let linked_date = query.with_untracked(|q| q.get("fecha").and_then(|d| parse_iso_date(&d)));
    if let Some(date) = linked_date {
        state.flow.update(|flow| flow.choose_date(date));
    }
    let Some(date) = state.flow.with_untracked(|flow| flow.date) else {
        return view! { <NotFound message="Pick a date before choosing a time."/> }.into_any();
    };

    let schedule = match state.settings.with_value(|settings| settings.day_schedule()) {
        Ok(schedule) => schedule,
        Err(e) => {
            leptos::logging::error!("schedule unavailable: {e}");
            return view! { <NotFound message="Opening hours are not configured."/> }.into_any();
        }
    };
    let rules = state.settings.with_value(|settings| settings.selection_rules(&schedule));
    let availability = state.settings.with_value(|settings| settings.availability_for(&schedule, court.id, date));
    let unit_price = if court.price_per_hour.is_zero() {
        state.settings.with_value(|settings| settings.pricing.fallback_unit_price)
    } else {
        court.price_per_hour
    };

    let schedule = StoredValue::new(schedule);
    let availability: StoredValue<AvailabilityMap> = StoredValue::new(availability);

    let (selection, set_selection) = signal(SlotSelection::empty());
    let (error, set_error) = signal::<Option<SelectionError>>(None);

    let on_slot = move |label: String| {
        let current = selection.get_untracked();
        let (next, rejected) = schedule.with_value(|schedule| {
            availability.with_value(|availability| current.click(schedule, availability, rules, &label))
        });
        set_selection.set(next);
        set_error.set(rejected);
    };

    let preview = move || {
        schedule.with_value(|schedule: &DaySchedule| selection.get().confirm(schedule, unit_price).ok())
    };

    let handle_confirm = move |_| {
        let confirmed = schedule.with_value(|schedule| selection.get_untracked().confirm(schedule, unit_price));
        let request = match confirmed {
            Ok(request) => request,
            Err(e) => {
                set_error.set(Some(e));
                return;
            }
        };
        let mut outcome = None;
        state.flow.update(|flow| {
            outcome = Some(flow.confirm_reservation(&request).map(|summary| summary.reservation_number.clone()));
        });
        match outcome {
            Some(Ok(number)) => {
                leptos::logging::log!("reservation {number} awaiting payment");
                navigate("/reservar/confirmacion", Default::default());
            }
            Some(Err(e)) => leptos::logging::error!("reservation not confirmed: {e}"),
            None => {}
        }
    };

    let currency = state.currency();
    let free_count = availability.with_value(|availability| availability.available_count());

    view! {
        <div class="bg-gray-50 min-h-screen">
            <div class="max-w-4xl mx-auto px-4 sm:px-6 lg:px-8 py-12">
                <h1 class="text-3xl font-bold text-gray-900 mb-2">"Choose your time"</h1>
                <p class="text-gray-600 mb-1">
                    <span class="font-semibold">{court.name.clone()}</span>
                </p>
                <p class="text-gray-500 mb-8">{format_long_date(date)}</p>

                <div class="bg-white p-6 rounded-lg shadow-xl">
                    <div class="flex justify-between items-center mb-4">
                        <h2 class="text-lg font-semibold text-gray-800">"Available times"</h2>
                        <span class="text-xs font-medium bg-green-100 text-green-800 px-2 py-1 rounded-md">
                            {format!("{free_count} free")}
                        </span>
                    </div>
                    <p class="text-sm text-gray-500 mb-4">
                        "Click a start time, then an end time. Clicking the start again clears the selection."
                    </p>

                    <div class="grid grid-cols-3 sm:grid-cols-4 md:grid-cols-5 gap-3">
                        {schedule.with_value(|schedule| {
                            schedule
                                .bookable()
                                .iter()
                                .map(|slot| {
                                    let label = slot.label();
                                    let position = slot.slot_number;
                                    let free = availability.with_value(|a| a.is_available(&label));
                                    let click_label = label.clone();
                                    let class = move || {
                                        let base = "p-3 rounded-lg text-center text-sm font-semibold transition-colors";
                                        if !free {
                                            format!("{base} bg-red-100 text-red-400 cursor-not-allowed line-through")
                                        } else if selection.get().contains(position) {
                                            format!("{base} bg-green-600 text-white")
                                        } else {
                                            format!("{base} bg-green-50 text-green-800 hover:bg-green-100")
                                        }
                                    };
                                    view! {
                                        <button class=class on:click=move |_| on_slot(click_label.clone())>
                                            {label}
                                        </button>
                                    }
                                })
                                .collect::<Vec<_>>()
                        })}
                    </div>

                    <p class="text-sm text-red-600 mt-4 min-h-[1.25rem]">
                        {move || error.get().map(|e| e.to_string()).unwrap_or_default()}
                    </p>

                    <div class="mt-6 border-t pt-6 flex flex-wrap justify-between items-center gap-4">
                        <div class="text-gray-700">
                            {move || match preview() {
                                Some(request) => {
                                    format!("{} · {currency} {:.2}", request.time_range(), request.derived_price)
                                }
                                None => "No time selected".to_string(),
                            }}
                        </div>
                        <button
                            class="bg-blue-600 text-white font-bold py-3 px-8 rounded-lg hover:bg-blue-700 transition duration-300 disabled:opacity-50"
                            disabled=move || selection.get().is_empty()
                            on:click=handle_confirm
                        >
                            "Confirm time"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
    .into_any()
}
