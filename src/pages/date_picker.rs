use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::{use_app_state, use_court_id, NotFound};
use crate::data::calendar::{DayStatus, MonthView};
use crate::utils::date::{format_long_date, WEEKDAY_NAMES};

#[component]
pub fn DatePickerPage() -> impl IntoView {
    let state = use_app_state();
    let court_id = use_court_id();
    let navigate = use_navigate();

    let Some(court) = court_id().and_then(|id| state.catalog.with_value(|catalog| catalog.get(id).cloned())) else {
        return view! { <NotFound message="Court not found."/> }.into_any();
    };
    let id = court.id;
    // deep links skip the detail page
    state.flow.update(|flow| flow.choose_court(court.clone()));

    let (month, set_month) = signal(MonthView::opening());
    let (selected_day, set_selected_day) = signal::<Option<u32>>(None);

    let change_month = move |delta: i32| {
        set_month.update(|m| *m = m.shift(delta));
        set_selected_day.set(None);
    };

    let selected_date = move || selected_day.get().and_then(|day| month.get().date(day));

    let handle_confirm = move |_| {
        let Some(date) = selected_date() else {
            return;
        };
        state.flow.update(|flow| flow.choose_date(date));
        navigate(&format!("/cancha/{id}/reservar/horario"), Default::default());
    };

    view! {
        <div class="bg-gray-50 min-h-screen">
            <div class="max-w-4xl mx-auto px-4 sm:px-6 lg:px-8 py-12">
                <h1 class="text-3xl font-bold text-gray-900 mb-2">"Choose a date"</h1>
                <p class="text-gray-600 mb-8">
                    "Booking at: " <span class="font-semibold">{court.name.clone()}</span>
                </p>

                <div class="bg-white p-6 rounded-lg shadow-xl">
                    <div class="flex justify-between items-center mb-6">
                        <button class="p-2 rounded-full hover:bg-gray-100" on:click=move |_| change_month(-1)>
                            "‹"
                        </button>
                        <h2 class="text-xl font-semibold text-gray-800 capitalize">
                            {move || month.get().title()}
                        </h2>
                        <button class="p-2 rounded-full hover:bg-gray-100" on:click=move |_| change_month(1)>
                            "›"
                        </button>
                    </div>

                    <div class="grid grid-cols-7 gap-2 text-center text-sm font-medium text-gray-500 mb-2">
                        {WEEKDAY_NAMES
                            .iter()
                            .map(|name| view! { <div>{name.chars().take(3).collect::<String>()}</div> })
                            .collect::<Vec<_>>()}
                    </div>

                    <div class="grid grid-cols-7 gap-2">
                        {move || {
                            let view_month = month.get();
                            view_month
                                .cells()
                                .into_iter()
                                .map(|cell| match cell {
                                    None => view! { <div class="p-2"></div> }.into_any(),
                                    Some(day) => {
                                        let status = view_month.day_status(day);
                                        let class = move || {
                                            let base = "p-2 rounded-lg transition-colors text-center";
                                            if selected_day.get() == Some(day) {
                                                format!("{base} bg-blue-600 text-white font-bold")
                                            } else {
                                                match status {
                                                    DayStatus::Maintenance => {
                                                        format!("{base} bg-gray-200 text-gray-400 cursor-not-allowed line-through")
                                                    }
                                                    DayStatus::Available => {
                                                        format!("{base} bg-green-100 text-green-800 hover:bg-green-200 cursor-pointer")
                                                    }
                                                    DayStatus::Unlisted => {
                                                        format!("{base} text-gray-700 hover:bg-gray-100 cursor-pointer")
                                                    }
                                                }
                                            }
                                        };
                                        view! {
                                            <button
                                                class=class
                                                disabled=!view_month.is_selectable(day)
                                                on:click=move |_| set_selected_day.set(Some(day))
                                            >
                                                {day}
                                            </button>
                                        }
                                        .into_any()
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </div>

                    <div class="flex gap-4 mt-6 text-xs text-gray-500">
                        <span class="flex items-center gap-1">
                            <span class="w-3 h-3 rounded bg-green-100 inline-block"></span>"Available"
                        </span>
                        <span class="flex items-center gap-1">
                            <span class="w-3 h-3 rounded bg-gray-200 inline-block"></span>"Maintenance"
                        </span>
                    </div>

                    <div class="mt-8 border-t pt-6 flex flex-wrap justify-between items-center gap-4">
                        <p class="text-gray-700">
                            {move || match selected_date() {
                                Some(date) => format!("Selected: {}", format_long_date(date)),
                                None => "No date selected".to_string(),
                            }}
                        </p>
                        <button
                            class="bg-blue-600 text-white font-bold py-3 px-8 rounded-lg hover:bg-blue-700 transition duration-300 disabled:opacity-50"
                            disabled=move || selected_date().is_none()
                            on:click=handle_confirm
                        >
                            "Choose time"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
    .into_any()
}
