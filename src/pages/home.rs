use leptos::prelude::*;

use crate::app::use_app_state;
use crate::data::courts::SIMULATED_USER_LOCATION;
use crate::pages::court_table::CourtsTable;

/// Lima city centre, used until the visitor shares a location.
const DEFAULT_LAT: f64 = -12.0464;
const DEFAULT_LNG: f64 = -77.0428;

#[component]
pub fn HomePage() -> impl IntoView {
    let state = use_app_state();
    let (search, set_search) = signal(String::new());
    let (latitude, set_latitude) = signal(DEFAULT_LAT);
    let (longitude, set_longitude) = signal(DEFAULT_LNG);
    let (status, set_status) = signal::<Option<String>>(None);

    // Coordinates typed as "lat, lng" re-sort the list; anything else filters by name or district.
    let handle_search = move || {
        let input = search.get_untracked();
        let coords = input
            .split_once(',')
            .and_then(|(lat, lng)| Some((lat.trim().parse::<f64>().ok()?, lng.trim().parse::<f64>().ok()?)));
        match coords {
            Some((lat, lng)) => {
                set_latitude.set(lat);
                set_longitude.set(lng);
                set_status.set(None);
            }
            None if input.trim().is_empty() => {
                set_latitude.set(DEFAULT_LAT);
                set_longitude.set(DEFAULT_LNG);
                set_status.set(None);
            }
            None => set_status.set(Some(format!("Showing courts matching \"{}\"", input.trim()))),
        }
    };

    let use_my_location = move |_| {
        let (lat, lng) = SIMULATED_USER_LOCATION;
        set_search.set(String::new());
        set_latitude.set(lat);
        set_longitude.set(lng);
        set_status.set(Some("Using your location".to_string()));
        leptos::logging::log!("simulated location {lat}, {lng}");
    };

    let courts = Memo::new(move |_| {
        let filter = status
            .get()
            .map(|_| search.get_untracked().trim().to_lowercase());
        state.catalog.with_value(|catalog| {
            catalog
                .by_distance(latitude.get(), longitude.get())
                .into_iter()
                .filter(|(court, _)| match &filter {
                    Some(term) => {
                        court.name.to_lowercase().contains(term)
                            || court.location.to_lowercase().contains(term)
                            || court.sport.to_lowercase().contains(term)
                    }
                    None => true,
                })
                .collect::<Vec<_>>()
        })
    });

    view! {
        <div class="max-w-4xl mx-auto p-4">
            <div class="relative bg-blue-700 rounded-lg p-8 mb-6 text-white">
                <h1 class="text-3xl font-bold mb-2">"Book your court"</h1>
                <p class="text-blue-100">"Football, basketball and tennis courts across Lima."</p>
            </div>

            <div class="flex flex-wrap gap-4 items-end mb-4">
                <div class="flex flex-col flex-grow">
                    <label for="search" class="text-sm font-medium text-gray-700 mb-1">
                        "Search by name, district, sport or coordinates:"
                    </label>
                    <input
                        id="search"
                        type="text"
                        class="w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500"
                        placeholder="e.g. Miraflores, Tenis, -12.12, -77.03"
                        prop:value=move || search.get()
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                        on:keydown=move |ev| {
                            if ev.key() == "Enter" {
                                handle_search();
                            }
                        }
                    />
                </div>
                <button
                    class="px-4 py-2 bg-blue-600 text-white rounded-md hover:bg-blue-700 transition-colors"
                    on:click=move |_| handle_search()
                >
                    "Search"
                </button>
                <button
                    class="px-4 py-2 bg-white text-blue-600 border border-blue-600 rounded-md hover:bg-blue-50 transition-colors"
                    on:click=use_my_location
                >
                    "Use my location"
                </button>
            </div>

            <div class="text-sm mb-2 text-amber-600">
                {move || status.get().unwrap_or_default()}
            </div>
            <div class="text-sm text-gray-500 mb-4">
                {move || format!("From: {:.4}, {:.4}", latitude.get(), longitude.get())}
            </div>

            <CourtsTable courts=courts currency=state.currency()/>

            <p class="mt-4 text-xs text-gray-500 italic">
                "Distances are a flat estimate from the search point and are only indicative."
            </p>
        </div>
    }
}
