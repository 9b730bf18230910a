use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::use_app_state;
use crate::data::courts::Court;

#[component]
pub fn CourtRow(court: Court, distance: f64, currency: String) -> impl IntoView {
    let state = use_app_state();
    let (expanded, set_expanded) = signal(false);

    let toggle_expand = move |_| {
        set_expanded.update(|val| *val = !*val);
    };

    let court_id = court.id;
    let location = court.location.clone();
    let href = format!("/cancha/{court_id}");
    let rating = move || {
        state
            .reviews
            .with(|board| board.average_rating(court_id))
            .map(|avg| format!("{avg:.1} / 5"))
            .unwrap_or_else(|| "No reviews yet".to_string())
    };
    let is_favorite = move || state.favorites.with(|favorites| favorites.contains(court_id));

    let distance_class = if distance < 5.0 {
        "bg-green-200"
    } else if distance < 10.0 {
        "bg-green-100"
    } else {
        "bg-gray-100"
    };

    view! {
        <tr class="hover:bg-gray-50 group transition-colors cursor-pointer relative" on:click=toggle_expand>
            <td class="px-2 py-3 md:px-4 md:py-3 whitespace-nowrap text-sm font-medium text-gray-900 truncate">
                {court.name.clone()}
                {move || is_favorite().then(|| view! { <span class="ml-1 text-red-500">"♥"</span> })}
            </td>
            <td class="px-1 py-3 md:px-3 md:py-3 whitespace-nowrap text-sm text-gray-500">
                {court.sport.clone()}
            </td>
            <td class="px-1 py-3 md:px-3 md:py-3 whitespace-nowrap text-sm text-gray-500">
                <span class=format!("px-1 py-0.5 md:px-2 md:py-1 rounded-md text-gray-900 text-xs md:text-sm {distance_class}")>
                    {format!("{distance:.1} km")}
                </span>
            </td>
            <td class="px-1 py-3 md:px-3 md:py-3 whitespace-nowrap text-sm text-green-600 font-medium">
                {format!("{currency} {:.2}", court.price_per_hour)}
            </td>
            <td class="px-6 py-4 whitespace-nowrap text-sm text-center">
                <span class=move || {
                    if expanded.get() {
                        "rotate-180 inline-block transition-all duration-200 text-blue-600"
                    } else {
                        "inline-block transition-all duration-200 text-gray-500"
                    }
                }>
                    "▾"
                </span>
            </td>
        </tr>
        {move || {
            expanded.get().then(|| {
                view! {
                    <tr class="bg-blue-50">
                        <td colspan="5" class="px-4 py-3 text-sm text-gray-700">
                            <div class="flex flex-wrap justify-between items-center gap-2">
                                <span>{location.clone()}</span>
                                <span class="text-yellow-600">{rating}</span>
                                <A href=href.clone()>
                                    <span class="px-3 py-1.5 bg-blue-600 text-white rounded-md hover:bg-blue-700">"View court"</span>
                                </A>
                            </div>
                        </td>
                    </tr>
                }
            })
        }}
    }
}
