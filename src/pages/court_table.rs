use leptos::prelude::*;

use crate::data::courts::Court;
use crate::pages::court_row::CourtRow;

#[component]
pub fn CourtsTable(courts: Memo<Vec<(Court, f64)>>, currency: String) -> impl IntoView {
    view! {
        <div>
            <div class="hidden md:flex mb-3 text-sm text-gray-600 bg-blue-50 p-3 rounded-md items-center gap-2 border border-blue-200">
                <span>"Click on any court to see its details, reviews and booking options"</span>
            </div>
            <div class="overflow-x-auto">
                <table class="min-w-full bg-white border border-gray-200 rounded-lg overflow-hidden table-fixed">
                    <colgroup>
                        <col style="width: 35%;" />
                        <col style="width: 15%;" />
                        <col style="width: 15%;" />
                        <col style="width: 20%;" />
                        <col style="width: 15%;" />
                    </colgroup>
                    <thead class="bg-gray-50">
                        <tr>
                            <th class="px-2 py-2 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">"Name"</th>
                            <th class="px-1 py-2 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">"Sport"</th>
                            <th class="px-1 py-2 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">
                                <span class="hidden md:inline">"Distance"</span>
                                <span class="md:hidden">"Dist"</span>
                            </th>
                            <th class="px-1 py-2 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">"Price / hour"</th>
                            <th class="px-1 py-2 text-center text-xs font-medium text-gray-500 uppercase tracking-wider">
                                <span class="sr-only">"Details"</span>
                            </th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-gray-200">
                        {move || {
                            let currency = currency.clone();
                            let courts = courts.get();
                            if courts.is_empty() {
                                return view! {
                                    <tr>
                                        <td colspan="5" class="px-4 py-6 text-center text-sm text-gray-400">
                                            "No courts match your search"
                                        </td>
                                    </tr>
                                }
                                .into_any();
                            }
                            courts
                                .into_iter()
                                .map(|(court, distance)| {
                                    view! { <CourtRow court=court distance=distance currency=currency.clone()/> }
                                })
                                .collect::<Vec<_>>()
                                .into_any()
                        }}
                    </tbody>
                </table>
            </div>
        </div>
    }
}
