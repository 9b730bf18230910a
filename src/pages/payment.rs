use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::{use_app_state, NotFound};
use crate::data::payment::PaymentForm;

#[component]
fn FormField(
    label: &'static str,
    placeholder: &'static str,
    value: RwSignal<String>,
    #[prop(optional)] max_len: Option<u32>,
) -> impl IntoView {
    view! {
        <label class="flex flex-col text-sm font-medium text-gray-700">
            {label}
            <input
                type="text"
                class="mt-1 px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500"
                placeholder=placeholder
                maxlength=max_len.map(|len| len.to_string())
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}

#[component]
pub fn PaymentPage() -> impl IntoView {
    let state = use_app_state();
    let navigate = use_navigate();

    let Some(summary) = state.flow.with_untracked(|flow| flow.summary.clone()) else {
        return view! { <NotFound message="There is no reservation to pay for."/> }.into_any();
    };
    let currency = state.currency();

    let card_number = RwSignal::new(String::new());
    let expiry_date = RwSignal::new(String::new());
    let cvv = RwSignal::new(String::new());
    let full_name = RwSignal::new(String::new());
    let document_id = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let handle_pay = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = PaymentForm {
            card_number: card_number.get_untracked().replace(' ', ""),
            expiry_date: expiry_date.get_untracked().trim().to_string(),
            cvv: cvv.get_untracked().trim().to_string(),
            full_name: full_name.get_untracked(),
            document_id: document_id.get_untracked(),
            email: email.get_untracked().trim().to_string(),
            phone: phone.get_untracked().trim().to_string(),
        };

        let mut outcome = None;
        state.flow.update(|flow| {
            outcome = Some(flow.pay(&form).map(|receipt| receipt.operation.clone()));
        });
        match outcome {
            Some(Ok(operation)) => {
                leptos::logging::log!("payment accepted, operation {operation}");
                set_error.set(None);
                navigate("/reservar/comprobante", Default::default());
            }
            Some(Err(e)) => set_error.set(Some(e.to_string())),
            None => {}
        }
    };

    view! {
        <div class="bg-gray-50 min-h-screen">
            <div class="max-w-xl mx-auto px-4 py-12">
                <h1 class="text-3xl font-bold text-gray-900 mb-2">"Payment"</h1>
                <p class="text-gray-600 mb-6">
                    {format!("{} · {} · {}", summary.court_name, summary.display_date(), summary.time_range)}
                </p>

                <form class="bg-white p-6 rounded-lg shadow-xl space-y-4" on:submit=handle_pay>
                    <h2 class="text-lg font-semibold text-gray-800">"Card"</h2>
                    <FormField label="Card number" placeholder="4111 1111 1111 1111" value=card_number max_len=19/>
                    <div class="grid grid-cols-2 gap-4">
                        <FormField label="Expiry" placeholder="MM/YY" value=expiry_date max_len=5/>
                        <FormField label="CVV" placeholder="123" value=cvv max_len=4/>
                    </div>

                    <h2 class="text-lg font-semibold text-gray-800 pt-2">"Cardholder"</h2>
                    <FormField label="Full name" placeholder="Lucía Fernández" value=full_name/>
                    <FormField label="ID document" placeholder="12345678" value=document_id/>
                    <FormField label="Email" placeholder="lucia@correo.pe" value=email/>
                    <FormField label="Phone" placeholder="987654321" value=phone max_len=12/>

                    <p class="text-sm text-red-600 min-h-[1.25rem]">{move || error.get().unwrap_or_default()}</p>

                    <button
                        type="submit"
                        class="w-full bg-green-600 text-white font-bold p-4 rounded-lg hover:bg-green-700 transition duration-300"
                    >
                        {format!("Pay {currency} {:.2}", summary.amount)}
                    </button>
                    <p class="text-xs text-gray-400 text-center">"Simulated checkout, no card is charged."</p>
                </form>
            </div>
        </div>
    }
    .into_any()
}
