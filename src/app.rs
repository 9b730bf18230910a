use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{
    components::{FlatRoutes, Route, Router, A},
    path, StaticSegment,
};

use crate::data::booking::BookingFlow;
use crate::data::courts::{CourtCatalog, CourtProfiles};
use crate::data::reviews::{Favorites, ReviewBoard};
use crate::pages::confirmation::ConfirmationPage;
use crate::pages::court_detail::CourtDetailPage;
use crate::pages::date_picker::DatePickerPage;
use crate::pages::home::HomePage;
use crate::pages::my_reviews::MyReviewsPage;
use crate::pages::payment::PaymentPage;
use crate::pages::receipt::ReceiptPage;
use crate::pages::slot_picker::SlotPickerPage;
use crate::settings::Settings;

/// Signed-in user of the mockup; there is no authentication.
pub const CURRENT_USER: &str = "Juan Pérez";

/// Read-only providers and booking state shared by every page.
#[derive(Clone, Copy)]
pub struct AppState {
    pub settings: StoredValue<Settings>,
    pub catalog: StoredValue<CourtCatalog>,
    pub profiles: StoredValue<CourtProfiles>,
    pub reviews: RwSignal<ReviewBoard>,
    pub favorites: RwSignal<Favorites>,
    pub flow: RwSignal<BookingFlow>,
}

impl AppState {
    pub fn new() -> Self {
        let catalog = CourtCatalog::bundled().unwrap_or_else(|e| {
            leptos::logging::error!("court catalog unavailable: {e}");
            CourtCatalog::default()
        });
        let profiles = CourtProfiles::bundled().unwrap_or_else(|e| {
            leptos::logging::error!("court profiles unavailable: {e}");
            CourtProfiles::default()
        });
        let reviews = ReviewBoard::bundled().unwrap_or_else(|e| {
            leptos::logging::error!("reviews unavailable: {e}");
            ReviewBoard::default()
        });

        Self {
            settings: StoredValue::new(Settings::embedded()),
            catalog: StoredValue::new(catalog),
            profiles: StoredValue::new(profiles),
            reviews: RwSignal::new(reviews),
            favorites: RwSignal::new(Favorites::default()),
            flow: RwSignal::new(BookingFlow::default()),
        }
    }

    pub fn currency(&self) -> String {
        self.settings.with_value(|settings| settings.pricing.currency.clone())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_app_state() -> AppState {
    expect_context::<AppState>()
}

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="es">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <Stylesheet id="leptos" href="/pkg/cancha-booking.css"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <Link rel="preconnect" href="https://fonts.googleapis.com"/>
                <Link rel="preconnect" href="https://fonts.gstatic.com" crossorigin="anonymous"/>
                <Link href="https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700&display=swap" rel="stylesheet"/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(AppState::new());

    view! {
        <Title text="Canchas"/>
        <Router>
            <header class="bg-white shadow-sm">
                <nav class="max-w-7xl mx-auto px-4 py-3 flex justify-between items-center">
                    <A href="/">
                        <span class="text-xl font-bold text-blue-600">"Canchas"</span>
                    </A>
                    <A href="/perfil/resenas">
                        <span class="text-sm text-gray-600 hover:underline">"My reviews"</span>
                    </A>
                </nav>
            </header>
            <main>
                <FlatRoutes fallback=|| "Page not found.">
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=path!("/cancha/:id") view=CourtDetailPage/>
                    <Route path=path!("/cancha/:id/reservar") view=DatePickerPage/>
                    <Route path=path!("/cancha/:id/reservar/horario") view=SlotPickerPage/>
                    <Route path=path!("/reservar/confirmacion") view=ConfirmationPage/>
                    <Route path=path!("/reservar/pago") view=PaymentPage/>
                    <Route path=path!("/reservar/comprobante") view=ReceiptPage/>
                    <Route path=path!("/perfil/resenas") view=MyReviewsPage/>
                </FlatRoutes>
            </main>
        </Router>
    }
}

/// Numeric `:id` route parameter.
pub fn use_court_id() -> impl Fn() -> Option<u32> + Copy + Send + Sync + 'static {
    let params = leptos_router::hooks::use_params_map();
    move || params.with(|p| p.get("id").and_then(|id| id.parse::<u32>().ok()))
}

#[component]
pub fn NotFound(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="text-center py-20">
            <p class="text-xl font-semibold text-red-500">{message}</p>
            <A href="/">
                <span class="text-blue-600 hover:underline mt-4 inline-block">"Back to courts"</span>
            </A>
        </div>
    }
}
