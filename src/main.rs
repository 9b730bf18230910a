#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use cancha_booking::app::*;
    use cancha_booking::settings::{Settings, SettingsError};
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Settings::load_checked("settings.yaml") {
        Ok(settings) => log::info!(
            "serving slots {}-{} every {} minutes",
            settings.schedule.opening,
            settings.schedule.closing,
            settings.schedule.granularity_minutes
        ),
        Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            log::warn!("no settings.yaml, serving the bundled settings")
        }
        Err(e) => {
            log::error!("settings.yaml rejected: {e}");
            return;
        }
    }

    let conf = match get_configuration(None) {
        Ok(conf) => conf,
        Err(e) => {
            log::error!("invalid leptos configuration: {e}");
            return;
        }
    };
    let addr = conf.leptos_options.site_addr;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(App);

    let app = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let leptos_options = leptos_options.clone();
            move || shell(leptos_options.clone())
        })
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptos_options);

    log::info!("listening on http://{}", &addr);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            log::error!("failed to bind {addr}: {e}");
            return;
        }
    };
    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        log::error!("server stopped: {e}");
    }
}

#[cfg(not(feature = "ssr"))]
pub fn main() {
    // no client-side main function
    // see lib.rs for hydration function instead
}
