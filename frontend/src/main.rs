mod api;
mod components;
mod geo;
mod state;

use leptos::mount::mount_to_body;
use leptos::prelude::*;
use leptos_router::components::{A, Redirect, Route, Router, Routes};
use leptos_router::{ParamSegment, StaticSegment};

use artemis::config::ApiConfig;

use components::chat::ChatPage;
use components::city::CityDetail;
use components::explore::ExplorePage;
use components::nav::BottomNav;
use components::profile::ProfilePage;
use components::safety::SafetyPage;
use state::AppState;

/// Backend locations are fixed at build time; trunk forwards the same
/// variables the terminal client reads at run time.
fn build_config() -> ApiConfig {
    let lookup = |key: &str| {
        match key {
            "ARTEMIS_ASSISTANT_URL" => option_env!("ARTEMIS_ASSISTANT_URL"),
            "ARTEMIS_TRAVEL_URL" => option_env!("ARTEMIS_TRAVEL_URL"),
            "ARTEMIS_USER_ID" => option_env!("ARTEMIS_USER_ID"),
            "ARTEMIS_HTTP_TIMEOUT_SECS" => option_env!("ARTEMIS_HTTP_TIMEOUT_SECS"),
            _ => None,
        }
        .map(str::to_string)
    };
    ApiConfig::from_lookup(lookup).unwrap_or_else(|e| {
        log::error!("Falling back to default backend settings: {e}");
        ApiConfig::default()
    })
}

/// Root application component.
#[component]
fn App() -> impl IntoView {
    AppState::provide(build_config());

    view! {
        <Router>
            <div class="app-container">
                <header class="app-header">
                    <span class="app-title">"Artemis"</span>
                    <A href="/profile" attr:class="profile-link">"Profile"</A>
                </header>
                <main class="screen">
                    <Routes fallback=|| "Page not found.".into_view()>
                        <Route path=StaticSegment("") view=|| view! { <Redirect path="/safety"/> }/>
                        <Route path=StaticSegment("chatbot") view=ChatPage/>
                        <Route path=StaticSegment("explore") view=ExplorePage/>
                        <Route path=(StaticSegment("city"), ParamSegment("name")) view=CityDetail/>
                        <Route path=StaticSegment("safety") view=SafetyPage/>
                        <Route path=StaticSegment("profile") view=ProfilePage/>
                    </Routes>
                </main>
                <BottomNav/>
            </div>
        </Router>
    }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
