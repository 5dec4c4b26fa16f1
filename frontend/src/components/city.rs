use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;

use artemis::api::TravelApi;
use artemis::city::{CITY_NOT_FOUND, CityPage, CityState};

use crate::state::AppState;

/// City detail screen. Reloads whenever the route parameter changes; results
/// for a city the user already left are dropped by `CityPage::apply`.
#[component]
pub fn CityDetail() -> impl IntoView {
    let state = expect_context::<AppState>();
    let params = use_params_map();
    let page = RwSignal::new(CityPage::open(""));

    Effect::new(move || {
        let raw = params.read().get("name").unwrap_or_default();
        let opened = CityPage::open(&raw);
        let request = opened.pending_request().map(str::to_string);
        page.set(opened);

        if let Some(name) = request {
            let api = state.api();
            spawn_local(async move {
                let result = api.city_data(&name).await;
                page.try_update(|p| p.apply(&name, result));
            });
        }
    });

    view! {
        <section class="city">
            {move || match page.get().state {
                CityState::Loading => view! { <p class="loading">"Loading..."</p> }.into_any(),
                CityState::NotFound => view! { <p class="error-banner">{CITY_NOT_FOUND}</p> }.into_any(),
                CityState::Failed(message) => view! { <p class="error-banner">{message}</p> }.into_any(),
                CityState::Loaded(city) => {
                    let image = city.image_or_placeholder().to_string();
                    view! {
                        <article class="city-card">
                            <img class="city-image" src=image alt=city.city_name.clone() />
                            <h2>{city.city_name.clone()}</h2>
                            <p class="safety-score">"Safety Score: " {city.safety_score.clone()}</p>
                            <p>{city.description.clone()}</p>
                            <h3>"Safety Information"</h3>
                            <p>{city.safety_description.clone()}</p>
                        </article>
                    }
                    .into_any()
                }
            }}
        </section>
    }
}
