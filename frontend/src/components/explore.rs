use leptos::prelude::*;
use leptos_router::components::A;

use artemis::city::route_for;
use artemis::explore::ExploreView;

/// Destination grid with a client-side name filter.
#[component]
pub fn ExplorePage() -> impl IntoView {
    let view_state = RwSignal::new(ExploreView::default());

    let visible = move || view_state.with(|v| v.visible().into_iter().cloned().collect::<Vec<_>>());

    view! {
        <section class="explore">
            <h2>"Popular Destinations"</h2>
            <input
                type="search"
                class="search"
                placeholder="Search destinations"
                prop:value=move || view_state.with(|v| v.search.clone())
                on:input=move |ev| view_state.update(|v| v.search = event_target_value(&ev))
            />
            <div class="destination-grid">
                <For each=visible key=|d| d.id.clone() let:destination>
                    <A href=route_for(&destination.name) attr:class="destination-card">
                        <img src=destination.image.clone() alt=destination.name.clone() />
                        <span>{destination.name.clone()}</span>
                    </A>
                </For>
            </div>
            {move || visible().is_empty().then(|| view! { <p class="empty-state">"No destinations match."</p> })}
        </section>
    }
}
