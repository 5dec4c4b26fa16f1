use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;

use artemis::api::TravelApi;
use artemis::safety::{ALERT_BANNER_DURATION, AlertStatus, DEFAULT_ALERT_MESSAGE, SafetyPanel};

use crate::geo;
use crate::state::AppState;

/// Safety screen: position, local emergency numbers and the alert trigger.
#[component]
pub fn SafetyPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let panel = RwSignal::new(SafetyPanel::default());
    let (message, set_message) = signal(DEFAULT_ALERT_MESSAGE.to_string());

    geo::current_position(move |result| {
        let Some(position) = panel.try_update(|p| p.on_position(result)).flatten() else {
            return;
        };
        let api = state.api();
        spawn_local(async move {
            let result = api.emergency_numbers(position).await;
            panel.try_update(|p| p.apply_numbers(result));
        });
    });

    let send_alert = move |_| {
        let text = message.get_untracked();
        let Some(request) = panel.try_update(|p| p.begin_alert(&text)).flatten() else {
            return;
        };
        let api = state.api();
        spawn_local(async move {
            let result = api.send_alert(&request).await;
            let Some(seq) = panel.try_update(|p| p.finish_alert(result)) else {
                return;
            };
            let millis = u32::try_from(ALERT_BANNER_DURATION.as_millis()).unwrap_or(u32::MAX);
            Timeout::new(millis, move || {
                panel.try_update(|p| p.expire_banner(seq));
            })
            .forget();
        });
    };

    view! {
        <section class="safety">
            {move || {
                panel.with(|p| p.banner.clone()).map(|banner| {
                    let class = if banner.success { "alert-banner success" } else { "alert-banner failure" };
                    view! {
                        <div class=class on:click=move |_| panel.update(|p| p.dismiss_banner())>
                            {banner.text}
                        </div>
                    }
                })
            }}

            <p class="location">
                "Your current location: " {move || panel.with(|p| p.location_text.clone())}
            </p>

            <h3>"Local Emergency Numbers"</h3>
            <ul class="contacts">
                <For
                    each=move || panel.with(|p| p.contacts.clone())
                    key=|c| c.id.clone()
                    let:contact
                >
                    <li class="contact">
                        <span class="contact-name">{contact.name.clone()}</span>
                        <a class="contact-number" href=format!("tel:{}", contact.number)>
                            {contact.number.clone()}
                        </a>
                    </li>
                </For>
            </ul>

            <div class="alert-form">
                <textarea
                    rows="2"
                    prop:value=message
                    on:input=move |ev| set_message.set(event_target_value(&ev))
                />
                <button
                    class="alert-btn"
                    on:click=send_alert
                    disabled=move || !panel.with(|p| p.can_send_alert())
                >
                    {move || {
                        if panel.with(|p| p.alert == AlertStatus::Sending) { "Sending…" } else { "Send Emergency Alert" }
                    }}
                </button>
            </div>
        </section>
    }
}
