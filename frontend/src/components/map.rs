use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::Element;

use artemis::api::TravelApi;
use artemis::bucket_list::{BucketList, MapProjection};

use crate::state::AppState;

/// Turns a click into map coordinates using the surface's on-screen box.
fn click_coordinates(ev: &MouseEvent) -> Option<(f64, f64)> {
    let surface = ev.current_target()?.dyn_into::<Element>().ok()?;
    let rect = surface.get_bounding_client_rect();
    let x = f64::from(ev.client_x()) - rect.left();
    let y = f64::from(ev.client_y()) - rect.top();
    MapProjection::new(rect.width(), rect.height()).to_coordinates(x, y)
}

fn marker_style(lat: f64, lng: f64) -> String {
    let (left, top) = MapProjection::to_percent(lat, lng);
    format!("left: {left:.3}%; top: {top:.3}%;")
}

/// World map for the bucket list. A click places or moves one pending pin;
/// nothing is saved until it is confirmed.
#[component]
pub fn BucketMap(bucket: RwSignal<BucketList>) -> impl IntoView {
    let state = expect_context::<AppState>();

    let on_click = move |ev: MouseEvent| {
        let Some((lat, lng)) = click_coordinates(&ev) else {
            return;
        };
        bucket.update(|b| {
            b.click(lat, lng, js_sys::Date::now());
        });
    };

    let confirm = move |_| {
        let Some(item) = bucket.try_update(|b| b.confirm()).flatten() else {
            return;
        };
        let api = state.api();
        let user_id = state.user_id();
        spawn_local(async move {
            let result = api.add_bucket_item(&user_id, &item).await;
            bucket.try_update(|b| b.finish_confirm(result));
        });
    };

    let remove = move |name: String| {
        let Some(name) = bucket.try_update(|b| b.remove(&name)).flatten() else {
            return;
        };
        let api = state.api();
        let user_id = state.user_id();
        spawn_local(async move {
            let result = api.remove_bucket_item(&user_id, &name).await;
            bucket.try_update(|b| b.finish_remove(result));
        });
    };

    view! {
        <section class="bucket-list">
            <h3>"Bucket List"</h3>
            <div class="map-surface" on:click=on_click>
                <For
                    each=move || bucket.with(|b| b.items.clone())
                    key=|item| item.name.clone()
                    let:item
                >
                    <span class="marker" style=marker_style(item.lat, item.lng) title=item.name.clone()></span>
                </For>
                {move || {
                    bucket.with(|b| b.pending.clone()).map(|pin| {
                        view! {
                            <span
                                class="marker pending"
                                style=marker_style(pin.item.lat, pin.item.lng)
                                title=pin.item.name.clone()
                            ></span>
                        }
                    })
                }}
            </div>

            {move || {
                bucket.with(|b| b.pending.clone()).map(|pin| {
                    view! {
                        <div class="pending-pin">
                            <input
                                prop:value=pin.item.name.clone()
                                disabled=pin.saving
                                on:change=move |ev| bucket.update(|b| b.rename_pending(&event_target_value(&ev)))
                            />
                            <span class="coords">{format!("{:.4}, {:.4}", pin.item.lat, pin.item.lng)}</span>
                            <button on:click=confirm disabled=pin.saving>
                                {if pin.saving { "Saving…" } else { "Add to bucket list" }}
                            </button>
                            <button on:click=move |_| bucket.update(|b| b.cancel()) disabled=pin.saving>
                                "Cancel"
                            </button>
                        </div>
                    }
                })
            }}

            <ul class="bucket-items">
                <For
                    each=move || bucket.with(|b| b.items.clone())
                    key=|item| item.name.clone()
                    let:item
                >
                    {
                        let name = item.name.clone();
                        view! {
                            <li>
                                <span>{item.name.clone()}</span>
                                <span class="coords">{format!("{:.4}, {:.4}", item.lat, item.lng)}</span>
                                <button
                                    class="remove-btn"
                                    disabled=move || bucket.with(|b| b.removing.is_some())
                                    on:click=move |_| remove(name.clone())
                                >
                                    "Remove"
                                </button>
                            </li>
                        }
                    }
                </For>
            </ul>
        </section>
    }
}
