use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};

use artemis::api::TravelApi;
use artemis::bucket_list::BucketList;
use artemis::models::PictureUpload;
use artemis::profile::{ProfileForm, ProfileView};

use crate::components::map::BucketMap;
use crate::state::AppState;

fn label(field: &str) -> &'static str {
    match field {
        "name" => "Name",
        "bio" => "Bio",
        "age" => "Age",
        "height" => "Height",
        "weight" => "Weight",
        "trips" => "Trips",
        "countries" => "Countries",
        _ => "",
    }
}

async fn read_picture(file: File) -> Option<PictureUpload> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| log::error!("Could not read {}: {e:?}", file.name()))
        .ok()?;
    let content_type = file.type_();
    Some(PictureUpload {
        file_name: file.name(),
        content_type: (!content_type.is_empty()).then_some(content_type),
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    })
}

/// Profile screen: the cached record, its edit form and the bucket-list map.
#[component]
pub fn ProfilePage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let profile = RwSignal::new(ProfileView::new(state.user_id()));
    let bucket = RwSignal::new(BucketList::default());

    let api = state.api();
    let user_id = state.user_id();
    spawn_local(async move {
        let result = api.user(&user_id).await;
        bucket.try_update(|b| b.apply_profile(result.clone()));
        profile.try_update(|p| p.apply_loaded(result));
    });

    let save = move || {
        let Some(update) = profile.try_update(|p| p.begin_save()).flatten() else {
            return;
        };
        let api = state.api();
        let user_id = state.user_id();
        spawn_local(async move {
            let result = api.update_user(&user_id, &update).await;
            bucket.try_update(|b| {
                if let Ok(user) = &result {
                    b.items.clone_from(&user.bucket_list);
                }
            });
            profile.try_update(|p| p.finish_save(result));
        });
    };

    let on_picture = move |ev: leptos::ev::Event| {
        let Some(file) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
        else {
            return;
        };
        spawn_local(async move {
            let picture = read_picture(file).await;
            profile.try_update(|p| p.picture = picture);
        });
    };

    // Only these drive which block is shown; form edits update inputs in place.
    let loading = Memo::new(move |_| profile.with(|p| p.loading));
    let user = Memo::new(move |_| profile.with(|p| p.user.clone()));
    let editing = Memo::new(move |_| profile.with(|p| p.editing));
    let saving = Memo::new(move |_| profile.with(|p| p.saving));

    view! {
        <section class="profile">
            {move || {
                if loading.get() {
                    return view! { <p class="loading">"Loading..."</p> }.into_any();
                }
                let Some(user) = user.get() else {
                    let message = profile.with_untracked(|p| p.load_error.clone());
                    return view! { <p class="error-banner">{message}</p> }.into_any();
                };

                if !editing.get() {
                    let picture = user.profile_picture.as_deref().map(|p| state.asset_url(p));
                    return view! {
                        <div class="profile-card">
                            {picture.map(|src| view! { <img class="avatar" src=src alt="Profile picture" /> })}
                            <h2>{user.name.clone()}</h2>
                            <p class="bio">{user.bio.clone()}</p>
                            <p>{format!("{} years old · {} · {}", user.age, user.height, user.weight)}</p>
                            <p>{format!("{} trips · {} countries", user.trips, user.countries)}</p>
                            <button on:click=move |_| profile.update(|p| p.start_editing())>"Edit Profile"</button>
                        </div>
                    }
                    .into_any();
                }

                view! {
                    <form class="profile-form" on:submit=move |ev| {
                        ev.prevent_default();
                        save();
                    }>
                        {ProfileForm::FIELD_NAMES
                            .into_iter()
                            .map(|field| {
                                view! {
                                    <label class:missing=move || profile.with(|p| p.missing.contains(&field))>
                                        {label(field)}
                                        <input
                                            name=field
                                            prop:value=move || {
                                                profile.with(|p| p.form.get(field).unwrap_or_default().to_string())
                                            }
                                            on:input=move |ev| {
                                                profile.update(|p| p.form.set(field, event_target_value(&ev)));
                                            }
                                        />
                                    </label>
                                }
                            })
                            .collect_view()}
                        <label>
                            "Profile picture"
                            <input type="file" accept="image/*" on:change=on_picture />
                            <span class="picked">
                                {move || profile.with(|p| p.picture.as_ref().map(|pic| pic.file_name.clone()))}
                            </span>
                        </label>
                        {move || {
                            profile
                                .with(|p| !p.missing.is_empty())
                                .then(|| view! { <p class="error-banner">"Please fill in every field."</p> })
                        }}
                        <div class="form-actions">
                            <button type="submit" disabled=move || saving.get()>
                                {move || if saving.get() { "Saving…" } else { "Save" }}
                            </button>
                            <button type="button" on:click=move |_| profile.update(|p| p.cancel_editing())>
                                "Cancel"
                            </button>
                        </div>
                    </form>
                }
                .into_any()
            }}

            <BucketMap bucket />
        </section>
    }
}
