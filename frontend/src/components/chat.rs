use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use artemis::chat::itinerary::plan_lines;
use artemis::chat::{ChatSession, Outbound, QuickAction, dispatch};

use crate::state::AppState;

/// Runs a request produced by the session and folds the reply back in.
fn perform(state: AppState, session: RwSignal<ChatSession>, outbound: Option<Outbound>) {
    let Some(outbound) = outbound else {
        return;
    };
    let api = state.api();
    spawn_local(async move {
        let reply = dispatch(&api, &outbound).await;
        session.try_update(|s| s.resolve(reply));
    });
}

/// Chat screen: transcript, quick actions and input.
#[component]
pub fn ChatPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let session = RwSignal::new(ChatSession::new());

    view! {
        <section class="chat-area">
            <div class="chat-header">"Artemis AI"</div>

            <div class="messages-container">
                <For
                    each=move || session.with(|s| s.messages().to_vec())
                    key=|m| m.id
                    let:msg
                >
                    <MessageBubble is_user=msg.is_user text=msg.text.clone() />
                </For>
                {move || {
                    session
                        .with(|s| s.is_waiting())
                        .then(|| view! { <div class="message assistant typing">"…"</div> })
                }}
            </div>

            <div class="quick-actions">
                {QuickAction::ALL
                    .into_iter()
                    .map(|action| {
                        view! {
                            <button
                                class="quick-action"
                                on:click=move |_| {
                                    let outbound = session.try_update(|s| s.quick_action(action)).flatten();
                                    perform(state, session, outbound);
                                }
                            >
                                {action.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            <ChatInput session />
        </section>
    }
}

/// A single chat message bubble. Bot replies are split into one row per
/// itinerary entry.
#[component]
fn MessageBubble(is_user: bool, text: String) -> impl IntoView {
    let css_class = if is_user { "message user" } else { "message assistant" };
    let rows = if is_user {
        vec![text]
    } else {
        plan_lines(&text).into_iter().map(str::to_string).collect()
    };

    view! {
        <div class=css_class>
            {rows.into_iter().map(|row| view! { <p>{row}</p> }).collect_view()}
        </div>
    }
}

/// Input row. Stays usable while replies are pending; each submit is its own
/// request.
#[component]
fn ChatInput(session: RwSignal<ChatSession>) -> impl IntoView {
    let state = expect_context::<AppState>();
    let (input, set_input) = signal(String::new());

    let collecting = move || session.with(|s| s.mode().is_collecting());

    let send = move || {
        let text = input.get_untracked();
        if text.trim().is_empty() {
            return;
        }
        set_input.set(String::new());
        let outbound = session.try_update(|s| s.begin(&text)).flatten();
        perform(state, session, outbound);
    };

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            send();
        }
    };

    view! {
        <div class="input-area">
            <div class="input-row">
                <input
                    type="text"
                    placeholder=move || {
                        if collecting() { "Start, stops…, end (comma separated)" } else { "Type a message…" }
                    }
                    prop:value=input
                    on:input=move |ev| {
                        set_input.set(event_target_value(&ev));
                    }
                    on:keydown=on_keydown
                />
                <button
                    class="send-btn"
                    on:click=move |_| send()
                    disabled=move || input.get().trim().is_empty()
                >
                    "Send"
                </button>
            </div>
        </div>
    }
}
