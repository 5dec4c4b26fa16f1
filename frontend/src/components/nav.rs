use leptos::prelude::*;
use leptos_router::components::A;

const TABS: [(&str, &str); 4] = [
    ("/safety", "Safety"),
    ("/explore", "Explore"),
    ("/chatbot", "Artemis AI"),
    ("/profile", "Profile"),
];

/// Tab bar shown under every screen. `A` marks the current tab with
/// `aria-current`.
#[component]
pub fn BottomNav() -> impl IntoView {
    view! {
        <nav class="bottom-nav">
            {TABS
                .into_iter()
                .map(|(href, label)| view! { <A href=href attr:class="nav-tab">{label}</A> })
                .collect_view()}
        </nav>
    }
}
