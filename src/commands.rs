//! Terminal renditions of the app screens.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use artemis::api::http::HttpTravelApi;
use artemis::bucket_list::BucketList;
use artemis::chat::itinerary::plan_lines;
use artemis::chat::{ChatSession, QuickAction};
use artemis::city::{CityPage, CityState, CITY_NOT_FOUND};
use artemis::explore::ExploreView;
use artemis::models::Coordinates;
use artemis::profile::ProfileView;
use artemis::safety::{GeolocationError, SafetyPanel};

use crate::cli::ProfileAction;

// ── Chat ──────────────────────────────────────────────────────────────────────

pub async fn chat(api: &HttpTravelApi) -> anyhow::Result<()> {
    let mut session = ChatSession::new();
    let mut shown = 0;
    print_replies(&session, &mut shown);
    println!("Quick actions: /recommend  /plan  /safety  /news    (/quit to leave)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let prompt = if session.mode().is_collecting() { "stops> " } else { "> " };
        print!("{prompt}");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if matches!(line, "/quit" | "/exit") {
            break;
        }

        match QuickAction::from_command(line) {
            Some(action) => session.press(api, action).await,
            None => session.submit(api, line).await,
        }
        print_replies(&session, &mut shown);
    }

    info!("Chat ended after {} message(s)", session.messages().len());
    Ok(())
}

/// Prints bot messages added since `shown`; the user's own lines are already
/// on screen.
fn print_replies(session: &ChatSession, shown: &mut usize) {
    for message in session.messages().iter().skip(*shown).filter(|m| !m.is_user) {
        for line in plan_lines(&message.text) {
            println!("Artemis: {line}");
        }
    }
    *shown = session.messages().len();
}

// ── Explore / City ────────────────────────────────────────────────────────────

pub fn explore(term: Option<String>) {
    let view = ExploreView { search: term.unwrap_or_default(), ..ExploreView::default() };
    let visible = view.visible();
    if visible.is_empty() {
        println!("No destinations match \"{}\".", view.search);
        return;
    }
    println!("Popular Destinations");
    for destination in visible {
        println!("  {:>2}. {}", destination.id, destination.name);
    }
}

pub async fn city(api: &HttpTravelApi, name: &str) {
    let page = CityPage::load(api, name).await;
    match &page.state {
        CityState::Loaded(city) => {
            println!("{}", city.city_name);
            println!("Safety Score: {}", city.safety_score);
            println!();
            println!("{}", city.description);
            println!();
            println!("Safety Information:");
            println!("{}", city.safety_description);
            println!();
            println!("Image: {}", city.image_or_placeholder());
        }
        CityState::NotFound => println!("{CITY_NOT_FOUND}"),
        CityState::Failed(message) => println!("{message}"),
        CityState::Loading => println!("Loading..."),
    }
}

// ── Safety ────────────────────────────────────────────────────────────────────

pub async fn safety(api: &HttpTravelApi, lat: Option<f64>, lng: Option<f64>, alert: Option<String>) {
    let position = match (lat, lng) {
        (Some(lat), Some(lng)) => Ok(Coordinates::new(lat, lng)),
        _ => Err(GeolocationError::PermissionDenied),
    };

    let mut panel = SafetyPanel::default();
    panel.locate(api, position).await;

    println!("Your current location: {}", panel.location_text);
    if !panel.contacts.is_empty() {
        println!("Local Emergency Numbers");
        for contact in &panel.contacts {
            println!("  {:<10} {}", contact.name, contact.number);
        }
    }

    if let Some(message) = alert {
        match panel.send_alert(api, &message).await {
            Some(_) => {
                if let Some(banner) = &panel.banner {
                    println!("{}", banner.text);
                }
            }
            None => println!("Cannot send an alert without your location."),
        }
    }
}

// ── Profile ───────────────────────────────────────────────────────────────────

pub async fn profile(api: &HttpTravelApi, user_id: &str, action: ProfileAction) {
    match action {
        ProfileAction::Show => {
            let mut view = ProfileView::new(user_id);
            view.load(api).await;
            let Some(user) = &view.user else {
                println!("{}", view.load_error.as_deref().unwrap_or_default());
                return;
            };
            println!("{}", user.name);
            println!("{}", user.bio);
            println!("{} years old · {} · {}", user.age, user.height, user.weight);
            println!("{} trips · {} countries", user.trips, user.countries);
            if let Some(picture) = &user.profile_picture {
                println!("Picture: {}", api.config().asset_url(picture));
            }
            print_bucket_list(&user.bucket_list);
        }
        ProfileAction::Pin { lat, lng, name } => {
            let mut list = BucketList::default();
            list.load(api, user_id).await;
            list.click(lat, lng, 0.0);
            if let Some(name) = name {
                list.rename_pending(&name);
            }
            if list.save_pending(api, user_id).await {
                print_bucket_list(&list.items);
            } else {
                println!("Could not save the location.");
            }
        }
        ProfileAction::Unpin { name } => {
            let mut list = BucketList::default();
            list.load(api, user_id).await;
            if list.delete(api, user_id, &name).await {
                print_bucket_list(&list.items);
            } else {
                println!("Could not remove \"{name}\".");
            }
        }
    }
}

fn print_bucket_list(items: &[artemis::models::BucketListItem]) {
    if items.is_empty() {
        println!("Bucket list is empty.");
        return;
    }
    println!("Bucket list");
    for item in items {
        println!("  {} ({:.4}, {:.4})", item.name, item.lat, item.lng);
    }
}
