#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use tracing::{debug, error};

use crate::api::TravelApi;
use crate::chat::conversation::{ConversationMode, StopProgress};
use crate::chat::itinerary::fetch_itinerary;
use crate::models::{ChatMessage, ItineraryRequest};

pub const GREETING: &str =
    "Hi there! I'm Artemis AI, your travel assistant. How can I help you today?";
pub const CHAT_FAILURE: &str = "Failed to fetch response.";
pub const ITINERARY_PROMPT: &str = "Let's plan your itinerary! Send your starting point, any \
                                    stops, and your destination separated by commas, or one \
                                    location per message.";
pub const NO_LOCATIONS_HINT: &str =
    "I couldn't find any locations in that. Try something like \"Paris, Lyon, Nice\".";

/// Preset buttons under the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    Recommendations,
    PlanItinerary,
    SafetyRating,
    LocalNews,
}

impl QuickAction {
    pub const ALL: [QuickAction; 4] = [
        QuickAction::Recommendations,
        QuickAction::PlanItinerary,
        QuickAction::SafetyRating,
        QuickAction::LocalNews,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            QuickAction::Recommendations => "Recommendations",
            QuickAction::PlanItinerary => "Plan Itinerary",
            QuickAction::SafetyRating => "Safety Rating",
            QuickAction::LocalNews => "Local News",
        }
    }

    /// Slash commands used by the terminal client.
    pub fn from_command(command: &str) -> Option<Self> {
        match command.trim() {
            "/recommend" | "/recommendations" => Some(QuickAction::Recommendations),
            "/plan" => Some(QuickAction::PlanItinerary),
            "/safety" => Some(QuickAction::SafetyRating),
            "/news" => Some(QuickAction::LocalNews),
            _ => None,
        }
    }
}

/// A backend call the session is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Chat { query: String },
    Itinerary(ItineraryRequest),
}

/// Performs an [`Outbound`] request and returns the text to show. Failures are
/// already folded into fallback strings.
pub async fn dispatch<A: TravelApi>(api: &A, outbound: &Outbound) -> String {
    match outbound {
        Outbound::Chat { query } => ask(api, query).await,
        Outbound::Itinerary(req) => {
            fetch_itinerary(api, &req.start_location, &req.end_location, &req.stops).await
        }
    }
}

async fn ask<A: TravelApi>(api: &A, query: &str) -> String {
    match api.chat(query).await {
        Ok(answer) => answer,
        Err(e) => {
            error!("Chat request failed: {e}");
            CHAT_FAILURE.to_string()
        }
    }
}

/// Transcript plus conversation mode for one chat screen.
///
/// The step functions ([`ChatSession::begin`], [`ChatSession::quick_action`],
/// [`ChatSession::resolve`]) do no I/O; the web app runs them inside signal
/// updates and performs the returned [`Outbound`] itself. [`ChatSession::submit`]
/// and [`ChatSession::press`] chain the steps for sequential callers.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    next_id: u64,
    mode: ConversationMode,
    in_flight: usize,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        let mut session = Self {
            messages: Vec::new(),
            next_id: 1,
            mode: ConversationMode::Normal,
            in_flight: 0,
        };
        session.push_bot(GREETING);
        session
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn mode(&self) -> &ConversationMode {
        &self.mode
    }

    /// True while at least one reply has not arrived yet.
    pub fn is_waiting(&self) -> bool {
        self.in_flight > 0
    }

    /// Records a typed submission. Blank input is ignored. Returns the request
    /// to perform, if any; canned replies are appended right away.
    pub fn begin(&mut self, text: &str) -> Option<Outbound> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.push_user(text);

        match self.mode.absorb(text) {
            None => {
                self.in_flight += 1;
                Some(Outbound::Chat { query: text.to_string() })
            }
            Some(StopProgress::Empty { .. }) => {
                self.push_bot(NO_LOCATIONS_HINT);
                None
            }
            Some(StopProgress::NeedMore { remaining }) => {
                let noun = if remaining == 1 { "location" } else { "locations" };
                self.push_bot(format!("Got it. Send {remaining} more {noun} to finish your route."));
                None
            }
            Some(StopProgress::Complete(req)) => {
                debug!("Itinerary collection complete: {req:?}");
                self.in_flight += 1;
                Some(Outbound::Itinerary(req))
            }
        }
    }

    /// A preset button. "Plan Itinerary" switches to stop collection with a
    /// canned prompt; the others submit their label.
    pub fn quick_action(&mut self, action: QuickAction) -> Option<Outbound> {
        match action {
            QuickAction::PlanItinerary => {
                self.push_user(action.label());
                self.mode.begin_collecting();
                self.push_bot(ITINERARY_PROMPT);
                None
            }
            other => self.begin(other.label()),
        }
    }

    /// Appends the reply to an earlier [`Outbound`].
    pub fn resolve(&mut self, reply: impl Into<String>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.push_bot(reply);
    }

    pub async fn submit<A: TravelApi>(&mut self, api: &A, text: &str) {
        if let Some(outbound) = self.begin(text) {
            let reply = dispatch(api, &outbound).await;
            self.resolve(reply);
        }
    }

    pub async fn press<A: TravelApi>(&mut self, api: &A, action: QuickAction) {
        if let Some(outbound) = self.quick_action(action) {
            let reply = dispatch(api, &outbound).await;
            self.resolve(reply);
        }
    }

    fn push_user(&mut self, text: impl Into<String>) {
        let id = self.take_id();
        self.messages.push(ChatMessage::user(id, text));
    }

    fn push_bot(&mut self, text: impl Into<String>) {
        let id = self.take_id();
        self.messages.push(ChatMessage::bot(id, text));
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
