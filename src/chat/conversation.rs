#[cfg(test)]
#[path = "conversation_test.rs"]
mod conversation_test;

use crate::models::ItineraryRequest;

/// An itinerary needs a start, at least one stop, and an end.
pub const MIN_ITINERARY_LOCATIONS: usize = 3;

/// Whether the next free-text input is chat content or itinerary locations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConversationMode {
    #[default]
    Normal,
    CollectingStops { collected: Vec<String> },
}

/// What one submission did to a stop collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopProgress {
    /// The text held no location names.
    Empty { remaining: usize },
    /// Names were added but the threshold is not reached yet.
    NeedMore { remaining: usize },
    /// Enough names; the mode is back to `Normal`.
    Complete(ItineraryRequest),
}

impl ConversationMode {
    pub fn is_collecting(&self) -> bool {
        matches!(self, ConversationMode::CollectingStops { .. })
    }

    /// Enters (or restarts) stop collection.
    pub fn begin_collecting(&mut self) {
        *self = ConversationMode::CollectingStops { collected: Vec::new() };
    }

    pub fn collected(&self) -> &[String] {
        match self {
            ConversationMode::CollectingStops { collected } => collected,
            ConversationMode::Normal => &[],
        }
    }

    /// Feeds one user submission into the collection. Returns `None` in
    /// `Normal` mode, where the text belongs to the chat endpoint.
    pub fn absorb(&mut self, text: &str) -> Option<StopProgress> {
        let ConversationMode::CollectingStops { collected } = self else {
            return None;
        };

        let names = parse_locations(text);
        if names.is_empty() {
            return Some(StopProgress::Empty {
                remaining: MIN_ITINERARY_LOCATIONS.saturating_sub(collected.len()),
            });
        }

        collected.extend(names);
        if collected.len() < MIN_ITINERARY_LOCATIONS {
            return Some(StopProgress::NeedMore {
                remaining: MIN_ITINERARY_LOCATIONS - collected.len(),
            });
        }

        let locations = std::mem::take(collected);
        *self = ConversationMode::Normal;
        ItineraryRequest::from_locations(locations).map(StopProgress::Complete)
    }
}

/// Comma-separated names, trimmed, blanks dropped.
pub fn parse_locations(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
