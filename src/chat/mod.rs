//! Chat screen: transcript, conversation mode and the input dispatcher.

pub mod conversation;
pub mod itinerary;
pub mod session;

pub use conversation::{ConversationMode, StopProgress, MIN_ITINERARY_LOCATIONS};
pub use itinerary::{fetch_itinerary, ITINERARY_FAILURE};
pub use session::{dispatch, ChatSession, Outbound, QuickAction, CHAT_FAILURE};
