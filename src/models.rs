use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

// ── Chat ──────────────────────────────────────────────────────────────────────

/// One turn in the chat transcript. Ids are handed out by the owning
/// [`crate::chat::ChatSession`] and only ever grow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub is_user: bool,
}

impl ChatMessage {
    pub fn user(id: u64, text: impl Into<String>) -> Self {
        Self { id, text: text.into(), is_user: true }
    }

    pub fn bot(id: u64, text: impl Into<String>) -> Self {
        Self { id, text: text.into(), is_user: false }
    }
}

/// Body of `POST /chatbot`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatQuery {
    pub query: String,
}

/// Reply shape shared by `/chatbot` and `/plan_itinerary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub response: String,
}

/// Body of `POST /plan_itinerary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryRequest {
    pub start_location: String,
    pub end_location: String,
    pub stops: Vec<String>,
}

impl ItineraryRequest {
    /// First location is the start, last is the end, anything between is a
    /// stop. Needs at least two locations.
    pub fn from_locations(mut locations: Vec<String>) -> Option<Self> {
        if locations.len() < 2 {
            return None;
        }
        let end_location = locations.pop()?;
        let start_location = locations.remove(0);
        Some(Self { start_location, end_location, stops: locations })
    }
}

// ── Explore / City ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub image: String,
}

/// Body of `POST /api/get_city_data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRequest {
    pub city_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityData {
    pub city_name: String,
    #[serde(deserialize_with = "string_or_number")]
    pub safety_score: String,
    pub description: String,
    pub safety_description: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/600x400?text=No+Image+Available";

impl CityData {
    /// The backend reports lookup problems as prose in `image_url`, so anything
    /// that is not an http(s) URL falls back to the placeholder.
    pub fn image_or_placeholder(&self) -> &str {
        match self.image_url.as_deref() {
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => url,
            _ => PLACEHOLDER_IMAGE,
        }
    }
}

// ── Safety ────────────────────────────────────────────────────────────────────

/// Device position, also the body of `POST /api/get_emergency_numbers`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

pub const UNKNOWN_NUMBER: &str = "Unknown";

fn unknown_number() -> String {
    UNKNOWN_NUMBER.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyNumberSet {
    #[serde(rename = "Police", default = "unknown_number", deserialize_with = "string_or_number")]
    pub police: String,
    #[serde(rename = "Ambulance", default = "unknown_number", deserialize_with = "string_or_number")]
    pub ambulance: String,
    #[serde(rename = "Fire", default = "unknown_number", deserialize_with = "string_or_number")]
    pub fire: String,
}

/// Response of `POST /api/get_emergency_numbers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyNumbers {
    pub country: String,
    pub emergency_numbers: EmergencyNumberSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub id: String,
    pub name: String,
    pub number: String,
}

impl EmergencyNumbers {
    /// Police, Ambulance and Fire, in that order.
    pub fn contacts(&self) -> Vec<EmergencyContact> {
        let set = &self.emergency_numbers;
        [("Police", &set.police), ("Ambulance", &set.ambulance), ("Fire", &set.fire)]
            .into_iter()
            .enumerate()
            .map(|(i, (name, number))| EmergencyContact {
                id: (i + 1).to_string(),
                name: name.to_string(),
                number: number.clone(),
            })
            .collect()
    }
}

/// Body of `POST /api/send_emergency_alert`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub message: String,
}

/// Whatever the alert endpoint tells us besides the status. Decoded leniently:
/// a 2xx with an unexpected body still counts as sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub emergency_numbers: Option<EmergencyNumberSet>,
}

// ── Profile ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketListItem {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
    pub name: String,
    pub bio: String,
    pub age: u32,
    pub height: String,
    pub weight: String,
    pub trips: u32,
    pub countries: u32,
    #[serde(default)]
    pub bucket_list: Vec<BucketListItem>,
}

/// Image attached to a profile update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Multipart payload of `POST /api/user/{id}`: text fields in form order plus
/// an optional `profilePicture` file part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub fields: Vec<(&'static str, String)>,
    pub picture: Option<PictureUpload>,
}

pub const PICTURE_FIELD: &str = "profilePicture";

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Accepts `"911"` and `911` alike. Whole floats lose their `.0`.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Ok(i.to_string()),
            (None, Some(f)) if f.fract() == 0.0 => Ok(format!("{f:.0}")),
            _ => Ok(n.to_string()),
        },
        serde_json::Value::Null => Ok(UNKNOWN_NUMBER.to_string()),
        other => Err(de::Error::custom(format!("expected string or number, got {other}"))),
    }
}
