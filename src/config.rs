use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::errors::AppError;

pub const DEFAULT_ASSISTANT_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TRAVEL_URL: &str = "http://localhost:8000";
pub const DEFAULT_USER_ID: &str = "user123";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the backend lives. The assistant service (chat, itinerary) and the
/// travel service (city, safety, profile) run on separate origins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub assistant_url: String,
    pub travel_url: String,
    pub user_id: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            assistant_url: DEFAULT_ASSISTANT_URL.to_string(),
            travel_url: DEFAULT_TRAVEL_URL.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Reads `ARTEMIS_ASSISTANT_URL`, `ARTEMIS_TRAVEL_URL`, `ARTEMIS_USER_ID`
    /// and `ARTEMIS_HTTP_TIMEOUT_SECS`, keeping defaults for anything unset.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut config = Self::default();
        if let Some(url) = lookup("ARTEMIS_ASSISTANT_URL") {
            config.assistant_url = url;
        }
        if let Some(url) = lookup("ARTEMIS_TRAVEL_URL") {
            config.travel_url = url;
        }
        if let Some(id) = lookup("ARTEMIS_USER_ID") {
            config.user_id = id;
        }
        if let Some(raw) = lookup("ARTEMIS_HTTP_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|e| AppError::invalid_setting("ARTEMIS_HTTP_TIMEOUT_SECS", &raw, e))?;
            if secs == 0 {
                return Err(AppError::invalid_setting(
                    "ARTEMIS_HTTP_TIMEOUT_SECS",
                    raw,
                    "must be at least 1",
                ));
            }
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    // ── Assistant service ────────────────────────────────────────────────────

    pub fn chatbot_url(&self) -> String {
        join(&self.assistant_url, "/chatbot")
    }

    pub fn itinerary_url(&self) -> String {
        join(&self.assistant_url, "/plan_itinerary")
    }

    // ── Travel service ───────────────────────────────────────────────────────

    pub fn city_data_url(&self) -> String {
        join(&self.travel_url, "/api/get_city_data")
    }

    pub fn emergency_numbers_url(&self) -> String {
        join(&self.travel_url, "/api/get_emergency_numbers")
    }

    pub fn alert_url(&self) -> String {
        join(&self.travel_url, "/api/send_emergency_alert")
    }

    pub fn user_url(&self, user_id: &str) -> String {
        join(&self.travel_url, &format!("/api/user/{}", encode_segment(user_id)))
    }

    pub fn bucket_list_url(&self, user_id: &str) -> String {
        format!("{}/bucket-list", self.user_url(user_id))
    }

    pub fn bucket_item_url(&self, user_id: &str, item_name: &str) -> String {
        format!("{}/{}", self.bucket_list_url(user_id), encode_segment(item_name))
    }

    /// Uploaded pictures come back as server-relative paths like
    /// `uploads/<uuid>_me.png`.
    pub fn asset_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            join(&self.travel_url, &format!("/{}", path.trim_start_matches('/')))
        }
    }
}

fn join(base: &str, path: &str) -> String {
    format!("{}{path}", base.trim_end_matches('/'))
}

pub(crate) fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, NON_ALPHANUMERIC).to_string()
}
