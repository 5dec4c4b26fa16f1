#[cfg(test)]
#[path = "safety_test.rs"]
mod safety_test;

use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::api::TravelApi;
use crate::errors::ApiError;
use crate::models::{AlertReceipt, AlertRequest, Coordinates, EmergencyContact, EmergencyNumbers};

pub const LOCATION_UNKNOWN: &str = "Unknown";
pub const LOCATION_DENIED: &str = "Location access denied.";
pub const ALERT_SENT: &str = "Emergency alert sent to your contacts!";
pub const ALERT_FAILED: &str = "Failed to send emergency alert.";
pub const DEFAULT_ALERT_MESSAGE: &str = "I need help! Please contact me as soon as possible.";

/// How long the alert banner stays up unless dismissed.
pub const ALERT_BANNER_DURATION: Duration = Duration::from_secs(5);

/// Why no position is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationError {
    PermissionDenied,
    Unavailable,
    Timeout,
    Unsupported,
}

impl GeolocationError {
    /// Maps the W3C `GeolocationPositionError.code`.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => GeolocationError::PermissionDenied,
            3 => GeolocationError::Timeout,
            _ => GeolocationError::Unavailable,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            GeolocationError::PermissionDenied => LOCATION_DENIED,
            GeolocationError::Unavailable => "Location unavailable.",
            GeolocationError::Timeout => "Location request timed out.",
            GeolocationError::Unsupported => "Geolocation is not supported on this device.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertStatus {
    Idle,
    Sending,
    Sent,
    Failed,
}

/// The alert banner. `seq` tells a stale hide timer apart from the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertBanner {
    pub seq: u64,
    pub text: &'static str,
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SafetyPanel {
    pub position: Option<Coordinates>,
    pub location_text: String,
    pub country: Option<String>,
    pub contacts: Vec<EmergencyContact>,
    pub alert: AlertStatus,
    pub banner: Option<AlertBanner>,
    banner_seq: u64,
}

impl Default for SafetyPanel {
    fn default() -> Self {
        Self {
            position: None,
            location_text: LOCATION_UNKNOWN.to_string(),
            country: None,
            contacts: Vec::new(),
            alert: AlertStatus::Idle,
            banner: None,
            banner_seq: 0,
        }
    }
}

impl SafetyPanel {
    /// Takes the geolocation outcome. Returns the position to look up
    /// emergency numbers for.
    pub fn on_position(&mut self, result: Result<Coordinates, GeolocationError>) -> Option<Coordinates> {
        match result {
            Ok(position) => {
                self.position = Some(position);
                self.location_text = position.to_string();
                Some(position)
            }
            Err(e) => {
                warn!("Geolocation failed: {e:?}");
                self.position = None;
                self.location_text = e.message().to_string();
                self.country = None;
                self.contacts.clear();
                None
            }
        }
    }

    pub fn apply_numbers(&mut self, result: Result<EmergencyNumbers, ApiError>) {
        match result {
            Ok(numbers) => {
                info!("Emergency numbers resolved for {}", numbers.country);
                self.contacts = numbers.contacts();
                if let Some(position) = self.position {
                    self.location_text = format!("{} ({position})", numbers.country);
                }
                self.country = Some(numbers.country);
            }
            Err(e) => {
                error!("Error fetching emergency numbers: {e}");
                self.contacts.clear();
            }
        }
    }

    /// The trigger is usable with a known position and no alert in flight.
    pub fn can_send_alert(&self) -> bool {
        self.position.is_some() && self.alert != AlertStatus::Sending
    }

    pub fn begin_alert(&mut self, message: &str) -> Option<AlertRequest> {
        if !self.can_send_alert() {
            return None;
        }
        let position = self.position?;
        self.alert = AlertStatus::Sending;
        Some(AlertRequest {
            latitude: position.latitude,
            longitude: position.longitude,
            message: message.to_string(),
        })
    }

    /// Records the alert outcome and raises the banner. Returns the banner's
    /// sequence number for [`SafetyPanel::expire_banner`].
    pub fn finish_alert(&mut self, result: Result<AlertReceipt, ApiError>) -> u64 {
        self.banner_seq += 1;
        let (status, text, success) = match result {
            Ok(receipt) => {
                if let Some(message) = &receipt.message {
                    info!("Alert acknowledged: {message}");
                }
                if let Some(country) = &receipt.country {
                    info!("Alert routed in {country}");
                }
                if let Some(numbers) = &receipt.emergency_numbers {
                    debug!(
                        "Alert numbers: police {}, ambulance {}, fire {}",
                        numbers.police, numbers.ambulance, numbers.fire
                    );
                }
                (AlertStatus::Sent, ALERT_SENT, true)
            }
            Err(e) => {
                error!("Error sending emergency alert: {e}");
                (AlertStatus::Failed, ALERT_FAILED, false)
            }
        };
        self.alert = status;
        self.banner = Some(AlertBanner { seq: self.banner_seq, text, success });
        self.banner_seq
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Hides the banner raised as `seq`, leaving any newer banner alone.
    pub fn expire_banner(&mut self, seq: u64) {
        if self.banner.as_ref().is_some_and(|b| b.seq == seq) {
            self.banner = None;
        }
    }

    pub async fn locate<A: TravelApi>(&mut self, api: &A, position: Result<Coordinates, GeolocationError>) {
        if let Some(position) = self.on_position(position) {
            let result = api.emergency_numbers(position).await;
            self.apply_numbers(result);
        }
    }

    pub async fn send_alert<A: TravelApi>(&mut self, api: &A, message: &str) -> Option<u64> {
        let request = self.begin_alert(message)?;
        let result = api.send_alert(&request).await;
        Some(self.finish_alert(result))
    }
}
