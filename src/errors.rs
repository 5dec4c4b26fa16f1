use thiserror::Error;

/// Failure of a single backend call. Every variant carries enough text for a
/// log line; screens never show these directly, they show their own fallback
/// strings instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    // ── Transport ────────────────────────────────────────────────────────────
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Server error: {status}")]
    Status { status: u16 },

    // ── Payload ──────────────────────────────────────────────────────────────
    #[error("Serialize error: {message}")]
    Encode { message: String },

    #[error("Parse error: {message}")]
    Decode { message: String },
}

impl ApiError {
    pub fn network(message: impl ToString) -> Self {
        ApiError::Network { message: message.to_string() }
    }

    pub fn decode(message: impl ToString) -> Self {
        ApiError::Decode { message: message.to_string() }
    }

    pub fn encode(message: impl ToString) -> Self {
        ApiError::Encode { message: message.to_string() }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network { .. })
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

/// Start-up and configuration errors for the native binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Setting '{name}' has an invalid value '{value}': {reason}")]
    InvalidSetting { name: String, value: String, reason: String },

    #[error("HTTP client could not be built: {0}")]
    Client(String),
}

impl AppError {
    pub fn invalid_setting(
        name: impl Into<String>,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        AppError::InvalidSetting {
            name: name.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(self, AppError::InvalidSetting { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_only_reported_for_http_failures() {
        assert_eq!(ApiError::Status { status: 503 }.status(), Some(503));
        assert_eq!(ApiError::network("refused").status(), None);
        assert!(ApiError::Status { status: 404 }.is_not_found());
        assert!(!ApiError::decode("eof").is_not_found());
    }
}
