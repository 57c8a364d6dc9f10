//! Typed failures for the forecast client and the preference store.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Provider error {code}: {message}")]
    Provider { code: i64, message: String },

    #[error("Unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Forecast days must be between 1 and 14, got {0}")]
    InvalidDays(u8),
}

impl FetchError {
    /// Short text suitable for a status line.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => "Network error. Check your connection.".to_string(),
            Self::Status { status, .. } => format!("Weather service returned {status}."),
            Self::Provider { message, .. } => message.clone(),
            Self::Decode(_) => "Weather service sent an unexpected response.".to_string(),
            Self::InvalidDays(days) => format!("Cannot request {days} forecast days."),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Preference file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preference file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Could not determine platform data directory")]
    NoDataDir,
}
