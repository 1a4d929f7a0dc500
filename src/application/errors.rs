//! Application layer errors

use std::fmt;
use thiserror::Error;

use crate::strings::messages;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Telegram API error: {status}: {description}")]
    Api { status: u16, description: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BotError {
    /// Telegram rejected the request itself (bad markup, bad chat), as opposed to a transport failure
    pub fn is_bad_request(&self) -> bool {
        matches!(self, BotError::Api { status: 400, .. })
    }
}

/// Vendor capability behind a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Chat,
    Price,
    News,
    Image,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Chat => "chat",
            Capability::Price => "price",
            Capability::News => "news",
            Capability::Image => "image",
        }
    }

    /// Environment variable holding the API key, if the capability needs one
    pub fn key_var(&self) -> Option<&'static str> {
        match self {
            Capability::Chat => Some("TOGETHER_API_KEY"),
            Capability::Price => None,
            Capability::News => Some("NEWS_API_KEY"),
            Capability::Image => Some("IMAGE_API_KEY"),
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vendor call errors, each mapped to one user-visible reply
#[derive(Error, Debug)]
pub enum VendorError {
    #[error("{0} API key is not configured")]
    ConfigurationMissing(Capability),

    #[error("{capability} vendor unavailable: {reason}")]
    Unavailable { capability: Capability, reason: String },

    #[error("{capability} vendor has no data for {detail}")]
    DataMiss { capability: Capability, detail: String },

    #[error("missing argument for {0}")]
    InputInvalid(Capability),
}

impl VendorError {
    pub fn unavailable(capability: Capability, reason: impl fmt::Display) -> Self {
        VendorError::Unavailable { capability, reason: reason.to_string() }
    }

    pub fn data_miss(capability: Capability, detail: impl Into<String>) -> Self {
        VendorError::DataMiss { capability, detail: detail.into() }
    }

    pub fn capability(&self) -> Capability {
        match self {
            VendorError::ConfigurationMissing(c) | VendorError::InputInvalid(c) => *c,
            VendorError::Unavailable { capability, .. } | VendorError::DataMiss { capability, .. } => *capability,
        }
    }

    /// Text shown to the user in place of the failed result
    pub fn user_message(&self) -> String {
        match self {
            VendorError::ConfigurationMissing(c) => messages::not_configured(*c).to_string(),
            VendorError::InputInvalid(c) => messages::usage_hint(*c).to_string(),
            VendorError::Unavailable { capability, .. } => messages::unavailable(*capability).to_string(),
            VendorError::DataMiss { capability: Capability::Price, detail } => messages::price_not_found(detail),
            VendorError::DataMiss { capability: Capability::News, .. } => messages::NO_NEWS.to_string(),
            VendorError::DataMiss { capability, .. } => messages::unavailable(*capability).to_string(),
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
