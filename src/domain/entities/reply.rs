//! Outbound replies and the vendor result they are rendered from

use crate::application::errors::VendorError;
use crate::domain::traits::KeyboardButton;

/// Markup applied to an outbound text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Plain,
    /// Telegram HTML subset; link previews are disabled
    Html,
}

impl TextFormat {
    pub fn parse_mode(&self) -> Option<&'static str> {
        match self {
            TextFormat::Plain => None,
            TextFormat::Html => Some("HTML"),
        }
    }
}

/// Transient presence indicator shown while a vendor call is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAction {
    Typing,
    UploadPhoto,
}

impl ChatAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatAction::Typing => "typing",
            ChatAction::UploadPhoto => "upload_photo",
        }
    }
}

/// One outbound message
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text { text: String, format: TextFormat },
    Keyboard { text: String, buttons: Vec<Vec<KeyboardButton>> },
    Photo { bytes: Vec<u8>, caption: Option<String> },
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Reply::Text { text: text.into(), format: TextFormat::Plain }
    }

    pub fn html(text: impl Into<String>) -> Self {
        Reply::Text { text: text.into(), format: TextFormat::Html }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Reply::Text { text, .. } | Reply::Keyboard { text, .. } => Some(text),
            Reply::Photo { caption, .. } => caption.as_deref(),
        }
    }
}

/// Result of at most one vendor call, before it is rendered for the chat
#[derive(Debug)]
pub enum VendorResponse {
    TextReply(String),
    ImageReply(Vec<u8>),
    Failure(VendorError),
}

impl<T: Into<VendorResponse>> From<Result<T, VendorError>> for VendorResponse {
    fn from(result: Result<T, VendorError>) -> Self {
        match result {
            Ok(value) => value.into(),
            Err(e) => VendorResponse::Failure(e),
        }
    }
}

impl From<String> for VendorResponse {
    fn from(text: String) -> Self {
        VendorResponse::TextReply(text)
    }
}

impl From<Vec<u8>> for VendorResponse {
    fn from(bytes: Vec<u8>) -> Self {
        VendorResponse::ImageReply(bytes)
    }
}
