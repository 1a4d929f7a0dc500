use async_trait::async_trait;
use crate::domain::entities::{ChatAction, TextFormat};
use crate::application::errors::BotError;

/// Bot trait - abstraction for the messaging transport
#[async_trait]
pub trait Bot: Send + Sync {
    /// Send a text message to a chat, returning the message id
    async fn send_message(&self, chat_id: &str, text: &str, format: TextFormat) -> Result<String, BotError>;

    /// Send a message with inline keyboard
    async fn send_with_keyboard(&self, chat_id: &str, text: &str, buttons: Vec<Vec<KeyboardButton>>) -> Result<String, BotError>;

    /// Send an image as a photo attachment
    async fn send_photo(&self, chat_id: &str, image: Vec<u8>, caption: Option<&str>) -> Result<String, BotError>;

    /// Show a presence indicator (typing, uploading photo)
    async fn send_chat_action(&self, chat_id: &str, action: ChatAction) -> Result<(), BotError>;

    /// Answer a callback query
    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<(), BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Keyboard button for inline keyboards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardButton {
    pub text: String,
    pub callback_data: Option<String>,
    pub url: Option<String>,
}

impl KeyboardButton {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: None,
            url: None,
        }
    }

    pub fn with_callback(mut self, data: impl Into<String>) -> Self {
        self.callback_data = Some(data.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
    pub username: String,
}
