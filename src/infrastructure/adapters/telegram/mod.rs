//! Telegram adapter

pub mod polling;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::errors::BotError;
use crate::application::messaging::MessageParser;
use crate::domain::entities::{self, ChatAction, TextFormat};
use crate::domain::traits::{Bot, BotInfo, KeyboardButton};

/// Telegram update type
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

impl User {
    fn to_sender(&self) -> entities::User {
        entities::User {
            id: self.id.to_string(),
            username: self.username.clone(),
            first_name: self.first_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<Message>,
    pub data: Option<String>,
}

/// Envelope around every Bot API result
#[derive(Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
    error_code: Option<u16>,
}

#[derive(Deserialize)]
struct SentMessage {
    message_id: i64,
}

#[derive(Serialize)]
struct InlineKeyboardButton {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    callback_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

#[derive(Serialize)]
struct InlineKeyboardMarkup {
    inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

/// Telegram bot adapter
pub struct TelegramAdapter {
    token: String,
    api_base: String,
    client: Client,
    info: BotInfo,
}

impl TelegramAdapter {
    /// `timeout` bounds a whole request and must exceed the long polling timeout
    pub fn new(token: impl Into<String>, api_base: impl Into<String>, timeout: Duration) -> Result<Self, BotError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BotError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            token: token.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            client,
            info: BotInfo {
                id: "unknown".to_string(),
                name: "buddy-bot".to_string(),
                username: "buddy_bot".to_string(),
            },
        })
    }

    /// Get the API URL for a method
    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    /// Call a Bot API method with a JSON body
    async fn call<T: DeserializeOwned>(&self, method: &str, body: &impl Serialize) -> Result<T, BotError> {
        let response = self.client
            .post(self.api_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        Self::read_response(method, response).await
    }

    /// Unwrap the `{ok, result}` envelope; `ok: false` becomes an API error
    async fn read_response<T: DeserializeOwned>(method: &str, response: reqwest::Response) -> Result<T, BotError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        let envelope: ApiResponse<T> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => return Err(BotError::Parse(format!("{}: {}", method, e))),
            Err(_) => {
                return Err(BotError::Api {
                    status: status.as_u16(),
                    description: body.chars().take(200).collect(),
                })
            }
        };

        match envelope {
            ApiResponse { ok: true, result: Some(result), .. } => Ok(result),
            ApiResponse { description, error_code, .. } => Err(BotError::Api {
                status: error_code.unwrap_or(status.as_u16()),
                description: description.unwrap_or_else(|| format!("{} failed", method)),
            }),
        }
    }

    /// Fetch bot info from Telegram API
    pub async fn fetch_bot_info(&mut self) -> Result<(), BotError> {
        #[derive(Deserialize)]
        struct BotInfoResponse {
            id: i64,
            first_name: String,
            username: String,
        }

        let me: BotInfoResponse = self.call("getMe", &serde_json::json!({})).await?;
        self.info = BotInfo {
            id: me.id.to_string(),
            name: me.first_name,
            username: me.username,
        };

        Ok(())
    }

    /// Get updates from Telegram using getUpdates API
    pub async fn get_updates(&self, offset: i64, timeout: u64) -> Result<Vec<Update>, BotError> {
        #[derive(Serialize)]
        struct GetUpdatesRequest {
            offset: i64,
            timeout: u64,
            allowed_updates: [&'static str; 2],
        }

        let request = GetUpdatesRequest {
            offset,
            timeout,
            allowed_updates: ["message", "callback_query"],
        };

        self.call("getUpdates", &request).await
    }

    /// Get the next update offset
    pub fn get_next_offset(updates: &[Update], current: i64) -> i64 {
        updates.iter()
            .map(|u| u.update_id + 1)
            .max()
            .unwrap_or(current)
            .max(current)
    }

    /// Register bot commands with Telegram
    pub async fn register_commands(&self, menu: &[(String, String)]) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct BotCommand<'a> {
            command: &'a str,
            description: &'a str,
        }

        #[derive(Serialize)]
        struct SetMyCommandsRequest<'a> {
            commands: Vec<BotCommand<'a>>,
        }

        let request = SetMyCommandsRequest {
            commands: menu
                .iter()
                .map(|(command, description)| BotCommand { command, description })
                .collect(),
        };

        let _: bool = self.call("setMyCommands", &request).await?;
        tracing::info!(count = menu.len(), "Registered bot commands with Telegram");
        Ok(())
    }

    /// Turn an update into an inbound message, if it carries anything we handle
    pub fn inbound_message(update: &Update, parser: &MessageParser) -> Option<entities::Message> {
        if let Some(msg) = &update.message {
            let text = msg.text.as_deref()?;
            let sender = msg.from.as_ref().map(User::to_sender);
            return Some(parser.parse(msg.chat.id.to_string(), text, sender));
        }

        let cb = update.callback_query.as_ref()?;
        // Private chats share the user's id when the original message is gone
        let chat_id = cb
            .message
            .as_ref()
            .map(|m| m.chat.id)
            .unwrap_or(cb.from.id);
        Some(parser.parse_callback(
            chat_id.to_string(),
            cb.id.as_str(),
            cb.data.clone().unwrap_or_default(),
            Some(cb.from.to_sender()),
        ))
    }
}

#[async_trait]
impl Bot for TelegramAdapter {
    async fn send_message(&self, chat_id: &str, text: &str, format: TextFormat) -> Result<String, BotError> {
        #[derive(Serialize)]
        struct SendMessageRequest<'a> {
            chat_id: &'a str,
            text: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            parse_mode: Option<&'static str>,
            #[serde(skip_serializing_if = "std::ops::Not::not")]
            disable_web_page_preview: bool,
        }

        tracing::debug!(chat_id, chars = text.chars().count(), "Sending message");

        let request = SendMessageRequest {
            chat_id,
            text,
            parse_mode: format.parse_mode(),
            disable_web_page_preview: format == TextFormat::Html,
        };

        let sent: SentMessage = self.call("sendMessage", &request).await?;
        Ok(sent.message_id.to_string())
    }

    async fn send_with_keyboard(&self, chat_id: &str, text: &str, buttons: Vec<Vec<KeyboardButton>>) -> Result<String, BotError> {
        #[derive(Serialize)]
        struct SendMessageRequest<'a> {
            chat_id: &'a str,
            text: &'a str,
            reply_markup: InlineKeyboardMarkup,
        }

        let inline_keyboard = buttons
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|btn| InlineKeyboardButton {
                        text: btn.text,
                        callback_data: btn.callback_data,
                        url: btn.url,
                    })
                    .collect()
            })
            .collect();

        let request = SendMessageRequest {
            chat_id,
            text,
            reply_markup: InlineKeyboardMarkup { inline_keyboard },
        };

        let sent: SentMessage = self.call("sendMessage", &request).await?;
        Ok(sent.message_id.to_string())
    }

    async fn send_photo(&self, chat_id: &str, image: Vec<u8>, caption: Option<&str>) -> Result<String, BotError> {
        let part = Part::bytes(image)
            .file_name("image.png")
            .mime_str("image/png")
            .map_err(|e| BotError::Internal(e.to_string()))?;

        let mut form = Form::new()
            .text("chat_id", chat_id.to_string())
            .part("photo", part);
        if let Some(caption) = caption {
            form = form.text("caption", caption.to_string());
        }

        let response = self.client
            .post(self.api_url("sendPhoto"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        let sent: SentMessage = Self::read_response("sendPhoto", response).await?;
        Ok(sent.message_id.to_string())
    }

    async fn send_chat_action(&self, chat_id: &str, action: ChatAction) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct SendChatActionRequest<'a> {
            chat_id: &'a str,
            action: &'static str,
        }

        let request = SendChatActionRequest { chat_id, action: action.as_str() };
        let _: bool = self.call("sendChatAction", &request).await?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct AnswerRequest<'a> {
            callback_query_id: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            text: Option<&'a str>,
        }

        let request = AnswerRequest { callback_query_id: callback_id, text };
        let _: bool = self.call("answerCallbackQuery", &request).await?;
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
