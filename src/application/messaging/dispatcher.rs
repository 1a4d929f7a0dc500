//! Command dispatcher - routes commands to vendor calls and renders replies

use std::sync::Arc;

use super::format::{self, MAX_MESSAGE_CHARS};
use crate::application::errors::{Capability, VendorError};
use crate::domain::entities::{
    ChatAction, Command, CommandKind, Content, Message, Reply, TextFormat, VendorResponse,
};
use crate::domain::traits::Bot;
use crate::infrastructure::config::Config;
use crate::infrastructure::vendors::VendorClient;
use crate::strings::{help, messages};

/// Words that make free text count as a greeting
const GREETING_KEYWORDS: [&str; 4] = ["hi", "hello", "hey", "start"];

/// Maps commands to at most one vendor call each
pub struct CommandDispatcher {
    config: Arc<Config>,
    vendors: VendorClient,
}

impl CommandDispatcher {
    pub fn new(config: Arc<Config>, vendors: VendorClient) -> Self {
        Self { config, vendors }
    }

    /// Produce the replies for one inbound message
    ///
    /// Presence indicators are sent through `bot` before a vendor call starts;
    /// the replies themselves are returned for the caller to deliver in order.
    pub async fn dispatch<B: Bot + ?Sized>(&self, bot: &B, message: &Message) -> Vec<Reply> {
        let chat_id = message.chat_id.as_str();

        match &message.content {
            Content::Command(command) => self.handle_command(bot, chat_id, message, command).await,
            Content::UnknownCommand(name) => {
                tracing::debug!(chat_id, command = %name, "Unknown command");
                vec![Reply::plain(messages::COMMAND_HINT)]
            }
            Content::Text(text) => vec![Self::fallback(text)],
            Content::CallbackData { data, .. } => self.handle_callback(bot, chat_id, message, data).await,
            Content::Empty => Vec::new(),
        }
    }

    async fn handle_command<B: Bot + ?Sized>(
        &self,
        bot: &B,
        chat_id: &str,
        message: &Message,
        command: &Command,
    ) -> Vec<Reply> {
        tracing::info!(chat_id, command = command.kind.as_str(), "Handling command");

        match command.kind {
            CommandKind::Start | CommandKind::Help => {
                let name = message.sender.as_ref().map(|u| u.greeting_name()).unwrap_or("there");
                vec![Reply::Keyboard {
                    text: help::welcome(name),
                    buttons: help::welcome_keyboard(),
                }]
            }
            CommandKind::Contact => vec![Reply::html(format::format_contact(&self.config.contact))],
            CommandKind::Ask => {
                let response = self.ask(bot, chat_id, command).await.into();
                self.render(chat_id, response, TextFormat::Plain, None)
            }
            CommandKind::Price => {
                let response = self.price(bot, chat_id, command).await.into();
                self.render(chat_id, response, TextFormat::Html, None)
            }
            CommandKind::News => {
                let response = self.news(bot, chat_id).await.into();
                self.render(chat_id, response, TextFormat::Html, None)
            }
            CommandKind::Image => {
                let caption = messages::image_caption(&command.raw_args);
                let response = self.image(bot, chat_id, command).await.into();
                self.render(chat_id, response, TextFormat::Plain, Some(caption))
            }
        }
    }

    async fn ask<B: Bot + ?Sized>(&self, bot: &B, chat_id: &str, command: &Command) -> Result<String, VendorError> {
        Self::require_args(command, Capability::Chat)?;
        let key = self.require_key(Capability::Chat)?;

        Self::signal(bot, chat_id, ChatAction::Typing).await;
        self.vendors.chat_completion(key, &command.raw_args).await
    }

    async fn price<B: Bot + ?Sized>(&self, bot: &B, chat_id: &str, command: &Command) -> Result<String, VendorError> {
        Self::require_args(command, Capability::Price)?;
        let symbol = command
            .first_arg()
            .map(str::to_lowercase)
            .ok_or(VendorError::InputInvalid(Capability::Price))?;

        Self::signal(bot, chat_id, ChatAction::Typing).await;
        let quote = self.vendors.price_lookup(&symbol).await?;
        Ok(format::format_price(&quote))
    }

    async fn news<B: Bot + ?Sized>(&self, bot: &B, chat_id: &str) -> Result<String, VendorError> {
        let key = self.require_key(Capability::News)?;

        Self::signal(bot, chat_id, ChatAction::Typing).await;
        let headlines = self.vendors.latest_headlines(key).await?;
        Ok(format::format_news(&headlines))
    }

    async fn image<B: Bot + ?Sized>(&self, bot: &B, chat_id: &str, command: &Command) -> Result<Vec<u8>, VendorError> {
        Self::require_args(command, Capability::Image)?;
        let key = self.require_key(Capability::Image)?;

        Self::signal(bot, chat_id, ChatAction::UploadPhoto).await;
        self.vendors.generate_image(key, &command.raw_args).await
    }

    async fn handle_callback<B: Bot + ?Sized>(
        &self,
        bot: &B,
        chat_id: &str,
        message: &Message,
        data: &str,
    ) -> Vec<Reply> {
        match data {
            help::callbacks::PRICES => vec![Reply::plain(messages::PRICE_USAGE)],
            help::callbacks::IMAGE => vec![Reply::plain(messages::IMAGE_USAGE)],
            help::callbacks::NEWS => {
                let news = Command::new(CommandKind::News, "");
                self.handle_command(bot, chat_id, message, &news).await
            }
            help::callbacks::CONTACT => vec![Reply::html(format::format_contact(&self.config.contact))],
            other => {
                tracing::debug!(chat_id, data = other, "Ignoring unknown callback");
                Vec::new()
            }
        }
    }

    fn require_args(command: &Command, capability: Capability) -> Result<(), VendorError> {
        if command.kind.requires_argument() && !command.has_args() {
            return Err(VendorError::InputInvalid(capability));
        }
        Ok(())
    }

    fn require_key(&self, capability: Capability) -> Result<&str, VendorError> {
        self.config
            .api_key(capability)
            .ok_or(VendorError::ConfigurationMissing(capability))
    }

    /// Presence indicators are advisory, failures are only logged
    async fn signal<B: Bot + ?Sized>(bot: &B, chat_id: &str, action: ChatAction) {
        if let Err(e) = bot.send_chat_action(chat_id, action).await {
            tracing::debug!(chat_id, action = action.as_str(), error = %e, "Chat action failed");
        }
    }

    /// Turn a vendor result into outbound replies
    fn render(&self, chat_id: &str, response: VendorResponse, format: TextFormat, caption: Option<String>) -> Vec<Reply> {
        match response {
            VendorResponse::TextReply(text) => format::split_message(&text, MAX_MESSAGE_CHARS)
                .into_iter()
                .map(|chunk| Reply::Text { text: chunk, format })
                .collect(),
            VendorResponse::ImageReply(bytes) => vec![Reply::Photo { bytes, caption }],
            VendorResponse::Failure(e) => {
                match &e {
                    VendorError::Unavailable { capability, reason } => {
                        tracing::warn!(chat_id, operation = %capability, reason = %reason, "Vendor call failed");
                    }
                    other => {
                        tracing::info!(chat_id, operation = %other.capability(), outcome = %other, "Command not completed");
                    }
                }
                vec![Reply::plain(e.user_message())]
            }
        }
    }

    /// Reply to free text that is not a command
    pub fn fallback(text: &str) -> Reply {
        let lower = text.to_lowercase();
        if GREETING_KEYWORDS.iter().any(|k| lower.contains(k)) {
            Reply::plain(messages::GREETING)
        } else {
            Reply::plain(messages::COMMAND_HINT)
        }
    }
}
