use crate::application::errors::BotError;
use crate::application::messaging::{CommandDispatcher, MessageParser};
use crate::domain::entities::{Content, Message, Reply, TextFormat};
use crate::domain::traits::Bot;
use crate::strings::messages;

/// Service for processing messages: dispatch, then deliver every reply in order
pub struct MessageService<B: Bot> {
    bot: B,
    parser: MessageParser,
    dispatcher: CommandDispatcher,
}

impl<B: Bot> MessageService<B> {
    pub fn new(bot: B, parser: MessageParser, dispatcher: CommandDispatcher) -> Self {
        Self { bot, parser, dispatcher }
    }

    pub fn bot(&self) -> &B {
        &self.bot
    }

    pub fn parser(&self) -> &MessageParser {
        &self.parser
    }

    /// Process an incoming message; only transport errors are returned
    pub async fn process(&self, message: Message) -> Result<(), BotError> {
        tracing::debug!(chat_id = %message.chat_id, content = %message.content.preview(), "Processing message");

        if let Content::CallbackData { callback_id, .. } = &message.content {
            if let Err(e) = self.bot.answer_callback(callback_id, None).await {
                tracing::warn!(chat_id = %message.chat_id, error = %e, "Failed to answer callback");
            }
        }

        let replies = self.dispatcher.dispatch(&self.bot, &message).await;
        for reply in replies {
            self.deliver(&message.chat_id, reply).await?;
        }

        Ok(())
    }

    /// Send a single reply
    pub async fn deliver(&self, chat_id: &str, reply: Reply) -> Result<String, BotError> {
        match reply {
            Reply::Text { text, format } => self.send_text(chat_id, &text, format).await,
            Reply::Keyboard { text, buttons } => self.bot.send_with_keyboard(chat_id, &text, buttons).await,
            Reply::Photo { bytes, caption } => self.send_photo(chat_id, bytes, caption.as_deref()).await,
        }
    }

    /// Send a photo, telling the user when Telegram refuses it
    async fn send_photo(&self, chat_id: &str, bytes: Vec<u8>, caption: Option<&str>) -> Result<String, BotError> {
        match self.bot.send_photo(chat_id, bytes, caption).await {
            Ok(id) => Ok(id),
            Err(e) => {
                tracing::warn!(chat_id, error = %e, "Photo rejected, sending notice");
                self.send_text(chat_id, messages::IMAGE_UNAVAILABLE, TextFormat::Plain).await
            }
        }
    }

    /// Send formatted text, falling back to plain text when Telegram rejects the markup
    async fn send_text(&self, chat_id: &str, text: &str, format: TextFormat) -> Result<String, BotError> {
        match self.bot.send_message(chat_id, text, format).await {
            Err(e) if format == TextFormat::Html && e.is_bad_request() => {
                tracing::warn!(chat_id, error = %e, "HTML rejected, using plain text");
                self.bot.send_message(chat_id, text, TextFormat::Plain).await
            }
            result => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ChatAction, Command, CommandKind};
    use crate::domain::traits::{BotInfo, KeyboardButton};
    use crate::infrastructure::config::Config;
    use crate::infrastructure::vendors::VendorClient;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    enum Sent {
        Text(String, TextFormat),
        Keyboard(String),
        Photo(usize),
        Answer(String),
    }

    #[derive(Default)]
    struct RecordingBot {
        sent: Mutex<Vec<Sent>>,
        reject_html: bool,
        reject_photos: bool,
    }

    impl RecordingBot {
        fn sent(&self) -> Vec<Sent> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Bot for RecordingBot {
        async fn send_message(&self, _chat_id: &str, text: &str, format: TextFormat) -> Result<String, BotError> {
            if self.reject_html && format == TextFormat::Html {
                return Err(BotError::Api { status: 400, description: "can't parse entities".into() });
            }
            self.sent.lock().unwrap().push(Sent::Text(text.to_string(), format));
            Ok("1".into())
        }

        async fn send_with_keyboard(&self, _chat_id: &str, text: &str, _buttons: Vec<Vec<KeyboardButton>>) -> Result<String, BotError> {
            self.sent.lock().unwrap().push(Sent::Keyboard(text.to_string()));
            Ok("2".into())
        }

        async fn send_photo(&self, _chat_id: &str, image: Vec<u8>, _caption: Option<&str>) -> Result<String, BotError> {
            if self.reject_photos {
                return Err(BotError::Api { status: 400, description: "message caption is too long".into() });
            }
            self.sent.lock().unwrap().push(Sent::Photo(image.len()));
            Ok("3".into())
        }

        async fn send_chat_action(&self, _chat_id: &str, _action: ChatAction) -> Result<(), BotError> {
            Ok(())
        }

        async fn answer_callback(&self, callback_id: &str, _text: Option<&str>) -> Result<(), BotError> {
            self.sent.lock().unwrap().push(Sent::Answer(callback_id.to_string()));
            Ok(())
        }

        fn bot_info(&self) -> BotInfo {
            BotInfo { id: "1".into(), name: "Buddy".into(), username: "buddy_bot".into() }
        }
    }

    fn service(bot: RecordingBot) -> MessageService<RecordingBot> {
        let config = Arc::new(Config::default().with_secrets(Some("t".into()), |_| None).unwrap());
        let vendors = VendorClient::new(config.clone()).unwrap();
        MessageService::new(bot, MessageParser::default(), CommandDispatcher::new(config, vendors))
    }

    #[tokio::test]
    async fn callbacks_are_answered_before_replying() {
        let service = service(RecordingBot::default());
        let message = service.parser().parse_callback("42", "cb-9", "image", None);
        service.process(message).await.unwrap();

        assert_eq!(
            service.bot().sent(),
            vec![
                Sent::Answer("cb-9".into()),
                Sent::Text(messages::IMAGE_USAGE.into(), TextFormat::Plain),
            ]
        );
    }

    #[tokio::test]
    async fn start_sends_keyboard() {
        let service = service(RecordingBot::default());
        let message = Message::from_command("42", Command::new(CommandKind::Start, ""));
        service.process(message).await.unwrap();

        let sent = service.bot().sent();
        assert_eq!(sent.len(), 1);
        assert!(matches!(&sent[0], Sent::Keyboard(text) if text.contains("there")));
    }

    #[tokio::test]
    async fn rejected_html_is_resent_as_plain_text() {
        let service = service(RecordingBot { reject_html: true, ..Default::default() });
        let message = Message::from_command("42", Command::new(CommandKind::Contact, ""));
        service.process(message).await.unwrap();

        let sent = service.bot().sent();
        assert_eq!(sent.len(), 1);
        assert!(matches!(&sent[0], Sent::Text(text, TextFormat::Plain) if text.contains("Contact Information")));
    }

    #[tokio::test]
    async fn photos_are_delivered_as_attachments() {
        let service = service(RecordingBot::default());
        let id = service.deliver("42", Reply::Photo { bytes: vec![1, 2, 3], caption: None }).await.unwrap();
        assert_eq!(id, "3");
        assert_eq!(service.bot().sent(), vec![Sent::Photo(3)]);
    }

    #[tokio::test]
    async fn rejected_photo_falls_back_to_notice() {
        let service = service(RecordingBot { reject_photos: true, ..Default::default() });
        let reply = Reply::Photo { bytes: vec![1, 2, 3], caption: Some(messages::image_caption(&"🎮".repeat(1200))) };
        service.deliver("42", reply).await.unwrap();

        assert_eq!(
            service.bot().sent(),
            vec![Sent::Text(messages::IMAGE_UNAVAILABLE.into(), TextFormat::Plain)]
        );
    }
}
