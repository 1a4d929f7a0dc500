//! Message parser - Parses raw text into structured messages

use crate::domain::entities::{Command, CommandKind, Content, Message, User};

/// Parses incoming text into Message objects
#[derive(Debug, Clone, Default)]
pub struct MessageParser {
    /// Our own username, used to ignore `/cmd@otherbot` in groups
    bot_username: Option<String>,
}

impl MessageParser {
    pub fn new(bot_username: Option<String>) -> Self {
        Self {
            bot_username: bot_username.map(|u| u.trim_start_matches('@').to_string()),
        }
    }

    /// Parse a text message
    pub fn parse(&self, chat_id: impl Into<String>, text: &str, sender: Option<User>) -> Message {
        let trimmed = text.trim();

        let content = if trimmed.is_empty() {
            Content::Empty
        } else if let Some(cmd_text) = trimmed.strip_prefix('/') {
            self.parse_command(cmd_text)
        } else {
            Content::Text(trimmed.to_string())
        };

        Message::new(chat_id, content).with_sender_opt(sender)
    }

    /// Parse what follows the leading slash
    fn parse_command(&self, cmd_text: &str) -> Content {
        // Split command and arguments, keeping the argument text as typed
        let (head, rest) = cmd_text
            .split_once(char::is_whitespace)
            .unwrap_or((cmd_text, ""));

        let (name, target) = match head.split_once('@') {
            Some((name, target)) => (name, Some(target)),
            None => (head, None),
        };

        if let (Some(target), Some(ours)) = (target, &self.bot_username) {
            if !target.eq_ignore_ascii_case(ours) {
                return Content::Empty;
            }
        }

        match CommandKind::from_name(name) {
            Some(kind) => Content::Command(Command::new(kind, rest)),
            None => Content::UnknownCommand(name.to_string()),
        }
    }

    /// Parse a callback query (inline button press)
    pub fn parse_callback(
        &self,
        chat_id: impl Into<String>,
        callback_id: impl Into<String>,
        data: impl Into<String>,
        user: Option<User>,
    ) -> Message {
        Message::new(
            chat_id,
            Content::CallbackData {
                callback_id: callback_id.into(),
                data: data.into(),
            },
        )
        .with_sender_opt(user)
    }
}
